//! Media type → format token registries.

use crate::GatewayError;
use fxhash::FxHashMap;
use std::collections::BTreeMap;

/// An immutable mapping from media type to the engine's format token.
///
/// Lookups are exact: `application/json` and `Application/JSON` are different keys.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: FxHashMap<String, String>,
}

impl FormatRegistry {
    /// Builds a registry from configured `(media type, token)` pairs.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfiguration`] when a media type is not
    /// `type/subtype` shaped, contains characters that cannot appear in a header value,
    /// or maps to an empty token.
    pub fn from_config(formats: &BTreeMap<String, String>) -> Result<Self, GatewayError> {
        let mut registry = FxHashMap::default();

        for (media_type, token) in formats {
            if !is_media_type(media_type) {
                return Err(GatewayError::InvalidConfiguration {
                    message: format!("'{media_type}' is not a valid media type").into(),
                    context: None,
                });
            }
            if token.trim().is_empty() {
                return Err(GatewayError::InvalidConfiguration {
                    message: format!("'{media_type}' maps to an empty format token").into(),
                    context: None,
                });
            }
            registry.insert(media_type.clone(), token.clone());
        }

        Ok(Self { formats: registry })
    }

    /// Format token registered for `media_type`.
    #[must_use]
    pub fn format(&self, media_type: &str) -> Option<&str> {
        self.formats.get(media_type).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, media_type: &str) -> bool {
        self.formats.contains_key(media_type)
    }

    /// Registered media types, sorted.
    #[must_use]
    pub fn media_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

fn is_media_type(value: &str) -> bool {
    let Some((kind, subtype)) = value.split_once('/') else { return false };
    !kind.is_empty()
        && !subtype.is_empty()
        && !subtype.contains('/')
        && value.bytes().all(|b| b.is_ascii_graphic() && b != b',' && b != b';')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn lookups_are_exact() {
        let registry =
            FormatRegistry::from_config(&config(&[("application/json", "json")])).unwrap();

        assert_eq!(registry.format("application/json"), Some("json"));
        assert!(registry.contains("application/json"));
        assert!(!registry.contains("Application/JSON"));
        assert!(!registry.contains("application/json; charset=utf-8"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn media_types_are_sorted() {
        let registry = FormatRegistry::from_config(&config(&[
            ("application/xml", "xml"),
            ("application/json", "json"),
            ("application/vnd.api+json", "json"),
        ]))
        .unwrap();

        assert_eq!(
            registry.media_types(),
            ["application/json", "application/vnd.api+json", "application/xml"]
        );
    }

    #[test]
    fn rejects_malformed_media_types() {
        for bad in ["json", "/json", "application/", "a/b/c", "application/ json", "a/b;q=1", "a/b,c/d"]
        {
            let err = FormatRegistry::from_config(&config(&[(bad, "json")])).unwrap_err();
            assert!(matches!(err, GatewayError::InvalidConfiguration { .. }), "{bad} accepted");
        }
    }

    #[test]
    fn rejects_empty_tokens() {
        let err = FormatRegistry::from_config(&config(&[("application/json", " ")])).unwrap_err();
        assert!(err.to_string().contains("empty format token"));
    }

    #[test]
    fn empty_registry_is_allowed() {
        let registry = FormatRegistry::from_config(&BTreeMap::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.format("application/json"), None);
    }
}
