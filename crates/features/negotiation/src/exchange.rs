//! Request/response abstraction consumed by [`ContentNegotiator`](crate::ContentNegotiator).

use crate::accept::{acceptable_content_types, essence};
use fxhash::FxHashMap;
use mgate_domain::constants::SERIALIZATION_GROUPS;

/// Read side of an exchange.
pub trait NegotiationRequest {
    /// Acceptable response media types, most preferred first.
    fn acceptable_content_types(&self) -> Vec<String>;

    /// Declared media type of the body, without parameters.
    fn content_type(&self) -> Option<String>;

    fn body(&self) -> &str;

    /// Visibility groups requested for the response. Empty by default.
    fn serialization_groups(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Write side of an exchange.
pub trait NegotiationResponse {
    fn set_body(&mut self, body: String);

    fn set_content_type(&mut self, content_type: &str);
}

/// Framework-free request carrying raw header values and an attribute bag.
#[derive(Debug, Clone, Default)]
pub struct GatewayRequest {
    accept: Option<String>,
    content_type: Option<String>,
    body: String,
    attributes: FxHashMap<String, Vec<String>>,
}

impl GatewayRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw `Accept` header value.
    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Raw `Content-Type` header value; parameters are allowed.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the `serialization_groups` attribute.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_attribute(SERIALIZATION_GROUPS, groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(key.into(), values);
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&[String]> {
        self.attributes.get(key).map(Vec::as_slice)
    }
}

impl NegotiationRequest for GatewayRequest {
    fn acceptable_content_types(&self) -> Vec<String> {
        self.accept.as_deref().map(acceptable_content_types).unwrap_or_default()
    }

    fn content_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|value| essence(value).to_owned())
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn serialization_groups(&self) -> Vec<String> {
        self.attribute(SERIALIZATION_GROUPS).map(<[String]>::to_vec).unwrap_or_default()
    }
}

/// Framework-free response collecting what the gateway writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayResponse {
    body: String,
    content_type: Option<String>,
}

impl GatewayResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl NegotiationResponse for GatewayResponse {
    fn set_body(&mut self, body: String) {
        self.body = body;
    }

    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_headers() {
        let request = GatewayRequest::new()
            .with_accept("application/json;q=0.5, application/xml")
            .with_content_type("application/json; charset=utf-8");

        assert_eq!(request.acceptable_content_types(), ["application/xml", "application/json"]);
        assert_eq!(request.content_type().as_deref(), Some("application/json"));
    }

    #[test]
    fn missing_headers_are_empty() {
        let request = GatewayRequest::new();
        assert!(request.acceptable_content_types().is_empty());
        assert_eq!(request.content_type(), None);
        assert_eq!(request.body(), "");
        assert!(request.serialization_groups().is_empty());
    }

    #[test]
    fn groups_live_in_the_attribute_bag() {
        let request = GatewayRequest::new().with_groups(["list", "detail"]);
        assert_eq!(request.serialization_groups(), ["list", "detail"]);
        assert_eq!(
            request.attribute("serialization_groups"),
            Some(["list".to_owned(), "detail".to_owned()].as_slice())
        );
    }
}
