use crate::exchange::{NegotiationRequest, NegotiationResponse};
use crate::registry::FormatRegistry;
use crate::{GatewayError, GatewayErrorExt, SerializationContext, SerializationEngine};
use mgate_domain::config::FormatsConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A resolved response format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    /// The registry key that matched, never a synonym of it.
    pub media_type: String,
    /// Engine format token registered for `media_type`.
    pub format: String,
}

/// A serialized payload and the media type it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedResponse {
    pub body: String,
    pub content_type: String,
}

struct NegotiatorInner<E> {
    engine: E,
    serialization: FormatRegistry,
    deserialization: FormatRegistry,
}

/// The serialization gateway.
///
/// Cheap to clone; every clone shares the engine and the registries.
pub struct ContentNegotiator<E> {
    inner: Arc<NegotiatorInner<E>>,
}

impl<E> Clone for ContentNegotiator<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<E> fmt::Debug for ContentNegotiator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNegotiator")
            .field("engine", &std::any::type_name::<E>())
            .field("serialization", &self.inner.serialization.media_types())
            .field("deserialization", &self.inner.deserialization.media_types())
            .finish()
    }
}

impl<E: SerializationEngine> ContentNegotiator<E> {
    #[must_use]
    pub fn builder() -> ContentNegotiatorBuilder<E> {
        ContentNegotiatorBuilder::default()
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.inner.engine
    }

    /// Picks the response format.
    ///
    /// The first entry of `acceptable` that the serialization registry knows wins; the
    /// client's order is authoritative. When nothing matches, `default` is used.
    ///
    /// # Errors
    /// * [`GatewayError::NotAcceptable`] when nothing matches and there is no default.
    /// * [`GatewayError::FormatLookup`] when the default itself is not registered.
    pub fn negotiate<S: AsRef<str>>(
        &self,
        acceptable: &[S],
        default: Option<&str>,
    ) -> Result<Negotiated, GatewayError> {
        let registry = &self.inner.serialization;

        let matched = acceptable.iter().map(AsRef::as_ref).find_map(|media_type| {
            registry.format(media_type).map(|format| (media_type, format))
        });
        if let Some((media_type, format)) = matched {
            debug!(media_type, format, "Negotiated response format");
            return Ok(Negotiated { media_type: media_type.to_owned(), format: format.to_owned() });
        }

        let Some(default) = default else {
            debug!(acceptable = acceptable.len(), "No acceptable response format");
            return Err(GatewayError::not_acceptable());
        };

        let format = registry.format(default).ok_or_else(|| GatewayError::FormatLookup {
            message: format!("Default content type '{default}' is not registered").into(),
            context: None,
        })?;
        debug!(media_type = default, format, "Falling back to default response format");

        Ok(Negotiated { media_type: default.to_owned(), format: format.to_owned() })
    }

    /// Negotiates a format and serializes `payload` in it.
    ///
    /// # Errors
    /// Negotiation errors from [`Self::negotiate`], or [`GatewayError::Engine`].
    pub fn serialize_response<S, G, T>(
        &self,
        acceptable: &[S],
        groups: &[G],
        payload: &T,
        default: Option<&str>,
    ) -> Result<SerializedResponse, GatewayError>
    where
        S: AsRef<str>,
        G: AsRef<str>,
        T: Serialize + ?Sized,
    {
        let Negotiated { media_type, format } = self.negotiate(acceptable, default)?;
        let body = self.serialize_content(payload, groups, &format)?;

        Ok(SerializedResponse { body, content_type: media_type })
    }

    /// Serializes `payload` in the given format token with max-depth checks enabled.
    ///
    /// The token is handed to the engine as is.
    ///
    /// # Errors
    /// Returns [`GatewayError::Engine`] with the engine's error as source.
    pub fn serialize_content<G, T>(
        &self,
        payload: &T,
        groups: &[G],
        format: &str,
    ) -> Result<String, GatewayError>
    where
        G: AsRef<str>,
        T: Serialize + ?Sized,
    {
        let context = SerializationContext::new()
            .with_groups(groups.iter().map(|group| group.as_ref().to_owned()))
            .enable_max_depth_checks();
        trace!(format, groups = ?context.groups(), "Serializing payload");

        self.inner.engine.serialize(payload, format, &context).map_err(GatewayError::engine)
    }

    /// Reads a `T` out of `body` declared as `content_type`.
    ///
    /// # Errors
    /// * [`GatewayError::UnsupportedMediaType`] when the content type is missing, empty
    ///   or not registered for deserialization.
    /// * [`GatewayError::Engine`] when the engine rejects the body.
    pub fn deserialize<T: DeserializeOwned>(
        &self,
        content_type: Option<&str>,
        body: &str,
    ) -> Result<T, GatewayError> {
        let format = content_type
            .filter(|media_type| !media_type.is_empty())
            .and_then(|media_type| self.inner.deserialization.format(media_type))
            .ok_or_else(|| {
                debug!(content_type, "Unsupported request content type");
                GatewayError::unsupported_media_type()
            })?;
        trace!(format, bytes = body.len(), "Deserializing body");

        self.inner.engine.deserialize(body, format).map_err(GatewayError::engine)
    }

    /// Writes `payload` into `response` in the format negotiated from `request`.
    ///
    /// Visibility groups come from the request's `serialization_groups`. On failure the
    /// response is left untouched.
    ///
    /// # Errors
    /// Same as [`Self::serialize_response`].
    pub fn respond<Req, Res, T>(
        &self,
        request: &Req,
        response: &mut Res,
        payload: &T,
        default: Option<&str>,
    ) -> Result<(), GatewayError>
    where
        Req: NegotiationRequest + ?Sized,
        Res: NegotiationResponse + ?Sized,
        T: Serialize + ?Sized,
    {
        let acceptable = request.acceptable_content_types();
        let groups = request.serialization_groups();
        let SerializedResponse { body, content_type } =
            self.serialize_response(&acceptable, &groups, payload, default)?;

        response.set_body(body);
        response.set_content_type(&content_type);
        Ok(())
    }

    /// Reads the request body using its declared content type.
    ///
    /// # Errors
    /// Same as [`Self::deserialize`].
    pub fn read_request<T, Req>(&self, request: &Req) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        Req: NegotiationRequest + ?Sized,
    {
        let content_type = request.content_type();
        self.deserialize(content_type.as_deref(), request.body())
    }

    #[must_use]
    pub fn is_serialization_type_supported(&self, media_type: &str) -> bool {
        self.inner.serialization.contains(media_type)
    }

    #[must_use]
    pub fn is_deserialization_type_supported(&self, media_type: &str) -> bool {
        self.inner.deserialization.contains(media_type)
    }

    #[must_use]
    pub fn serialization_types(&self) -> Vec<&str> {
        self.inner.serialization.media_types()
    }

    #[must_use]
    pub fn deserialization_types(&self) -> Vec<&str> {
        self.inner.deserialization.media_types()
    }
}

/// Builder for [`ContentNegotiator`]. Formats default to JSON and XML in both directions.
pub struct ContentNegotiatorBuilder<E> {
    engine: Option<E>,
    formats: Option<FormatsConfig>,
}

impl<E> Default for ContentNegotiatorBuilder<E> {
    fn default() -> Self {
        Self { engine: None, formats: None }
    }
}

impl<E> fmt::Debug for ContentNegotiatorBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNegotiatorBuilder")
            .field("engine", &self.engine.is_some())
            .field("formats", &self.formats)
            .finish()
    }
}

impl<E: SerializationEngine> ContentNegotiatorBuilder<E> {
    #[must_use]
    pub fn engine(mut self, engine: E) -> Self {
        self.engine = Some(engine);
        self
    }

    #[must_use]
    pub fn formats(mut self, formats: FormatsConfig) -> Self {
        self.formats = Some(formats);
        self
    }

    /// # Errors
    /// Returns [`GatewayError::InvalidConfiguration`] when no engine was supplied or a
    /// registry entry is malformed.
    pub fn build(self) -> Result<ContentNegotiator<E>, GatewayError> {
        let engine = self.engine.ok_or_else(|| GatewayError::InvalidConfiguration {
            message: "Missing serialization engine".into(),
            context: None,
        })?;
        let formats = self.formats.unwrap_or_default();

        let serialization = FormatRegistry::from_config(&formats.serialization)
            .context("Serialization formats")?;
        let deserialization = FormatRegistry::from_config(&formats.deserialization)
            .context("Deserialization formats")?;

        debug!(
            serialization = ?serialization.media_types(),
            deserialization = ?deserialization.media_types(),
            "Content negotiator ready"
        );

        Ok(ContentNegotiator {
            inner: Arc::new(NegotiatorInner { engine, serialization, deserialization }),
        })
    }
}
