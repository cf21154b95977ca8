use std::borrow::Cow;
use std::error::Error;

/// Failures of the serialization gateway.
///
/// Every variant is terminal. `status_code()` carries the HTTP status a transport layer
/// would usually map the failure to.
#[mgate_derive::gateway_error]
pub enum GatewayError {
    /// None of the acceptable media types is supported and no default was given.
    #[status(406)]
    #[error("Not acceptable{}: {message}", format_context(.context))]
    NotAcceptable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The declared request content type is absent, empty or not readable.
    #[status(415)]
    #[error("Unsupported media type{}: {message}", format_context(.context))]
    UnsupportedMediaType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The default content type handed to negotiation is not registered.
    #[status(500)]
    #[error("Format lookup failed{}: {message}", format_context(.context))]
    FormatLookup { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(500)]
    #[error("Invalid gateway configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The engine failed; displayed exactly as the engine reported it.
    #[error("{source}{}", format_context(.context))]
    Engine { source: Box<dyn Error + Send + Sync>, context: Option<Cow<'static, str>> },
}

impl GatewayError {
    pub(crate) fn not_acceptable() -> Self {
        Self::NotAcceptable {
            message: "Unsupported or empty value in Accept header.".into(),
            context: None,
        }
    }

    pub(crate) fn unsupported_media_type() -> Self {
        Self::UnsupportedMediaType {
            message: "Unsupported or empty value in Content-Type header.".into(),
            context: None,
        }
    }

    pub(crate) fn engine<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::Engine { source: Box::new(error), context: None }
    }

    /// Returns the engine's own error when this is an [`GatewayError::Engine`] failure of
    /// type `T`.
    #[must_use]
    pub fn engine_error<T: Error + 'static>(&self) -> Option<&T> {
        match self {
            Self::Engine { source, .. } => source.downcast_ref::<T>(),
            _ => None,
        }
    }
}
