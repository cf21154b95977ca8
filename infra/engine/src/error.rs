use quick_xml::errors::serialize::{DeError, SeError};
use std::borrow::Cow;

/// Failures of the [`SerdeEngine`](crate::SerdeEngine).
#[mgate_derive::gateway_error]
pub enum EngineError {
    /// `serde_json` failed to write or read the value.
    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("XML write error{}: {source}", format_context(.context))]
    XmlWrite { source: SeError, context: Option<Cow<'static, str>> },

    #[error("XML read error{}: {source}", format_context(.context))]
    XmlRead { source: DeError, context: Option<Cow<'static, str>> },

    /// The engine has no codec for the requested format token.
    #[error("Unknown format{}: {message}", format_context(.context))]
    UnknownFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
