use mgate_derive::gateway_error;
use std::borrow::Cow;

#[gateway_error]
pub enum NegotiationDemoError {
    #[status(406)]
    #[error("Not acceptable{}: {message}", format_context(.context))]
    NotAcceptable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(415)]
    #[error("Unsupported media type{}: {message}", format_context(.context))]
    UnsupportedMediaType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{source}{}", format_context(.context))]
    Engine { source: std::fmt::Error, context: Option<Cow<'static, str>> },
}

fn main() {
    let not_acceptable =
        NegotiationDemoError::NotAcceptable { message: "text/html".into(), context: None };
    assert_eq!(not_acceptable.status_code(), Some(406));

    let unsupported =
        NegotiationDemoError::UnsupportedMediaType { message: "text/csv".into(), context: None };
    assert_eq!(unsupported.status_code(), Some(415));

    let engine = NegotiationDemoError::from(std::fmt::Error);
    assert_eq!(engine.status_code(), None);
    assert_eq!(engine.to_string(), std::fmt::Error.to_string());
}
