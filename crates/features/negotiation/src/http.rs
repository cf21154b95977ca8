//! [`NegotiationRequest`] / [`NegotiationResponse`] for `axum::http` types.

use crate::accept::{acceptable_content_types, essence};
use crate::exchange::{NegotiationRequest, NegotiationResponse};
use axum::http::{HeaderValue, Request, Response, header};
use tracing::warn;

/// Request extension carrying the visibility groups for the response.
///
/// Middleware or handlers insert it; without it the response is written with every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationGroups(pub Vec<String>);

impl NegotiationRequest for Request<String> {
    fn acceptable_content_types(&self) -> Vec<String> {
        // Repeated `Accept` headers are one list.
        let joined = self
            .headers()
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");
        acceptable_content_types(&joined)
    }

    fn content_type(&self) -> Option<String> {
        self.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| essence(value).to_owned())
    }

    fn body(&self) -> &str {
        Request::<String>::body(self)
    }

    fn serialization_groups(&self) -> Vec<String> {
        self.extensions().get::<SerializationGroups>().map(|groups| groups.0.clone()).unwrap_or_default()
    }
}

impl<B: From<String>> NegotiationResponse for Response<B> {
    fn set_body(&mut self, body: String) {
        *self.body_mut() = B::from(body);
    }

    fn set_content_type(&mut self, content_type: &str) {
        match HeaderValue::from_str(content_type) {
            Ok(value) => {
                self.headers_mut().insert(header::CONTENT_TYPE, value);
            },
            Err(error) => warn!(content_type, %error, "Content type is not a valid header value"),
        }
    }
}
