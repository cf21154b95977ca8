//! # Content Negotiation
//!
//! This crate is the serialization gateway of the workspace. It decides which wire format
//! a response is written in, writes it through a pluggable [`SerializationEngine`], and
//! reads request bodies back into typed values.
//!
//! ## Architecture
//!
//! 1.  **Registries ([`registry`]):** Two immutable media type → format token maps, one for
//!     writing responses and one for reading request bodies.
//! 2.  **Negotiation ([`negotiator`]):** [`ContentNegotiator`] picks the first media type of
//!     the client's list that the serialization registry knows, falling back to a default.
//! 3.  **Engine ([`engine`]):** The codec seam. The negotiator only ever hands a format token
//!     and a [`SerializationContext`] to it.
//! 4.  **Exchange ([`exchange`]):** Request/response traits so the gateway works with any
//!     HTTP stack, plus in-memory implementations. The `server` feature adds implementations
//!     for `axum::http` requests and responses.
//!
//! ## Example
//!
//! ```rust,ignore
//! let negotiator = ContentNegotiator::builder().engine(engine).build()?;
//! let accept = accept::acceptable_content_types("text/html, application/xml;q=0.9");
//! let response = negotiator.serialize_response(&accept, &["list"], &payload, None)?;
//! assert_eq!(response.content_type, "application/xml");
//! ```

pub mod accept;
pub mod context;
pub mod engine;
mod error;
pub mod exchange;
#[cfg(feature = "server")]
pub mod http;
pub mod negotiator;
pub mod registry;

pub use crate::context::SerializationContext;
pub use crate::engine::SerializationEngine;
pub use crate::error::{GatewayError, GatewayErrorExt};
pub use crate::exchange::{GatewayRequest, GatewayResponse, NegotiationRequest, NegotiationResponse};
pub use crate::negotiator::{ContentNegotiator, ContentNegotiatorBuilder, Negotiated, SerializedResponse};
pub use crate::registry::FormatRegistry;
