//! Default [`SerializationEngine`](mgate_negotiation::SerializationEngine) of the gateway.
//!
//! [`SerdeEngine`] dispatches on the format token: `json` goes to [`JsonCodec`]
//! (`serde_json`), `xml` to [`XmlCodec`] (`quick-xml`). Any other token is an
//! [`EngineError::UnknownFormat`].
//!
//! ## Visibility
//!
//! Types declared with [`wire_model`] consult the [`visibility`] scope while they are
//! written. The engine opens that scope from the call's
//! [`SerializationContext`](mgate_negotiation::SerializationContext), so fields outside the
//! requested groups are left out and fields past their `#[max_depth]` stop the recursion.
//! Outside the engine those types serialize like any other serde type.
//!
//! ## Examples
//!
//! ```rust
//! use mgate_engine::prelude::*;
//!
//! #[wire_model]
//! struct Product {
//!     id: u64,
//!     #[groups("detail")]
//!     description: String,
//! }
//!
//! # fn main() -> Result<(), EngineError> {
//! let engine = SerdeEngine::default();
//! let product = Product { id: 7, description: "Desk lamp".into() };
//!
//! let context = SerializationContext::new().with_groups(["Default"]);
//! assert_eq!(engine.serialize(&product, "json", &context)?, r#"{"id":7}"#);
//!
//! let context = SerializationContext::new();
//! assert_eq!(
//!     engine.serialize(&product, "json", &context)?,
//!     r#"{"id":7,"description":"Desk lamp"}"#
//! );
//! # Ok(())
//! # }
//! ```

mod codec;
mod engine;
mod error;
pub mod visibility;

pub use codec::{Codec, JsonCodec, XmlCodec};
pub use engine::SerdeEngine;
pub use error::{EngineError, EngineErrorExt};
pub use mgate_derive::wire_model;
/// Serde as seen by [`wire_model`] expansions.
pub use serde;

pub mod prelude {
    pub use crate::engine::SerdeEngine;
    pub use crate::error::{EngineError, EngineErrorExt};
    pub use mgate_derive::wire_model;
    pub use mgate_negotiation::{SerializationContext, SerializationEngine};
}
