//! Facade crate for MediaGate.
//! Re-exports the domain, kernel, gateway and engine crates and wires the default gateway.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `mgate` (with `server` for the `axum::http` adapters).
//! - Build a gateway with [`negotiator`] from a [`GatewayConfig`](domain::config::GatewayConfig),
//!   usually loaded through [`kernel::config::load_config`].
//! - Declare payload types with `#[wire_model(crate = "::mgate::engine")]`; the generated code
//!   then only needs `mgate`.

pub use mgate_domain as domain;
pub use mgate_engine as engine;
pub use mgate_engine::{SerdeEngine, wire_model};
pub use mgate_kernel as kernel;
pub use mgate_negotiation as negotiation;
pub use mgate_negotiation::{
    ContentNegotiator, GatewayError, GatewayRequest, GatewayResponse, NegotiationRequest,
    NegotiationResponse, SerializationContext,
};

use mgate_domain::config::GatewayConfig;

#[cfg(feature = "server")]
pub mod http {
    pub use mgate_negotiation::http::SerializationGroups;
}

/// Build-time enabled features (by Cargo feature).
pub mod features {
    pub const ENABLED: &[&str] = &[
        "json",
        "xml",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Builds the default gateway: [`SerdeEngine`] configured from `config.engine`, registries
/// from `config.formats`.
///
/// # Errors
/// Returns [`GatewayError::InvalidConfiguration`] when a configured media type is malformed.
pub fn negotiator(config: &GatewayConfig) -> Result<ContentNegotiator<SerdeEngine>, GatewayError> {
    ContentNegotiator::builder()
        .engine(SerdeEngine::new(&config.engine))
        .formats(config.formats.clone())
        .build()
}
