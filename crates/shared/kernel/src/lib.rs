//! Kernel utilities shared across the gateway crates.
//! Keep this crate lightweight; today it owns layered configuration loading.
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! use mgate_kernel::config::load_config;
//! use mgate_kernel::domain::config::GatewayConfig;
//!
//! let cfg: GatewayConfig = load_config(Some("mgate.toml"))?;
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use mgate_domain as domain;
