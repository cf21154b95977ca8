#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the gateway crates.
//!
//! * [`gateway_error`] turns an enum into a context-aware error type.
//! * [`wire_model`] prepares a DTO for visibility-group and max-depth aware serialization.
//!
//! Examples are `ignore`d here because they need the consuming crates in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for the error enums used throughout the workspace.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait adding `.context()` to
///   `Result<T, Error>` and to `Result<T, Source>` for every wrapped source type.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a source field.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal` variant exists.
/// * **Status Hints**: A variant marked `#[status(406)]` makes the generated
///   `status_code()` return `Some(406)` for it; unmarked variants return `None`.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. Variants with a source (`source` field, `#[source]` or `#[from]`) must also declare
///    `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use mgate_derive::gateway_error;
/// use std::borrow::Cow;
///
/// #[gateway_error]
/// pub enum CodecError {
///     #[status(415)]
///     #[error("Unsupported format{}: {message}", format_context(.context))]
///     Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("JSON error{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<serde_json::Value, CodecError> {
///     serde_json::from_str(raw).context("Parsing request body")
/// }
/// ```
#[proc_macro_attribute]
pub fn gateway_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_gateway_error(input).into()
}

/// Attribute macro for payload types serialized through the gateway engine.
///
/// Adds `Debug`, `Serialize` and `Deserialize` derives when missing and routes every
/// named field through `mgate_engine::visibility`, so the engine can drop fields outside
/// the requested visibility groups and stop recursion at the configured depth.
///
/// # Field attributes
///
/// * `#[groups("list", "detail")]` - groups the field belongs to. Fields without it belong
///   to the `Default` group.
/// * `#[max_depth(2)]` - with depth checks enabled, the field is only written while the
///   owning object sits at depth `<= 2` (the root object is depth 1).
///
/// # Arguments
///
/// * `rename_all = "camelCase"` - forwarded to `#[serde(rename_all = ...)]`.
/// * `crate = "::mgate::engine"` - path of the engine crate the generated code goes through.
///   Defaults to `::mgate_engine`; crates that only depend on the facade pass `::mgate::engine`.
///
/// # Example
///
/// ```rust,ignore
/// use mgate_derive::wire_model;
///
/// #[wire_model(rename_all = "camelCase")]
/// pub struct Category {
///     pub id: u64,
///     #[groups("detail")]
///     pub description: String,
///     #[max_depth(2)]
///     pub children: Vec<Category>,
/// }
/// ```
#[proc_macro_attribute]
pub fn wire_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::model::expand_wire_model(args.into(), input).into()
}
