use anyhow::Result;
use mgate::negotiation::accept::acceptable_content_types;
use mgate::{ContentNegotiator, SerdeEngine};

/// Resolves the response format for a raw `Accept` header.
///
/// # Result
/// `"<media type> (<format token>)"`.
///
/// # Errors
/// Returns the gateway error when nothing is acceptable or the default is unknown.
pub fn negotiate(
    gateway: &ContentNegotiator<SerdeEngine>,
    accept: &str,
    default: Option<&str>,
) -> Result<String> {
    let negotiated = gateway.negotiate(&acceptable_content_types(accept), default)?;
    Ok(format!("{} ({})", negotiated.media_type, negotiated.format))
}
