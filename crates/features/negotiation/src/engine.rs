use crate::SerializationContext;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;

/// The codec seam of the gateway.
///
/// Implementations turn values into text and back for every format token they know.
/// The gateway never inspects their errors; it forwards them unchanged inside
/// [`GatewayError::Engine`](crate::GatewayError::Engine).
pub trait SerializationEngine: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    /// Serializes `value` in `format`, honoring the visibility groups and depth checks of
    /// `context`.
    ///
    /// # Errors
    /// Returns the engine's error for unknown formats or values the codec rejects.
    fn serialize<T: Serialize + ?Sized>(
        &self,
        value: &T,
        format: &str,
        context: &SerializationContext,
    ) -> Result<String, Self::Error>;

    /// Reads a `T` out of `body` written in `format`.
    ///
    /// # Errors
    /// Returns the engine's error for unknown formats or malformed bodies.
    fn deserialize<T: DeserializeOwned>(&self, body: &str, format: &str) -> Result<T, Self::Error>;
}
