use crate::codec::{Codec, JsonCodec, XmlCodec};
use crate::{EngineError, visibility};
use mgate_domain::config::EngineConfig;
use mgate_domain::constants::{JSON, XML};
use mgate_negotiation::{SerializationContext, SerializationEngine};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

/// Serde-backed engine for the `json` and `xml` format tokens.
#[derive(Debug, Clone, Default)]
pub struct SerdeEngine {
    json: JsonCodec,
    xml: XmlCodec,
}

impl SerdeEngine {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self { json: JsonCodec::new(config.pretty), xml: XmlCodec::new(config.xml_root.as_str()) }
    }

    /// Format tokens this engine has a codec for.
    #[must_use]
    pub const fn formats() -> &'static [&'static str] {
        &[JSON, XML]
    }
}

impl SerializationEngine for SerdeEngine {
    type Error = EngineError;

    fn serialize<T: Serialize + ?Sized>(
        &self,
        value: &T,
        format: &str,
        context: &SerializationContext,
    ) -> Result<String, Self::Error> {
        let _scope = visibility::enter(context);

        let encoded = match format {
            JSON => self.json.encode(value),
            XML => self.xml.encode(value),
            other => Err(unknown_format(other)),
        }?;
        trace!(format, bytes = encoded.len(), "Payload serialized");

        Ok(encoded)
    }

    fn deserialize<T: DeserializeOwned>(&self, body: &str, format: &str) -> Result<T, Self::Error> {
        match format {
            JSON => self.json.decode(body),
            XML => self.xml.decode(body),
            other => Err(unknown_format(other)),
        }
    }
}

fn unknown_format(format: &str) -> EngineError {
    debug!(format, "No codec registered for format");
    EngineError::UnknownFormat { message: format!("No codec for '{format}'").into(), context: None }
}
