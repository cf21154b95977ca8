use crate::EngineError;
use mgate_domain::constants::DEFAULT_XML_ROOT;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A single text format the engine can write and read.
pub trait Codec: Send + Sync {
    /// Format token this codec answers to.
    const FORMAT: &'static str;

    /// # Errors
    /// Returns the codec's error when the value cannot be represented in the format.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EngineError>;

    /// # Errors
    /// Returns the codec's error when `body` is malformed or does not fit `T`.
    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, EngineError>;
}

/// JSON through `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    #[must_use]
    pub const fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Codec for JsonCodec {
    const FORMAT: &'static str = mgate_domain::constants::JSON;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EngineError> {
        let encoded =
            if self.pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
        Ok(encoded?)
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, EngineError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// XML through `quick-xml`'s serde support.
///
/// The whole value is written inside a single root element.
#[derive(Debug, Clone)]
pub struct XmlCodec {
    root: String,
}

impl XmlCodec {
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self::new(DEFAULT_XML_ROOT)
    }
}

impl Codec for XmlCodec {
    const FORMAT: &'static str = mgate_domain::constants::XML;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EngineError> {
        // `&T` is sized even when `T` is not.
        Ok(quick_xml::se::to_string_with_root(&self.root, &value)?)
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, EngineError> {
        Ok(quick_xml::de::from_str(body)?)
    }
}
