use crate::constants::{APPLICATION_JSON, APPLICATION_XML, DEFAULT_XML_ROOT, JSON, XML};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Top-level gateway configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfigInner {
    pub formats: FormatsConfig,
    pub engine: EngineConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten, default)]
    inner: Arc<GatewayConfigInner>,
}

impl Deref for GatewayConfig {
    type Target = GatewayConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for GatewayConfig {
    fn deref_mut(&mut self) -> &mut GatewayConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Media type → format token registries.
///
/// A table given in configuration replaces the default one entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// Formats a response may be written in.
    pub serialization: BTreeMap<String, String>,
    /// Formats a request body may be read from.
    pub deserialization: BTreeMap<String, String>,
}

/// Settings of the default serde-backed engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Root element name for XML documents.
    pub xml_root: String,
}

// --- Default ---

impl Default for FormatsConfig {
    fn default() -> Self {
        Self { serialization: default_formats(), deserialization: default_formats() }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { pretty: false, xml_root: DEFAULT_XML_ROOT.to_owned() }
    }
}

fn default_formats() -> BTreeMap<String, String> {
    BTreeMap::from([
        (APPLICATION_JSON.to_owned(), JSON.to_owned()),
        (APPLICATION_XML.to_owned(), XML.to_owned()),
    ])
}
