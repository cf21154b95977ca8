//! Well-known media types, format tokens and attribute names.

/// JSON media type.
pub const APPLICATION_JSON: &str = "application/json";
/// XML media type.
pub const APPLICATION_XML: &str = "application/xml";

/// Format token handed to the engine for JSON.
pub const JSON: &str = "json";
/// Format token handed to the engine for XML.
pub const XML: &str = "xml";

/// Request attribute holding the visibility groups for the response.
pub const SERIALIZATION_GROUPS: &str = "serialization_groups";

/// Group of every field that does not declare one.
pub const DEFAULT_GROUP: &str = "Default";

/// Root element used when the payload is written as XML.
pub const DEFAULT_XML_ROOT: &str = "result";

/// Prefix of environment variables overriding file configuration (`MGATE__ENGINE__PRETTY`).
pub const CONFIG_ENV_PREFIX: &str = "MGATE";
