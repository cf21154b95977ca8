use config::{Config, Environment, File};
use mgate_domain::constants::CONFIG_ENV_PREFIX;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "mgate";

/// Custom error type for config loading.
#[mgate_derive::gateway_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, last wins:
/// 1. **Base File**: settings from `path` (format picked from the extension). Without a path
///    the `mgate` file in the working directory is used.
/// 2. **Environment Overrides**: variables prefixed with `MGATE__`. Nested keys are separated
///    with double underscores (`MGATE__ENGINE__XML_ROOT` maps to `engine.xml_root`).
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use mgate_kernel::config::load_config;
/// use mgate_kernel::domain::config::GatewayConfig;
///
/// let cfg: GatewayConfig = load_config(Some("config/local")).unwrap_or_default();
/// assert_eq!(cfg.engine.xml_root, "result");
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
