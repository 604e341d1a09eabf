//! Configuration persistence
//!
//! Last-used settings are stored with confy under the platform config
//! directory. Loading never fails hard: a missing or unreadable file
//! falls back to platform defaults.

use tapezier_types::AppConfig;
use thiserror::Error;

const APP_NAME: &str = "tapezier";
const CONFIG_NAME: &str = "config";

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// Default wallpaper location for first runs: the platform pictures
/// directory, or empty when it cannot be determined.
fn default_input_directory() -> String {
    dirs::picture_dir()
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

/// Extension trait for [`AppConfig`] persistence
pub trait AppConfigExt: Sized {
    /// Load the stored config, falling back to platform defaults.
    fn load_or_default() -> Self;
    /// Defaults used when no config file exists yet.
    fn with_platform_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load_or_default() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("failed to load config, using defaults: {err}");
                Self::with_platform_defaults()
            }
        }
    }

    fn with_platform_defaults() -> Self {
        Self {
            input_directory: default_input_directory(),
            ..Self::default()
        }
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }
}
