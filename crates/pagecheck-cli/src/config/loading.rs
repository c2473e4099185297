use crate::cli::Cli;
use crate::config::SmokeConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pagecheck.toml";

/// Flags that were actually given; absent ones must not shadow lower layers.
#[derive(Debug, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settle_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hover_settle_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chrome_path: Option<PathBuf>,
}

impl From<&Cli> for CliOverrides {
    fn from(args: &Cli) -> Self {
        Self {
            target: args.target.clone(),
            settle_ms: args.settle_ms,
            hover_settle_ms: args.hover_settle_ms,
            navigation_timeout_secs: args.navigation_timeout_secs,
            headless: args.visible.then_some(false),
            chrome_path: args.chrome_path.clone(),
        }
    }
}

impl SmokeConfig {
    /// Load configuration from every layer, with `cwd` as the working directory.
    ///
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load_from(args: &Cli, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file(args, cwd)? {
            debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(Env::prefixed("PAGECHECK_"))
            .merge(Serialized::defaults(CliOverrides::from(args)));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }
}

/// An explicit `--config` must exist; the implicit one is optional.
fn config_file(args: &Cli, cwd: &Path) -> Result<Option<PathBuf>, ConfigError> {
    match &args.config {
        Some(path) => {
            let path = cwd.join(path);
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(ConfigError::NotFound(path))
            }
        }
        None => {
            let default_path = cwd.join(DEFAULT_CONFIG_FILE);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}
