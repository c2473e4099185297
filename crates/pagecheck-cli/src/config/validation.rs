use crate::config::SmokeConfig;
use crate::error::{CliError, ConfigError, Result, ResultExt};
use std::path::{Path, PathBuf};

impl SmokeConfig {
    /// Reject values that cannot produce a meaningful run.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.navigation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "navigation_timeout_secs".to_string(),
                value: "0".to_string(),
                hint: "Use a timeout of at least one second".to_string(),
            });
        }

        if self.target.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "target".to_string(),
                value: "\"\"".to_string(),
                hint: "Name the HTML file to test, e.g. target = \"index.html\"".to_string(),
            });
        }

        Ok(())
    }

    /// Absolute, canonical path of the file under test.
    ///
    /// Relative targets resolve against `cwd`.
    pub fn resolve_target(&self, cwd: &Path) -> Result<PathBuf> {
        let candidate = cwd.join(&self.target);

        if candidate.is_dir() {
            return Err(CliError::TargetNotFound(candidate));
        }

        candidate.canonicalize().with_path(&candidate)
    }
}
