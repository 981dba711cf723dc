//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the ledger file.
    pub ledger_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            ledger_path: data_dir.join("ledger.json"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, the user config file, `config_path`, then
    /// `TL_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TL_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timelog"))
}

/// Returns the platform-specific data directory for tl.
///
/// On Linux: `~/.local/share/timelog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("timelog"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_timelog() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "timelog");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_ledger() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.ledger_path, data_dir.join("ledger.json"));
    }

    #[test]
    fn test_explicit_config_file_overrides_default() {
        let temp = tempfile::tempdir().unwrap();
        let config_file = temp.path().join("config.toml");
        std::fs::write(&config_file, "ledger_path = \"/srv/timelog/ledger.json\"\n").unwrap();

        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(&config_file))?;
            assert_eq!(config.ledger_path, PathBuf::from("/srv/timelog/ledger.json"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let config_file = temp.path().join("config.toml");
        std::fs::write(&config_file, "ledger_path = \"/srv/timelog/ledger.json\"\n").unwrap();

        figment::Jail::expect_with(|jail| {
            jail.set_env("TL_LEDGER_PATH", "/tmp/other.json");
            let config = Config::load_from(Some(&config_file))?;
            assert_eq!(config.ledger_path, PathBuf::from("/tmp/other.json"));
            Ok(())
        });
    }
}
