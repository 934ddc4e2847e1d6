//! Application configuration.
//!
//! Settings are read from `<config dir>/hc7-hub/settings.toml`:
//!
//! ```toml
//! admin_key = "..."
//! catalog_path = "/path/to/catalog.json"
//! log_filter = "hc7_hub=info,warn"
//! ```
//!
//! The admin key can also come from the `HC7_ADMIN_KEY` environment variable,
//! which wins over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const APP_NAME: &str = "hc7-hub";
const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the configured admin key
pub const ADMIN_KEY_ENV: &str = "HC7_ADMIN_KEY";

/// Key used when nothing is configured
pub const DEFAULT_ADMIN_KEY: &str = "11ojd-yy63n-9232n";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub admin_key: Option<String>,
    /// JSON catalog seed replacing the bundled one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
}

/// Where the admin key came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretSource {
    Environment,
    File,
    BuiltIn,
}

impl Config {
    /// Resolve the admin key: environment, then file, then the built-in key
    pub fn admin_secret(&self) -> Result<(String, SecretSource), ConfigError> {
        resolve_secret(std::env::var(ADMIN_KEY_ENV).ok(), self.admin_key.as_deref())
    }
}

fn resolve_secret(env: Option<String>, file: Option<&str>) -> Result<(String, SecretSource), ConfigError> {
    let (secret, source) = match (env, file) {
        (Some(value), _) => (value, SecretSource::Environment),
        (None, Some(value)) => (value.to_string(), SecretSource::File),
        (None, None) => (DEFAULT_ADMIN_KEY.to_string(), SecretSource::BuiltIn),
    };
    if secret.is_empty() {
        return Err(ConfigError::MissingSecret);
    }
    Ok((secret, source))
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load settings from the default location, or defaults if there is no file
pub fn load() -> Result<Config, ConfigError> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_from_path_reads_all_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(
            &path,
            "admin_key = \"from-file\"\ncatalog_path = \"/tmp/catalog.json\"\nlog_filter = \"hc7_hub=info\"\n",
        )
        .unwrap();

        let config = load_from_path(&path).expect("failed to load config");
        assert_eq!(config.admin_key.as_deref(), Some("from-file"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.log_filter.as_deref(), Some("hc7_hub=info"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "").unwrap();

        let config = load_from_path(&path).unwrap();
        assert!(config.admin_key.is_none());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "not = valid = toml").unwrap();

        assert!(matches!(load_from_path(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn secret_precedence_is_env_then_file_then_builtin() {
        assert_eq!(
            resolve_secret(Some("env".to_string()), Some("file")).unwrap(),
            ("env".to_string(), SecretSource::Environment)
        );
        assert_eq!(
            resolve_secret(None, Some("file")).unwrap(),
            ("file".to_string(), SecretSource::File)
        );
        assert_eq!(
            resolve_secret(None, None).unwrap(),
            (DEFAULT_ADMIN_KEY.to_string(), SecretSource::BuiltIn)
        );
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            resolve_secret(Some(String::new()), None),
            Err(ConfigError::MissingSecret)
        ));
        assert!(matches!(resolve_secret(None, Some("")), Err(ConfigError::MissingSecret)));
    }
}
