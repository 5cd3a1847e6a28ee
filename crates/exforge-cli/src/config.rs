//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `EXFORGE_<SECTION>__<KEY>`, e.g.
//!    `EXFORGE_PACKAGE_MANAGER__PROGRAM=pnpm`
//! 3. Config file: `--config FILE`, else `config.toml` in the platform
//!    config directory (see [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use exforge_core::domain::{DEFAULT_PROJECT_NAME, PackageManager};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "EXFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// External package manager.
    pub package_manager: PackageManagerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Name used when none is given on the command line.
    pub project_name: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManagerConfig {
    /// Program name or path; invoked with npm-style arguments.
    pub program: String,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            program: PackageManager::DEFAULT_PROGRAM.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        Self::load_from(&path, required, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.exforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "exforge", "exforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".exforge.toml"))
    }

    /// The package manager to drive.
    pub fn package_manager(&self) -> PackageManager {
        PackageManager::new(&self.package_manager.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_match_the_generator() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.project_name, "express-js-typeorm-app");
        assert_eq!(cfg.package_manager.program, "npm");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&tmp.path().join("none.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(AppConfig::load_from(&tmp.path().join("none.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[package_manager]\nprogram = \"pnpm\"\n\n[output]\nno_color = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg.package_manager.program, "pnpm");
        assert!(cfg.output.no_color);
        assert_eq!(cfg.defaults.project_name, "express-js-typeorm-app");
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[package_manager]\nprogram = \"pnpm\"\n").unwrap();

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("EXFORGE_PACKAGE_MANAGER__PROGRAM".to_string(), "yarn".to_string()),
            ("EXFORGE_DEFAULTS__PROJECT_NAME".to_string(), "shop".to_string()),
        ])));

        let cfg = AppConfig::load_from(&path, true, env).unwrap();
        assert_eq!(cfg.package_manager.program, "yarn");
        assert_eq!(cfg.defaults.project_name, "shop");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "package_manager = [").unwrap();
        assert!(AppConfig::load_from(&path, true, no_env()).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
