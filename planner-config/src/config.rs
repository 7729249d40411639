//! The planner configuration and its figment loader

use crate::{ConfigError, ConfigResult};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Stem shared by every configuration file name
pub const CONFIG_FILE_STEM: &str = "planner";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PLANNER_";

/// Resolved planner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Directory holding the collection files
    pub db_dir: PathBuf,
    /// Directory exported board reports are written to
    pub out_dir: PathBuf,
    /// Who mutations are attributed to in the activity log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            db_dir: PathBuf::from("db"),
            out_dir: PathBuf::from("out"),
            actor: None,
        }
    }
}

impl PlannerConfig {
    /// Load configuration using the current working directory for file discovery
    pub fn load() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(|_| ConfigError::CurrentDirectoryNotFound)?;
        Self::load_from(&cwd)
    }

    /// Load configuration, discovering files in `dir`
    pub fn load_from(dir: &Path) -> ConfigResult<Self> {
        let config: PlannerConfig = Self::figment(dir).extract()?;
        config.validate()?;
        debug!(
            db_dir = %config.db_dir.display(),
            out_dir = %config.out_dir.display(),
            "loaded planner configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn figment(dir: &Path) -> Figment {
        let toml = dir.join(format!("{CONFIG_FILE_STEM}.toml"));
        let yaml = dir.join(format!("{CONFIG_FILE_STEM}.yaml"));
        let json = dir.join(format!("{CONFIG_FILE_STEM}.json"));

        for path in [&toml, &yaml, &json] {
            if path.exists() {
                trace!("Loading config file: {}", path.display());
            }
        }

        Figment::from(Serialized::defaults(PlannerConfig::default()))
            .merge(Toml::file(toml))
            .merge(Yaml::file(yaml))
            .merge(Json::file(json))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply command line overrides
    pub fn with_overrides(
        mut self,
        db_dir: Option<PathBuf>,
        out_dir: Option<PathBuf>,
        actor: Option<String>,
    ) -> Self {
        if let Some(db_dir) = db_dir {
            self.db_dir = db_dir;
        }
        if let Some(out_dir) = out_dir {
            self.out_dir = out_dir;
        }
        if actor.is_some() {
            self.actor = actor;
        }
        self
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.db_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "db_dir cannot be empty".to_string(),
            });
        }
        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "out_dir cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        let temp = TempDir::new().unwrap();
        let config = PlannerConfig::load_from(temp.path()).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    #[serial]
    fn test_toml_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("planner.toml"),
            "db_dir = \"data\"\nactor = \"ci\"\n",
        )
        .unwrap();

        let config = PlannerConfig::load_from(temp.path()).unwrap();
        assert_eq!(config.db_dir, PathBuf::from("data"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.actor.as_deref(), Some("ci"));
    }

    #[test]
    #[serial]
    fn test_json_file_overrides_yaml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("planner.yaml"), "out_dir: reports\n").unwrap();
        fs::write(temp.path().join("planner.json"), r#"{"out_dir": "exports"}"#).unwrap();

        let config = PlannerConfig::load_from(temp.path()).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("exports"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("planner.toml"), "db_dir = \"data\"\n").unwrap();

        std::env::set_var("PLANNER_DB_DIR", "env-db");
        let config = PlannerConfig::load_from(temp.path());
        std::env::remove_var("PLANNER_DB_DIR");

        assert_eq!(config.unwrap().db_dir, PathBuf::from("env-db"));
    }

    #[test]
    #[serial]
    fn test_empty_db_dir_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("planner.toml"), "db_dir = \"\"\n").unwrap();

        let err = PlannerConfig::load_from(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::default().with_overrides(
            Some(PathBuf::from("/tmp/db")),
            None,
            Some("alice".to_string()),
        );
        assert_eq!(config.db_dir, PathBuf::from("/tmp/db"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.actor.as_deref(), Some("alice"));
    }
}
