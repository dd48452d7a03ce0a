use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration for a catalog maintenance run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("RECIPE_DATA_DIR").unwrap_or_else(|_| ".".to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            data: DataConfig {
                data_dir: PathBuf::from(data_dir.trim()),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the flat files every run reads and writes.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
}

impl DataConfig {
    pub fn files(&self) -> DataFiles {
        DataFiles::in_dir(&self.data_dir)
    }
}

/// Fixed file names resolved against the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub ingredients_master: PathBuf,
    pub ingredients_clean: PathBuf,
    pub recipes_master: PathBuf,
    pub recipe_ingredients: PathBuf,
    pub recipes_restructured: PathBuf,
    pub recipes_summary: PathBuf,
    pub recipe_ingredients_restructured: PathBuf,
    pub recipe_ingredients_summary: PathBuf,
}

impl DataFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            ingredients_master: dir.join("ingredients_master.csv"),
            ingredients_clean: dir.join("ingredients_master_clean.csv"),
            recipes_master: dir.join("recipes_master.csv"),
            recipe_ingredients: dir.join("recipe_ingredients_master.csv"),
            recipes_restructured: dir.join("recipes_restructured.csv"),
            recipes_summary: dir.join("recipes_summary.csv"),
            recipe_ingredients_restructured: dir.join("recipe_ingredients_restructured.csv"),
            recipe_ingredients_summary: dir.join("recipe_ingredients_summary.csv"),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDataDir => write!(f, "RECIPE_DATA_DIR must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("RECIPE_DATA_DIR");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.data.data_dir, PathBuf::from("."));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn data_dir_override_resolves_every_file() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RECIPE_DATA_DIR", "/srv/pantry");
        let config = AppConfig::load().expect("config loads");
        let files = config.data.files();
        assert_eq!(
            files.ingredients_master,
            PathBuf::from("/srv/pantry/ingredients_master.csv")
        );
        assert_eq!(
            files.recipe_ingredients_summary,
            PathBuf::from("/srv/pantry/recipe_ingredients_summary.csv")
        );
        reset_env();
    }

    #[test]
    fn rejects_blank_data_dir() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RECIPE_DATA_DIR", "   ");
        let error = AppConfig::load().expect_err("blank dir rejected");
        assert!(matches!(error, ConfigError::EmptyDataDir));
        reset_env();
    }
}
