use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Keys every configuration file is expected to carry.
const KNOWN_KEYS: [&str; 4] = ["database", "hourly_rate", "billing_unit_minutes", "log_level"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default = "default_billing_unit")]
    pub billing_unit_minutes: i64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    Http,
    Dir,
}

/// Optional remote key/value binding used to mirror state across devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub kind: RemoteKind,
    /// Base URL (http) or directory path (dir).
    pub location: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_hourly_rate() -> f64 {
    10_000.0
}
fn default_billing_unit() -> i64 {
    crate::core::duration::DEFAULT_BILLING_UNIT
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_namespace() -> String {
    "default".to_string()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            hourly_rate: default_hourly_rate(),
            billing_unit_minutes: default_billing_unit(),
            log_level: default_log_level(),
            remote: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpaylogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rpaylogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpaylogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpaylogger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Write the configuration file (creating the directory if needed).
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let mut cfg = if Self::config_file().exists() {
            Self::load()?
        } else {
            Self::default()
        };
        cfg.database = db_path.to_string_lossy().to_string();

        if !is_test {
            cfg.save()?;
        }

        Ok(cfg)
    }

    /// Report problems with the configuration file: missing keys and
    /// out-of-range values. An empty list means the file is fine.
    pub fn check(&self) -> AppResult<Vec<String>> {
        let mut problems = Vec::new();

        let path = Self::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            let raw: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(e.to_string()))?;
            for key in KNOWN_KEYS {
                if raw.get(key).is_none() {
                    problems.push(format!("missing field '{key}' (default used)"));
                }
            }
        } else {
            problems.push(format!("config file {} not found", path.display()));
        }

        if !(self.hourly_rate.is_finite() && self.hourly_rate >= 0.0) {
            problems.push(format!("hourly_rate must be >= 0, got {}", self.hourly_rate));
        }
        if self.billing_unit_minutes <= 0 {
            problems.push(format!(
                "billing_unit_minutes must be > 0, got {}",
                self.billing_unit_minutes
            ));
        }
        if let Some(remote) = &self.remote {
            if remote.location.trim().is_empty() {
                problems.push("remote.location is empty".to_string());
            }
            if remote.poll_interval_secs == 0 {
                problems.push("remote.poll_interval_secs must be > 0".to_string());
            }
        }

        Ok(problems)
    }
}
