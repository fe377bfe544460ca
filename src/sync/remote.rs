//! Remote key/value stores used to mirror state across devices.
//!
//! `fetch` returns `Ok(None)` when the key is explicitly absent and an error
//! when the store cannot be reached; callers decide how to degrade.

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{RemoteConfig, RemoteKind};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch(&self, key: &str) -> AppResult<Option<Value>>;

    async fn push(&self, key: &str, value: &Value) -> AppResult<()>;

    /// Human readable location, for messages.
    fn describe(&self) -> String;
}

/// Build the store described by the configuration.
pub fn from_config(cfg: &RemoteConfig) -> AppResult<Box<dyn RemoteStore>> {
    match cfg.kind {
        RemoteKind::Http => Ok(Box::new(HttpRemote::new(
            &cfg.location,
            Duration::from_secs(cfg.timeout_secs),
        )?)),
        RemoteKind::Dir => Ok(Box::new(DirRemote::new(expand_tilde(&cfg.location)))),
    }
}

/// Plain HTTP key/value endpoint: `GET|PUT {base}/{key}` with JSON bodies.
pub struct HttpRemote {
    base: String,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(base: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}", self.base, key)
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn fetch(&self, key: &str) -> AppResult<Option<Value>> {
        let resp = self
            .client
            .get(self.url(key))
            .send()
            .await
            .map_err(|e| AppError::RemoteUnavailable(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resp = resp
            .error_for_status()
            .map_err(|e| AppError::RemoteUnavailable(e.to_string()))?;

        let value: Value = resp
            .json()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("invalid JSON body: {e}")))?;

        Ok((!value.is_null()).then_some(value))
    }

    async fn push(&self, key: &str, value: &Value) -> AppResult<()> {
        self.client
            .put(self.url(key))
            .json(value)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::RemoteUnavailable(e.to_string()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.base.clone()
    }
}

/// A directory of `<key>.json` files, e.g. a folder shared by a file-sync
/// client. Writes go through a temporary file and a rename.
pub struct DirRemote {
    dir: PathBuf,
}

impl DirRemote {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl RemoteStore for DirRemote {
    async fn fetch(&self, key: &str) -> AppResult<Option<Value>> {
        let path = self.path_for(key);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::RemoteUnavailable(format!("{}: {e}", path.display()))),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| AppError::RemoteUnavailable(format!("{}: {e}", path.display())))?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn push(&self, key: &str, value: &Value) -> AppResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(value)?;

        let io = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(&tmp, &body).await?;
            tokio::fs::rename(&tmp, &path).await
        };
        io.await
            .map_err(|e| AppError::RemoteUnavailable(format!("{}: {e}", path.display())))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
