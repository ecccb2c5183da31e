use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::path::PathBuf;

pub const CREDENTIALS_ENV: &str = "ROLLBOOK_CREDENTIALS";

/// Service-account style credential blob supplied by the host process.
/// Read once at startup; unknown fields are ignored so richer blobs
/// remain accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub data_dir: PathBuf,
}

impl Credentials {
    pub fn from_env() -> anyhow::Result<Self> {
        let raw = std::env::var(CREDENTIALS_ENV)
            .map_err(|_| anyhow!("{} environment variable is not set", CREDENTIALS_ENV))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid credentials blob", CREDENTIALS_ENV))
    }
}
