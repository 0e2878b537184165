use crate::error::QuoteMathError;
use crate::slippage::Slippage;
use config::{Config, ConfigError, File};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// User transaction preferences, persisted as JSON by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionSettings {
    /// Slippage tolerance in percent.
    pub slippage: f64,
    /// Deadline in minutes.
    pub deadline: u64,
    #[serde(alias = "multicall")]
    pub multi_call: bool,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        TransactionSettings {
            slippage: 0.5,
            deadline: 15,
            multi_call: false,
        }
    }
}

impl TransactionSettings {
    /// Loads settings from `path`, format taken from the extension.
    /// A missing file yields the defaults.
    pub fn load(path: &str) -> Result<Self, SettingsError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?;

        let settings: TransactionSettings = s.try_deserialize()?;

        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("ignoring stored transaction settings: {}", e);
            Self::default()
        })
    }

    pub fn slippage(&self) -> Result<Slippage, QuoteMathError> {
        Slippage::from_percent(self.slippage)
    }

    /// Unix timestamp after which a transaction sent at `now_unix` should revert.
    pub fn deadline_from(&self, now_unix: u64) -> u64 {
        now_unix.saturating_add(self.deadline.saturating_mul(60))
    }
}
