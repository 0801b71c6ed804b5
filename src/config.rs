use std::{env, path::PathBuf};

use tracing::{info, warn};

use crate::infra::api::DEFAULT_BASE_URL;

pub const API_URL_VAR: &str = "BUYBACK_API_URL";
pub const DATA_DIR_VAR: &str = "BUYBACK_DATA_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Overrides the per-user config directory for the local store.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = match lookup(API_URL_VAR).map(|value| value.trim().to_string()) {
            Some(url) if !url.is_empty() => url,
            Some(_) => {
                warn!("{API_URL_VAR} is empty, using default: {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            }
            None => {
                info!("{API_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            }
        };

        let data_dir = lookup(DATA_DIR_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            api_base_url,
            data_dir,
        }
    }
}
