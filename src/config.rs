//! Runtime configuration from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `MODEL_DIR` | unset (search defaults only) |
//! | `DATASET_PATH` | unset (search defaults only) |
//! | `PORT` | 5000 |
//! | `CACHE_TTL_SECS` | 300 |
//! | `CACHE_CAPACITY` | 10000 |

use std::path::PathBuf;
use std::time::Duration;

use crate::model::SearchPaths;

pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search: SearchPaths,
    pub port: u16,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchPaths::default(),
            port: DEFAULT_PORT,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value source; unparsable numbers keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Self {
            search: SearchPaths {
                model_dir: path("MODEL_DIR"),
                dataset: path("DATASET_PATH"),
                ..SearchPaths::default()
            },
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cache_ttl: lookup("CACHE_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            cache_capacity: lookup("CACHE_CAPACITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_capacity),
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  MODEL_DIR: {:?}", self.search.model_dir);
        tracing::info!("  DATASET_PATH: {:?}", self.search.dataset);
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  CACHE_TTL_SECS: {}", self.cache_ttl.as_secs());
        tracing::info!("  CACHE_CAPACITY: {}", self.cache_capacity);
    }
}
