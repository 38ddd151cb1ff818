//! Engine settings, read from `CHARBLDR_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use charbldr_domain::DEFAULT_ABILITY_CAP;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_LOG_FILTER: &str = "charbldr_engine=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Ability score ceiling before any feature raises it.
    pub default_ability_cap: i32,
    /// Quiet time before a draft session writes to the repo.
    pub save_debounce_ms: u64,
    /// Directory of the JSON draft store.
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_ability_cap: DEFAULT_ABILITY_CAP,
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            data_dir: PathBuf::from("./drafts"),
            catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineSettings {
    /// Load `.env` files from the repo root, then read the environment.
    pub fn from_env() -> Self {
        load_dotenv_from_repo_root();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any variable source. Missing or unparsable
    /// values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            default_ability_cap: parsed(&var, "CHARBLDR_DEFAULT_ABILITY_CAP")
                .unwrap_or(defaults.default_ability_cap),
            save_debounce_ms: parsed(&var, "CHARBLDR_SAVE_DEBOUNCE_MS")
                .unwrap_or(defaults.save_debounce_ms),
            data_dir: var("CHARBLDR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            catalog_path: var("CHARBLDR_CATALOG_PATH").map(PathBuf::from),
            log_filter: var("CHARBLDR_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

fn parsed<T: std::str::FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid setting, using default");
            None
        }
    }
}

/// Load `.env.local` then `.env` from the repository root, if present.
/// Variables already set in the process win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
