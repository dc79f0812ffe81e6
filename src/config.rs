use crate::weather::DEFAULT_WEATHER_ENDPOINT;
use anyhow::{Context, Result};
use std::env;

/// Bundled config for builds that ship without a `.env` file (web, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[derive(Clone, Debug, PartialEq)]
pub struct BotConfig {
    pub weather_endpoint: String,
    pub weather_api_key: Option<String>,
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            weather_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            weather_api_key: None,
            seed: None,
        }
    }
}

impl BotConfig {
    /// Read configuration from the process environment.
    ///
    /// Call [`load_env`] first so `.env` and the bundled defaults are applied.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let seed = non_empty("CHATBOT_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("CHATBOT_SEED must be an unsigned integer, got '{raw}'"))
            })
            .transpose()?;

        Ok(Self {
            weather_endpoint: non_empty("WEATHER_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_WEATHER_ENDPOINT.to_string()),
            weather_api_key: non_empty("WEATHER_API_KEY"),
            seed,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_env() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_env() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: called once at startup before any threads are spawned
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        Some((key.trim(), value.trim()))
    })
}
