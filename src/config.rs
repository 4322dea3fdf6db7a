// src/config.rs

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_SONAR_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Everything the server reads from its environment. Built once at startup
/// and shared read-only between workers.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_workers: usize,
    pub static_dir: PathBuf,

    pub perplexity_api_key: Option<String>,
    pub sonar_base_url: String,
    pub sonar_model: String,
    pub upstream_timeout: Duration,

    pub google_maps_api_key: Option<String>,
    pub geocode_url: String,
    pub geocode_stagger: Duration,
    /// Largest comp list one `/api/map-plot` request may geocode.
    pub max_plot_records: usize,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Ignoring unreadable .env file: {e}");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests don't touch the real env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, same as a missing variable.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("PORT", get("PORT"), 3000),
            max_workers: parse_or("MAX_WORKERS", get("MAX_WORKERS"), 8),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),

            perplexity_api_key: get("PERPLEXITY_API_KEY"),
            sonar_base_url: get("SONAR_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SONAR_BASE_URL.to_string()),
            sonar_model: get("SONAR_MODEL").unwrap_or_else(|| "sonar".to_string()),
            upstream_timeout: Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                get("UPSTREAM_TIMEOUT_SECS"),
                120,
            )),

            google_maps_api_key: get("GOOGLE_MAPS_API_KEY"),
            geocode_url: get("GEOCODE_BASE_URL").unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_string()),
            geocode_stagger: Duration::from_millis(parse_or(
                "GEOCODE_STAGGER_MS",
                get("GEOCODE_STAGGER_MS"),
                150,
            )),
            max_plot_records: parse_or("MAP_PLOT_MAX_RECORDS", get("MAP_PLOT_MAX_RECORDS"), 250),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={v:?} is not valid, using {default}");
            default
        }),
    }
}
