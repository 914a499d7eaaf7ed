//! Engine configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose.
//! The struct is TOML-loadable; every field has a default so a partial file
//! (or no file at all) still yields a working configuration.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::Language;

/// Authoritative reference new moon: 2024-12-01 06:21 UTC.
///
/// Earlier variants of the widget disagreed on this date (2024-11-01,
/// 2024-12-01, 2025-05-27). This value is an actual new-moon instant; the
/// mean-synodic-month approximation built on it drifts by minutes per
/// elapsed year.
const REFERENCE_NEW_MOON_UNIX: i64 = 1_733_034_060;

fn default_reference_new_moon() -> DateTime<Utc> {
    // Known-valid constant, cannot fail
    Utc.timestamp_opt(REFERENCE_NEW_MOON_UNIX, 0).unwrap()
}

fn default_location() -> String {
    "Vilnius".to_string()
}

fn default_api_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_loading_floor_ms() -> u64 {
    500
}

fn default_info_banner_secs() -> u64 {
    3
}

fn default_warn_banner_secs() -> u64 {
    5
}

/// Configuration for the moon-phase engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Instant of a known new moon; anchor of all cycle arithmetic.
    #[serde(default = "default_reference_new_moon")]
    pub reference_new_moon: DateTime<Utc>,

    /// Location string passed to the astronomy provider as `q`.
    #[serde(default = "default_location")]
    pub location: String,

    /// Display language for phase names and ritual lists.
    #[serde(default)]
    pub language: Language,

    /// Base URL of the astronomy provider.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Provider credential. When absent here, `LUNARIA_API_KEY` is
    /// consulted; with neither, the engine runs local-only.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Minimum visible duration of the loading state.
    ///
    /// Even when the fetch resolves faster, the busy indicator stays up
    /// this long to avoid a visually jarring flash.
    #[serde(default = "default_loading_floor_ms")]
    pub loading_floor_ms: u64,

    /// Auto-dismiss delay for the informational "local calculation" banner.
    #[serde(default = "default_info_banner_secs")]
    pub info_banner_secs: u64,

    /// Auto-dismiss delay for the warning banner shown after a failed
    /// remote fetch. Longer than the info delay so the failure stays
    /// readable while the fallback content settles.
    #[serde(default = "default_warn_banner_secs")]
    pub warn_banner_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_new_moon: default_reference_new_moon(),
            location: default_location(),
            language: Language::default(),
            api_base_url: default_api_base_url(),
            api_key: None,
            loading_floor_ms: default_loading_floor_ms(),
            info_banner_secs: default_info_banner_secs(),
            warn_banner_secs: default_warn_banner_secs(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file, filling absent fields with
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Resolve the provider credential: explicit config wins, then the
    /// `LUNARIA_API_KEY` environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("LUNARIA_API_KEY").ok())
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("location must not be empty".into());
        }

        if self.loading_floor_ms == 0 {
            return Err("loading_floor_ms must be positive".into());
        }

        // The warning banner outlives the info banner so a fetch failure
        // stays visible longer than the routine fallback notice
        if self.warn_banner_secs <= self.info_banner_secs {
            return Err(format!(
                "warn_banner_secs ({}) should be > info_banner_secs ({})",
                self.warn_banner_secs, self.info_banner_secs
            ));
        }

        Ok(())
    }
}
