use crate::{error::ConfigError, logging::LogLevel};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ROLES: [&str; 3] = ["Developer", "Designer", "Engineer"];
const DEFAULT_STARTUP_DELAY_MS: u64 = 1_000;
const DEFAULT_TYPE_INTERVAL_MS: u64 = 100;
const DEFAULT_DELETE_INTERVAL_MS: u64 = 50;
const DEFAULT_SETTLE_DELAY_MS: u64 = 1_500;
const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
const DEFAULT_SECTION_PROBE_OFFSET_PX: f64 = 100.0;
const DEFAULT_PROGRESS_REVEAL_DIVISOR: f64 = 1.3;
const DEFAULT_HERO_CONTENT_PARALLAX: f64 = 0.1;
const DEFAULT_HERO_IMAGE_PARALLAX: f64 = 0.05;
const DEFAULT_FILTER_FADE_IN_DELAY_MS: u64 = 10;
const DEFAULT_FILTER_COLLAPSE_DELAY_MS: u64 = 300;
const DEFAULT_SKILL_STAGGER_MS: u64 = 100;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: f64 = 50.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const STARTUP_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const TICK_INTERVAL_MS_BOUNDS: (u64, u64) = (10, 2_000);
const SETTLE_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const SCROLL_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const PROGRESS_REVEAL_DIVISOR_BOUNDS: (f64, f64) = (1.0, 10.0);
const PARALLAX_FACTOR_BOUNDS: (f64, f64) = (-1.0, 1.0);
const FILTER_DELAY_MS_BOUNDS: (u64, u64) = (0, 5_000);
const SKILL_STAGGER_MS_BOUNDS: (u64, u64) = (0, 2_000);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Tunables for the presentation controller.
///
/// Every value has a default matching the stock page; a page may override
/// any subset through an embedded JSON document (see [`ControllerConfig::from_json`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    pub roles: Vec<String>,
    pub startup_delay: Duration,
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub settle_delay: Duration,
    pub back_to_top_threshold_px: f64,
    pub section_probe_offset_px: f64,
    pub progress_reveal_divisor: f64,
    pub hero_content_parallax: f64,
    pub hero_image_parallax: f64,
    pub filter_fade_in_delay: Duration,
    pub filter_collapse_delay: Duration,
    pub skill_stagger: Duration,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    pub log_level: LogLevel,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    roles: Option<Vec<String>>,
    startup_delay_ms: Option<u64>,
    type_interval_ms: Option<u64>,
    delete_interval_ms: Option<u64>,
    settle_delay_ms: Option<u64>,
    back_to_top_threshold_px: Option<f64>,
    section_probe_offset_px: Option<f64>,
    progress_reveal_divisor: Option<f64>,
    hero_content_parallax: Option<f64>,
    hero_image_parallax: Option<f64>,
    filter_fade_in_delay_ms: Option<u64>,
    filter_collapse_delay_ms: Option<u64>,
    skill_stagger_ms: Option<u64>,
    reveal_threshold: Option<f64>,
    reveal_bottom_margin_px: Option<f64>,
    log_level: Option<String>,
}

impl ControllerConfig {
    /// Parses a camelCase JSON document. Absent or out-of-range values fall
    /// back to their defaults; only malformed JSON is an error.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_json::from_str(text)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let roles: Vec<String> = raw
            .roles
            .unwrap_or_default()
            .into_iter()
            .map(|role| role.trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        let roles = if roles.is_empty() {
            DEFAULT_ROLES.iter().map(|role| role.to_string()).collect()
        } else {
            roles
        };

        Self {
            roles,
            startup_delay: millis_with_bounds(
                raw.startup_delay_ms,
                DEFAULT_STARTUP_DELAY_MS,
                STARTUP_DELAY_MS_BOUNDS,
            ),
            type_interval: millis_with_bounds(
                raw.type_interval_ms,
                DEFAULT_TYPE_INTERVAL_MS,
                TICK_INTERVAL_MS_BOUNDS,
            ),
            delete_interval: millis_with_bounds(
                raw.delete_interval_ms,
                DEFAULT_DELETE_INTERVAL_MS,
                TICK_INTERVAL_MS_BOUNDS,
            ),
            settle_delay: millis_with_bounds(
                raw.settle_delay_ms,
                DEFAULT_SETTLE_DELAY_MS,
                SETTLE_DELAY_MS_BOUNDS,
            ),
            back_to_top_threshold_px: f64_with_bounds(
                raw.back_to_top_threshold_px,
                DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
                SCROLL_PX_BOUNDS,
            ),
            section_probe_offset_px: f64_with_bounds(
                raw.section_probe_offset_px,
                DEFAULT_SECTION_PROBE_OFFSET_PX,
                SCROLL_PX_BOUNDS,
            ),
            progress_reveal_divisor: f64_with_bounds(
                raw.progress_reveal_divisor,
                DEFAULT_PROGRESS_REVEAL_DIVISOR,
                PROGRESS_REVEAL_DIVISOR_BOUNDS,
            ),
            hero_content_parallax: f64_with_bounds(
                raw.hero_content_parallax,
                DEFAULT_HERO_CONTENT_PARALLAX,
                PARALLAX_FACTOR_BOUNDS,
            ),
            hero_image_parallax: f64_with_bounds(
                raw.hero_image_parallax,
                DEFAULT_HERO_IMAGE_PARALLAX,
                PARALLAX_FACTOR_BOUNDS,
            ),
            filter_fade_in_delay: millis_with_bounds(
                raw.filter_fade_in_delay_ms,
                DEFAULT_FILTER_FADE_IN_DELAY_MS,
                FILTER_DELAY_MS_BOUNDS,
            ),
            filter_collapse_delay: millis_with_bounds(
                raw.filter_collapse_delay_ms,
                DEFAULT_FILTER_COLLAPSE_DELAY_MS,
                FILTER_DELAY_MS_BOUNDS,
            ),
            skill_stagger: millis_with_bounds(
                raw.skill_stagger_ms,
                DEFAULT_SKILL_STAGGER_MS,
                SKILL_STAGGER_MS_BOUNDS,
            ),
            reveal_threshold: f64_with_bounds(
                raw.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            reveal_bottom_margin_px: f64_with_bounds(
                raw.reveal_bottom_margin_px,
                DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
                SCROLL_PX_BOUNDS,
            ),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    /// Root margin string in the form `IntersectionObserver` expects.
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.reveal_bottom_margin_px)
    }
}

fn millis_with_bounds(value: Option<u64>, default: u64, bounds: (u64, u64)) -> Duration {
    let millis = value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default);
    Duration::from_millis(millis)
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
