use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

const EMBEDDED_CONFIG: &str = include_str!("../showcase.json");

/// One video block on the page.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VideoSource {
    pub src: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Initial seek offset in seconds, applied once metadata has loaded.
    #[serde(default)]
    pub start: Option<f64>,
}

/// Geometry constants for the scroll-driven transitions, as fractions of the
/// viewport height unless noted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Tuning {
    /// A unit becomes active once its top reaches this line.
    pub activation_line: f64,
    /// The next video is preloaded once the spacer is within this reach.
    pub preload_reach: f64,
    pub caption_fade_start: f64,
    pub caption_fade_span: f64,
    /// Scale lost by a unit as the next one slides fully over it.
    pub shrink: f64,
    pub volume_fade_start: f64,
    pub volume_fade_end: f64,
    /// Pixels left between the viewport bottom and the next unit after unmute.
    pub unmute_scroll_margin: f64,
    /// Player mode survives the unit losing the active slot.
    pub sticky_player_mode: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            activation_line: 0.5,
            preload_reach: 1.5,
            caption_fade_start: 0.5,
            caption_fade_span: 0.3,
            shrink: 0.12,
            volume_fade_start: 0.3,
            volume_fade_end: 0.5,
            unmute_scroll_margin: 50.0,
            sticky_player_mode: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub videos: Vec<VideoSource>,
    pub supporters_url: String,
    pub storage_key: String,
    pub avatar_base_url: String,
    pub profile_base_url: String,
    /// Roster size from which the counter label is shown.
    pub supporter_milestone: usize,
    pub log_level: String,
    pub tuning: Tuning,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            videos: Vec::new(),
            supporters_url: "supporters.json".to_string(),
            storage_key: "vb-supporters".to_string(),
            avatar_base_url: "https://unavatar.io/twitter".to_string(),
            profile_base_url: "https://x.com".to_string(),
            supporter_milestone: 100,
            log_level: "info".to_string(),
            tuning: Tuning::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn from_json(raw: &str) -> Result<Self, ShowcaseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The config bundled with the page.
    pub fn embedded() -> Result<Self, ShowcaseError> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
