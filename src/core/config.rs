use super::constants::*;
use super::widgets::{RotaryMode, ToggleValues};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotaryGesture {
    #[default]
    Angular,
    CombinedAxis,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ToggleConfig {
    pub id: String,
    #[serde(default)]
    pub off: f32,
    #[serde(default = "default_toggle_on")]
    pub on: f32,
}

fn default_toggle_on() -> f32 {
    1.0
}

impl ToggleConfig {
    pub fn values(&self) -> ToggleValues {
        ToggleValues {
            off: self.off,
            on: self.on,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub id: String,
    pub default: f32,
    pub track_id: String,
    pub thumb_id: String,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            id: VOLUME_PARAM_ID.to_string(),
            default: VOLUME_DEFAULT,
            track_id: VOLUME_TRACK_ID.to_string(),
            thumb_id: VOLUME_THUMB_ID.to_string(),
        }
    }
}

/// Page-level layout of the controls. Every field is optional in the JSON
/// form; anything missing keeps its compiled-in default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub patch_url: String,
    pub canvas_id: String,
    pub rotaries: Vec<String>,
    pub rotary_gesture: RotaryGesture,
    pub axis_sensitivity: f32,
    pub toggles: Vec<ToggleConfig>,
    pub volume: VolumeConfig,
    pub flash_tag: String,
    pub post_tag: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            patch_url: PATCH_EXPORT_URL.to_string(),
            canvas_id: CANVAS_ID.to_string(),
            rotaries: DEFAULT_ROTARY_IDS.iter().map(|s| s.to_string()).collect(),
            rotary_gesture: RotaryGesture::Angular,
            axis_sensitivity: ROTARY_AXIS_SENSITIVITY,
            toggles: DEFAULT_TOGGLES
                .iter()
                .map(|&(id, off, on)| ToggleConfig {
                    id: id.to_string(),
                    off,
                    on,
                })
                .collect(),
            volume: VolumeConfig::default(),
            flash_tag: TAG_FLASH.to_string(),
            post_tag: TAG_POST_TOGGLE.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parses an optional inline config, falling back to defaults.
    pub fn load(text: Option<&str>) -> Self {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => Self::default(),
            Some(t) => Self::from_json(t).unwrap_or_else(|e| {
                log::warn!("[config] invalid bridge config ({}); using defaults", e);
                Self::default()
            }),
        }
    }

    pub fn rotary_mode(&self) -> RotaryMode {
        match self.rotary_gesture {
            RotaryGesture::Angular => RotaryMode::Angular,
            RotaryGesture::CombinedAxis => RotaryMode::CombinedAxis {
                sensitivity: self.axis_sensitivity,
            },
        }
    }

    /// Element id of a rotary control (`slider-<id>`).
    pub fn rotary_element_id(id: &str) -> String {
        format!("{}{}", ROTARY_ELEMENT_PREFIX, id)
    }
}
