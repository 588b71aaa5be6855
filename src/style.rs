//! Style values the stem reads from the host's style sheet.
//!
//! Lengths are in spatium units unless noted. Every field has a default, so a
//! JSON style only needs to name what it overrides:
//!
//! ```
//! use stemlib::EngravingStyle;
//!
//! let style = EngravingStyle::from_json(r#"{ "spatium": 12.5 }"#).unwrap();
//! assert_eq!(style.spatium, 12.5);
//! assert_eq!(style.stem_width, 0.10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::StemError;

// ── Defaults ────────────────────────────────────────────────────────
const DEFAULT_SPATIUM: f64 = 10.0; // matches the SVG staff line spacing
const DEFAULT_STEM_WIDTH: f64 = 0.10;
const DEFAULT_DOT_DOT_DISTANCE: f64 = 0.5;
const DEFAULT_STEM_COLOR: &str = "#1a1a1a";

// ── Tablature stem metrics ──────────────────────────────────────────
const TAB_DEFAULT_STEM_LEN_UP: f64 = 3.0;
const TAB_DEFAULT_STEM_LEN_DN: f64 = 3.0;
const TAB_SLASH_WIDTH: f64 = 1.2; // x width of a half-note slash
const TAB_SLASH_SLANT_Y: f64 = 0.8; // y rise across the slash
const TAB_SLASH_THICK: f64 = 0.4;
const TAB_SLASH_DISPL: f64 = 0.8; // offset from one slash to the next

/// Global engraving style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngravingStyle {
    /// Spatial unit in absolute units
    pub spatium: f64,
    /// Default stem stroke width
    pub stem_width: f64,
    /// Horizontal step between augmentation dots
    pub dot_dot_distance: f64,
    /// Stroke and fill colour for stems, slashes and dots
    pub stem_color: String,
    /// Tablature stem metrics
    pub tab: TabStemMetrics,
}

impl Default for EngravingStyle {
    fn default() -> Self {
        Self {
            spatium: DEFAULT_SPATIUM,
            stem_width: DEFAULT_STEM_WIDTH,
            dot_dot_distance: DEFAULT_DOT_DOT_DISTANCE,
            stem_color: DEFAULT_STEM_COLOR.to_string(),
            tab: TabStemMetrics::default(),
        }
    }
}

impl EngravingStyle {
    /// Parse a (possibly partial) style from JSON.
    pub fn from_json(json: &str) -> Result<Self, StemError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Visual tuning of tablature stems: default lengths and half-note slashes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStemMetrics {
    pub default_stem_len_up: f64,
    pub default_stem_len_dn: f64,
    pub slash_width: f64,
    pub slash_slant_y: f64,
    pub slash_thick: f64,
    pub slash_displ: f64,
}

impl Default for TabStemMetrics {
    fn default() -> Self {
        Self {
            default_stem_len_up: TAB_DEFAULT_STEM_LEN_UP,
            default_stem_len_dn: TAB_DEFAULT_STEM_LEN_DN,
            slash_width: TAB_SLASH_WIDTH,
            slash_slant_y: TAB_SLASH_SLANT_Y,
            slash_thick: TAB_SLASH_THICK,
            slash_displ: TAB_SLASH_DISPL,
        }
    }
}

impl TabStemMetrics {
    /// Total height of a double slash, top corner of the first to bottom
    /// corner of the second.
    pub fn double_slash_height(&self) -> f64 {
        self.slash_thick + self.slash_displ + self.slash_slant_y
    }

    /// Start of the double slash on an up stem, measured from the stem end.
    pub fn double_slash_start_up(&self) -> f64 {
        (self.default_stem_len_up - self.double_slash_height()) / 2.0
    }

    /// Start of the double slash on a down stem, measured from the stem end.
    pub fn double_slash_start_dn(&self) -> f64 {
        (self.default_stem_len_up + self.double_slash_height()) / 2.0
    }
}
