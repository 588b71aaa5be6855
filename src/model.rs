//! Read-only views of the musical context a stem is laid out in.
//!
//! The host owns chords, notes, hooks and staff types; the stem only needs a
//! handful of their attributes. These structures carry exactly those
//! attributes so layout can run without the host's element hierarchy.

use serde::{Deserialize, Serialize};

use crate::geometry::PointF;

/// Stem direction as stored on a chord (or requested by the user).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Auto,
    Up,
    Down,
}

/// Base duration of the chord, as far as stem drawing cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
    Long,
    Breve,
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    #[serde(rename = "16th")]
    D16th,
    #[serde(rename = "32nd")]
    D32nd,
    #[serde(rename = "64th")]
    D64th,
    #[serde(rename = "128th")]
    D128th,
}

/// Position of a chord in a cross-measure pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossMeasure {
    #[default]
    None,
    First,
    /// Second half of the pair; not drawn, the first chord covers it.
    Second,
}

/// How half notes are shown on tablature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TablatureMinimStyle {
    #[default]
    None,
    Shortened,
    Slashed,
}

/// Tablature-specific staff attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabStaffType {
    /// Stems are drawn through the staff instead of beside it
    pub stem_through: bool,
    /// Distance between string lines, in spatium units
    pub line_distance: f64,
    /// Fret marks sit on the lines (false: above them)
    pub on_lines: bool,
    /// Half-note convention
    #[serde(default)]
    pub minim_style: TablatureMinimStyle,
}

impl Default for TabStaffType {
    fn default() -> Self {
        Self {
            stem_through: false,
            line_distance: 1.5,
            on_lines: true,
            minim_style: TablatureMinimStyle::None,
        }
    }
}

/// Staff classification used by the stem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StaffType {
    #[default]
    Standard,
    Tablature(TabStaffType),
}

impl StaffType {
    pub fn tab(&self) -> Option<&TabStaffType> {
        match self {
            StaffType::Tablature(t) => Some(t),
            StaffType::Standard => None,
        }
    }
}

/// The attach points of one notehead, precomputed by the note's own layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteAnchor {
    /// Vertical position of the note relative to the chord
    pub ypos: f64,
    /// Notehead is flipped to the other side of the stem
    #[serde(default)]
    pub mirror: bool,
    /// Stem attach point for an up stem (south-east of the notehead)
    #[serde(default)]
    pub stem_up_se: PointF,
    /// Stem attach point for a down stem (north-west of the notehead)
    #[serde(default)]
    pub stem_down_nw: PointF,
}

/// A hook (flag) attached to the chord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HookAnchor {
    /// SMuFL stem attach offset of the flag glyph
    pub smufl_anchor: PointF,
}

/// Everything the stem reads from its owning chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordContext {
    /// Resolved stem direction of the chord
    pub up: bool,
    /// Magnification of the chord (small notes, cue notes, staff scaling)
    pub mag: f64,
    /// Topmost note of the chord
    pub up_note: NoteAnchor,
    /// Bottommost note of the chord
    pub down_note: NoteAnchor,
    /// Topmost string used by the chord (tablature; 0 is the top line)
    pub up_string: i32,
    /// Bottommost string used by the chord (tablature)
    pub down_string: i32,
    /// Attached hook, if any
    pub hook: Option<HookAnchor>,
    /// Chord is part of a beam group
    pub beamed: bool,
    /// Base duration of the chord
    pub duration: DurationType,
    /// Number of augmentation dots
    pub dots: u32,
    /// X position where the chord's dots start
    pub dot_pos_x: f64,
    /// Cross-measure role
    pub cross_measure: CrossMeasure,
    /// Staff the chord belongs to
    pub staff_idx: usize,
    /// Cross-staff move (-1 above, +1 below, 0 none)
    pub staff_move: i32,
}

impl Default for ChordContext {
    fn default() -> Self {
        Self {
            up: true,
            mag: 1.0,
            up_note: NoteAnchor::default(),
            down_note: NoteAnchor::default(),
            up_string: 0,
            down_string: 0,
            hook: None,
            beamed: false,
            duration: DurationType::Quarter,
            dots: 0,
            dot_pos_x: 0.0,
            cross_measure: CrossMeasure::None,
            staff_idx: 0,
            staff_move: 0,
        }
    }
}

/// Inputs from collaborators for one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemContext {
    /// Owning chord (absent only for detached stems)
    pub chord: Option<ChordContext>,
    /// Staff type in effect at the chord
    pub staff_type: Option<StaffType>,
}

impl StemContext {
    pub fn new(chord: ChordContext, staff_type: StaffType) -> Self {
        Self {
            chord: Some(chord),
            staff_type: Some(staff_type),
        }
    }

    /// Tablature attributes, when the chord sits on a tablature staff.
    pub fn tab(&self) -> Option<&TabStaffType> {
        self.chord.as_ref()?;
        self.staff_type.as_ref().and_then(StaffType::tab)
    }
}

/// Tremolo kinds, in host order. Everything up to `R64` is a
/// single-chord tremolo drawn across the stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TremoloType {
    R8,
    R16,
    R32,
    R64,
    BuzzRoll,
    C8,
    C16,
    C32,
    C64,
}

/// An element the user tries to drop onto a stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DropElement {
    Tremolo(TremoloType),
    /// Any other palette element, by host type name
    Other(String),
}
