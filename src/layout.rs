//! Stem geometry: turns the stem's lengths and its musical context into a
//! line segment and bounding box in chord coordinates.
//!
//! For beamed notes this runs twice. The final stem length is only known
//! after the measure has been stretched, but spacing needs a guessed stem
//! shape first; the guess must at least have the right direction. Both runs
//! go through the same code, only `base_length` differs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{LineF, PointF, RectF};
use crate::model::StemContext;

/// Clearance between a stem-through tablature stem and the fret mark,
/// in line distances.
const TAB_STEM_CLEARANCE: f64 = 0.7;

/// Stem-owned values that feed a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutInput {
    /// Unstretched length, always >= 0
    pub base_length: f64,
    /// User delta added to the base length
    pub user_length: f64,
    /// Unmagnified stroke width
    pub line_width: f64,
    /// Spatial unit
    pub spatium: f64,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemLayout {
    /// Stem line; `p1` at the note, `p2` at the free end
    pub line: LineF,
    /// Line padded horizontally by half the stroke width
    pub bbox: RectF,
    /// Magnification taken from the chord
    pub mag: f64,
    /// Vertical reference snapped to the stem-side note (standard staves only)
    pub ypos: Option<f64>,
}

impl Default for StemLayout {
    fn default() -> Self {
        Self {
            line: LineF::default(),
            bbox: RectF::default(),
            mag: 1.0,
            ypos: None,
        }
    }
}

/// Compute the stem line and bounding box.
pub fn compute_layout(input: &LayoutInput, ctx: &StemContext) -> StemLayout {
    let up = ctx.chord.as_ref().map_or(true, |c| c.up);
    let dir = if up { -1.0 } else { 1.0 };

    // y1: displacement to the note attach point
    let mut y1 = 0.0;
    let mut y2 = dir * (input.base_length + input.user_length);
    let mut mag = 1.0;
    let mut ypos = None;
    let mut is_tab = false;

    if let Some(chord) = &ctx.chord {
        mag = chord.mag;

        if let Some(tab) = ctx.tab() {
            is_tab = true;
            if tab.stem_through {
                // stem-side string relative to the other side of the chord
                let line_dist = tab.line_distance * input.spatium;
                y1 = (f64::from(chord.down_string) - f64::from(chord.up_string)) * dir * line_dist;

                // fret marks above lines: start half a line higher
                if !tab.on_lines {
                    y1 -= line_dist * 0.5;
                }

                y1 += dir * line_dist * TAB_STEM_CLEARANCE;
            }
        } else {
            let note = if up { &chord.down_note } else { &chord.up_note };
            y1 = if up != note.mirror {
                note.stem_up_se.y
            } else {
                note.stem_down_nw.y
            };
            ypos = Some(note.ypos);
        }

        // a beam replaces the hook
        if let Some(hook) = &chord.hook {
            if !chord.beamed {
                y2 += hook.smufl_anchor.y;
            }
        }
    }

    let half_width = input.line_width * mag * 0.5;
    let x = if is_tab { 0.0 } else { dir * half_width };
    let line = LineF::new(x, y1, x, y2);
    let bbox = RectF::from_points(line.p1, line.p2)
        .normalized()
        .adjusted(-half_width, 0.0, half_width, 0.0);

    debug!(
        up,
        tab = is_tab,
        base = input.base_length,
        user = input.user_length,
        y1,
        y2,
        "stem layout"
    );

    StemLayout { line, bbox, mag, ypos }
}

/// Hook attach point in chord coordinates, given the stem position.
pub fn flag_position(pos: PointF, layout: &StemLayout, up: bool, length: f64) -> PointF {
    pos + PointF::new(layout.bbox.left(), if up { -length } else { length })
}
