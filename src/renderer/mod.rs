//! Stem drawing: paints a laid-out stem through a [`Painter`] backend.
//!
//! On tablature the stem also carries what a notehead would on a standard
//! staff: slashes for half notes and the augmentation dots.

mod constants;
mod svg_builder;

use tracing::debug;

use crate::geometry::{LineF, PointF};
use crate::model::{CrossMeasure, DurationType, TablatureMinimStyle};
use crate::stem::Stem;
use crate::style::{EngravingStyle, TabStemMetrics};

pub use svg_builder::SvgPainter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenCapStyle {
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: String,
    pub width: f64,
    pub cap: PenCapStyle,
}

/// Symbols the stem may ask the painter for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymId {
    AugmentationDot,
}

/// Drawing backend. Coordinates are local to the stem's chord.
pub trait Painter {
    fn draw_line(&mut self, line: LineF, pen: &Pen);

    /// Fill a path made of closed polygons.
    fn fill_path(&mut self, subpaths: &[Vec<PointF>], color: &str);

    /// Draw a glyph at `pos`; `scale` is spatium times magnification.
    fn draw_symbol(&mut self, sym: SymId, pos: PointF, scale: f64, color: &str);
}

/// Draw a stem. Returns `false` when nothing was drawn.
pub fn draw_stem(stem: &Stem, style: &EngravingStyle, painter: &mut dyn Painter) -> bool {
    let Some(chord) = stem.chord() else {
        return false;
    };
    if chord.cross_measure == CrossMeasure::Second {
        debug!("stem of second cross-measure chord not drawn");
        return false;
    }

    let pen = Pen {
        color: style.stem_color.clone(),
        width: stem.line_width_mag(),
        cap: PenCapStyle::Flat,
    };
    painter.draw_line(stem.line(), &pen);

    let Some(tab) = stem.context().tab() else {
        return true;
    };

    let sp = stem.spatium();
    let up = stem.up();
    let metrics = &style.tab;

    if chord.duration == DurationType::Half && tab.minim_style == TablatureMinimStyle::Slashed {
        let mut y = if up {
            -stem.length() + metrics.double_slash_start_up() * sp
        } else {
            stem.length() - metrics.double_slash_start_dn() * sp
        };
        // align slashes within or across lines
        if tab.stem_through {
            let half_line_dist = tab.line_distance * sp * 0.5;
            let half_slash_hgt = metrics.double_slash_height() * sp * 0.5;
            y = ((y + half_slash_hgt) / half_line_dist).round_ties_even() * half_line_dist
                - half_slash_hgt;
        }
        painter.fill_path(&slash_polygons(y, sp, metrics), &style.stem_color);
    }

    // tab notes have no notehead to hang dots on, so they go by the stem
    if chord.dots > 0 && !tab.stem_through {
        let dir = if up { -1.0 } else { 1.0 };
        let y = metrics.default_stem_len_dn * 0.2 * sp * dir;
        let step = style.dot_dot_distance * sp;
        let mut x = chord.dot_pos_x;
        for _ in 0..chord.dots {
            painter.draw_symbol(SymId::AugmentationDot, PointF::new(x, y), sp * stem.mag(), &style.stem_color);
            x += step;
        }
    }

    true
}

/// Two slanted parallelograms starting at `y`.
fn slash_polygons(mut y: f64, sp: f64, metrics: &TabStemMetrics) -> Vec<Vec<PointF>> {
    let hw = sp * metrics.slash_width * 0.5;
    let sln = sp * metrics.slash_slant_y;
    let thk = sp * metrics.slash_thick;
    let displ = sp * metrics.slash_displ;

    let mut polys = Vec::with_capacity(2);
    for _ in 0..2 {
        polys.push(vec![
            PointF::new(hw, y),
            PointF::new(hw, y + thk),
            PointF::new(-hw, y + thk + sln),
            PointF::new(-hw, y + sln),
        ]);
        y += displ;
    }
    polys
}
