//! The stem element: persistent state plus cached geometry.
//!
//! Every mutator re-runs [`compute_layout`] before returning, so `line()` and
//! `bbox()` never describe an older state.

use tracing::debug;

use crate::geometry::{LineF, PointF, RectF};
use crate::layout::{compute_layout, flag_position, LayoutInput, StemLayout};
use crate::model::{ChordContext, DropElement, Direction, StemContext, TremoloType};
use crate::style::EngravingStyle;

/// Snapshot of the editable property, taken when an edit session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSnapshot {
    pub user_length: f64,
}

/// What happened to an element dropped on the stem.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Reparent the element to the stem's chord
    AttachToChord(DropElement),
    /// The element is discarded
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Stem {
    base_length: f64,
    user_length: f64,
    /// User override; `None` follows the style
    line_width: Option<f64>,
    /// Styled width in spatium units
    stem_width: f64,
    spatium: f64,
    direction_override: Direction,
    context: StemContext,
    layout: StemLayout,
}

impl Stem {
    /// A detached stem with styled line width and no user length.
    pub fn new(style: &EngravingStyle) -> Self {
        let mut stem = Self {
            base_length: 0.0,
            user_length: 0.0,
            line_width: None,
            stem_width: style.stem_width,
            spatium: style.spatium,
            direction_override: Direction::Auto,
            context: StemContext::default(),
            layout: StemLayout::default(),
        };
        stem.relayout();
        stem
    }

    /// A stem attached to a chord, laid out with `base_length`.
    pub fn with_context(style: &EngravingStyle, context: StemContext, base_length: f64) -> Self {
        let mut stem = Self::new(style);
        stem.base_length = base_length.abs();
        stem.layout(context);
        stem
    }

    // ── Layout ──────────────────────────────────────────────────────

    /// Replace the musical context and recompute the geometry.
    pub fn layout(&mut self, context: StemContext) {
        self.context = context;
        self.relayout();
    }

    fn relayout(&mut self) {
        let input = LayoutInput {
            base_length: self.base_length,
            user_length: self.user_length,
            line_width: self.line_width(),
            spatium: self.spatium,
        };
        self.layout = compute_layout(&input, &self.context);
    }

    pub fn context(&self) -> &StemContext {
        &self.context
    }

    pub fn chord(&self) -> Option<&ChordContext> {
        self.context.chord.as_ref()
    }

    /// Current layout result.
    pub fn geometry(&self) -> &StemLayout {
        &self.layout
    }

    pub fn line(&self) -> LineF {
        self.layout.line
    }

    pub fn bbox(&self) -> RectF {
        self.layout.bbox
    }

    pub fn mag(&self) -> f64 {
        self.layout.mag
    }

    /// Vertical reference snapped to the stem-side note, when one was found.
    pub fn ypos(&self) -> Option<f64> {
        self.layout.ypos
    }

    // ── Lengths ─────────────────────────────────────────────────────

    pub fn base_length(&self) -> f64 {
        self.base_length
    }

    /// Set the unstretched length; the sign is dropped.
    pub fn set_base_length(&mut self, base_length: f64) {
        self.base_length = base_length.abs();
        self.relayout();
    }

    pub fn user_length(&self) -> f64 {
        self.user_length
    }

    pub fn set_user_length(&mut self, user_length: f64) {
        self.user_length = user_length;
        self.relayout();
    }

    /// Total stem length before hook adjustment.
    pub fn length(&self) -> f64 {
        self.base_length + self.user_length
    }

    pub fn spatium(&self) -> f64 {
        self.spatium
    }

    /// The spatial unit changed: rescale the user length and relayout.
    pub fn spatium_changed(&mut self, old_value: f64, new_value: f64) {
        self.user_length = (self.user_length / old_value) * new_value;
        self.spatium = new_value;
        debug!(old_value, new_value, user = self.user_length, "stem spatium changed");
        self.relayout();
    }

    /// The style sheet changed: pick up the styled width and spatium, then
    /// relayout. A user line width override is kept.
    pub fn style_changed(&mut self, style: &EngravingStyle) {
        self.stem_width = style.stem_width;
        if style.spatium != self.spatium {
            self.spatium_changed(self.spatium, style.spatium);
        } else {
            self.relayout();
        }
    }

    // ── Stroke ──────────────────────────────────────────────────────

    /// Effective (unmagnified) stroke width in absolute units.
    pub fn line_width(&self) -> f64 {
        self.line_width
            .unwrap_or_else(|| self.styled_line_width())
    }

    pub fn is_line_width_styled(&self) -> bool {
        self.line_width.is_none()
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = Some(width);
        self.relayout();
    }

    /// Drop the override and follow the style again.
    pub fn reset_line_width(&mut self) {
        self.line_width = None;
        self.relayout();
    }

    pub fn styled_line_width(&self) -> f64 {
        self.stem_width * self.spatium
    }

    pub fn line_width_mag(&self) -> f64 {
        self.line_width() * self.layout.mag
    }

    // ── Direction ───────────────────────────────────────────────────

    /// Resolved direction; up when there is no chord.
    pub fn up(&self) -> bool {
        self.chord().map_or(true, |c| c.up)
    }

    pub fn direction_override(&self) -> Direction {
        self.direction_override
    }

    pub fn set_direction_override(&mut self, direction: Direction) {
        self.direction_override = direction;
    }

    /// Staff index the stem is drawn on, including cross-staff moves.
    pub fn v_staff_idx(&self) -> Option<i64> {
        self.chord()
            .map(|c| c.staff_idx as i64 + i64::from(c.staff_move))
    }

    /// Hook attach point in chord coordinates.
    pub fn flag_position(&self, pos: PointF) -> PointF {
        flag_position(pos, &self.layout, self.up(), self.length())
    }

    // ── Editing ─────────────────────────────────────────────────────

    /// Grip handles in page coordinates: one at the free end.
    pub fn grips_positions(&self, page_pos: PointF) -> Vec<PointF> {
        vec![page_pos + self.layout.line.p2]
    }

    pub fn start_edit(&self) -> EditSnapshot {
        EditSnapshot { user_length: self.user_length }
    }

    /// Restore the state captured by [`Stem::start_edit`].
    pub fn cancel_edit(&mut self, snapshot: EditSnapshot) {
        self.set_user_length(snapshot.user_length);
    }

    /// Drag the free end by `dy`. Returns the offset the host must apply to
    /// the chord's hook, if there is one.
    pub fn edit_drag(&mut self, dy: f64) -> Option<PointF> {
        self.user_length += if self.up() { -dy } else { dy };
        self.relayout();
        self.chord()
            .and_then(|c| c.hook.as_ref())
            .map(|_| PointF::new(0.0, dy))
    }

    pub fn reset(&mut self) {
        self.set_user_length(0.0);
    }

    // ── Drop ────────────────────────────────────────────────────────

    /// Only single-chord tremolos can be dropped on a stem.
    pub fn accept_drop(&self, element: &DropElement) -> bool {
        matches!(element, DropElement::Tremolo(t) if *t <= TremoloType::R64)
    }

    pub fn drop(&self, element: DropElement) -> DropOutcome {
        if self.chord().is_some() && self.accept_drop(&element) {
            DropOutcome::AttachToChord(element)
        } else {
            debug!(?element, "drop rejected by stem");
            DropOutcome::Rejected
        }
    }
}
