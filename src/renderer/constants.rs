//! Shared constants for the SVG painter.

// ── Canvas ──────────────────────────────────────────────────────────
pub(super) const SVG_MARGIN: f64 = 10.0; // padding around the stem's bbox
pub(super) const BACKGROUND_COLOR: &str = "white";

// ── Symbols (spatium units) ─────────────────────────────────────────
pub(super) const AUGMENTATION_DOT_RADIUS: f64 = 0.18;
