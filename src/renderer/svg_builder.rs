//! SVG painter. Accumulates SVG elements and produces the final string.

use super::constants::*;
use super::{Painter, Pen, PenCapStyle, SymId};
use crate::geometry::{LineF, PointF, RectF};

pub struct SvgPainter {
    elements: Vec<String>,
    width: f64,
    height: f64,
    /// Offset added to every local coordinate
    origin: PointF,
}

impl SvgPainter {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            origin: PointF::default(),
        }
    }

    /// Canvas sized to `bbox` plus a margin, with the origin placed so the
    /// box lands inside it.
    pub fn fitting(bbox: RectF) -> Self {
        let r = bbox.normalized();
        let mut painter = Self::new(r.width + 2.0 * SVG_MARGIN, r.height + 2.0 * SVG_MARGIN);
        painter.origin = PointF::new(SVG_MARGIN - r.left(), SVG_MARGIN - r.top());
        painter
    }

    pub fn origin(&self) -> PointF {
        self.origin
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.1} {:.1}" width="{:.1}" height="{:.1}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect x="0" y="0" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            self.width, self.height, BACKGROUND_COLOR
        ));
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn at(&self, p: PointF) -> PointF {
        p + self.origin
    }
}

impl Painter for SvgPainter {
    fn draw_line(&mut self, line: LineF, pen: &Pen) {
        let p1 = self.at(line.p1);
        let p2 = self.at(line.p2);
        let cap = match pen.cap {
            PenCapStyle::Flat => "butt",
        };
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="{}"/>"#,
            p1.x, p1.y, p2.x, p2.y, escape_attr(&pen.color), pen.width, cap
        ));
    }

    fn fill_path(&mut self, subpaths: &[Vec<PointF>], color: &str) {
        let mut d = String::new();
        for poly in subpaths {
            for (i, p) in poly.iter().enumerate() {
                let p = self.at(*p);
                let cmd = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{}{:.2},{:.2} ", cmd, p.x, p.y));
            }
            d.push('Z');
        }
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" stroke="none"/>"#,
            d, escape_attr(color)
        ));
    }

    fn draw_symbol(&mut self, sym: SymId, pos: PointF, scale: f64, color: &str) {
        let p = self.at(pos);
        match sym {
            SymId::AugmentationDot => {
                self.elements.push(format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                    p.x, p.y, AUGMENTATION_DOT_RADIUS * scale, escape_attr(color)
                ));
            }
        }
    }
}

/// Escape a value for use inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
