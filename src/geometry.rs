//! Plain 2D value types used by stem layout and drawing.
//!
//! All coordinates are in absolute units (spatium already applied), with the
//! y-axis pointing down as in SVG.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A point in local (chord-relative) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for PointF {
    type Output = PointF;

    fn add(self, rhs: PointF) -> PointF {
        PointF::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineF {
    pub p1: PointF,
    pub p2: PointF,
}

impl LineF {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            p1: PointF::new(x1, y1),
            p2: PointF::new(x2, y2),
        }
    }

    /// Signed vertical extent (`p2.y - p1.y`).
    pub fn dy(&self) -> f64 {
        self.p2.y - self.p1.y
    }
}

/// An axis-aligned rectangle. `width`/`height` may be negative until
/// [`RectF::normalized`] is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanned by `top_left` and `bottom_right`, without reordering.
    pub fn from_points(top_left: PointF, bottom_right: PointF) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: bottom_right.x - top_left.x,
            height: bottom_right.y - top_left.y,
        }
    }

    /// Same rectangle with non-negative width and height.
    pub fn normalized(&self) -> RectF {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        RectF { x, y, width, height }
    }

    /// Move each edge by the given deltas (left, top, right, bottom).
    pub fn adjusted(&self, dx1: f64, dy1: f64, dx2: f64, dy2: f64) -> RectF {
        RectF {
            x: self.x + dx1,
            y: self.y + dy1,
            width: self.width - dx1 + dx2,
            height: self.height - dy1 + dy2,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: PointF) -> bool {
        let r = self.normalized();
        p.x >= r.left() && p.x <= r.right() && p.y >= r.top() && p.y <= r.bottom()
    }
}
