//! stemlib: stem geometry, drawing and persistence for music notation engraving.
//!
//! A stem takes its direction, note anchors, hook/beam attachments and staff
//! type from the owning chord and turns them into a line segment and a
//! bounding box in chord coordinates.
//!
//! # Example
//! ```
//! use stemlib::{ChordContext, EngravingStyle, StaffType, Stem, StemContext};
//!
//! let style = EngravingStyle::default();
//! let ctx = StemContext::new(ChordContext::default(), StaffType::Standard);
//! let stem = Stem::with_context(&style, ctx, 35.0);
//! assert_eq!(stem.line().p2.y, -35.0);
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod property;
pub mod renderer;
pub mod stem;
pub mod style;
pub mod xml;

use serde::{Deserialize, Serialize};

pub use error::StemError;
pub use geometry::*;
pub use layout::{compute_layout, LayoutInput, StemLayout};
pub use model::*;
pub use property::{Pid, PropertyValue};
pub use renderer::{draw_stem, Painter, Pen, PenCapStyle, SvgPainter, SymId};
pub use stem::{DropOutcome, EditSnapshot, Stem};
pub use style::{EngravingStyle, TabStemMetrics};
pub use xml::{read_stem, write_stem};

/// Stem state as exchanged over JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StemState {
    pub base_length: f64,
    pub user_length: f64,
    /// Stroke width override; absent follows the style
    pub line_width: Option<f64>,
}

/// A layout request as exchanged over JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StemRequest {
    pub state: StemState,
    pub context: StemContext,
    pub style: EngravingStyle,
}

impl StemRequest {
    /// Build and lay out the stem described by this request.
    pub fn to_stem(&self) -> Stem {
        let mut stem = Stem::new(&self.style);
        if let Some(w) = self.state.line_width {
            stem.set_line_width(w);
        }
        stem.set_user_length(self.state.user_length);
        stem.set_base_length(self.state.base_length);
        stem.layout(self.context.clone());
        stem
    }
}

/// Lay out a stem from a JSON request and return the layout as JSON.
pub fn layout_from_json(request: &str) -> Result<String, StemError> {
    let request: StemRequest = serde_json::from_str(request)?;
    let stem = request.to_stem();
    Ok(serde_json::to_string_pretty(stem.geometry())?)
}

/// Lay out and draw a stem from a JSON request, returning a standalone SVG.
pub fn render_stem_svg_from_json(request: &str) -> Result<String, StemError> {
    let request: StemRequest = serde_json::from_str(request)?;
    let stem = request.to_stem();
    let mut painter = SvgPainter::fitting(stem.bbox());
    draw_stem(&stem, &request.style, &mut painter);
    Ok(painter.build())
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

unsafe fn with_json_request(
    request: *const c_char,
    f: fn(&str) -> Result<String, StemError>,
) -> *mut c_char {
    if request.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(request) };
    let Ok(json) = c_str.to_str() else {
        return std::ptr::null_mut();
    };

    match f(json) {
        Ok(out) => CString::new(out).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Lay out a stem described by a JSON request and return the layout as JSON.
/// The caller must free the returned string with `stemlib_free_string`.
///
/// # Safety
/// `request` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn stemlib_layout_json(request: *const c_char) -> *mut c_char {
    unsafe { with_json_request(request, layout_from_json) }
}

/// Render a stem described by a JSON request to SVG.
/// The caller must free the returned string with `stemlib_free_string`.
///
/// # Safety
/// `request` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn stemlib_render_svg(request: *const c_char) -> *mut c_char {
    unsafe { with_json_request(request, render_stem_svg_from_json) }
}

/// Free a string previously returned by stemlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a stemlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn stemlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
