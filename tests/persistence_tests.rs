//! Persistence and host-boundary tests: XML properties, JSON requests, FFI,
//! property dispatch and drops.

use std::ffi::{CStr, CString};

use pretty_assertions::assert_eq;
use stemlib::{
    layout_from_json, read_stem, render_stem_svg_from_json, stemlib_free_string,
    stemlib_layout_json, write_stem, ChordContext, DropElement, DropOutcome, EngravingStyle, Pid,
    PropertyValue, StaffType, Stem, StemContext, StemError, StemLayout, TremoloType,
};

fn attached() -> Stem {
    Stem::with_context(
        &EngravingStyle::default(),
        StemContext::new(ChordContext::default(), StaffType::Standard),
        35.0,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// XML
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn user_length_and_line_width_survive_write_read() {
    let mut stem = attached();
    stem.set_user_length(2.5);
    stem.set_line_width(1.25);
    let xml = write_stem(&stem);
    assert_eq!(
        xml,
        "<Stem>\n  <userLen>2.5</userLen>\n  <lineWidth>1.25</lineWidth>\n</Stem>\n"
    );

    let mut loaded = attached();
    read_stem(&xml, &mut loaded).expect("Failed to read stem");
    assert_eq!(loaded.user_length(), 2.5);
    assert_eq!(loaded.line_width(), 1.25);
    assert_eq!(loaded.geometry(), stem.geometry());
}

#[test]
fn read_skips_unknown_tags() {
    let mut stem = attached();
    read_stem("<Stem><visible>0</visible><userLen> -3 </userLen></Stem>", &mut stem).unwrap();
    assert_eq!(stem.user_length(), -3.0);
    assert!(stem.is_line_width_styled());
    assert_eq!(stem.line().p2.y, -32.0);
}

#[test]
fn read_rejects_other_elements() {
    let mut stem = attached();
    let err = read_stem("<Hook/>", &mut stem).unwrap_err();
    assert!(matches!(err, StemError::UnexpectedRoot(ref name) if name == "Hook"));
    assert!(matches!(read_stem("<Stem>", &mut stem), Err(StemError::Xml(_))));
}

// ═══════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn property_defaults() {
    let stem = attached();
    assert_eq!(stem.property_default(Pid::UserLen), PropertyValue::Real(0.0));
    assert_eq!(
        stem.property_default(Pid::LineWidth),
        PropertyValue::Real(stem.styled_line_width())
    );
    assert!(stem.is_default(Pid::UserLen));
    assert!(stem.is_default(Pid::StemDirection));
}

// ═══════════════════════════════════════════════════════════════════════
// Drop
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn only_single_chord_tremolos_are_accepted() {
    let stem = attached();
    assert!(stem.accept_drop(&DropElement::Tremolo(TremoloType::R8)));
    assert!(stem.accept_drop(&DropElement::Tremolo(TremoloType::R64)));
    assert!(!stem.accept_drop(&DropElement::Tremolo(TremoloType::BuzzRoll)));
    assert!(!stem.accept_drop(&DropElement::Tremolo(TremoloType::C16)));
    assert!(!stem.accept_drop(&DropElement::Other("Articulation".into())));

    assert_eq!(
        stem.drop(DropElement::Tremolo(TremoloType::R32)),
        DropOutcome::AttachToChord(DropElement::Tremolo(TremoloType::R32))
    );
    assert_eq!(stem.drop(DropElement::Tremolo(TremoloType::C8)), DropOutcome::Rejected);
}

#[test]
fn grip_sits_at_free_end() {
    let stem = attached();
    let grips = stem.grips_positions(stemlib::PointF::new(100.0, 50.0));
    assert_eq!(grips.len(), 1);
    assert_eq!(grips[0].y, 15.0);
}

// ═══════════════════════════════════════════════════════════════════════
// JSON and FFI
// ═══════════════════════════════════════════════════════════════════════

const REQUEST: &str = r#"{
    "state": { "base_length": 3.0, "user_length": 0.5 },
    "context": {
        "chord": { "up": false, "hook": { "smufl_anchor": { "x": 0.0, "y": 0.25 } } },
        "staff_type": { "kind": "standard" }
    },
    "style": { "spatium": 1.0 }
}"#;

#[test]
fn json_layout_request() {
    let out = layout_from_json(REQUEST).expect("layout request should succeed");
    let layout: StemLayout = serde_json::from_str(&out).unwrap();
    assert_eq!(layout.line.p2.y, 3.75);
    assert_eq!(layout.mag, 1.0);
    assert_eq!(layout.ypos, Some(0.0));
}

#[test]
fn json_tab_request_and_svg() {
    let req = r#"{
        "state": { "base_length": 30.0 },
        "context": {
            "chord": { "up": true, "duration": "half", "up_string": 1, "down_string": 4 },
            "staff_type": { "kind": "tablature", "stem_through": true, "line_distance": 1.5,
                            "on_lines": true, "minim_style": "slashed" }
        }
    }"#;
    let svg = render_stem_svg_from_json(req).expect("render request should succeed");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<path"));
}

#[test]
fn extreme_string_indices_stay_finite() {
    let req = r#"{
        "state": { "base_length": 3.0 },
        "context": {
            "chord": { "up": true, "up_string": -2147483648, "down_string": 2147483647 },
            "staff_type": { "kind": "tablature", "stem_through": true, "line_distance": 1.0,
                            "on_lines": true }
        },
        "style": { "spatium": 1.0 }
    }"#;
    let out = layout_from_json(req).expect("extreme strings must not abort the layout");
    let layout: StemLayout = serde_json::from_str(&out).unwrap();
    assert!(layout.line.p1.y.is_finite());
    assert!((layout.line.p1.y - (-(u32::MAX as f64) - 0.7)).abs() < 1e-3);
}

#[test]
fn svg_escapes_stem_colour_from_json() {
    let req = r#"{
        "state": { "base_length": 30.0 },
        "context": { "chord": { "up": true }, "staff_type": { "kind": "standard" } },
        "style": { "stem_color": "red\" onload=\"alert(1)" }
    }"#;
    let svg = render_stem_svg_from_json(req).expect("render request should succeed");
    assert!(!svg.contains("onload=\""));
    assert!(svg.contains("red&quot; onload=&quot;alert(1)"));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(layout_from_json("{"), Err(StemError::Json(_))));
}

#[test]
fn ffi_layout_round_trip() {
    let req = CString::new(REQUEST).unwrap();
    unsafe {
        let out = stemlib_layout_json(req.as_ptr());
        assert!(!out.is_null());
        let json = CStr::from_ptr(out).to_str().unwrap().to_owned();
        stemlib_free_string(out);
        assert!(json.contains("\"line\""));

        let bad = CString::new("not json").unwrap();
        assert!(stemlib_layout_json(bad.as_ptr()).is_null());
        assert!(stemlib_layout_json(std::ptr::null()).is_null());
    }
}
