// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn pointer_ndc_corners_and_center() {
    let c = pointer_ndc(400.0, 300.0, 800.0, 600.0);
    assert!(c.length() < 1e-6);

    let top_left = pointer_ndc(0.0, 0.0, 800.0, 600.0);
    assert_eq!(top_left, Vec2::new(-1.0, 1.0));

    let bottom_right = pointer_ndc(800.0, 600.0, 800.0, 600.0);
    assert_eq!(bottom_right, Vec2::new(1.0, -1.0));
}

#[test]
fn pointer_ndc_zero_viewport_is_center() {
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
}

#[test]
fn scroll_ratio_spans_page() {
    assert_eq!(scroll_ratio(0.0, 3000.0, 1000.0), 0.0);
    assert_eq!(scroll_ratio(1000.0, 3000.0, 1000.0), 0.5);
    assert_eq!(scroll_ratio(2000.0, 3000.0, 1000.0), 1.0);
    // overscroll bounce stays in range
    assert_eq!(scroll_ratio(2100.0, 3000.0, 1000.0), 1.0);
    assert_eq!(scroll_ratio(-50.0, 3000.0, 1000.0), 0.0);
}

#[test]
fn scroll_ratio_short_page_is_zero() {
    assert_eq!(scroll_ratio(0.0, 800.0, 1000.0), 0.0);
    assert_eq!(scroll_ratio(0.0, 1000.0, 1000.0), 0.0);
}

#[test]
fn magnetic_offset_pulls_toward_pointer() {
    let off = magnetic_offset(
        Vec2::new(150.0, 40.0),
        100.0,
        20.0,
        Vec2::new(60.0, 20.0),
        0.1,
    );
    // center is (130, 30)
    assert!((off.x - 2.0).abs() < 1e-5);
    assert!((off.y - 1.0).abs() < 1e-5);
}

#[test]
fn leading_int_reads_like_parse_int() {
    assert_eq!(leading_int("150+"), Some(150));
    assert_eq!(leading_int("  42 projects"), Some(42));
    assert_eq!(leading_int("-7"), Some(-7));
    assert_eq!(leading_int("+3"), Some(3));
    assert_eq!(leading_int("abc"), None);
    assert_eq!(leading_int(""), None);
}

#[test]
fn percent_accepts_suffix() {
    assert_eq!(percent("85%"), Some(85.0));
    assert_eq!(percent(" 60 "), Some(60.0));
    assert_eq!(percent("wide"), None);
}

#[test]
fn split_chars_wraps_each_character() {
    let html = split_chars_html("Hi A");
    assert_eq!(html.matches("<span class=\"char\">").count(), 4);
    assert!(html.contains("&nbsp;"));
    assert!(html.starts_with("<span class=\"char\">H</span>"));
}

#[test]
fn split_chars_escapes_markup() {
    let html = split_chars_html("<b>");
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;"));
    assert!(html.contains("&gt;"));
}
