// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive_and_ordered() {
    assert!(SCENE_START_DELAY_MS > 0);
    assert!(HERO_DELAY_SEC > 0.0);
    // character reveal starts after the hero timeline has begun
    assert!(CHAR_REVEAL_DELAY_SEC > HERO_DELAY_SEC);
    assert!(CHAR_REVEAL_STAGGER_SEC > 0.0);
    assert!(HOVER_FAST_SEC > 0.0 && HOVER_FAST_SEC < HOVER_SLOW_SEC);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cursor_geometry_is_consistent() {
    assert_eq!(CURSOR_HALF_PX * 2.0, CURSOR_SIZE_PX);
    assert!(CURSOR_HOVER_SCALE > 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_gains_are_fractions() {
    assert!(MAGNETIC_PULL > 0.0 && MAGNETIC_PULL < 1.0);
    assert!(LABEL_FOCUS_SCALE > 0.0 && LABEL_FOCUS_SCALE < 1.0);
    assert!(LABEL_LIFT_PX < 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn renderer_limits_are_sane() {
    assert!(MSAA_SAMPLES == 1 || MSAA_SAMPLES == 4);
    assert!(!SCENE_CONTAINER_ID.is_empty());
    for class in [CANVAS_CLASS, CURSOR_CLASS, PROGRESS_BAR_CLASS] {
        assert!(!class.is_empty() && !class.contains(' '));
    }
}
