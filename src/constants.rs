/// Page timing and renderer tuning for the web front-end.
///
/// Scene motion constants live in `folio_core::constants`; these cover the
/// DOM glue: start delays, cursor geometry, magnetic pull and GPU settings.
// Scene boot waits for the loading screen to settle (milliseconds)
pub const SCENE_START_DELAY_MS: i32 = 1000;

// Hero timeline waits for the loading screen (seconds)
pub const HERO_DELAY_SEC: f32 = 3.5;
// Hero title character reveal
pub const CHAR_REVEAL_DELAY_SEC: f32 = 4.0;
pub const CHAR_REVEAL_STAGGER_SEC: f32 = 0.05;

// Upper bound on a single director step; hidden tabs resume without a jump
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Custom cursor
pub const CURSOR_SIZE_PX: f32 = 20.0;
pub const CURSOR_HALF_PX: f32 = CURSOR_SIZE_PX * 0.5;
pub const CURSOR_HOVER_SCALE: f32 = 2.0;

// Magnetic buttons follow the pointer by this fraction of its offset from center
pub const MAGNETIC_PULL: f32 = 0.1;

// Hover tween lengths (seconds)
pub const HOVER_FAST_SEC: f32 = 0.3;
pub const HOVER_SLOW_SEC: f32 = 0.4;

// Form label lift on focus
pub const LABEL_LIFT_PX: f32 = -25.0;
pub const LABEL_FOCUS_SCALE: f32 = 0.8;

// Renderer
pub const MSAA_SAMPLES: u32 = 4;

// DOM hooks
pub const SCENE_CONTAINER_ID: &str = "three-container";
pub const CANVAS_CLASS: &str = "scene-canvas";
pub const CURSOR_CLASS: &str = "custom-cursor";
pub const PROGRESS_BAR_CLASS: &str = "scroll-progress";
