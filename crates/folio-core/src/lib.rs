pub mod camera;
pub mod color;
pub mod constants;
pub mod director;
pub mod ease;
pub mod error;
pub mod scene;
pub mod style;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use camera::Camera;
pub use director::{AnimationId, Director, Measure};
pub use ease::{Ease, EaseDir};
pub use error::ParseError;
pub use scene::{mount, FrameInput, Scene, SceneConfig, Viewport};
pub use style::{Endpoint, Prop, Style, Value};
pub use timeline::{Position, Timeline};
pub use trigger::{Action, Anchor, Bounds, Edge, Scrub, ScrollTrigger, ScrollView, ToggleActions};
pub use tween::{Repeat, StyleStore, TargetId, Tween, TweenVars};

// Shaders bundled as string constants
pub static CIRCLES_WGSL: &str = include_str!("../shaders/circles.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
