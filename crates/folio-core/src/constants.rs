// Background scene tuning shared by the web frontend and the host tests.

// Population
pub const CIRCLE_COUNT: usize = 15;
pub const PARTICLE_COUNT: usize = 600;
// Upper bounds for container overrides; instance buffers are sized from these
pub const MAX_CIRCLES: usize = 256;
pub const MAX_PARTICLES: usize = 4096;

// Palettes (0xRRGGBB)
pub const CIRCLE_PALETTE: [u32; 8] = [
    0x00d4ff, // primary blue
    0x4ecdc4, // teal
    0x8b5cf6, // purple
    0xec4899, // pink
    0xf97316, // orange
    0x14b8a6, // vibrant teal
    0x06b6d4, // sky blue
    0x10b981, // emerald
];
pub const PARTICLE_PALETTE: [u32; 6] = [
    0x00d4ff,
    0x4ecdc4,
    0x8b5cf6,
    0xec4899,
    0xf97316,
    0x14b8a6,
];

// Circle spawn volume (full extents, centered on the origin)
pub const CIRCLE_SPREAD: [f32; 3] = [15.0, 12.0, 10.0];
pub const PARTICLE_SPREAD: [f32; 3] = [30.0, 25.0, 20.0];

// Per-frame motion
pub const PULSE_BAND: f32 = 0.15; // scale swings ±15% around the base pulse
pub const OPACITY_SWING: f32 = 0.15;
pub const OPACITY_MIN: f32 = 0.1;
pub const OPACITY_MAX: f32 = 0.8;
pub const FLOAT_Z_AMPLITUDE: f32 = 0.5;
pub const PARTICLE_ROTATION_STEP: [f32; 2] = [0.0003, 0.0007]; // rad per frame (x, y)

// Pointer interaction
pub const POINTER_WORLD_SPREAD: f32 = 6.0; // NDC pointer -> world xy
pub const HOVER_RADIUS: f32 = 4.0;
pub const HOVER_SCALE_GAIN: f32 = 0.3;
pub const HOVER_OPACITY_GAIN: f32 = 0.4;
pub const HOVER_OPACITY_MAX: f32 = 0.9;

// Scroll response
pub const SCROLL_SPIN: f32 = 0.0005;
pub const SCROLL_FADE: f32 = 0.6;
pub const SCROLL_FADE_FLOOR: f32 = 0.2;
pub const SCROLL_DRIFT_Y: f32 = 2.0;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_FOLLOW_GAIN: f32 = 0.015; // pointer NDC -> camera offset
pub const CAMERA_FOLLOW_RATE: f32 = 0.02; // fraction of the gap closed per frame

// Narrow viewports get calmer motion
pub const NARROW_VIEWPORT_PX: f32 = 768.0;
pub const NARROW_FLOAT_FACTOR: f32 = 0.7;
pub const NARROW_ROTATION_FACTOR: f32 = 0.6;

// Particle sprites
pub const PARTICLE_SIZE_ATTENUATION: f32 = 250.0;
