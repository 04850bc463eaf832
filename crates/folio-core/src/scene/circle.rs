use crate::color::{hex_rgb, hsl_to_rgb};
use crate::constants::*;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Fixed personality of one circle, rolled once at creation.
#[derive(Clone, Debug)]
pub struct CircleParams {
    pub radius: f32,
    pub base_color: [f32; 3],
    pub origin: Vec3,
    pub float_speed: f32,
    pub float_offset: f32,
    pub float_amplitude: Vec2,
    pub rotation_speed: Vec3,
    pub pulse_speed: f32,
    pub pulse_offset: f32,
    pub base_pulse: f32,
    pub opacity_speed: f32,
    pub opacity_offset: f32,
    pub base_opacity: f32,
    pub color_speed: f32,
}

/// Per-frame render state of one circle.
#[derive(Clone, Debug)]
pub struct CircleState {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub color: [f32; 3],
    pub color_phase: f32,
}

#[inline]
fn centered(rng: &mut impl Rng, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}

impl CircleParams {
    pub fn roll(rng: &mut impl Rng, calm: bool) -> (Self, CircleState) {
        let radius = rng.gen::<f32>() * 1.2 + 0.4;
        let base_color = hex_rgb(CIRCLE_PALETTE[rng.gen_range(0..CIRCLE_PALETTE.len())]);
        let base_opacity = rng.gen::<f32>() * 0.5 + 0.2;
        let origin = Vec3::new(
            centered(rng, CIRCLE_SPREAD[0]),
            centered(rng, CIRCLE_SPREAD[1]),
            centered(rng, CIRCLE_SPREAD[2]),
        );
        let rotation = Vec3::new(
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
        );
        let (float_factor, spin_factor) = if calm {
            (NARROW_FLOAT_FACTOR, NARROW_ROTATION_FACTOR)
        } else {
            (1.0, 1.0)
        };
        let params = Self {
            radius,
            base_color,
            origin,
            float_speed: (rng.gen::<f32>() * 0.015 + 0.008) * float_factor,
            float_offset: rng.gen::<f32>() * TAU,
            float_amplitude: Vec2::new(
                rng.gen::<f32>() * 1.5 + 0.5,
                rng.gen::<f32>() * 2.5 + 1.0,
            ),
            rotation_speed: Vec3::new(
                centered(rng, 0.008) * spin_factor,
                centered(rng, 0.008) * spin_factor,
                centered(rng, 0.012) * spin_factor,
            ),
            pulse_speed: (rng.gen::<f32>() * 0.025 + 0.015) * float_factor,
            pulse_offset: rng.gen::<f32>() * TAU,
            base_pulse: rng.gen::<f32>() * 0.3 + 0.7,
            opacity_speed: rng.gen::<f32>() * 0.02 + 0.008,
            opacity_offset: rng.gen::<f32>() * TAU,
            base_opacity,
            color_speed: rng.gen::<f32>() * 0.005 + 0.002,
        };
        let state = CircleState {
            position: origin,
            rotation,
            scale: params.base_pulse,
            opacity: base_opacity,
            color: base_color,
            color_phase: rng.gen::<f32>() * TAU,
        };
        (params, state)
    }

    pub fn float_position(&self, t: f32) -> Vec3 {
        Vec3::new(
            self.origin.x
                + (t * self.float_speed * 0.6 + self.float_offset).cos() * self.float_amplitude.x,
            self.origin.y + (t * self.float_speed + self.float_offset).sin() * self.float_amplitude.y,
            self.origin.z
                + (t * self.float_speed * 0.4 + self.float_offset).sin() * FLOAT_Z_AMPLITUDE,
        )
    }

    /// Breathing scale, within ±[`PULSE_BAND`] of the base pulse.
    pub fn pulse_scale(&self, t: f32) -> f32 {
        self.base_pulse * (1.0 + (t * self.pulse_speed + self.pulse_offset).sin() * PULSE_BAND)
    }

    pub fn pulse_opacity(&self, t: f32) -> f32 {
        (self.base_opacity + (t * self.opacity_speed + self.opacity_offset).sin() * OPACITY_SWING)
            .clamp(OPACITY_MIN, OPACITY_MAX)
    }
}

/// Closeness of the pointer to a circle: 1 on top of it, 0 at [`HOVER_RADIUS`].
pub fn hover_proximity(position: Vec3, pointer_ndc: Vec2) -> f32 {
    let pointer_world = pointer_ndc * POINTER_WORLD_SPREAD;
    let d = Vec2::new(position.x, position.y).distance(pointer_world);
    if d < HOVER_RADIUS {
        (HOVER_RADIUS - d) / HOVER_RADIUS
    } else {
        0.0
    }
}

/// Opacity multiplier applied as the page scrolls (1 at the top, 0.4 at the bottom).
#[inline]
pub fn scroll_fade(ratio: f32) -> f32 {
    (1.0 - ratio.clamp(0.0, 1.0) * SCROLL_FADE).max(SCROLL_FADE_FLOOR)
}

impl CircleState {
    /// One frame of motion at `t` seconds. `index` desynchronises the color wobble.
    pub fn advance(&mut self, params: &CircleParams, t: f32, index: usize, pointer: Option<Vec2>) {
        self.position = params.float_position(t);
        self.rotation += params.rotation_speed;
        self.scale = params.pulse_scale(t);
        self.opacity = params.pulse_opacity(t);

        self.color_phase += params.color_speed;
        let hue = self.color_phase.rem_euclid(TAU) / TAU;
        let i = index as f32;
        let saturation = 0.7 + (t * 0.3 + i).sin() * 0.2;
        let lightness = 0.5 + (t * 0.2 + i).sin() * 0.1;
        self.color = hsl_to_rgb(hue, saturation, lightness);

        if let Some(p) = pointer {
            let near = hover_proximity(self.position, p);
            if near > 0.0 {
                self.scale *= 1.0 + near * HOVER_SCALE_GAIN;
                self.opacity = (self.opacity * (1.0 + near * HOVER_OPACITY_GAIN)).min(HOVER_OPACITY_MAX);
            }
        }
    }

    /// Scroll listener response: spin a little, fade and drift up the page.
    pub fn apply_scroll(&mut self, params: &CircleParams, ratio: f32) {
        let ratio = ratio.clamp(0.0, 1.0);
        self.rotation.z += ratio * SCROLL_SPIN;
        self.opacity = params.base_opacity * scroll_fade(ratio);
        self.position.y = params.origin.y - ratio * SCROLL_DRIFT_Y;
    }

    pub fn model_matrix(&self, params: &CircleParams) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale * params.radius),
            rot,
            self.position,
        )
    }
}
