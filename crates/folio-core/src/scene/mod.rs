//! Particle/circle background scene.
//!
//! Circles keep their randomized [`CircleParams`] beside the mutable
//! [`CircleState`] the renderer reads. The frame update is a function of
//! elapsed time and an explicit [`FrameInput`]; the scroll response is a
//! separate entry point called from the scroll listener.

mod circle;
mod particles;

pub use circle::{hover_proximity, scroll_fade, CircleParams, CircleState};
pub use particles::ParticleBuffer;

use crate::camera::Camera;
use crate::constants::{
    CIRCLE_COUNT, MAX_CIRCLES, MAX_PARTICLES, NARROW_VIEWPORT_PX, PARTICLE_COUNT,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub circle_count: usize,
    pub particle_count: usize,
    /// Fixed seed for reproducible layouts; entropy when `None`.
    pub seed: Option<u64>,
    /// Slow the float/pulse/spin speeds (narrow screens).
    pub calm: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            circle_count: CIRCLE_COUNT,
            particle_count: PARTICLE_COUNT,
            seed: None,
            calm: false,
        }
    }
}

impl SceneConfig {
    pub fn for_window_width(mut self, css_px: f32) -> Self {
        self.calm = css_px < NARROW_VIEWPORT_PX;
        self
    }

    /// Clamp the counts to [`MAX_CIRCLES`] and [`MAX_PARTICLES`].
    pub fn capped(mut self) -> Self {
        self.circle_count = self.circle_count.min(MAX_CIRCLES);
        self.particle_count = self.particle_count.min(MAX_PARTICLES);
        self
    }
}

/// Container size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Input written by the pointer listener and read by the frame update.
/// The scroll response does not go through here; the scroll listener calls
/// [`Scene::apply_scroll`] directly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer in NDC (y up); `None` until the pointer first moves.
    pub pointer: Option<Vec2>,
}

pub struct Scene {
    pub params: Vec<CircleParams>,
    pub circles: Vec<CircleState>,
    pub particles: ParticleBuffer,
    pub camera: Camera,
    time: f32,
}

impl Scene {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        let config = config.clone().capped();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (params, circles) = (0..config.circle_count)
            .map(|_| CircleParams::roll(&mut rng, config.calm))
            .unzip();
        let particles = ParticleBuffer::random(config.particle_count, &mut rng);
        Self {
            params,
            circles,
            particles,
            camera: Camera::new(viewport.aspect()),
            time: 0.0,
        }
    }

    /// Seconds passed to the last [`Scene::update`].
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, t: f32, input: &FrameInput) {
        self.time = t;
        for (i, (state, params)) in self.circles.iter_mut().zip(&self.params).enumerate() {
            state.advance(params, t, i, input.pointer);
        }
        self.particles.advance(t);
        if let Some(p) = input.pointer {
            self.camera.follow(p);
        }
    }

    pub fn apply_scroll(&mut self, ratio: f32) {
        for (state, params) in self.circles.iter_mut().zip(&self.params) {
            state.apply_scroll(params, ratio);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport.width, viewport.height);
    }

    /// Circle indices ordered far to near for alpha blending.
    pub fn back_to_front(&self) -> Vec<usize> {
        let view = self.camera.view_matrix();
        let mut order: Vec<(usize, f32)> = self
            .circles
            .iter()
            .enumerate()
            .map(|(i, c)| (i, view.transform_point3(c.position).z))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));
        order.into_iter().map(|(i, _)| i).collect()
    }
}

/// Build the scene and its surface, or do nothing when there is no container.
pub fn mount<S, E>(
    container: Option<Viewport>,
    config: &SceneConfig,
    create_surface: impl FnOnce(Viewport) -> Result<S, E>,
) -> Result<Option<(Scene, S)>, E> {
    let Some(viewport) = container else {
        return Ok(None);
    };
    let surface = create_surface(viewport)?;
    Ok(Some((Scene::new(config, viewport), surface)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hsl_to_rgb;
    use crate::constants::{
        FLOAT_Z_AMPLITUDE, HOVER_OPACITY_MAX, OPACITY_MAX, OPACITY_MIN, POINTER_WORLD_SPREAD,
        PULSE_BAND, SCROLL_SPIN,
    };
    use glam::Vec3;
    use std::f32::consts::TAU;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    fn seeded(seed: u64) -> Scene {
        let config = SceneConfig {
            seed: Some(seed),
            ..SceneConfig::default()
        };
        Scene::new(
            &config,
            Viewport {
                width: 1280.0,
                height: 720.0,
            },
        )
    }

    #[test]
    fn same_seed_same_layout() {
        let a = seeded(7);
        let b = seeded(7);
        assert_eq!(a.params.len(), CIRCLE_COUNT);
        assert_eq!(a.particles.len(), PARTICLE_COUNT);
        assert_eq!(a.params[3].origin, b.params[3].origin);
        assert_eq!(a.particles.positions, b.particles.positions);
    }

    #[test]
    fn pulse_stays_in_band() {
        let mut scene = seeded(11);
        let idle = FrameInput::default();
        for step in 0..400 {
            let t = step as f32 * 0.173;
            scene.update(t, &idle);
            for (c, p) in scene.circles.iter().zip(&scene.params) {
                assert!((OPACITY_MIN..=OPACITY_MAX).contains(&c.opacity), "opacity {}", c.opacity);
                let lo = p.base_pulse * (1.0 - PULSE_BAND) - 1e-5;
                let hi = p.base_pulse * (1.0 + PULSE_BAND) + 1e-5;
                assert!(c.scale >= lo && c.scale <= hi, "scale {}", c.scale);
            }
        }
    }

    #[test]
    fn scroll_fade_bounds() {
        assert_eq!(scroll_fade(0.0), 1.0);
        assert!((scroll_fade(1.0) - 0.4).abs() < 1e-6);
        for i in 0..=20 {
            assert!(scroll_fade(i as f32 * 0.1 - 0.5) >= 0.2);
        }
    }

    #[test]
    fn scroll_fades_and_drifts_circles() {
        let mut scene = seeded(3);
        scene.apply_scroll(1.0);
        for (c, p) in scene.circles.iter().zip(&scene.params) {
            assert!((c.opacity - p.base_opacity * 0.4).abs() < 1e-5);
            assert!((c.position.y - (p.origin.y - 2.0)).abs() < 1e-5);
        }
    }

    #[test]
    fn pointer_over_circle_boosts_it() {
        let mut scene = seeded(5);
        let t = 2.5;
        let target = scene.params[0].float_position(t);
        let pointer = Vec2::new(target.x, target.y) / POINTER_WORLD_SPREAD;
        scene.update(
            t,
            &FrameInput {
                pointer: Some(pointer),
            },
        );
        let p = &scene.params[0];
        let c = &scene.circles[0];
        assert!((c.scale - p.pulse_scale(t) * 1.3).abs() < 1e-4);
        let boosted = (p.pulse_opacity(t) * 1.4).min(HOVER_OPACITY_MAX);
        assert!((c.opacity - boosted).abs() < 1e-4);
    }

    #[test]
    fn resize_sets_exact_aspect() {
        let mut scene = seeded(1);
        scene.resize(Viewport {
            width: 900.0,
            height: 600.0,
        });
        assert_eq!(scene.camera.aspect, 1.5);
    }

    #[test]
    fn mount_without_container_does_nothing() {
        let mut called = false;
        let out = mount(None, &SceneConfig::default(), |_| {
            called = true;
            Ok::<_, ()>(())
        });
        assert!(matches!(out, Ok(None)));
        assert!(!called);
    }

    #[test]
    fn mount_propagates_surface_errors() {
        let vp = Viewport {
            width: 10.0,
            height: 10.0,
        };
        let out = mount(Some(vp), &SceneConfig::default(), |_| Err::<(), _>("no gpu"));
        assert!(matches!(out, Err("no gpu")));
    }

    #[test]
    fn back_to_front_orders_by_depth() {
        let mut scene = seeded(9);
        scene.update(0.0, &FrameInput::default());
        let view = scene.camera.view_matrix();
        let z: Vec<f32> = scene
            .back_to_front()
            .into_iter()
            .map(|i| view.transform_point3(scene.circles[i].position).z)
            .collect();
        assert!(z.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn particles_nudge_in_place_and_flag_upload() {
        let mut scene = seeded(13);
        assert!(scene.particles.take_dirty());
        assert!(!scene.particles.take_dirty());
        let before = scene.particles.positions.clone();
        scene.update(1.0, &FrameInput::default());
        assert!(scene.particles.take_dirty());
        assert_eq!(scene.particles.positions.len(), before.len());
        let moved = before
            .iter()
            .zip(&scene.particles.positions)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(moved > 0.0 && moved < 0.01);
    }

    #[test]
    fn circles_float_around_their_origin() {
        let mut scene = seeded(21);
        let t = 37.5;
        scene.update(t, &FrameInput::default());
        for (c, p) in scene.circles.iter().zip(&scene.params) {
            let phase = t * p.float_speed + p.float_offset;
            let expected = p.origin
                + Vec3::new(
                    (t * p.float_speed * 0.6 + p.float_offset).cos() * p.float_amplitude.x,
                    phase.sin() * p.float_amplitude.y,
                    (t * p.float_speed * 0.4 + p.float_offset).sin() * FLOAT_Z_AMPLITUDE,
                );
            assert!(close(c.position, expected), "{:?} vs {expected:?}", c.position);
        }
    }

    #[test]
    fn rotation_steps_once_per_frame() {
        let mut scene = seeded(22);
        let start: Vec<Vec3> = scene.circles.iter().map(|c| c.rotation).collect();
        for frame in 0..3 {
            scene.update(frame as f32 / 60.0, &FrameInput::default());
        }
        for ((c, p), r0) in scene.circles.iter().zip(&scene.params).zip(start) {
            assert!(close(c.rotation, r0 + p.rotation_speed * 3.0));
        }
    }

    #[test]
    fn color_phase_sets_hue() {
        let mut scene = seeded(23);
        let start: Vec<f32> = scene.circles.iter().map(|c| c.color_phase).collect();
        let t = 4.0;
        scene.update(t, &FrameInput::default());
        for (i, ((c, p), phase0)) in scene.circles.iter().zip(&scene.params).zip(start).enumerate() {
            let phase = phase0 + p.color_speed;
            assert!((c.color_phase - phase).abs() < 1e-6);
            let fi = i as f32;
            let expected = hsl_to_rgb(
                phase.rem_euclid(TAU) / TAU,
                0.7 + (t * 0.3 + fi).sin() * 0.2,
                0.5 + (t * 0.2 + fi).sin() * 0.1,
            );
            for k in 0..3 {
                assert!((c.color[k] - expected[k]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn scroll_spin_accumulates() {
        let mut scene = seeded(24);
        let z0: Vec<f32> = scene.circles.iter().map(|c| c.rotation.z).collect();
        scene.apply_scroll(0.5);
        scene.apply_scroll(0.5);
        for (c, z) in scene.circles.iter().zip(z0) {
            assert!((c.rotation.z - (z + 2.0 * 0.5 * SCROLL_SPIN)).abs() < 1e-6);
        }
    }

    #[test]
    fn frame_after_scroll_takes_over() {
        let mut scene = seeded(25);
        scene.apply_scroll(1.0);
        let t = 8.0;
        scene.update(t, &FrameInput::default());
        for (c, p) in scene.circles.iter().zip(&scene.params) {
            assert_eq!(c.opacity, p.pulse_opacity(t));
            assert_eq!(c.position.y, p.float_position(t).y);
        }
    }

    #[test]
    fn mount_builds_scene_for_container() {
        let mut calls = 0;
        let vp = Viewport {
            width: 1200.0,
            height: 800.0,
        };
        let out = mount(Some(vp), &SceneConfig::default(), |got| {
            calls += 1;
            assert_eq!(got, vp);
            Ok::<_, ()>("surface")
        });
        let Ok(Some((scene, surface))) = out else {
            panic!("expected a mounted scene");
        };
        assert_eq!(calls, 1);
        assert_eq!(surface, "surface");
        assert_eq!(scene.camera.aspect, 1.5);
        assert_eq!(scene.circles.len(), CIRCLE_COUNT);
    }

    #[test]
    fn oversized_counts_are_capped() {
        let config = SceneConfig {
            circle_count: usize::MAX / 2,
            particle_count: usize::MAX / 2,
            seed: Some(1),
            calm: false,
        };
        let capped = config.clone().capped();
        assert_eq!(capped.circle_count, MAX_CIRCLES);
        assert_eq!(capped.particle_count, MAX_PARTICLES);
        let scene = Scene::new(
            &config,
            Viewport {
                width: 100.0,
                height: 100.0,
            },
        );
        assert_eq!(scene.circles.len(), MAX_CIRCLES);
        assert_eq!(scene.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn narrow_windows_calm_the_scene() {
        assert!(SceneConfig::default().for_window_width(400.0).calm);
        assert!(!SceneConfig::default().for_window_width(1440.0).calm);
    }
}
