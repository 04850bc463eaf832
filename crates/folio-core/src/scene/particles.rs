use crate::color::hex_rgb;
use crate::constants::{PARTICLE_PALETTE, PARTICLE_ROTATION_STEP, PARTICLE_SPREAD};
use glam::{EulerRot, Mat4, Vec2};
use rand::Rng;

/// Fixed-size point cloud stored as flat arrays for direct upload.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    /// xyz per particle
    pub positions: Vec<f32>,
    /// rgb per particle
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
    /// whole-cloud rotation about x and y
    pub rotation: Vec2,
    dirty: bool,
}

impl ParticleBuffer {
    pub fn random(count: usize, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);
        for _ in 0..count {
            for extent in PARTICLE_SPREAD {
                positions.push((rng.gen::<f32>() - 0.5) * extent);
            }
            let c = hex_rgb(PARTICLE_PALETTE[rng.gen_range(0..PARTICLE_PALETTE.len())]);
            colors.extend_from_slice(&c);
            sizes.push(rng.gen::<f32>() * 2.5 + 0.8);
        }
        Self {
            positions,
            colors,
            sizes,
            rotation: Vec2::ZERO,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Nudge every particle along a slow wave and spin the cloud.
    pub fn advance(&mut self, t: f32) {
        self.rotation.x += PARTICLE_ROTATION_STEP[0];
        self.rotation.y += PARTICLE_ROTATION_STEP[1];
        for p in self.positions.chunks_exact_mut(3) {
            p[1] += (t * 0.4 + p[0] * 0.008).sin() * 0.001;
            p[0] += (t * 0.25 + p[1] * 0.008).cos() * 0.0008;
        }
        self.dirty = true;
    }

    /// True once per change; the renderer re-uploads when this fires.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}
