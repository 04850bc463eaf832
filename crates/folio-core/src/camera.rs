use crate::constants::{
    CAMERA_FOLLOW_GAIN, CAMERA_FOLLOW_RATE, CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR,
};
use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera that always looks at `target`.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Close a fixed fraction of the gap toward the pointer-derived offset.
    ///
    /// The vertical offset is inverted so the scene tilts away from the pointer.
    pub fn follow(&mut self, pointer_ndc: Vec2) {
        let goal = Vec2::new(
            pointer_ndc.x * CAMERA_FOLLOW_GAIN,
            -pointer_ndc.y * CAMERA_FOLLOW_GAIN,
        );
        self.eye.x += (goal.x - self.eye.x) * CAMERA_FOLLOW_RATE;
        self.eye.y += (goal.y - self.eye.y) * CAMERA_FOLLOW_RATE;
    }
}
