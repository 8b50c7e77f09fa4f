use glam::{Mat4, Vec3};

use super::PlayerPose;

/// Projection parameters of the render camera. Position and orientation come
/// from the [`PlayerPose`] each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut cam = Self::default();
        cam.set_aspect(width, height);
        cam
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// World to view transform for the given pose.
    pub fn view(&self, pose: &PlayerPose) -> Mat4 {
        Mat4::from_rotation_translation(pose.rotation(), pose.position).inverse()
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self, pose: &PlayerPose) -> Mat4 {
        self.projection() * self.view(pose)
    }
}

/// GPU-facing camera block written by the renderer each frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    /// 1.0 when the flashlight is on, 0.0 otherwise.
    pub light_on: f32,
    pub light_dir: [f32; 3],
    pub _pad: f32,
}

impl CameraUniform {
    pub fn from_pose(camera: &Camera, pose: &PlayerPose, light_on: bool) -> Self {
        let eye: Vec3 = pose.position;
        let dir = pose.forward();
        Self {
            view_proj: camera.view_proj(pose).to_cols_array_2d(),
            eye: eye.to_array(),
            light_on: if light_on { 1.0 } else { 0.0 },
            light_dir: dir.to_array(),
            _pad: 0.0,
        }
    }
}
