use glam::{EulerRot, Quat, Vec3};

/// Look direction of the player as Euler angles.
///
/// `yaw` rotates about +Y and is never wrapped, so consumers should treat it
/// modulo 2π. `pitch` rotates about the camera's local X axis and is kept inside
/// the controller's pitch limit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationState {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrientationState {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Yaw folded into `[0, 2π)`.
    pub fn wrapped_yaw(&self) -> f32 {
        self.yaw.rem_euclid(std::f32::consts::TAU)
    }

    /// Camera rotation, yaw applied before pitch (YXZ order).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Snapshot of the player handed to the render side once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerPose {
    pub position: Vec3,
    pub orientation: OrientationState,
}

impl PlayerPose {
    pub fn new(position: Vec3, orientation: OrientationState) -> Self {
        Self { position, orientation }
    }

    pub fn rotation(&self) -> Quat {
        self.orientation.rotation()
    }

    /// Full look direction including pitch. Used to aim the flashlight.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Walking direction: forward flattened onto the ground plane.
    pub fn ground_forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.orientation.yaw) * Vec3::NEG_Z
    }

    /// Strafe direction, yaw only.
    pub fn right(&self) -> Vec3 {
        Quat::from_rotation_y(self.orientation.yaw) * Vec3::X
    }
}
