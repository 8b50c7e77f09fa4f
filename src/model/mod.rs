// MODEL: Player pose and camera projection
pub mod camera;
pub mod pose;

pub use camera::{Camera, CameraUniform};
pub use pose::{OrientationState, PlayerPose};
