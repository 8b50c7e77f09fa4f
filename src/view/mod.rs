// VIEW: Render-side consumers of the player pose
pub mod hud;

pub use hud::{pose_summary, LogSink};
#[cfg(target_arch = "wasm32")]
pub use hud::HudSink;
#[cfg(not(target_arch = "wasm32"))]
pub use hud::TitleSink;

use crate::model::PlayerPose;

/// Receives the pose once per frame, after the controller has ticked.
///
/// Implementors own their scene objects (camera node, spotlight) and copy the
/// pose into them. The controller never touches renderer state directly.
pub trait PoseSink {
    fn present(&mut self, pose: &PlayerPose, light_on: bool);
}

impl<S: PoseSink + ?Sized> PoseSink for Box<S> {
    fn present(&mut self, pose: &PlayerPose, light_on: bool) {
        (**self).present(pose, light_on)
    }
}
