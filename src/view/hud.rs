use tracing::trace;

use super::PoseSink;
use crate::model::{Camera, CameraUniform, PlayerPose};

/// One-line readout of the pose, e.g. `pos 0.0 1.7 15.0 | yaw 0 pitch 0 | light on`.
pub fn pose_summary(pose: &PlayerPose, light_on: bool) -> String {
    let p = pose.position;
    format!(
        "pos {:.1} {:.1} {:.1} | yaw {:.0} pitch {:.0} | light {}",
        p.x,
        p.y,
        p.z,
        pose.orientation.wrapped_yaw().to_degrees(),
        pose.orientation.pitch.to_degrees(),
        if light_on { "on" } else { "off" },
    )
}

/// Keeps the latest camera uniform and traces every frame.
///
/// Stand-in renderer for headless hosts; a GPU backend would upload `uniform`.
pub struct LogSink {
    pub camera: Camera,
    pub uniform: CameraUniform,
    frames: u64,
}

impl LogSink {
    pub fn new(camera: Camera) -> Self {
        Self { camera, uniform: bytemuck::Zeroable::zeroed(), frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl PoseSink for LogSink {
    fn present(&mut self, pose: &PlayerPose, light_on: bool) {
        self.uniform = CameraUniform::from_pose(&self.camera, pose, light_on);
        self.frames += 1;
        trace!(frame = self.frames, "{}", pose_summary(pose, light_on));
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm::HudSink;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::*;
    use web_sys::Element;

    /// Writes the pose readout into a DOM element and forwards to an inner sink.
    pub struct HudSink<S: PoseSink> {
        element: Element,
        inner: S,
        last: String,
    }

    impl<S: PoseSink> HudSink<S> {
        pub fn new(element: Element, inner: S) -> Self {
            Self { element, inner, last: String::new() }
        }
    }

    impl<S: PoseSink> PoseSink for HudSink<S> {
        fn present(&mut self, pose: &PlayerPose, light_on: bool) {
            let text = pose_summary(pose, light_on);
            if text != self.last {
                self.element.set_text_content(Some(&text));
                self.last = text;
            }
            self.inner.present(pose, light_on);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::native::TitleSink;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use std::sync::Arc;
    use winit::window::Window;

    /// Shows the pose readout in the window title and forwards to an inner sink.
    pub struct TitleSink<S: PoseSink> {
        window: Arc<Window>,
        title: String,
        inner: S,
        last: String,
    }

    impl<S: PoseSink> TitleSink<S> {
        pub fn new(window: Arc<Window>, title: impl Into<String>, inner: S) -> Self {
            Self { window, title: title.into(), inner, last: String::new() }
        }
    }

    impl<S: PoseSink> PoseSink for TitleSink<S> {
        fn present(&mut self, pose: &PlayerPose, light_on: bool) {
            let text = pose_summary(pose, light_on);
            if text != self.last {
                self.window.set_title(&format!("{} - {}", self.title, text));
                self.last = text;
            }
            self.inner.present(pose, light_on);
        }
    }
}
