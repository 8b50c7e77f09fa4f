use std::cell::RefCell;
use std::rc::Rc;

use super::FirstPersonController;
use crate::config::ControllerConfig;
use crate::model::PlayerPose;
use crate::view::PoseSink;

/// Turns host timestamps into tick steps.
///
/// One frame at `reference_hz` is one step, so walking speed does not depend on
/// the display refresh rate. Frames longer than `max_frame_secs` (tab in the
/// background, debugger pause) are clamped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    reference_hz: f32,
    max_frame_secs: f32,
}

impl FrameClock {
    pub fn new(reference_hz: f32, max_frame_secs: f32) -> Self {
        Self { last_ms: None, reference_hz, max_frame_secs }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.reference_hz, config.max_frame_secs)
    }

    /// Step for the frame at `now_ms`. The first frame yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let step = match self.last_ms {
            Some(last) => {
                let dt = ((now_ms - last) / 1000.0).clamp(0.0, self.max_frame_secs as f64) as f32;
                dt * self.reference_hz
            }
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        step
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Per-frame driver: tick the controller, hand the pose to the renderer.
pub struct FrameLoopContext<S: PoseSink> {
    pub controller: Rc<RefCell<FirstPersonController>>,
    pub clock: FrameClock,
    pub sink: S,
}

impl<S: PoseSink> FrameLoopContext<S> {
    pub fn new(controller: Rc<RefCell<FirstPersonController>>, sink: S) -> Self {
        let clock = FrameClock::from_config(controller.borrow().config());
        Self { controller, clock, sink }
    }

    pub fn update(&mut self, now_ms: f64) -> PlayerPose {
        let step = self.clock.advance(now_ms);
        let (pose, light_on) = {
            let mut ctrl = self.controller.borrow_mut();
            let pose = ctrl.tick(step);
            (pose, ctrl.auxiliary_light_on())
        };
        self.sink.present(&pose, light_on);
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(PlayerPose, bool)>,
    }

    impl PoseSink for Recorder {
        fn present(&mut self, pose: &PlayerPose, light_on: bool) {
            self.frames.push((*pose, light_on));
        }
    }

    #[test]
    fn test_first_frame_is_zero_step() {
        let mut clock = FrameClock::new(60.0, 0.1);
        assert_eq!(clock.advance(1234.0), 0.0);
    }

    #[test]
    fn test_reference_frame_is_one_step() {
        let mut clock = FrameClock::new(60.0, 0.1);
        clock.advance(0.0);
        let step = clock.advance(1000.0 / 60.0);
        assert!((step - 1.0).abs() < 1e-4);

        // 120 Hz display: half a step per frame.
        let step = clock.advance(1000.0 / 60.0 + 1000.0 / 120.0);
        assert!((step - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_stalls_are_clamped() {
        let mut clock = FrameClock::new(60.0, 0.1);
        clock.advance(0.0);
        assert!((clock.advance(5000.0) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_time_going_backwards_is_zero_step() {
        let mut clock = FrameClock::new(60.0, 0.1);
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn test_reset_restarts_from_zero() {
        let mut clock = FrameClock::new(60.0, 0.1);
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(50.0), 0.0);
    }

    #[test]
    fn test_update_ticks_and_presents() {
        let controller = Rc::new(RefCell::new(FirstPersonController::default()));
        let mut frame = FrameLoopContext::new(controller.clone(), Recorder::default());
        let start = controller.borrow().position();

        controller.borrow_mut().on_key_change("w", true);
        frame.update(0.0);
        let pose = frame.update(1000.0 / 60.0);

        assert!((pose.position.z - (start.z - 0.1)).abs() < 1e-4);
        assert_eq!(frame.sink.frames.len(), 2);
        assert_eq!(frame.sink.frames[0].0.position, start);
        assert!(frame.sink.frames[1].1);
    }
}
