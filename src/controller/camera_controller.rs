use glam::Vec3;
use tracing::{debug, trace};

use super::input::{InputEvent, InputState, MouseButton, MovementKey};
use crate::config::ControllerConfig;
use crate::model::{OrientationState, PlayerPose};

/// Something the host has to do on the controller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Ask the platform for pointer lock (click while unlocked).
    CapturePointer,
    /// Give the cursor back (escape key).
    ReleasePointer,
}

/// First-person camera: mouse look plus WASD walking on the ground plane.
///
/// Has no platform dependencies. Hosts feed it input through the `on_*` handlers
/// or [`handle_event`](Self::handle_event) and call [`tick`](Self::tick) once per
/// frame.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    config: ControllerConfig,
    position: Vec3,
    orientation: OrientationState,
    input: InputState,
    aux_light_on: bool,
}

impl FirstPersonController {
    pub fn new(config: ControllerConfig) -> Self {
        let position = config.spawn_position();
        Self {
            config,
            position,
            orientation: OrientationState::default(),
            input: InputState::new(),
            aux_light_on: true,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn orientation(&self) -> OrientationState {
        self.orientation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn pose(&self) -> PlayerPose {
        PlayerPose::new(self.position, self.orientation)
    }

    pub fn auxiliary_light_on(&self) -> bool {
        self.aux_light_on
    }

    /// Apply a relative pointer movement. Dropped unless the pointer is captured.
    pub fn on_pointer_move(&mut self, dx: f32, dy: f32) {
        if !self.input.pointer_locked() {
            trace!(dx, dy, "pointer not captured, look delta dropped");
            return;
        }
        if !dx.is_finite() || !dy.is_finite() {
            trace!(dx, dy, "non-finite look delta dropped");
            return;
        }

        let sens = self.config.sensitivity;
        let limit = self.config.pitch_limit;
        self.orientation.yaw -= dx * sens;
        self.orientation.pitch = (self.orientation.pitch - dy * sens).clamp(-limit, limit);
    }

    /// Record a key press or release. Keys without a movement binding are ignored.
    pub fn on_key_change(&mut self, key: &str, is_down: bool) {
        match self.config.bindings.movement_key(key) {
            Some(movement) => self.input.set_held(movement, is_down),
            None => trace!(key, "unbound key ignored"),
        }
    }

    pub fn on_pointer_lock_change(&mut self, locked: bool) {
        if self.input.pointer_locked() != locked {
            debug!(locked, "pointer lock changed");
        }
        self.input.set_pointer_locked(locked);
    }

    /// Drop all held keys; key-up events never arrive once focus is gone.
    pub fn on_focus_lost(&mut self) {
        self.input.clear_keys();
    }

    pub fn toggle_auxiliary_light(&mut self) {
        self.aux_light_on = !self.aux_light_on;
        debug!(on = self.aux_light_on, "flashlight toggled");
    }

    /// Route a platform-independent event to the matching handler.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<ControlRequest> {
        match event {
            InputEvent::KeyDown { key, repeat } => {
                let bindings = &self.config.bindings;
                if bindings.is_release_pointer(key) {
                    return Some(ControlRequest::ReleasePointer);
                }
                if bindings.is_toggle_light(key) {
                    if !*repeat {
                        self.toggle_auxiliary_light();
                    }
                    return None;
                }
                self.on_key_change(key, true);
            }
            InputEvent::KeyUp { key } => self.on_key_change(key, false),
            InputEvent::MouseMove { dx, dy } => self.on_pointer_move(*dx, *dy),
            InputEvent::MouseClick { button: MouseButton::Left, is_down: true } => {
                if !self.input.pointer_locked() {
                    return Some(ControlRequest::CapturePointer);
                }
            }
            InputEvent::MouseClick { .. } => {}
            InputEvent::FocusLost => self.on_focus_lost(),
            InputEvent::VisibilityChanged { visible } => {
                if !*visible {
                    self.on_focus_lost();
                }
            }
            InputEvent::PointerLockChanged { locked } => self.on_pointer_lock_change(*locked),
        }
        None
    }

    /// Advance one frame and return the resulting pose.
    ///
    /// Each held key moves `speed * step` along its axis. Axes are derived from
    /// yaw only and summed without normalisation, so opposing keys cancel and
    /// diagonals are faster than straight lines.
    pub fn tick(&mut self, step: f32) -> PlayerPose {
        let pose = self.pose();
        let forward = pose.ground_forward();
        let right = pose.right();

        let mut cam_move = Vec3::ZERO;
        for key in MovementKey::ALL {
            if !self.input.is_held(key) {
                continue;
            }
            cam_move += match key {
                MovementKey::Forward => forward,
                MovementKey::Backward => -forward,
                MovementKey::StrafeLeft => -right,
                MovementKey::StrafeRight => right,
            };
        }

        if cam_move != Vec3::ZERO {
            self.position += cam_move * (self.config.speed * step);
        }
        self.pose()
    }
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
