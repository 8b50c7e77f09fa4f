// CONTROLLER: Input, first-person camera and frame loop
pub mod input;
pub mod camera_controller;
pub mod frame_loop;

pub use input::{InputEvent, InputState, KeyBindings, MouseButton, MovementKey};
pub use camera_controller::{ControlRequest, FirstPersonController};
pub use frame_loop::{FrameClock, FrameLoopContext};
