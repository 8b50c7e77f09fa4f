use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use walker::{ControllerConfig, FirstPersonController, InputEvent, OrientationState};

fn walker_at(position: Vec3, speed: f32) -> FirstPersonController {
    let config = ControllerConfig { speed, ..Default::default() };
    let mut ctrl = FirstPersonController::new(config);
    ctrl.set_position(position);
    ctrl
}

/// Deterministic pseudo-random deltas in [-range, range].
fn deltas(seed: u32, count: usize, range: f32) -> Vec<(f32, f32)> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 * range - range
    };
    (0..count).map(|_| (next(), next())).collect()
}

#[test]
fn forward_from_spawn_walks_toward_negative_z() {
    let mut ctrl = walker_at(Vec3::new(0.0, 1.6, 5.0), 0.08);
    ctrl.on_key_change("w", true);
    let pose = ctrl.tick(1.0);
    assert_eq!(pose.position.x, 0.0);
    assert_eq!(pose.position.y, 1.6);
    assert!((pose.position.z - (5.0 - 0.08)).abs() < 1e-6);
}

#[test]
fn hundred_pixels_right_turns_point_two_radians() {
    let mut ctrl = FirstPersonController::default();
    ctrl.on_pointer_lock_change(true);
    ctrl.on_pointer_move(100.0, 0.0);
    assert_eq!(ctrl.orientation().yaw, -(100.0f32 * 0.002));
    assert!((ctrl.orientation().yaw + 0.2).abs() < 1e-7);
}

#[test]
fn pitch_stays_in_range_for_any_delta_sequence() {
    for seed in 0..8 {
        let mut ctrl = FirstPersonController::default();
        ctrl.on_pointer_lock_change(true);
        for (dx, dy) in deltas(seed, 500, 2000.0) {
            ctrl.on_pointer_move(dx, dy);
            let pitch = ctrl.orientation().pitch;
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pitch), "pitch {pitch} out of range");
        }
    }
}

#[test]
fn pitch_saturates_exactly_at_vertical() {
    let mut ctrl = FirstPersonController::default();
    ctrl.on_pointer_lock_change(true);
    for _ in 0..20 {
        ctrl.on_pointer_move(0.0, -1000.0);
    }
    assert_eq!(ctrl.orientation().pitch, FRAC_PI_2);
    ctrl.on_pointer_move(0.0, -1.0);
    assert_eq!(ctrl.orientation().pitch, FRAC_PI_2);
}

#[test]
fn uncaptured_pointer_never_moves_the_view() {
    let mut ctrl = FirstPersonController::default();
    for (dx, dy) in deltas(42, 200, 500.0) {
        ctrl.on_pointer_move(dx, dy);
    }
    assert_eq!(ctrl.orientation(), OrientationState::default());
}

#[test]
fn forward_follows_yaw() {
    let mut ctrl = walker_at(Vec3::ZERO, 1.0);
    ctrl.on_pointer_lock_change(true);
    // Turn left a quarter circle: dx = -(pi/2) / sensitivity.
    ctrl.on_pointer_move(-FRAC_PI_2 / 0.002, 0.0);
    ctrl.on_key_change("w", true);
    let pose = ctrl.tick(2.0);
    assert!((pose.position - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-4);
}

#[test]
fn forward_and_backward_cancel_at_any_heading() {
    let mut ctrl = walker_at(Vec3::new(3.0, 1.6, -2.0), 0.1);
    ctrl.on_pointer_lock_change(true);
    ctrl.on_pointer_move(123.0, 45.0);
    ctrl.on_key_change("ArrowUp", true);
    ctrl.on_key_change("s", true);
    let before = ctrl.position();
    for _ in 0..30 {
        ctrl.tick(1.0);
    }
    assert_eq!(ctrl.position(), before);
}

#[test]
fn event_stream_session() {
    let mut ctrl = walker_at(Vec3::new(0.0, 1.7, 15.0), 0.1);
    let events = [
        InputEvent::PointerLockChanged { locked: true },
        InputEvent::MouseMove { dx: 0.0, dy: 0.0 },
        InputEvent::KeyDown { key: "W".into(), repeat: false },
        InputEvent::KeyDown { key: "W".into(), repeat: true },
        InputEvent::KeyDown { key: "f".into(), repeat: false },
    ];
    for event in &events {
        assert_eq!(ctrl.handle_event(event), None);
    }
    for _ in 0..10 {
        ctrl.tick(1.0);
    }
    assert!((ctrl.position().z - 14.0).abs() < 1e-4);
    assert!(!ctrl.auxiliary_light_on());

    ctrl.handle_event(&InputEvent::KeyUp { key: "w".into() });
    let z = ctrl.position().z;
    ctrl.tick(1.0);
    assert_eq!(ctrl.position().z, z);
}
