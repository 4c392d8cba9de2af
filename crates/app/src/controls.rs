//! Device-to-intent mapping for one frame.
//! This module exists to turn raw key and mouse state into the simulation's `FrameInput`.
//! It does not read devices itself; the binary captures a `DeviceSnapshot` and hands it over.

use game_core::{FrameInput, Vec2, vec2};
use macroquad::prelude::KeyCode;

/// Radians of yaw or pitch per pixel of mouse travel.
pub const MOUSE_SENSITIVITY: f32 = 0.003;

const CARD_KEYS: [KeyCode; 3] = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3];

/// Device state for one rendered frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceSnapshot {
    /// Keys held down this frame.
    pub held: Vec<KeyCode>,
    /// Keys that went down this frame.
    pub pressed: Vec<KeyCode>,
    /// Mouse travel since the previous frame, in pixels.
    pub mouse_delta: (f32, f32),
    /// Left mouse button is down this frame.
    pub attack_held: bool,
    /// Left mouse button went down this frame.
    pub attack_pressed: bool,
}

impl DeviceSnapshot {
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        f32::from(i8::from(self.is_held(positive)) - i8::from(self.is_held(negative)))
    }
}

/// Rotates a forward/strafe axis pair into the world x/z plane for the given yaw.
/// The result is not normalized; the simulation clamps diagonal input itself.
pub fn camera_relative_move(forward_axis: f32, strafe_axis: f32, yaw: f32) -> Vec2 {
    let forward = vec2(-yaw.sin(), -yaw.cos());
    let right = vec2(yaw.cos(), -yaw.sin());
    forward * forward_axis + right * strafe_axis
}

pub fn build_frame_input(devices: &DeviceSnapshot, yaw: f32) -> FrameInput {
    let forward_axis = devices.axis(KeyCode::W, KeyCode::S);
    let strafe_axis = devices.axis(KeyCode::D, KeyCode::A);
    let (dx, dy) = devices.mouse_delta;

    FrameInput {
        move_intent: camera_relative_move(forward_axis, strafe_axis, yaw),
        look: vec2(-dx * MOUSE_SENSITIVITY, -dy * MOUSE_SENSITIVITY),
        attack: devices.attack_pressed,
        dash: devices.was_pressed(KeyCode::Space),
        interact: devices.was_pressed(KeyCode::E),
        card_choice: CARD_KEYS.iter().position(|key| devices.was_pressed(*key)),
    }
}
