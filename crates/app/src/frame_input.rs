//! Device capture for one rendered frame.

use app::controls::DeviceSnapshot;
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_down,
    is_mouse_button_pressed, mouse_position,
};

const HELD_KEYS: [KeyCode; 4] = [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D];

const PRESSED_KEYS: [KeyCode; 8] = [
    KeyCode::Space,
    KeyCode::E,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Enter,
    KeyCode::R,
    KeyCode::Escape,
];

/// Remembers the last cursor position so mouse travel can be reported per frame.
#[derive(Default)]
pub struct MouseTracker {
    last: Option<(f32, f32)>,
}

impl MouseTracker {
    fn delta(&mut self, now: (f32, f32)) -> (f32, f32) {
        let delta = self.last.map_or((0.0, 0.0), |(x, y)| (now.0 - x, now.1 - y));
        self.last = Some(now);
        delta
    }
}

pub fn capture_devices(mouse: &mut MouseTracker) -> DeviceSnapshot {
    DeviceSnapshot {
        held: HELD_KEYS.into_iter().filter(|key| is_key_down(*key)).collect(),
        pressed: PRESSED_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect(),
        mouse_delta: mouse.delta(mouse_position()),
        attack_held: is_mouse_button_down(MouseButton::Left),
        attack_pressed: is_mouse_button_pressed(MouseButton::Left),
    }
}
