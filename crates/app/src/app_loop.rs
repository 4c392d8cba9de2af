use std::collections::VecDeque;

use game_core::{Game, RunPhase, StepResult};
use macroquad::prelude::KeyCode;
use tracing::{error, info};

use crate::controls::{DeviceSnapshot, build_frame_input};
use crate::hud_text::event_line;

/// Number of sidebar event lines kept between frames.
pub const MAX_EVENT_LINES: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Title,
    Running,
    GameOver,
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// What the simulation did with the most recent running frame.
    pub last_step: Option<StepResult>,
    /// Newest last.
    pub recent_events: VecDeque<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process input and logic for a single frame.
    pub fn tick(&mut self, game: &mut Game, devices: &DeviceSnapshot, dt: f32) {
        match self.mode {
            AppMode::Title => {
                if devices.was_pressed(KeyCode::Enter) || devices.attack_pressed {
                    info!(floor = game.floor().index, "run resumed from title");
                    self.mode = AppMode::Running;
                }
            }
            AppMode::Running => {
                let input = build_frame_input(devices, game.player().yaw);
                self.last_step = Some(game.step(dt, &input));
                self.absorb_events(game);
                if game.phase() == RunPhase::Dead {
                    self.mode = AppMode::GameOver;
                }
            }
            AppMode::GameOver => {
                if devices.was_pressed(KeyCode::R) || devices.was_pressed(KeyCode::Enter) {
                    match game.restart() {
                        Ok(()) => {
                            self.recent_events.clear();
                            self.last_step = None;
                            self.absorb_events(game);
                            self.mode = AppMode::Running;
                        }
                        Err(err) => error!(%err, "restart failed; staying on the game-over screen"),
                    }
                }
            }
        }
    }

    fn absorb_events(&mut self, game: &mut Game) {
        for event in game.drain_log() {
            let Some(line) = event_line(&event) else {
                continue;
            };
            self.recent_events.push_back(line);
            if self.recent_events.len() > MAX_EVENT_LINES {
                self.recent_events.pop_front();
            }
        }
    }
}
