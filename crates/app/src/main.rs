mod frame_input;
mod game_layout;
mod ui_render;
mod window_config;

use std::env;

use app::app_loop::{AppMode, AppState};
use app::seed::{generate_runtime_seed, resolve_seed_from_args};
use app::telemetry::init_logging;
use frame_input::{MouseTracker, capture_devices};
use game_core::{Game, RunPhase, SimConfig};
use game_layout::{compute_frame_layout, setup_layout};
use macroquad::prelude::*;
use taffy::TaffyTree;
use tracing::{error, info};
use window_config::build_window_conf;

#[macroquad::main(build_window_conf)]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let seed = match resolve_seed_from_args(&args, generate_runtime_seed()) {
        Ok(choice) => choice,
        Err(reason) => {
            error!(%reason, "invalid arguments");
            return;
        }
    };
    let mut game = match Game::new(seed.value(), SimConfig::default()) {
        Ok(game) => game,
        Err(err) => {
            error!(%err, "could not build the first floor");
            return;
        }
    };
    info!(?seed, "window opened");

    let mut taffy = TaffyTree::new();
    let nodes = match setup_layout(&mut taffy) {
        Ok(nodes) => nodes,
        Err(err) => {
            error!(%err, "could not build the panel layout");
            return;
        }
    };

    let mut app_state = AppState::new();
    let mut mouse = MouseTracker::default();
    let mut cursor_released = false;
    let mut grabbed = false;

    loop {
        let mut devices = capture_devices(&mut mouse);
        if devices.was_pressed(KeyCode::Escape) {
            cursor_released = !cursor_released;
        }
        if devices.attack_held {
            cursor_released = false;
        }

        let want_grab = app_state.mode == AppMode::Running
            && game.phase() == RunPhase::Playing
            && !cursor_released;
        if want_grab != grabbed {
            set_cursor_grab(want_grab);
            show_mouse(!want_grab);
            grabbed = want_grab;
        }
        if !grabbed {
            devices.mouse_delta = (0.0, 0.0);
        }

        app_state.tick(&mut game, &devices, get_frame_time());

        match compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height()) {
            Ok(layout) => ui_render::draw_frame(&game, &app_state, seed.value(), &layout),
            Err(err) => error!(%err, "layout failed; skipping frame draw"),
        }
        next_frame().await;
    }
}
