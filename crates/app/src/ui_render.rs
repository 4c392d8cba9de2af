//! Rendering for the main game frame: a top-down view of the explored floor plus text panels.

use crate::game_layout::{FrameLayout, PanelRect};
use app::app_loop::{AppMode, AppState};
use app::hud_text::{card_offer_lines, game_over_lines, hud_lines, status_text};
use game_core::{EnemyKind, EntityPose, Game, Grid, ItemKind, Pos, PoseKind, RunPhase, TileKind};
use macroquad::prelude::*;

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const FLOOR_COLOR: Color = Color { r: 0.16, g: 0.14, b: 0.13, a: 1.0 };
const WALL_COLOR: Color = Color { r: 0.36, g: 0.30, b: 0.26, a: 1.0 };
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_STEP: f32 = 20.0;
const FONT_SIZE: f32 = 20.0;
const SHAKE_PIXELS: f32 = 6.0;

/// Screen placement of the grid inside the map panel.
struct MapView {
    origin_x: f32,
    origin_y: f32,
    cell: f32,
    tile_size: f32,
}

impl MapView {
    fn fit(grid: &Grid, panel: PanelRect, shake: f32) -> Self {
        let cell = (panel.width / grid.width as f32).min(panel.height / grid.height as f32);
        let wobble = shake * SHAKE_PIXELS * (get_time() as f32 * 60.0).sin();
        Self {
            origin_x: panel.x + (panel.width - cell * grid.width as f32) * 0.5 + wobble,
            origin_y: panel.y + (panel.height - cell * grid.height as f32) * 0.5 - wobble,
            cell,
            tile_size: grid.tile_size,
        }
    }

    fn cell_rect(&self, pos: Pos) -> (f32, f32) {
        (self.origin_x + pos.x as f32 * self.cell, self.origin_y + pos.y as f32 * self.cell)
    }

    fn world_point(&self, x: f32, z: f32) -> (f32, f32) {
        (
            self.origin_x + (x / self.tile_size + 0.5) * self.cell,
            self.origin_y + (z / self.tile_size + 0.5) * self.cell,
        )
    }
}

pub fn draw_frame(game: &Game, app_state: &AppState, run_seed: u64, layout: &FrameLayout) {
    clear_background(BLACK);
    draw_panel_borders(layout);
    draw_status_panel(game, app_state, layout.status);
    draw_map(game, layout.map);
    draw_vitals_panel(game, app_state, run_seed, layout.vitals);
    draw_events_panel(app_state, layout.events);
}

fn draw_panel_borders(layout: &FrameLayout) {
    for panel in [layout.status, layout.map, layout.vitals, layout.events] {
        draw_rectangle_lines(panel.x, panel.y, panel.width, panel.height, 1.0, BORDER_COLOR);
    }
}

fn draw_status_panel(game: &Game, app_state: &AppState, panel: PanelRect) {
    let status = status_text(app_state.mode, game.phase());
    draw_text(&status, panel.x + PANEL_PAD_X, panel.y + PANEL_PAD_Y, FONT_SIZE, WHITE);
}

fn draw_lines(lines: &[String], panel: PanelRect, start_y: f32, color: Color) -> f32 {
    let max_y = panel.y + panel.height;
    let mut text_y = start_y;
    for line in lines {
        if text_y > max_y {
            break;
        }
        draw_text(line, panel.x + PANEL_PAD_X, text_y, FONT_SIZE, color);
        text_y += LINE_STEP;
    }
    text_y
}

fn draw_vitals_panel(game: &Game, app_state: &AppState, run_seed: u64, panel: PanelRect) {
    let start_y = panel.y + PANEL_PAD_Y;
    match app_state.mode {
        AppMode::Title => {
            let lines = [
                "DELVE".to_string(),
                "Find the key, take the stairs.".to_string(),
                "Level up to draw cards.".to_string(),
            ];
            draw_lines(&lines, panel, start_y, WHITE);
        }
        AppMode::GameOver => {
            draw_lines(&game_over_lines(game, run_seed), panel, start_y, RED);
        }
        AppMode::Running => {
            let after_hud = draw_lines(&hud_lines(&game.hud()), panel, start_y, WHITE);
            if game.phase() == RunPhase::Upgrading {
                draw_lines(&card_offer_lines(game), panel, after_hud + LINE_STEP, GOLD);
            }
        }
    }
}

fn draw_events_panel(app_state: &AppState, panel: PanelRect) {
    let lines: Vec<String> = app_state.recent_events.iter().cloned().collect();
    draw_lines(&lines, panel, panel.y + PANEL_PAD_Y, LIGHTGRAY);
}

fn draw_map(game: &Game, panel: PanelRect) {
    let floor = game.floor();
    let view = MapView::fit(&floor.grid, panel, game.screen_shake());

    for y in 0..floor.grid.height as i32 {
        for x in 0..floor.grid.width as i32 {
            let pos = Pos { y, x };
            if !floor.is_explored(pos) {
                continue;
            }
            let color = match floor.grid.tile_at(pos) {
                TileKind::Floor => FLOOR_COLOR,
                TileKind::Wall => WALL_COLOR,
            };
            let (sx, sy) = view.cell_rect(pos);
            draw_rectangle(sx, sy, view.cell, view.cell, color);
        }
    }

    for pose in game.poses() {
        let cell = floor.grid.cell_of(pose.pos.x, pose.pos.z);
        if pose.kind != PoseKind::Player && !floor.is_explored(cell) {
            continue;
        }
        draw_pose(&view, &pose);
    }

    if let Some(message) = game.message() {
        let size = measure_text(&message.text, None, 32, 1.0);
        draw_text(
            &message.text,
            panel.x + (panel.width - size.width) * 0.5,
            panel.y + panel.height * 0.25,
            32.0,
            YELLOW,
        );
    }

    let shake = game.screen_shake();
    if shake > 0.0 {
        let alpha = (shake * 0.2).min(0.25);
        let tint = Color::new(0.8, 0.0, 0.0, alpha);
        draw_rectangle(panel.x, panel.y, panel.width, panel.height, tint);
    }
}

fn draw_pose(view: &MapView, pose: &EntityPose) {
    let (sx, sy) = view.world_point(pose.pos.x, pose.pos.z);
    let unit = view.cell;
    match pose.kind {
        PoseKind::Player => {
            draw_circle(sx, sy, unit * 0.45, WHITE);
            let (fx, fz) = (-pose.yaw.sin(), -pose.yaw.cos());
            draw_line(sx, sy, sx + fx * unit * 1.2, sy + fz * unit * 1.2, 2.0, WHITE);
        }
        PoseKind::Enemy(kind) => {
            draw_circle(sx, sy, unit * 0.4, enemy_color(kind));
            if let Some(fraction) = pose.health_fraction.filter(|fraction| *fraction < 1.0) {
                let bar_y = sy - unit * 0.8;
                draw_rectangle(sx - unit * 0.5, bar_y, unit, 3.0, DARKGRAY);
                draw_rectangle(sx - unit * 0.5, bar_y, unit * fraction, 3.0, RED);
            }
        }
        PoseKind::Projectile => draw_circle(sx, sy, unit * 0.2, ORANGE),
        PoseKind::Item(ItemKind::Potion) => draw_circle(sx, sy, unit * 0.25, PINK),
        PoseKind::Item(ItemKind::Key) => draw_poly(sx, sy, 4, unit * 0.35, 45.0, GOLD),
        PoseKind::Stairs => {
            let half = unit * 0.45;
            draw_rectangle_lines(sx - half, sy - half, unit * 0.9, unit * 0.9, 2.0, SKYBLUE);
        }
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Slime => GREEN,
        EnemyKind::Skeleton => BEIGE,
        EnemyKind::Bat => PURPLE,
        EnemyKind::Mage => BLUE,
        EnemyKind::Knight => GRAY,
        EnemyKind::Demon => MAROON,
    }
}
