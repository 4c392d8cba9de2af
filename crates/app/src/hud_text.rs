//! Text content for the HUD panels, kept free of drawing calls so it can be tested.

use game_core::content::card_by_id;
use game_core::{EnemyKind, Game, HudSnapshot, ItemKind, LogEvent, RunPhase};

use crate::app_loop::AppMode;
use crate::{format_seed, format_snapshot_hash};

pub fn status_text(mode: AppMode, phase: RunPhase) -> String {
    match (mode, phase) {
        (AppMode::Title, _) => "[ENTER/CLICK] Descend".to_string(),
        (AppMode::GameOver, _) => "YOU DIED  [R] Restart".to_string(),
        (AppMode::Running, RunPhase::Upgrading) => {
            "LEVEL UP!  [1] [2] [3] Choose a card".to_string()
        }
        (AppMode::Running, _) => {
            "[WASD] Move  [MOUSE] Look  [CLICK] Attack  [SPACE] Dash  [E] Stairs".to_string()
        }
    }
}

pub fn hud_lines(hud: &HudSnapshot) -> Vec<String> {
    let mut lines = vec![
        if hud.shield > 0 {
            format!("HP {}/{}  SHIELD {}", hud.hp, hud.max_hp, hud.shield)
        } else {
            format!("HP {}/{}", hud.hp, hud.max_hp)
        },
        format!("LV {}  XP {}/{}", hud.level, hud.xp, hud.xp_to_next),
        format!("FLOOR {}", hud.floor),
        format!("KILLS {}  SCORE {}", hud.kills, hud.score),
        format!("WEAPON {}", hud.weapon),
    ];
    if hud.has_key {
        lines.push("KEY".to_string());
    }
    lines
}

/// One line per offered card, numbered with the key that picks it.
pub fn card_offer_lines(game: &Game) -> Vec<String> {
    let Some(offer) = game.offer() else {
        return Vec::new();
    };
    offer
        .cards()
        .enumerate()
        .map(|(slot, card)| format!("[{}] {}: {}", slot + 1, card.name, card.description))
        .collect()
}

pub fn game_over_lines(game: &Game, run_seed: u64) -> Vec<String> {
    let hud = game.hud();
    vec![
        "YOU DIED".to_string(),
        format!("Floor {}  Level {}", hud.floor, hud.level),
        format!("Kills {}  Score {}", hud.kills, hud.score),
        format!("Seed: {}", format_seed(run_seed)),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
    ]
}

fn enemy_name(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Slime => "Slime",
        EnemyKind::Skeleton => "Skeleton",
        EnemyKind::Bat => "Bat",
        EnemyKind::Mage => "Mage",
        EnemyKind::Knight => "Knight",
        EnemyKind::Demon => "Demon",
    }
}

/// Sidebar line for a log event. Per-hit and projectile bookkeeping stays out of the sidebar.
pub fn event_line(event: &LogEvent) -> Option<String> {
    match event {
        LogEvent::FloorEntered { floor, rooms, enemies } => {
            Some(format!("Entered floor {floor}: {rooms} rooms, {enemies} foes"))
        }
        LogEvent::EnemyKilled { kind, xp, .. } => {
            Some(format!("{} slain (+{xp} XP)", enemy_name(*kind)))
        }
        LogEvent::PlayerDamaged { amount, absorbed, .. } if *absorbed > 0 => {
            Some(format!("Took {amount} damage ({absorbed} absorbed)"))
        }
        LogEvent::PlayerDamaged { amount, .. } => Some(format!("Took {amount} damage")),
        LogEvent::ItemPickedUp { kind: ItemKind::Potion, .. } => Some("Drank a potion".to_string()),
        LogEvent::ItemPickedUp { kind: ItemKind::Key, .. } => Some("Found the key".to_string()),
        LogEvent::LevelUp { level } => Some(format!("Reached level {level}")),
        LogEvent::CardApplied { card_id } => {
            card_by_id(*card_id).map(|card| format!("Took {}", card.name))
        }
        LogEvent::PlayerDied { floor, level, kills } => {
            Some(format!("Died on floor {floor} at level {level} with {kills} kills"))
        }
        LogEvent::EnemyHit { .. }
        | LogEvent::ProjectileFired { .. }
        | LogEvent::ProjectileRemoved { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use game_core::{SimConfig, Vec3};

    use super::*;

    fn sample_hud() -> HudSnapshot {
        HudSnapshot {
            phase: RunPhase::Playing,
            hp: 72,
            max_hp: 100,
            shield: 0,
            xp: 30,
            xp_to_next: 120,
            level: 1,
            floor: 3,
            kills: 4,
            score: 95,
            has_key: false,
            weapon: "SWORD",
            message: None,
        }
    }

    #[test]
    fn hud_lines_hide_empty_shield_and_missing_key() {
        let lines = hud_lines(&sample_hud());
        assert_eq!(lines[0], "HP 72/100");
        assert!(!lines.iter().any(|line| line == "KEY"));
    }

    #[test]
    fn hud_lines_show_shield_and_key_when_present() {
        let hud = HudSnapshot { shield: 40, has_key: true, ..sample_hud() };
        let lines = hud_lines(&hud);
        assert_eq!(lines[0], "HP 72/100  SHIELD 40");
        assert_eq!(lines.last().map(String::as_str), Some("KEY"));
    }

    #[test]
    fn status_text_prompts_for_cards_while_upgrading() {
        assert!(status_text(AppMode::Running, RunPhase::Upgrading).contains("[1]"));
        assert!(status_text(AppMode::GameOver, RunPhase::Dead).contains("[R]"));
    }

    #[test]
    fn fresh_game_has_no_card_lines() {
        let game = Game::new(3, SimConfig::default()).expect("game");
        assert!(card_offer_lines(&game).is_empty());
    }

    #[test]
    fn game_over_lines_carry_seed_and_hash() {
        let game = Game::new(42, SimConfig::default()).expect("game");
        let lines = game_over_lines(&game, 42);
        assert!(lines.contains(&"Seed: 42".to_string()));
        assert!(lines.iter().any(|line| line.starts_with("Snapshot: 0x")));
    }

    #[test]
    fn event_lines_skip_noisy_events() {
        let kill = LogEvent::EnemyKilled {
            enemy: Default::default(),
            kind: EnemyKind::Mage,
            xp: 35,
            pos: Vec3::ZERO,
        };
        assert_eq!(event_line(&kill).as_deref(), Some("Mage slain (+35 XP)"));
        let hit = LogEvent::EnemyHit { enemy: Default::default(), damage: 12, pos: Vec3::ZERO };
        assert_eq!(event_line(&hit), None);
        assert_eq!(
            event_line(&LogEvent::CardApplied { card_id: 10 }).as_deref(),
            Some("Took SECOND WIND")
        );
    }
}
