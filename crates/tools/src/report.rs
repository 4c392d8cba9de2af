use game_core::content::card_by_id;
use game_core::{Game, LogEvent, StepResult};
use serde::Serialize;

/// Summary of one headless run, printed as text or JSON.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub frames_simulated: u32,
    pub frames_skipped: u32,
    pub deepest_floor: u32,
    pub level: u32,
    pub kills: u32,
    pub score: u32,
    pub died: bool,
    pub damage_taken: i32,
    pub damage_absorbed: i32,
    pub cards_taken: Vec<&'static str>,
    pub snapshot_hash: String,
}

impl RunReport {
    pub fn new(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn record_step(&mut self, result: StepResult) {
        match result {
            StepResult::Simulated => self.frames_simulated += 1,
            StepResult::Skipped(_) => self.frames_skipped += 1,
        }
    }

    pub fn absorb(&mut self, events: &[LogEvent]) {
        for event in events {
            match event {
                LogEvent::FloorEntered { floor, .. } => {
                    self.deepest_floor = self.deepest_floor.max(*floor);
                }
                LogEvent::PlayerDamaged { amount, absorbed, .. } => {
                    self.damage_taken += amount;
                    self.damage_absorbed += absorbed;
                }
                LogEvent::CardApplied { card_id } => {
                    if let Some(card) = card_by_id(*card_id) {
                        self.cards_taken.push(card.name);
                    }
                }
                LogEvent::PlayerDied { .. } => self.died = true,
                _ => {}
            }
        }
    }

    pub fn finish(&mut self, game: &Game) {
        let hud = game.hud();
        self.level = hud.level;
        self.kills = hud.kills;
        self.score = hud.score;
        self.deepest_floor = self.deepest_floor.max(hud.floor);
        self.snapshot_hash = format!("0x{:016x}", game.snapshot_hash());
    }

    pub fn text_lines(&self) -> Vec<String> {
        let cards = if self.cards_taken.is_empty() {
            "-".to_string()
        } else {
            self.cards_taken.join(", ")
        };
        vec![
            format!("Seed: {}", self.seed),
            format!("Frames: {} simulated, {} skipped", self.frames_simulated, self.frames_skipped),
            format!("Deepest floor: {}", self.deepest_floor),
            format!("Level: {}  Kills: {}  Score: {}", self.level, self.kills, self.score),
            format!("Damage taken: {} ({} absorbed)", self.damage_taken, self.damage_absorbed),
            format!("Cards: {cards}"),
            format!("Outcome: {}", if self.died { "died" } else { "alive" }),
            format!("Snapshot Hash: {}", self.snapshot_hash),
        ]
    }
}
