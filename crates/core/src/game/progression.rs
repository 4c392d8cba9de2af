//! XP thresholds, the card offer and card effects.
//! This module exists to own the PLAYING/UPGRADING transition and what a chosen card does.
//! It does not own where level-up checks happen; the attack and stairs paths call in.

use tracing::{debug, info};

use super::Game;
use super::hud::CARD_MESSAGE_SECS;
use crate::content::{CARD_CATALOG, Card, card_by_id};
use crate::state::PlayerState;
use crate::types::{LogEvent, RunPhase, Weapon};

pub const CARDS_PER_OFFER: usize = 3;

/// XP needed to leave `level`.
pub fn xp_to_level(level: u32) -> u32 {
    level * 80 + 40
}

/// Three distinct catalog ids shown after a level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardOffer {
    pub card_ids: [u8; CARDS_PER_OFFER],
}

impl CardOffer {
    pub fn card(&self, index: usize) -> Option<&'static Card> {
        self.card_ids.get(index).and_then(|&id| card_by_id(id))
    }

    pub fn cards(&self) -> impl Iterator<Item = &'static Card> + '_ {
        self.card_ids.iter().filter_map(|&id| card_by_id(id))
    }
}

fn scale(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor) as i32
}

/// Applies a card's effect to the player. Unknown ids are ignored and return `false`.
pub fn apply_card(player: &mut PlayerState, card_id: u8) -> bool {
    match card_id {
        1 => {
            player.damage = scale(player.damage, 1.35);
            player.attack_mult *= 0.85;
            player.weapon = Weapon::Broadsword;
        }
        2 => {
            player.attack_mult *= 1.4;
            player.damage = scale(player.damage, 0.85);
            player.weapon = Weapon::TwinDaggers;
        }
        3 => {
            player.damage = scale(player.damage, 1.5);
            player.knockback_mult *= 2.0;
            player.attack_mult *= 0.75;
            player.weapon = Weapon::WarHammer;
        }
        4 => {
            player.max_hp += 30;
            player.heal(30);
        }
        5 => player.damage = scale(player.damage, 1.2),
        6 => player.attack_mult *= 1.25,
        7 => player.speed_mult *= 1.2,
        8 => player.range_mult *= 1.25,
        9 => player.lifesteal += 0.08,
        10 => player.hp = player.max_hp,
        11 => player.shield += 40,
        12 => player.regen += 2.0,
        _ => return false,
    }
    true
}

impl Game {
    /// Moves to UPGRADING with a fresh offer when XP has crossed the current threshold.
    pub(super) fn check_level_up(&mut self) {
        if self.phase != RunPhase::Playing {
            return;
        }
        let threshold = xp_to_level(self.player.level);
        if self.player.xp < threshold {
            return;
        }
        self.player.xp -= threshold;
        self.player.level += 1;

        let picks = self.rng.sample_distinct(CARD_CATALOG.len(), CARDS_PER_OFFER);
        let mut card_ids = [0_u8; CARDS_PER_OFFER];
        for (slot, pick) in card_ids.iter_mut().zip(picks) {
            *slot = CARD_CATALOG[pick].id;
        }
        self.offer = Some(CardOffer { card_ids });
        self.phase = RunPhase::Upgrading;

        info!(level = self.player.level, ?card_ids, "level up");
        self.log.push(LogEvent::LevelUp { level: self.player.level });
    }

    /// Takes the offered card at `index`. Ignored outside UPGRADING or for an index past the offer.
    pub fn choose_card(&mut self, index: usize) {
        if self.phase != RunPhase::Upgrading {
            return;
        }
        let Some(card) = self.offer.and_then(|offer| offer.card(index)) else {
            return;
        };

        apply_card(&mut self.player, card.id);
        debug!(card = card.name, "card applied");
        self.log.push(LogEvent::CardApplied { card_id: card.id });
        self.show_message(format!("{} ACQUIRED!", card.name), CARD_MESSAGE_SECS);
        self.offer = None;
        self.phase = RunPhase::Playing;

        if self.pending_descent {
            self.pending_descent = false;
            debug!(floor = self.floor.index + 1, "resuming deferred descent");
            self.enter_floor(self.floor.index + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::game::test_support::*;
    use crate::types::FrameInput;

    #[test]
    fn threshold_grows_with_level() {
        assert_eq!(xp_to_level(1), 120);
        assert_eq!(xp_to_level(2), 200);
        assert_eq!(xp_to_level(5), 440);
    }

    #[test]
    fn crossing_threshold_offers_three_distinct_cards_once() {
        let mut game = arena_game(31);
        game.player.xp = 130;
        game.check_level_up();

        assert_eq!(game.phase, RunPhase::Upgrading);
        assert_eq!(game.player.level, 2);
        assert_eq!(game.player.xp, 10);
        let offer = game.offer.expect("offer");
        let unique: BTreeSet<u8> = offer.card_ids.iter().copied().collect();
        assert_eq!(unique.len(), CARDS_PER_OFFER);
        assert_eq!(offer.cards().count(), CARDS_PER_OFFER);

        game.player.xp = 10_000;
        game.check_level_up();
        assert_eq!(game.player.level, 2, "no second offer while upgrading");
        assert_eq!(game.offer, Some(offer));
    }

    #[test]
    fn invalid_choice_is_ignored() {
        let mut game = arena_game(32);
        game.player.xp = 120;
        game.check_level_up();
        let before = game.player.clone();

        game.choose_card(3);
        assert_eq!(game.phase, RunPhase::Upgrading);
        assert_eq!(game.player, before);

        game.step(0.016, &FrameInput { card_choice: Some(7), ..FrameInput::default() });
        assert_eq!(game.phase, RunPhase::Upgrading);
    }

    #[test]
    fn choosing_while_playing_does_nothing() {
        let mut game = arena_game(33);
        let before = game.player.clone();
        game.choose_card(0);
        assert_eq!(game.player, before);
        assert_eq!(game.phase, RunPhase::Playing);
    }

    #[test]
    fn valid_choice_applies_card_and_resumes_play() {
        let mut game = arena_game(34);
        game.player.xp = 120;
        game.check_level_up();
        let card = game.offer.and_then(|offer| offer.card(1)).expect("card");

        game.step(0.016, &FrameInput { card_choice: Some(1), ..FrameInput::default() });

        assert_eq!(game.phase, RunPhase::Playing);
        assert!(game.offer.is_none());
        assert!(game.log.contains(&LogEvent::CardApplied { card_id: card.id }));
        let message = game.message.as_ref().expect("message");
        assert_eq!(message.text, format!("{} ACQUIRED!", card.name));
    }

    #[test]
    fn weapon_cards_truncate_damage() {
        let mut player = PlayerState::default();
        assert!(apply_card(&mut player, 1));
        assert_eq!(player.damage, 29);
        assert_eq!(player.weapon, Weapon::Broadsword);
        assert!((player.attack_mult - 0.85).abs() < 1e-6);

        let mut player = PlayerState::default();
        apply_card(&mut player, 2);
        assert_eq!(player.damage, 18);
        assert!((player.attack_mult - 1.4).abs() < 1e-6);

        let mut player = PlayerState::default();
        apply_card(&mut player, 3);
        assert_eq!(player.damage, 33);
        assert!((player.knockback_mult - 2.0).abs() < 1e-6);
        assert_eq!(player.weapon, Weapon::WarHammer);
    }

    #[test]
    fn healing_cards_respect_max_health() {
        let mut player = PlayerState { hp: 90, ..PlayerState::default() };
        apply_card(&mut player, 4);
        assert_eq!(player.max_hp, 130);
        assert_eq!(player.hp, 120);

        let mut player = PlayerState { hp: 3, ..PlayerState::default() };
        apply_card(&mut player, 10);
        assert_eq!(player.hp, player.max_hp);

        let mut player = PlayerState::default();
        apply_card(&mut player, 11);
        apply_card(&mut player, 12);
        assert_eq!(player.shield, 40);
        assert!((player.regen - 2.0).abs() < 1e-6);
        assert!(!apply_card(&mut player, 99));
    }
}
