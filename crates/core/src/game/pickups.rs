use super::Game;
use super::hud::{KEY_MESSAGE_SECS, POTION_MESSAGE_SECS};
use crate::collision::flat_distance;
use crate::types::{ItemId, ItemKind, LogEvent};

pub const PICKUP_RADIUS: f32 = 1.8;

pub fn potion_heal(floor: u32) -> i32 {
    30 + 5 * floor as i32
}

impl Game {
    pub(super) fn check_items(&mut self) {
        let player_pos = self.player.pos;
        let grid = &self.floor.grid;
        let collected: Vec<(ItemId, ItemKind)> = self
            .floor
            .items
            .iter()
            .filter(|(_, item)| flat_distance(grid.world_of(item.cell), player_pos) < PICKUP_RADIUS)
            .map(|(id, item)| (id, item.kind))
            .collect();

        for (id, kind) in collected {
            self.floor.items.remove(id);
            match kind {
                ItemKind::Potion => {
                    let healed = self.player.heal(potion_heal(self.floor.index));
                    self.show_message(format!("+{healed} HP"), POTION_MESSAGE_SECS);
                }
                ItemKind::Key => {
                    self.player.has_key = true;
                    self.show_message("KEY ACQUIRED", KEY_MESSAGE_SECS);
                }
            }
            self.log.push(LogEvent::ItemPickedUp { item: id, kind });
        }
    }
}
