use crate::types::{CardCategory, EnemyKind};

pub const XP_BY_KIND: [u32; 6] = [15, 25, 20, 35, 45, 60];

pub struct EnemyStats {
    pub hp: i32,
    pub radius: f32,
    pub speed: f32,
    pub damage: i32,
    pub attack_range: f32,
    pub ranged_cooldown: f32,
}

pub fn get_enemy_stats(kind: EnemyKind, floor: u32) -> EnemyStats {
    let f = floor as i32;
    match kind {
        EnemyKind::Slime => EnemyStats {
            hp: 40 + 5 * f,
            radius: 0.6,
            speed: 3.5,
            damage: 8 + 2 * f,
            attack_range: 1.5,
            ranged_cooldown: 0.0,
        },
        EnemyKind::Skeleton => EnemyStats {
            hp: 60 + 8 * f,
            radius: 0.6,
            speed: 5.0,
            damage: 12 + 2 * f,
            attack_range: 2.2,
            ranged_cooldown: 0.0,
        },
        EnemyKind::Bat => EnemyStats {
            hp: 25 + 4 * f,
            radius: 0.5,
            speed: 6.0,
            damage: 10 + 2 * f,
            attack_range: 1.8,
            ranged_cooldown: 0.0,
        },
        EnemyKind::Mage => EnemyStats {
            hp: 50 + 6 * f,
            radius: 0.6,
            speed: 2.5,
            damage: 18 + 3 * f,
            attack_range: 12.0,
            ranged_cooldown: 2.0,
        },
        EnemyKind::Knight => EnemyStats {
            hp: 90 + 10 * f,
            radius: 0.7,
            speed: 5.5,
            damage: 15 + 3 * f,
            attack_range: 2.5,
            ranged_cooldown: 0.0,
        },
        EnemyKind::Demon => EnemyStats {
            hp: 120 + 12 * f,
            radius: 0.8,
            speed: 4.0,
            damage: 20 + 4 * f,
            attack_range: 14.0,
            ranged_cooldown: 2.5,
        },
    }
}

pub fn xp_for_kill(kind: EnemyKind) -> u32 {
    XP_BY_KIND[kind.index()]
}

/// Kinds that may spawn on `floor`. Deeper floors only add kinds, never remove them.
pub fn enemy_pool(floor: u32) -> Vec<EnemyKind> {
    let mut pool = vec![EnemyKind::Slime, EnemyKind::Skeleton];
    if floor >= 2 {
        pool.push(EnemyKind::Bat);
    }
    if floor >= 3 {
        pool.push(EnemyKind::Mage);
    }
    if floor >= 5 {
        pool.push(EnemyKind::Knight);
    }
    if floor >= 7 {
        pool.push(EnemyKind::Demon);
    }
    pool
}

pub struct Card {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub category: CardCategory,
}

pub const CARD_CATALOG: [Card; 12] = [
    Card {
        id: 1,
        name: "BROADSWORD",
        description: "+35% Damage, -15% Speed",
        category: CardCategory::Weapon,
    },
    Card {
        id: 2,
        name: "TWIN DAGGERS",
        description: "+40% Atk Speed, -15% Dmg",
        category: CardCategory::Weapon,
    },
    Card {
        id: 3,
        name: "WAR HAMMER",
        description: "+50% Dmg, +KB, -25% Speed",
        category: CardCategory::Weapon,
    },
    Card {
        id: 4,
        name: "IRON HIDE",
        description: "+30 Max HP, Heal 30",
        category: CardCategory::Upgrade,
    },
    Card { id: 5, name: "KEEN EDGE", description: "+20% Damage", category: CardCategory::Upgrade },
    Card {
        id: 6,
        name: "QUICK HANDS",
        description: "+25% Attack Speed",
        category: CardCategory::Upgrade,
    },
    Card {
        id: 7,
        name: "FLEET FOOT",
        description: "+20% Move Speed",
        category: CardCategory::Upgrade,
    },
    Card {
        id: 8,
        name: "LONG ARMS",
        description: "+25% Attack Range",
        category: CardCategory::Upgrade,
    },
    Card { id: 9, name: "VAMPIRIC", description: "+8% Lifesteal", category: CardCategory::Buff },
    Card { id: 10, name: "SECOND WIND", description: "Full Heal", category: CardCategory::Buff },
    Card { id: 11, name: "SHIELD ORB", description: "+40 Shield HP", category: CardCategory::Buff },
    Card { id: 12, name: "REGENERATION", description: "+2 HP/sec", category: CardCategory::Buff },
];

pub fn card_by_id(id: u8) -> Option<&'static Card> {
    CARD_CATALOG.iter().find(|card| card.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn enemy_stats_scale_with_floor() {
        for kind in EnemyKind::ALL {
            let shallow = get_enemy_stats(kind, 1);
            let deep = get_enemy_stats(kind, 6);
            assert!(deep.hp > shallow.hp, "{kind:?} hp should grow with floor");
            assert!(deep.damage > shallow.damage, "{kind:?} damage should grow with floor");
        }
    }

    #[test]
    fn pool_unlocks_kinds_at_expected_floors() {
        assert_eq!(enemy_pool(1), vec![EnemyKind::Slime, EnemyKind::Skeleton]);
        assert!(enemy_pool(2).contains(&EnemyKind::Bat));
        assert!(!enemy_pool(4).contains(&EnemyKind::Knight));
        assert!(enemy_pool(5).contains(&EnemyKind::Knight));
        assert_eq!(enemy_pool(7).len(), 6);
    }

    #[test]
    fn card_ids_are_unique_and_resolvable() {
        let ids: BTreeSet<u8> = CARD_CATALOG.iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), CARD_CATALOG.len());
        assert_eq!(card_by_id(11).map(|card| card.name), Some("SHIELD ORB"));
        assert!(card_by_id(0).is_none());
    }
}
