//! The single player: where they are, how hurt they are, what they carry.

use serde::{Deserialize, Serialize};

use super::catalog::{ItemKey, ItemSet, Tag, ToolCategory};
use super::world::Coord;

pub const MAX_HIT_POINTS: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Coord,
    pub hit_points: i32,
    pub inventory: ItemSet,
    /// Turns elapsed this session; drives the day/night clock.
    pub turn: u64,
    /// Turns spent in the current room since arriving.
    pub time_in_room: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Coord::ORIGIN,
            hit_points: MAX_HIT_POINTS,
            inventory: ItemSet::new(),
            turn: 0,
            time_in_room: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points <= 0
    }

    /// Apply damage, never dropping below zero.
    pub fn hurt(&mut self, amount: i32) {
        self.hit_points = (self.hit_points - amount).clamp(0, MAX_HIT_POINTS);
    }

    /// Heal, capped at the maximum. Returns true only when this brought the
    /// player from injured to full health.
    pub fn heal(&mut self, amount: i32) -> bool {
        let was_injured = self.hit_points < MAX_HIT_POINTS;
        self.hit_points = (self.hit_points + amount).clamp(0, MAX_HIT_POINTS);
        was_injured && self.hit_points == MAX_HIT_POINTS
    }

    pub fn move_to(&mut self, position: Coord) {
        self.position = position;
        self.time_in_room = 0;
    }

    /// Strongest carried tool of a category.
    pub fn best_tool(&self, category: ToolCategory) -> Option<ItemKey> {
        self.inventory
            .iter()
            .filter(|k| k.has(Tag::Tool) && k.def().category == Some(category))
            .max_by_key(|k| k.def().tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_points_stay_in_bounds() {
        let mut player = Player::new();
        player.hurt(9);
        assert_eq!(player.hit_points, 0);
        assert!(player.is_dead());
        player.heal(20);
        assert_eq!(player.hit_points, MAX_HIT_POINTS);
    }

    #[test]
    fn heal_reports_only_the_transition_to_full() {
        let mut player = Player::new();
        player.hit_points = 4;
        assert!(player.heal(1));
        assert!(!player.heal(1));
        assert_eq!(player.hit_points, MAX_HIT_POINTS);
    }

    #[test]
    fn best_tool_prefers_higher_tiers() {
        let mut player = Player::new();
        player.inventory.insert(ItemKey::WoodenPickaxe);
        player.inventory.insert(ItemKey::IronPickaxe);
        player.inventory.insert(ItemKey::StoneSword);
        assert_eq!(player.best_tool(ToolCategory::Pickaxe), Some(ItemKey::IronPickaxe));
        assert_eq!(player.best_tool(ToolCategory::Sword), Some(ItemKey::StoneSword));
        player.inventory.remove(ItemKey::StoneSword);
        assert_eq!(player.best_tool(ToolCategory::Sword), None);
    }
}
