//! Units and their faction/tier identity.
//!
//! A unit is a single grid-resident agent. Its tier fixes combat strength
//! and mobility; its faction defines alliance. Losing combat converts a
//! unit to the winner's faction rather than removing it.

use serde::{Deserialize, Serialize};

use super::grid::Pos;

/// The allegiance grouping of a unit. Doubles as an ordinal into the
/// engine's per-faction tally and statistics tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Faction(pub u8);

impl Faction {
    /// Returns the index of this faction in per-faction tables.
    pub const fn ordinal(self) -> usize {
        self.0 as usize
    }
}

/// A unit's combat/mobility class.
///
/// Combat dice and mobility are derived from the variant so they can never
/// drift out of sync with the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Light,
    Heavy,
    Elite,
}

impl Tier {
    /// Number of six-sided dice rolled in combat.
    pub const fn combat_dice(self) -> u32 {
        match self {
            Tier::Light => 3,
            Tier::Heavy | Tier::Elite => 5,
        }
    }

    /// Whether the tier can take a move action.
    pub const fn can_move(self) -> bool {
        match self {
            Tier::Heavy => false,
            Tier::Light | Tier::Elite => true,
        }
    }

    /// Lowercase name used in event-log messages.
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Light => "light",
            Tier::Heavy => "heavy",
            Tier::Elite => "elite",
        }
    }
}

/// A single grid-resident agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub faction: Faction,
    pub tier: Tier,
    pub pos: Pos,
    /// True once the unit has consumed its single action this turn.
    pub acted: bool,
    /// Transient highlight flag, set only while the unit's action resolves.
    pub is_acting: bool,
    /// True if the unit's chosen action actually executed this turn.
    pub performed_action: bool,
    /// Consecutive turns without an executed action; drives promotion.
    pub idle_turns: u32,
}

impl Unit {
    /// Creates a seed unit that may act on the first turn.
    pub fn new(faction: Faction, tier: Tier, pos: Pos) -> Self {
        Unit {
            faction,
            tier,
            pos,
            acted: false,
            is_acting: false,
            performed_action: false,
            idle_turns: 0,
        }
    }

    /// Creates a unit spawned mid-turn. Spawned units are already marked
    /// acted so they cannot act the turn they are created.
    pub fn spawned(faction: Faction, tier: Tier, pos: Pos) -> Self {
        Unit {
            acted: true,
            ..Unit::new(faction, tier, pos)
        }
    }

    /// Clears the per-turn action flags. Called at the start of every turn.
    pub fn reset_turn_flags(&mut self) {
        self.acted = false;
        self.is_acting = false;
        self.performed_action = false;
    }

    /// Applies a combat conversion: the unit joins `winner` as a Heavy.
    pub fn convert_to(&mut self, winner: Faction) {
        self.faction = winner;
        self.tier = Tier::Heavy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_is_consistent() {
        assert_eq!(Tier::Light.combat_dice(), 3);
        assert_eq!(Tier::Heavy.combat_dice(), 5);
        assert_eq!(Tier::Elite.combat_dice(), 5);
        assert!(Tier::Light.can_move());
        assert!(!Tier::Heavy.can_move());
        assert!(Tier::Elite.can_move());
    }

    #[test]
    fn spawned_unit_cannot_act() {
        let u = Unit::spawned(Faction(1), Tier::Light, Pos::new(3, 4));
        assert!(u.acted);
        assert!(!u.performed_action);
        assert_eq!(u.idle_turns, 0);
    }

    #[test]
    fn conversion_changes_faction_and_tier_only() {
        let mut u = Unit::new(Faction(0), Tier::Elite, Pos::new(1, 1));
        u.idle_turns = 2;
        u.convert_to(Faction(3));
        assert_eq!(u.faction, Faction(3));
        assert_eq!(u.tier, Tier::Heavy);
        assert_eq!(u.pos, Pos::new(1, 1));
        assert_eq!(u.idle_turns, 2);
    }

    #[test]
    fn reset_clears_action_flags() {
        let mut u = Unit::new(Faction(0), Tier::Light, Pos::new(0, 0));
        u.acted = true;
        u.is_acting = true;
        u.performed_action = true;
        u.reset_turn_flags();
        assert!(!u.acted && !u.is_acting && !u.performed_action);
    }
}
