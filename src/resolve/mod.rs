//! Turn resolution.
//!
//! Contains the combat resolver, the Elite propagation and promotion rules,
//! the per-unit action selector, and the turn orchestration. All resolution
//! steps share one [`TurnCtx`] borrowing the engine's mutable state, so
//! per-faction counters are explicit handles rather than ambient globals.

pub mod action;
pub mod combat;
pub mod promote;
pub mod turn;

use rand::rngs::SmallRng;

use crate::board::{BoardIndex, Faction, Unit};
use crate::config::SimConfig;
use crate::engine::{EventLog, FactionStats};

pub use action::ActionKind;
pub use combat::{apply_combat, combat_scores, resolve_combat, roll_dice, CombatResult};
pub use turn::run_turn;

/// Mutable view of the engine state threaded through one turn's resolution.
///
/// The unit arena and board index are exclusively owned by the engine for
/// the duration of the turn; no other component mutates them.
pub struct TurnCtx<'a> {
    pub config: &'a SimConfig,
    pub units: &'a mut Vec<Unit>,
    pub index: &'a mut BoardIndex,
    pub rng: &'a mut SmallRng,
    pub stats: &'a mut [FactionStats],
    /// Live Elite count for the leader faction, enforcing the cap.
    pub leader_elites: &'a mut usize,
    pub log: &'a mut EventLog,
}

impl TurnCtx<'_> {
    /// Number of live units belonging to `faction`.
    pub fn faction_count(&self, faction: Faction) -> usize {
        self.units.iter().filter(|u| u.faction == faction).count()
    }

    /// True when the leader faction still has Elite headroom under the cap.
    pub fn under_elite_cap(&self) -> bool {
        *self.leader_elites < self.config.elite_cap
    }

    /// Display name for log messages.
    pub fn name(&self, faction: Faction) -> String {
        self.config.faction_name(faction)
    }
}
