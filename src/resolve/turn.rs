//! One-turn orchestration.
//!
//! Runs the fixed sequence over the shared unit arena: flag reset, index
//! rebuild, Elite propagation, the shuffled action pass, promotion by
//! inactivity, the Elite recount, and the purge of foreign factions.

use rand::seq::SliceRandom;

use crate::board::Tier;

use super::action::act;
use super::promote::{promote_idle, propagate_elites};
use super::TurnCtx;

/// Resolves one full turn. Exactly one action per pre-existing unit; units
/// spawned during the pass wait for the next turn.
pub fn run_turn(ctx: &mut TurnCtx) {
    for unit in ctx.units.iter_mut() {
        unit.reset_turn_flags();
    }
    ctx.index.rebuild(ctx.units);

    propagate_elites(ctx);

    // randomized action order via an index permutation over the arena;
    // the watermark keeps this turn's spawns out of the pass entirely
    let watermark = ctx.units.len();
    let mut order: Vec<usize> = (0..watermark).collect();
    order.shuffle(ctx.rng);

    let active = ctx.config.factions;
    for i in order {
        let unit = ctx.units[i];
        if unit.acted || unit.faction.0 >= active {
            continue;
        }
        act(ctx, i);
    }

    promote_idle(ctx, watermark);

    // drift from mid-turn conversions is settled by an authoritative recount
    if let Some(leader) = ctx.config.leader {
        *ctx.leader_elites = ctx
            .units
            .iter()
            .filter(|u| u.faction == leader && u.tier == Tier::Elite)
            .count();
    }

    // units of factions outside the active set disappear
    ctx.units.retain(|u| u.faction.0 < active);
    ctx.index.rebuild(ctx.units);
}
