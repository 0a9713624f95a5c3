//! Elite propagation and promotion by inactivity.
//!
//! Both upgrade paths are exclusive to the designated leader faction and
//! respect the global Elite cap. Propagation runs at the start of a turn,
//! promotion by inactivity at the end.

use std::collections::HashSet;

use rand::seq::SliceRandom;

use crate::board::Tier;

use super::TurnCtx;

/// Consecutive idle turns before a Light is promoted to Heavy.
pub const LIGHT_IDLE_PROMOTION: u32 = 3;

/// Consecutive idle turns before a Heavy is promoted to Elite.
pub const HEAVY_IDLE_PROMOTION: u32 = 5;

/// Elite adjacency propagation: every leader Elite not promoted this turn
/// scans its orthogonal neighbors in random order and promotes the first
/// same-faction Light or Heavy it finds. One promotion per Elite per turn,
/// stopping outright once the cap is reached.
pub fn propagate_elites(ctx: &mut TurnCtx) {
    let Some(leader) = ctx.config.leader else {
        return;
    };

    let mut promoted: HashSet<usize> = HashSet::new();
    for i in 0..ctx.units.len() {
        let unit = ctx.units[i];
        if unit.faction != leader || unit.tier != Tier::Elite || promoted.contains(&i) {
            continue;
        }
        if !ctx.under_elite_cap() {
            break;
        }

        let mut neighbors = ctx.index.grid().neighbors(unit.pos);
        neighbors.shuffle(ctx.rng);
        for pos in neighbors {
            let Some(j) = ctx.index.occupant(pos) else {
                continue;
            };
            let neighbor = ctx.units[j];
            if neighbor.faction != leader || neighbor.tier == Tier::Elite {
                continue;
            }

            ctx.units[j].tier = Tier::Elite;
            ctx.units[j].idle_turns = 0;
            *ctx.leader_elites += 1;
            promoted.insert(j);

            let name = ctx.name(leader);
            ctx.log.push(format!(
                "{} propagates elite rank to a {} unit",
                name,
                neighbor.tier.label()
            ));
            break;
        }
    }
}

/// End-of-turn inactivity pass over leader units that existed when the turn
/// began (`watermark` excludes units spawned this turn). Units that executed
/// an action reset their idle counter; the rest accumulate idle turns and
/// promote once they hit the tier threshold.
pub fn promote_idle(ctx: &mut TurnCtx, watermark: usize) {
    let Some(leader) = ctx.config.leader else {
        return;
    };

    for i in 0..watermark.min(ctx.units.len()) {
        if ctx.units[i].faction != leader {
            continue;
        }
        if ctx.units[i].performed_action {
            ctx.units[i].idle_turns = 0;
            continue;
        }

        ctx.units[i].idle_turns += 1;
        match ctx.units[i].tier {
            Tier::Light if ctx.units[i].idle_turns >= LIGHT_IDLE_PROMOTION => {
                ctx.units[i].tier = Tier::Heavy;
                ctx.units[i].idle_turns = 0;
                let name = ctx.name(leader);
                ctx.log
                    .push(format!("{} light unit holds its ground and hardens to heavy", name));
            }
            Tier::Heavy if ctx.units[i].idle_turns >= HEAVY_IDLE_PROMOTION => {
                if ctx.under_elite_cap() {
                    ctx.units[i].tier = Tier::Elite;
                    ctx.units[i].idle_turns = 0;
                    *ctx.leader_elites += 1;
                    let name = ctx.name(leader);
                    ctx.log
                        .push(format!("{} heavy unit ascends to elite", name));
                }
            }
            _ => {}
        }
    }
}
