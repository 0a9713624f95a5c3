//! Per-unit action selection.
//!
//! Each unit gets exactly one action per turn, chosen by strict priority:
//! adjacent combat first, then the leader-Elite tactical breach, then the
//! generic move-or-multiply behavior. Every branch ends the unit's turn.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Faction, Pos, Tier, Unit};

use super::combat::resolve_combat;
use super::TurnCtx;

/// The behavior chosen for one acting unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Combat,
    TacticalBreach,
    Move,
    Multiply,
    Idle,
}

/// Resolves one unit's single action for the turn.
pub fn act(ctx: &mut TurnCtx, idx: usize) -> ActionKind {
    ctx.units[idx].is_acting = true;
    let kind = select_and_run(ctx, idx);
    ctx.units[idx].acted = true;
    ctx.units[idx].is_acting = false;
    kind
}

fn select_and_run(ctx: &mut TurnCtx, idx: usize) -> ActionKind {
    let (pos, faction) = (ctx.units[idx].pos, ctx.units[idx].faction);
    if let Some(enemy) = random_enemy_neighbor(ctx, pos, faction) {
        resolve_combat(ctx, idx, enemy);
        return ActionKind::Combat;
    }

    let tier = ctx.units[idx].tier;
    if tier == Tier::Elite && ctx.config.is_leader(faction) && tactical_breach(ctx, idx) {
        return ActionKind::TacticalBreach;
    }

    generic_action(ctx, idx)
}

/// Uniformly picks one opposing unit in the four orthogonal neighbor cells.
fn random_enemy_neighbor(ctx: &mut TurnCtx, pos: Pos, faction: Faction) -> Option<usize> {
    let enemies: Vec<usize> = ctx
        .index
        .grid()
        .neighbors(pos)
        .into_iter()
        .filter_map(|p| ctx.index.occupant(p))
        .filter(|&j| ctx.units[j].faction != faction)
        .collect();
    enemies.choose(ctx.rng).copied()
}

/// Tactical breach: the Elite swaps positions with an adjacent not-yet-acted
/// Light/Heavy ally, then strikes once from the new position if an opponent
/// is now adjacent. Returns false when no ally is available.
fn tactical_breach(ctx: &mut TurnCtx, idx: usize) -> bool {
    let unit = ctx.units[idx];
    let allies: Vec<usize> = ctx
        .index
        .grid()
        .neighbors(unit.pos)
        .into_iter()
        .filter_map(|p| ctx.index.occupant(p))
        .filter(|&j| {
            let ally = ctx.units[j];
            ally.faction == unit.faction && ally.tier != Tier::Elite && !ally.acted
        })
        .collect();
    let Some(&ally) = allies.choose(ctx.rng) else {
        return false;
    };

    let elite_pos = unit.pos;
    let ally_pos = ctx.units[ally].pos;
    let ally_tier = ctx.units[ally].tier;
    ctx.units[idx].pos = ally_pos;
    ctx.units[ally].pos = elite_pos;
    ctx.index.swap(elite_pos, ally_pos);
    ctx.units[idx].acted = true;
    ctx.units[idx].performed_action = true;
    ctx.units[ally].acted = true;
    ctx.stats[unit.faction.ordinal()].moves += 1;

    let name = ctx.name(unit.faction);
    ctx.log.push(format!(
        "{} elite swaps into the line with a {} ally",
        name,
        ally_tier.label()
    ));

    // one strike from the new position; a lone elite overruns non-elites,
    // elite against elite rolls dice as usual
    if let Some(enemy) = random_enemy_neighbor(ctx, ally_pos, unit.faction) {
        resolve_combat(ctx, idx, enemy);
    }
    true
}

/// Move-or-multiply, the lowest-priority branch. With no free adjacent cell
/// the unit idles. Immobile tiers always multiply; mobile tiers multiply
/// with probability `aggressiveness + own_count / cell_count`.
fn generic_action(ctx: &mut TurnCtx, idx: usize) -> ActionKind {
    let unit = ctx.units[idx];
    let free = ctx.index.free_neighbors(unit.pos);
    if free.is_empty() {
        return ActionKind::Idle;
    }

    let own = ctx.faction_count(unit.faction);
    let p = (ctx.config.aggressiveness + own as f64 / ctx.index.grid().cell_count() as f64)
        .clamp(0.0, 1.0);
    if !unit.tier.can_move() || ctx.rng.gen_bool(p) {
        run_multiply(ctx, idx, &free);
        ActionKind::Multiply
    } else {
        run_move(ctx, idx, &free);
        ActionKind::Move
    }
}

/// Yield table for one multiplication, by tier and faction role.
fn spawn_yields(ctx: &mut TurnCtx, unit: Unit) -> Vec<Tier> {
    let leader = ctx.config.is_leader(unit.faction);
    match unit.tier {
        Tier::Light => {
            if ctx.rng.gen_bool(0.5) {
                vec![Tier::Light; 3]
            } else {
                vec![Tier::Heavy]
            }
        }
        Tier::Heavy if leader => {
            let mut tiers = if ctx.rng.gen_bool(0.5) {
                vec![Tier::Heavy; 2]
            } else {
                vec![Tier::Light; 4]
            };
            if ctx.under_elite_cap() {
                tiers[0] = Tier::Elite;
            }
            tiers
        }
        Tier::Heavy => {
            if ctx.rng.gen_bool(0.6) {
                vec![Tier::Heavy, Tier::Light, Tier::Light]
            } else {
                vec![Tier::Heavy; 3]
            }
        }
        Tier::Elite if leader && ctx.under_elite_cap() => {
            vec![Tier::Elite, Tier::Heavy, Tier::Light]
        }
        Tier::Elite => vec![Tier::Heavy; 2],
    }
}

/// Spawns the yield into a random sample of free neighbor cells, truncated
/// to availability. Spawned units are marked acted and enter the board
/// index immediately so they block cells for the rest of the turn.
fn run_multiply(ctx: &mut TurnCtx, idx: usize, free: &[Pos]) {
    let unit = ctx.units[idx];
    let tiers = spawn_yields(ctx, unit);
    let count = tiers.len().min(free.len());
    let picks: Vec<Pos> = free.choose_multiple(ctx.rng, count).copied().collect();
    if picks.is_empty() {
        return;
    }

    ctx.units[idx].performed_action = true;
    let spawned = picks.len();
    for (pos, tier) in picks.into_iter().zip(tiers) {
        if tier == Tier::Elite {
            *ctx.leader_elites += 1;
        }
        let new_idx = ctx.units.len();
        ctx.units.push(Unit::spawned(unit.faction, tier, pos));
        ctx.index.place(pos, new_idx);
    }
    ctx.stats[unit.faction.ordinal()].multiplications += 1;

    let name = ctx.name(unit.faction);
    ctx.log.push(format!(
        "{} {} unit multiplies ({} spawned)",
        name,
        unit.tier.label(),
        spawned
    ));
}

/// Moves to a free neighbor cell. Leader Elites prefer a breach (a free
/// cell adjacent to an enemy) when one exists; everyone else moves
/// uniformly at random.
fn run_move(ctx: &mut TurnCtx, idx: usize, free: &[Pos]) {
    let unit = ctx.units[idx];
    let leader_elite = unit.tier == Tier::Elite && ctx.config.is_leader(unit.faction);

    let mut into_breach = false;
    let target = if leader_elite {
        let breaches: Vec<Pos> = free
            .iter()
            .copied()
            .filter(|p| is_breach(ctx, *p, unit.faction))
            .collect();
        match breaches.choose(ctx.rng) {
            Some(&p) => {
                into_breach = true;
                Some(p)
            }
            None => free.choose(ctx.rng).copied(),
        }
    } else {
        free.choose(ctx.rng).copied()
    };
    let Some(target) = target else {
        return;
    };

    ctx.index.clear(unit.pos);
    ctx.units[idx].pos = target;
    ctx.index.place(target, idx);
    ctx.units[idx].performed_action = true;
    ctx.stats[unit.faction.ordinal()].moves += 1;

    let name = ctx.name(unit.faction);
    if into_breach {
        ctx.log.push(format!("{} elite opens a breach", name));
    } else {
        ctx.log
            .push(format!("{} {} unit advances", name, unit.tier.label()));
    }
}

/// A breach is a free cell orthogonally adjacent to an enemy unit.
fn is_breach(ctx: &TurnCtx, pos: Pos, faction: Faction) -> bool {
    ctx.index
        .grid()
        .neighbors(pos)
        .into_iter()
        .filter_map(|p| ctx.index.occupant(p))
        .any(|j| ctx.units[j].faction != faction)
}
