//! Combat resolution between adjacent opposing units.
//!
//! An Elite facing a non-Elite wins unconditionally. Otherwise both sides
//! roll their tier's dice and the higher total wins; exact equality is a
//! no-op for both units. The loser is converted, never removed: it joins
//! the winner's faction as a Heavy.

use rand::Rng;

use crate::board::Tier;

use super::TurnCtx;

/// Fixed score standing in for an overwhelming Elite victory.
pub const ELITE_AUTO_SCORE: u32 = 9999;

/// Rolls `dice` independent six-sided dice and returns the sum.
pub fn roll_dice<R: Rng>(rng: &mut R, dice: u32) -> u32 {
    (0..dice).map(|_| rng.gen_range(1..=6u32)).sum()
}

/// Scores one combat pairing. Exactly one Elite side short-circuits to a
/// fixed overwhelming score; otherwise both sides roll their combat dice.
pub fn combat_scores<R: Rng>(rng: &mut R, attacker: Tier, defender: Tier) -> (u32, u32) {
    match (attacker == Tier::Elite, defender == Tier::Elite) {
        (true, false) => (ELITE_AUTO_SCORE, 0),
        (false, true) => (0, ELITE_AUTO_SCORE),
        _ => (
            roll_dice(rng, attacker.combat_dice()),
            roll_dice(rng, defender.combat_dice()),
        ),
    }
}

/// Outcome of one combat resolution, in unit-arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    Won { winner: usize, loser: usize },
    Tie,
}

/// Resolves combat between two adjacent opposing units.
pub fn resolve_combat(ctx: &mut TurnCtx, attacker: usize, defender: usize) -> CombatResult {
    let (sa, sd) = combat_scores(
        ctx.rng,
        ctx.units[attacker].tier,
        ctx.units[defender].tier,
    );
    apply_combat(ctx, attacker, defender, sa, sd)
}

/// Applies a scored combat: marks both participants acted, and on a decisive
/// result converts the loser and credits the winner's combat-victory stat.
/// Equal scores leave both units unchanged apart from the acted flag.
pub fn apply_combat(
    ctx: &mut TurnCtx,
    attacker: usize,
    defender: usize,
    attacker_score: u32,
    defender_score: u32,
) -> CombatResult {
    ctx.units[attacker].acted = true;
    ctx.units[defender].acted = true;

    if attacker_score == defender_score {
        let a = ctx.name(ctx.units[attacker].faction);
        let d = ctx.name(ctx.units[defender].faction);
        ctx.log.push(format!(
            "{} vs {} ends in a stand-off ({}/{})",
            a, d, attacker_score, defender_score
        ));
        return CombatResult::Tie;
    }

    let (winner, loser) = if attacker_score > defender_score {
        (attacker, defender)
    } else {
        (defender, attacker)
    };
    convert_loser(ctx, winner, loser);
    CombatResult::Won { winner, loser }
}

/// Conversion bookkeeping shared by ordinary combat and the breach assault:
/// the loser joins the winner's faction as a Heavy, the winner's faction is
/// credited a combat victory, and a fallen leader Elite leaves the cap count.
pub fn convert_loser(ctx: &mut TurnCtx, winner: usize, loser: usize) {
    let winner_faction = ctx.units[winner].faction;
    let loser_faction = ctx.units[loser].faction;
    let loser_tier = ctx.units[loser].tier;

    if loser_tier == Tier::Elite && ctx.config.is_leader(loser_faction) {
        *ctx.leader_elites = ctx.leader_elites.saturating_sub(1);
    }

    ctx.units[loser].convert_to(winner_faction);
    ctx.units[winner].performed_action = true;
    ctx.units[loser].performed_action = true;
    ctx.stats[winner_faction.ordinal()].combat_wins += 1;

    let w = ctx.name(winner_faction);
    let l = ctx.name(loser_faction);
    ctx.log.push(format!(
        "{} wins and converts a {} {} unit to heavy",
        w,
        l,
        loser_tier.label()
    ));
}
