//! Integration tests for the pixelwar turn engine.
//!
//! Exercises the scenario properties of the rule set end to end through
//! `Sim::resolve_turn`: occupancy, action exclusivity, the elite cap,
//! inactivity promotion, and the victory conditions.

use std::collections::HashSet;

use pixelwar::board::{Faction, Grid, Pos, Tier};
use pixelwar::config::{corner_seeds, Seed, SimConfig};
use pixelwar::engine::Sim;
use pixelwar::victory::Outcome;

fn config(factions: u8, rows: u16, cols: u16, seed: u64) -> SimConfig {
    let mut config = SimConfig::default();
    config.factions = factions;
    config.grid = Grid::new(rows, cols);
    config.seed = seed;
    config.time_limit_secs = 3600;
    config
}

fn seed(faction: u8, tier: Tier, row: u16, col: u16) -> Seed {
    Seed {
        faction: Faction(faction),
        tier,
        pos: Pos::new(row, col),
    }
}

#[test]
fn adjacent_heavies_resolve_combat_once() {
    let mut cfg = config(2, 10, 10, 77);
    cfg.leader = None;
    let seeds = [seed(0, Tier::Heavy, 0, 0), seed(1, Tier::Heavy, 0, 1)];
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    let result = sim.resolve_turn();
    assert!(result.units.iter().all(|u| u.acted));
    assert_eq!(result.units.len(), 2, "combat converts, never removes");
    let wins: u64 = result.stats.iter().map(|s| s.combat_wins).sum();
    assert!(wins <= 1, "exactly one combat was resolved between the pair");
    let other: u64 = result
        .stats
        .iter()
        .map(|s| s.moves + s.multiplications)
        .sum();
    assert_eq!(other, 0, "combat preempted every other action");
}

#[test]
fn enclosed_light_idles_and_counts_the_turn() {
    let mut cfg = config(2, 10, 10, 5);
    cfg.elite_cap = 0; // keep elites out of the picture entirely
    let seeds = [
        seed(0, Tier::Light, 0, 0),
        seed(0, Tier::Heavy, 0, 1),
        seed(0, Tier::Heavy, 1, 0),
        seed(1, Tier::Heavy, 9, 9),
    ];
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    sim.resolve_turn();
    let light = sim.units()[0];
    assert_eq!(light.pos, Pos::new(0, 0));
    assert_eq!(light.tier, Tier::Light);
    assert!(light.acted);
    assert!(!light.performed_action);
    assert_eq!(light.idle_turns, 1);
}

#[test]
fn leader_light_promotes_after_three_idle_turns() {
    let mut cfg = config(2, 10, 10, 5);
    cfg.elite_cap = 0;
    let seeds = [
        seed(0, Tier::Light, 0, 0),
        seed(0, Tier::Heavy, 0, 1),
        seed(0, Tier::Heavy, 1, 0),
        seed(1, Tier::Heavy, 9, 9),
    ];
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    sim.resolve_turn();
    sim.resolve_turn();
    assert_eq!(sim.units()[0].tier, Tier::Light);
    assert_eq!(sim.units()[0].idle_turns, 2);

    sim.resolve_turn();
    let light = sim.units()[0];
    assert_eq!(light.tier, Tier::Heavy, "third idle turn promotes to heavy");
    assert_eq!(light.idle_turns, 0, "promotion resets the idle counter");
}

#[test]
fn single_occupancy_holds_across_many_turns() {
    let cfg = config(4, 12, 12, 2024);
    let seeds = corner_seeds(&cfg);
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    for _ in 0..30 {
        let result = sim.resolve_turn();
        let mut seen = HashSet::new();
        for unit in &result.units {
            assert!(seen.insert(unit.pos), "two units share {:?}", unit.pos);
        }
        if result.outcome.is_some() {
            break;
        }
    }
}

#[test]
fn every_unit_acts_every_turn() {
    let cfg = config(3, 12, 12, 31);
    let seeds = corner_seeds(&cfg);
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    for _ in 0..20 {
        let result = sim.resolve_turn();
        assert!(result.units.iter().all(|u| u.acted));
        if result.outcome.is_some() {
            break;
        }
    }
}

#[test]
fn leader_elite_count_never_exceeds_the_cap() {
    let mut cfg = config(2, 12, 12, 9);
    cfg.elite_cap = 2;
    let seeds = [
        seed(0, Tier::Elite, 0, 0),
        seed(0, Tier::Heavy, 0, 1),
        seed(0, Tier::Light, 1, 0),
        seed(1, Tier::Heavy, 11, 11),
        seed(1, Tier::Light, 10, 11),
    ];
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    for _ in 0..40 {
        let result = sim.resolve_turn();
        assert!(
            result.tallies[0].elites <= 2,
            "leader elites {} exceed the cap",
            result.tallies[0].elites
        );
        if result.outcome.is_some() {
            break;
        }
    }
}

#[test]
fn unit_count_never_shrinks_while_all_factions_are_active() {
    // combat converts instead of removing, and only the purge of foreign
    // factions may drop units; with every faction active the population
    // can only grow
    let cfg = config(2, 12, 12, 404);
    let seeds = corner_seeds(&cfg);
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    let mut previous = sim.units().len();
    for _ in 0..25 {
        let result = sim.resolve_turn();
        assert!(result.units.len() >= previous);
        previous = result.units.len();
        if result.outcome.is_some() {
            break;
        }
    }
}

#[test]
fn sole_survivor_wins_immediately() {
    let cfg = config(2, 10, 10, 6);
    let seeds = [seed(1, Tier::Light, 4, 4)];
    let mut sim = Sim::new(cfg, &seeds).unwrap();
    let result = sim.resolve_turn();
    assert_eq!(result.outcome, Some(Outcome::Winner(Faction(1))));
}

#[test]
fn turn_results_expose_bounded_logs_and_tallies() {
    let cfg = config(4, 12, 12, 8);
    let seeds = corner_seeds(&cfg);
    let mut sim = Sim::new(cfg, &seeds).unwrap();

    for _ in 0..10 {
        let result = sim.resolve_turn();
        assert!(result.messages.len() <= 5);
        assert_eq!(result.tallies.len(), 4);
        assert_eq!(result.stats.len(), 4);
        let tallied: usize = result.tallies.iter().map(|t| t.total).sum();
        assert_eq!(tallied, result.units.len());
        if result.outcome.is_some() {
            break;
        }
    }
}
