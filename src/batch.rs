//! Batch game generation.
//!
//! Plays many independent seeded games to completion and records the
//! outcome of each, optionally in parallel. Useful for balance studies of
//! the rule set. Records are written as JSONL, one game per line.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::board::Faction;
use crate::config::{corner_seeds, validate_seeds, ConfigError, SimConfig};
use crate::engine::{FactionStats, FactionTally, Sim};
use crate::victory::Outcome;

/// Configuration for batch game generation.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Base simulation configuration; each game offsets the RNG seed by its
    /// game id (entropy seeding stays entropy).
    pub sim: SimConfig,
    /// Number of games to play.
    pub games: usize,
    /// Hard turn cap per game; unfinished games record no outcome.
    pub max_turns: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            sim: SimConfig::default(),
            games: 10,
            max_turns: 500,
            threads: 4,
            quiet: false,
        }
    }
}

/// Record of one completed batch game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub turns: u32,
    pub outcome: Option<Outcome>,
    pub tallies: Vec<FactionTally>,
    pub stats: Vec<FactionStats>,
}

/// Plays one game to its outcome or the turn cap.
fn play_game(config: &BatchConfig, game_id: usize) -> Result<GameRecord, ConfigError> {
    let mut sim_config = config.sim.clone();
    if sim_config.seed != 0 {
        sim_config.seed = sim_config.seed.wrapping_add(game_id as u64);
    }
    let seeds = corner_seeds(&sim_config);
    let mut sim = Sim::new(sim_config, &seeds)?;

    let mut outcome = None;
    while sim.turn() < config.max_turns {
        let result = sim.resolve_turn();
        if result.outcome.is_some() {
            outcome = result.outcome;
            break;
        }
    }

    Ok(GameRecord {
        game_id,
        turns: sim.turn(),
        outcome,
        tallies: sim.tallies(),
        stats: sim.stats().to_vec(),
    })
}

/// Runs batch generation. The base configuration and its derived corner
/// seeds are validated before any game starts; anchors can collide on
/// small boards, and that rejects the whole batch as a configuration
/// error. With `threads > 1` games are played concurrently on a rayon
/// pool; records come back ordered by game id either way.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<GameRecord>, ConfigError> {
    config.sim.validate()?;
    validate_seeds(&config.sim, &corner_seeds(&config.sim))?;

    if config.threads > 1 {
        run_batch_parallel(config)
    } else {
        run_batch_sequential(config)
    }
}

fn describe(record: &GameRecord, sim: &SimConfig) -> String {
    match record.outcome {
        Some(Outcome::Winner(f)) => format!("{} wins", sim.faction_name(f)),
        Some(Outcome::Draw) => "draw".to_string(),
        None => "undecided".to_string(),
    }
}

fn run_batch_sequential(config: &BatchConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let mut records = Vec::with_capacity(config.games);
    for game_id in 0..config.games {
        let start = Instant::now();
        let record = play_game(config, game_id)?;
        if !config.quiet {
            eprintln!(
                "Game {}/{}: {} in {} turns ({:.1}s)",
                game_id + 1,
                config.games,
                describe(&record, &config.sim),
                record.turns,
                start.elapsed().as_secs_f64(),
            );
        }
        records.push(record);
    }
    Ok(records)
}

fn run_batch_parallel(config: &BatchConfig) -> Result<Vec<GameRecord>, ConfigError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    pool.install(|| {
        (0..config.games)
            .into_par_iter()
            .map(|game_id| {
                let start = Instant::now();
                let record = play_game(config, game_id)?;
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    eprintln!(
                        "Game {}/{}: {} in {} turns ({:.1}s)",
                        n,
                        config.games,
                        describe(&record, &config.sim),
                        record.turns,
                        start.elapsed().as_secs_f64(),
                    );
                }
                Ok(record)
            })
            .collect()
    })
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(records: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Per-faction win counts over a batch, draws and undecided games excluded.
pub fn win_counts(records: &[GameRecord], factions: u8) -> Vec<usize> {
    let mut wins = vec![0; factions as usize];
    for record in records {
        if let Some(Outcome::Winner(Faction(f))) = record.outcome {
            if (f as usize) < wins.len() {
                wins[f as usize] += 1;
            }
        }
    }
    wins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    fn tiny_batch(games: usize, threads: usize) -> BatchConfig {
        let mut sim = SimConfig::default();
        sim.factions = 2;
        sim.grid = Grid::new(8, 8);
        sim.seed = 1234;
        sim.time_limit_secs = 3600;
        BatchConfig {
            sim,
            games,
            max_turns: 40,
            threads,
            quiet: true,
        }
    }

    #[test]
    fn sequential_batch_produces_one_record_per_game() {
        let records = run_batch(&tiny_batch(3, 1)).unwrap();
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.game_id, i);
            assert!(record.turns >= 1 && record.turns <= 40);
            assert_eq!(record.tallies.len(), 2);
        }
    }

    #[test]
    fn parallel_batch_matches_sequential_records() {
        let sequential = run_batch(&tiny_batch(4, 1)).unwrap();
        let parallel = run_batch(&tiny_batch(4, 2)).unwrap();
        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.game_id, p.game_id);
            assert_eq!(s.turns, p.turns);
            assert_eq!(s.outcome, p.outcome);
            assert_eq!(s.tallies, p.tallies);
        }
    }

    #[test]
    fn jsonl_output_is_one_line_per_game() {
        let records = run_batch(&tiny_batch(2, 1)).unwrap();
        let mut buffer = Vec::new();
        write_jsonl(&records, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.contains("\"game_id\"")));
    }

    #[test]
    fn colliding_corner_seeds_fail_the_batch_up_front() {
        // 5 factions on a 2x10 board put the third and fifth anchors both
        // at (1, 0); the base config alone still validates
        let mut batch = tiny_batch(1, 1);
        batch.sim.factions = 5;
        batch.sim.grid = Grid::new(2, 10);
        assert!(batch.sim.validate().is_ok());
        assert!(matches!(
            run_batch(&batch),
            Err(ConfigError::SeedCollision(1, 0))
        ));
    }

    #[test]
    fn colliding_corner_seeds_fail_a_parallel_batch_too() {
        let mut batch = tiny_batch(2, 2);
        batch.sim.factions = 5;
        batch.sim.grid = Grid::new(2, 10);
        assert!(run_batch(&batch).is_err());
    }

    #[test]
    fn win_counts_ignore_draws() {
        let records = vec![
            GameRecord {
                game_id: 0,
                turns: 5,
                outcome: Some(Outcome::Winner(Faction(1))),
                tallies: vec![],
                stats: vec![],
            },
            GameRecord {
                game_id: 1,
                turns: 5,
                outcome: Some(Outcome::Draw),
                tallies: vec![],
                stats: vec![],
            },
        ];
        assert_eq!(win_counts(&records, 2), vec![0, 1]);
    }
}
