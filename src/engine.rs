//! Engine state management.
//!
//! Owns the authoritative unit arena, the board index, the RNG, per-faction
//! statistics, and the bounded event log. External collaborators (renderer,
//! input, persistence) only read snapshots between turns; the engine has
//! exclusive mutation rights while a turn resolves.

use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use serde::{Deserialize, Serialize};

use crate::board::{BoardIndex, Faction, Tier, Unit};
use crate::config::{validate_seeds, ConfigError, Seed, SimConfig};
use crate::resolve::{run_turn, TurnCtx};
use crate::victory::{evaluate, Outcome};

/// Maximum number of retained event-log messages per turn.
pub const MAX_MESSAGES: usize = 5;

/// Per-faction action statistics, accumulated over the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionStats {
    pub multiplications: u64,
    pub moves: u64,
    pub combat_wins: u64,
}

/// Per-faction live unit tallies for one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionTally {
    pub total: usize,
    pub elites: usize,
}

/// Bounded human-readable event log, newest-last. Cleared at the start of
/// every turn so each snapshot covers exactly one turn.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    turn: u32,
    messages: VecDeque<String>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Starts a fresh log for `turn`.
    pub fn begin_turn(&mut self, turn: u32) {
        self.turn = turn;
        self.messages.clear();
    }

    /// Appends a message, evicting the oldest once the bound is reached.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages
            .push_back(format!("[{:03}] {}", self.turn, message.into()));
    }

    /// The retained messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.iter().cloned().collect()
    }
}

/// Everything a collaborator needs after one resolved turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResult {
    pub turn: u32,
    /// Snapshot of the live unit list after resolution.
    pub units: Vec<Unit>,
    /// Per-faction tallies, indexed by faction ordinal.
    pub tallies: Vec<FactionTally>,
    /// Per-faction statistics, indexed by faction ordinal.
    pub stats: Vec<FactionStats>,
    /// Bounded event log for this turn, newest-last.
    pub messages: Vec<String>,
    /// Terminal outcome, if the game just ended.
    pub outcome: Option<Outcome>,
}

/// The turn-based simulation engine.
pub struct Sim {
    config: SimConfig,
    units: Vec<Unit>,
    index: BoardIndex,
    rng: SmallRng,
    stats: Vec<FactionStats>,
    leader_elites: usize,
    log: EventLog,
    turn: u32,
    started: Instant,
}

impl Sim {
    /// Validates the configuration and seed placements and builds the
    /// initial unit list. Fails fast before any turn runs.
    pub fn new(config: SimConfig, seeds: &[Seed]) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_seeds(&config, seeds)?;

        let units: Vec<Unit> = seeds
            .iter()
            .map(|s| Unit::new(s.faction, s.tier, s.pos))
            .collect();
        let leader_elites = units
            .iter()
            .filter(|u| config.is_leader(u.faction) && u.tier == Tier::Elite)
            .count();
        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        let index = BoardIndex::new(config.grid);
        let stats = vec![FactionStats::default(); config.factions as usize];

        Ok(Sim {
            config,
            units,
            index,
            rng,
            stats,
            leader_elites,
            log: EventLog::new(),
            turn: 0,
            started: Instant::now(),
        })
    }

    /// Resolves one full turn atomically and returns the snapshot.
    pub fn resolve_turn(&mut self) -> TurnResult {
        self.turn += 1;
        self.log.begin_turn(self.turn);
        self.log
            .push(format!("turn {} opens with {} units", self.turn, self.units.len()));

        let mut ctx = TurnCtx {
            config: &self.config,
            units: &mut self.units,
            index: &mut self.index,
            rng: &mut self.rng,
            stats: &mut self.stats,
            leader_elites: &mut self.leader_elites,
            log: &mut self.log,
        };
        run_turn(&mut ctx);

        let tallies = self.tallies();
        let outcome = evaluate(&tallies, self.started.elapsed(), self.config.time_limit());

        TurnResult {
            turn: self.turn,
            units: self.units.clone(),
            tallies,
            stats: self.stats.clone(),
            messages: self.log.messages(),
            outcome,
        }
    }

    /// Read-only snapshot of the live unit list.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Per-faction tallies over the current unit list.
    pub fn tallies(&self) -> Vec<FactionTally> {
        let mut tallies = vec![FactionTally::default(); self.config.factions as usize];
        for unit in &self.units {
            let ordinal = unit.faction.ordinal();
            if ordinal < tallies.len() {
                tallies[ordinal].total += 1;
                if unit.tier == Tier::Elite {
                    tallies[ordinal].elites += 1;
                }
            }
        }
        tallies
    }

    /// Per-faction statistics accumulated since the start.
    pub fn stats(&self) -> &[FactionStats] {
        &self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Live Elite count for the leader faction.
    pub fn leader_elites(&self) -> usize {
        self.leader_elites
    }

    /// Display name for a faction in log output.
    pub fn faction_name(&self, faction: Faction) -> String {
        self.config.faction_name(faction)
    }
}
