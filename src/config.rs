//! Simulation configuration, validation, and seed placements.
//!
//! Configuration errors fail fast at initialization, before any turn runs.
//! Everything past validation is closed-world: the resolution rules keep the
//! board self-consistent without runtime checks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{Faction, Grid, Pos, Tier};

/// Largest supported faction count (the original palette has eight colors).
pub const MAX_FACTIONS: u8 = 8;

/// Default cap on live Elite units for the leader faction.
pub const DEFAULT_ELITE_CAP: usize = 500;

/// Default wall-clock limit before the game is decided on unit count.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 5 * 60;

/// Default base probability feeding the multiply-or-move decision.
pub const DEFAULT_AGGRESSIVENESS: f64 = 0.5;

/// Errors detected while validating a configuration or seed list.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("faction count must be between 2 and {MAX_FACTIONS}, got {0}")]
    FactionCount(u8),

    #[error("board must have at least 2x2 cells, got {0}x{1}")]
    BoardTooSmall(u16, u16),

    #[error("aggressiveness must be strictly between 0 and 1, got {0}")]
    AggressivenessRange(f64),

    #[error("leader faction {0} is not among the {1} configured factions")]
    LeaderOutOfRange(u8, u8),

    #[error("seed faction {0} is not among the {1} configured factions")]
    SeedFactionOutOfRange(u8, u8),

    #[error("seed position ({0}, {1}) is outside the board")]
    SeedOutOfBounds(u16, u16),

    #[error("two seed units share position ({0}, {1})")]
    SeedCollision(u16, u16),

    #[error("board has {cells} cells but {seeds} seed units were requested")]
    TooManySeeds { cells: usize, seeds: usize },
}

/// Static parameters of one simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of active factions, 2..=8. Faction ordinals 0..factions are live.
    pub factions: u8,
    pub grid: Grid,
    /// Base probability in (0,1) feeding the multiply-or-move decision.
    pub aggressiveness: f64,
    /// The faction with exclusive access to Elite propagation and promotion.
    pub leader: Option<Faction>,
    /// Display name for the leader faction in event-log messages.
    pub leader_name: String,
    /// Cap on live Elite units for the leader faction.
    pub elite_cap: usize,
    /// Wall-clock limit in seconds before the game is decided on unit count.
    pub time_limit_secs: u64,
    /// RNG seed; 0 selects entropy seeding.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            factions: 4,
            grid: Grid::new(35, 60),
            aggressiveness: DEFAULT_AGGRESSIVENESS,
            leader: Some(Faction(0)),
            leader_name: "Commander".to_string(),
            elite_cap: DEFAULT_ELITE_CAP,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Checks the static parameters. Seed placements are validated
    /// separately by [`validate_seeds`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factions < 2 || self.factions > MAX_FACTIONS {
            return Err(ConfigError::FactionCount(self.factions));
        }
        if self.grid.rows < 2 || self.grid.cols < 2 {
            return Err(ConfigError::BoardTooSmall(self.grid.rows, self.grid.cols));
        }
        if !(self.aggressiveness > 0.0 && self.aggressiveness < 1.0) {
            return Err(ConfigError::AggressivenessRange(self.aggressiveness));
        }
        if let Some(leader) = self.leader {
            if leader.0 >= self.factions {
                return Err(ConfigError::LeaderOutOfRange(leader.0, self.factions));
            }
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn is_leader(&self, faction: Faction) -> bool {
        self.leader == Some(faction)
    }

    /// Display name for a faction: the configured leader name, or `P<n>`.
    pub fn faction_name(&self, faction: Faction) -> String {
        if self.is_leader(faction) {
            self.leader_name.clone()
        } else {
            format!("P{}", faction.0 + 1)
        }
    }
}

/// One seed placement for the initial unit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub faction: Faction,
    pub tier: Tier,
    pub pos: Pos,
}

/// Validates seed placements against a configuration: factions in range,
/// positions in bounds, no two seeds stacked, and room on the board.
pub fn validate_seeds(config: &SimConfig, seeds: &[Seed]) -> Result<(), ConfigError> {
    if seeds.len() > config.grid.cell_count() {
        return Err(ConfigError::TooManySeeds {
            cells: config.grid.cell_count(),
            seeds: seeds.len(),
        });
    }
    let mut taken = vec![false; config.grid.cell_count()];
    for seed in seeds {
        if seed.faction.0 >= config.factions {
            return Err(ConfigError::SeedFactionOutOfRange(
                seed.faction.0,
                config.factions,
            ));
        }
        if !config.grid.contains(seed.pos) {
            return Err(ConfigError::SeedOutOfBounds(seed.pos.row, seed.pos.col));
        }
        let idx = config.grid.cell_index(seed.pos);
        if taken[idx] {
            return Err(ConfigError::SeedCollision(seed.pos.row, seed.pos.col));
        }
        taken[idx] = true;
    }
    Ok(())
}

/// The classic start layout: one Heavy anchor per faction at a corner or
/// edge midpoint, plus one Light directly below it when that cell exists.
pub fn corner_seeds(config: &SimConfig) -> Vec<Seed> {
    let Grid { rows, cols } = config.grid;
    let anchors = [
        Pos::new(0, 0),
        Pos::new(rows - 1, cols - 1),
        Pos::new(rows - 1, 0),
        Pos::new(0, cols - 1),
        Pos::new(rows / 2, 0),
        Pos::new(rows / 2, cols - 1),
        Pos::new(0, cols / 2),
        Pos::new(rows - 1, cols / 2),
    ];

    let mut seeds = Vec::new();
    for f in 0..config.factions {
        let anchor = anchors[f as usize];
        seeds.push(Seed {
            faction: Faction(f),
            tier: Tier::Heavy,
            pos: anchor,
        });
        let below = Pos::new(anchor.row + 1, anchor.col);
        if config.grid.contains(below) {
            seeds.push(Seed {
                faction: Faction(f),
                tier: Tier::Light,
                pos: below,
            });
        }
    }
    seeds
}
