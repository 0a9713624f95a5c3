//! Victory-condition evaluation.
//!
//! A pure function over the per-faction tallies, the elapsed wall-clock
//! time, and the configured limit. Absence of a winner is the normal
//! "continue" result, never an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Faction;
use crate::engine::FactionTally;

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Faction),
    Draw,
}

/// Decides whether the game has ended.
///
/// - exactly one faction alive: that faction wins
/// - no faction alive: draw
/// - time limit reached: the faction with the most units wins, ties draw
/// - otherwise the simulation continues
pub fn evaluate(tallies: &[FactionTally], elapsed: Duration, limit: Duration) -> Option<Outcome> {
    let alive: Vec<usize> = tallies
        .iter()
        .enumerate()
        .filter(|(_, t)| t.total > 0)
        .map(|(i, _)| i)
        .collect();

    match alive.len() {
        0 => return Some(Outcome::Draw),
        1 => return Some(Outcome::Winner(Faction(alive[0] as u8))),
        _ => {}
    }

    if elapsed >= limit {
        let max = tallies.iter().map(|t| t.total).max().unwrap_or(0);
        let leaders: Vec<usize> = alive
            .into_iter()
            .filter(|&i| tallies[i].total == max)
            .collect();
        return if leaders.len() == 1 {
            Some(Outcome::Winner(Faction(leaders[0] as u8)))
        } else {
            Some(Outcome::Draw)
        };
    }

    None
}
