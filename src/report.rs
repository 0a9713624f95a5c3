//! End-of-game summary.
//!
//! Builds a structured summary of a finished (or interrupted) game plus a
//! plain-text rendering. Writing the text anywhere is the caller's concern.

use serde::Serialize;

use crate::board::Tier;
use crate::engine::{FactionStats, Sim};
use crate::victory::Outcome;

/// Final standing of one faction.
#[derive(Debug, Clone, Serialize)]
pub struct FactionSummary {
    pub name: String,
    pub total: usize,
    pub lights: usize,
    pub heavies: usize,
    pub elites: usize,
    pub stats: FactionStats,
}

/// Structured end-of-game summary.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub turns: u32,
    pub outcome: Option<Outcome>,
    pub headline: String,
    pub aggressiveness: f64,
    pub factions: Vec<FactionSummary>,
}

/// Collects the final standings from a simulation.
pub fn summarize(sim: &Sim, outcome: Option<Outcome>) -> GameSummary {
    let headline = match outcome {
        Some(Outcome::Winner(f)) => format!("WINNER: {}", sim.faction_name(f)),
        Some(Outcome::Draw) => "DRAW".to_string(),
        None => "GAME IN PROGRESS".to_string(),
    };

    let mut factions = Vec::with_capacity(sim.config().factions as usize);
    for ordinal in 0..sim.config().factions {
        let faction = crate::board::Faction(ordinal);
        let mine = sim.units().iter().filter(|u| u.faction == faction);
        let (mut lights, mut heavies, mut elites) = (0, 0, 0);
        let mut total = 0;
        for unit in mine {
            total += 1;
            match unit.tier {
                Tier::Light => lights += 1,
                Tier::Heavy => heavies += 1,
                Tier::Elite => elites += 1,
            }
        }
        factions.push(FactionSummary {
            name: sim.faction_name(faction),
            total,
            lights,
            heavies,
            elites,
            stats: sim.stats()[ordinal as usize],
        });
    }

    GameSummary {
        turns: sim.turn(),
        outcome,
        headline,
        aggressiveness: sim.config().aggressiveness,
        factions,
    }
}

/// Renders the summary as the classic fixed-width text report.
pub fn render_text(summary: &GameSummary) -> String {
    let mut out = Vec::new();
    out.push("=".repeat(60));
    out.push(format!("PIXEL WAR SUMMARY - FINAL TURN: {}", summary.turns));
    out.push("=".repeat(60));
    out.push(format!("RESULT: {}", summary.headline));
    out.push(format!("BASE AGGRESSIVENESS: {}", summary.aggressiveness));
    out.push("-".repeat(60));

    for (i, faction) in summary.factions.iter().enumerate() {
        out.push(String::new());
        out.push(format!("PLAYER {} - {}", i + 1, faction.name));
        out.push(format!("  > Total units: {}", faction.total));
        out.push(format!(
            "  > Light: {}  Heavy: {}  Elite: {}",
            faction.lights, faction.heavies, faction.elites
        ));
        out.push("  > Action statistics:".to_string());
        out.push(format!(
            "    - Multiplications: {}",
            faction.stats.multiplications
        ));
        out.push(format!("    - Moves: {}", faction.stats.moves));
        out.push(format!("    - Combat wins: {}", faction.stats.combat_wins));
        out.push("-".repeat(20));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Faction, Grid, Pos};
    use crate::config::{Seed, SimConfig};

    fn fixture() -> Sim {
        let mut config = SimConfig::default();
        config.factions = 2;
        config.grid = Grid::new(10, 10);
        config.seed = 3;
        let seeds = [
            Seed {
                faction: Faction(0),
                tier: Tier::Elite,
                pos: Pos::new(0, 0),
            },
            Seed {
                faction: Faction(1),
                tier: Tier::Light,
                pos: Pos::new(9, 9),
            },
        ];
        Sim::new(config, &seeds).unwrap()
    }

    #[test]
    fn summary_counts_tiers_per_faction() {
        let sim = fixture();
        let summary = summarize(&sim, None);
        assert_eq!(summary.factions.len(), 2);
        assert_eq!(summary.factions[0].elites, 1);
        assert_eq!(summary.factions[1].lights, 1);
        assert_eq!(summary.headline, "GAME IN PROGRESS");
    }

    #[test]
    fn winner_headline_uses_the_faction_name() {
        let sim = fixture();
        let summary = summarize(&sim, Some(Outcome::Winner(Faction(0))));
        assert_eq!(summary.headline, "WINNER: Commander");
    }

    #[test]
    fn text_report_contains_all_factions() {
        let sim = fixture();
        let summary = summarize(&sim, Some(Outcome::Draw));
        let text = render_text(&summary);
        assert!(text.contains("RESULT: DRAW"));
        assert!(text.contains("Commander"));
        assert!(text.contains("P2"));
        assert!(text.contains("Combat wins"));
    }

    #[test]
    fn summary_serializes_to_json() {
        let sim = fixture();
        let summary = summarize(&sim, Some(Outcome::Draw));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"headline\":\"DRAW\""));
    }
}
