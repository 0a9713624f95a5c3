//! Pixelwar -- a deterministic territorial-conquest simulation.
//!
//! Runs one game (printing the per-turn event log and a final report) or a
//! batch of games emitting JSONL records.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --factions N        Number of factions, 2-8 (default: 4)
//!   --rows N            Board rows (default: 35)
//!   --cols N            Board columns (default: 60)
//!   --aggressiveness F  Base multiply probability in (0,1) (default: 0.5)
//!   --leader N          1-based leader faction, 0 for none (default: 1)
//!   --name S            Leader display name (default: Commander)
//!   --elite-cap N       Leader elite cap (default: 500)
//!   --time-limit SECS   Wall-clock limit (default: 300)
//!   --max-turns N       Hard turn cap (default: 500)
//!   --seed N            Random seed, 0 for entropy (default: 0)
//!   --games N           Play a batch of N games instead of one
//!   --threads N         Parallel threads for batch play (default: 4)
//!   --output FILE       Batch JSONL output path (default: stdout)
//!   --quiet             Suppress per-turn / per-game output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

use pixelwar::batch::{run_batch, win_counts, write_jsonl, BatchConfig};
use pixelwar::board::Faction;
use pixelwar::config::{corner_seeds, SimConfig};
use pixelwar::engine::Sim;
use pixelwar::report::{render_text, summarize};

struct CliOptions {
    sim: SimConfig,
    max_turns: u32,
    games: Option<usize>,
    threads: usize,
    output: Option<String>,
    quiet: bool,
}

fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = CliOptions {
        sim: SimConfig::default(),
        max_turns: 500,
        games: None,
        threads: 4,
        output: None,
        quiet: false,
    };

    fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
        *i += 1;
        args.get(*i)
            .map(String::as_str)
            .ok_or_else(|| format!("missing value for {}", flag))
    }

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--factions" => {
                options.sim.factions = value(&args, &mut i, "--factions")?
                    .parse()
                    .map_err(|_| "invalid --factions value".to_string())?;
            }
            "--rows" => {
                options.sim.grid.rows = value(&args, &mut i, "--rows")?
                    .parse()
                    .map_err(|_| "invalid --rows value".to_string())?;
            }
            "--cols" => {
                options.sim.grid.cols = value(&args, &mut i, "--cols")?
                    .parse()
                    .map_err(|_| "invalid --cols value".to_string())?;
            }
            "--aggressiveness" => {
                options.sim.aggressiveness = value(&args, &mut i, "--aggressiveness")?
                    .parse()
                    .map_err(|_| "invalid --aggressiveness value".to_string())?;
            }
            "--leader" => {
                let n: u8 = value(&args, &mut i, "--leader")?
                    .parse()
                    .map_err(|_| "invalid --leader value".to_string())?;
                options.sim.leader = if n == 0 { None } else { Some(Faction(n - 1)) };
            }
            "--name" => {
                options.sim.leader_name = value(&args, &mut i, "--name")?.to_string();
            }
            "--elite-cap" => {
                options.sim.elite_cap = value(&args, &mut i, "--elite-cap")?
                    .parse()
                    .map_err(|_| "invalid --elite-cap value".to_string())?;
            }
            "--time-limit" => {
                options.sim.time_limit_secs = value(&args, &mut i, "--time-limit")?
                    .parse()
                    .map_err(|_| "invalid --time-limit value".to_string())?;
            }
            "--max-turns" => {
                options.max_turns = value(&args, &mut i, "--max-turns")?
                    .parse()
                    .map_err(|_| "invalid --max-turns value".to_string())?;
            }
            "--seed" => {
                options.sim.seed = value(&args, &mut i, "--seed")?
                    .parse()
                    .map_err(|_| "invalid --seed value".to_string())?;
            }
            "--games" => {
                options.games = Some(
                    value(&args, &mut i, "--games")?
                        .parse()
                        .map_err(|_| "invalid --games value".to_string())?,
                );
            }
            "--threads" => {
                options.threads = value(&args, &mut i, "--threads")?
                    .parse()
                    .map_err(|_| "invalid --threads value".to_string())?;
            }
            "--output" => {
                options.output = Some(value(&args, &mut i, "--output")?.to_string());
            }
            "--quiet" => options.quiet = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

fn print_usage() {
    eprintln!("Usage: pixelwar [OPTIONS]");
    eprintln!("Run with --help for the option list in the source header.");
}

fn run_single(options: &CliOptions) -> Result<(), String> {
    let seeds = corner_seeds(&options.sim);
    let mut sim =
        Sim::new(options.sim.clone(), &seeds).map_err(|e| format!("configuration: {}", e))?;

    let mut outcome = None;
    while sim.turn() < options.max_turns {
        let result = sim.resolve_turn();
        if !options.quiet {
            for message in &result.messages {
                println!("{}", message);
            }
        }
        if result.outcome.is_some() {
            outcome = result.outcome;
            break;
        }
    }

    let summary = summarize(&sim, outcome);
    println!("{}", render_text(&summary));
    Ok(())
}

fn run_games(options: &CliOptions, games: usize) -> Result<(), String> {
    let batch = BatchConfig {
        sim: options.sim.clone(),
        games,
        max_turns: options.max_turns,
        threads: options.threads,
        quiet: options.quiet,
    };
    let records = run_batch(&batch).map_err(|e| format!("configuration: {}", e))?;

    match &options.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("open {}: {}", path, e))?;
            let mut out = BufWriter::new(file);
            write_jsonl(&records, &mut out).map_err(|e| format!("write {}: {}", path, e))?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_jsonl(&records, &mut out).map_err(|e| format!("write stdout: {}", e))?;
        }
    }

    if !options.quiet {
        let wins = win_counts(&records, options.sim.factions);
        let mut line = String::from("wins:");
        for (i, w) in wins.iter().enumerate() {
            line.push_str(&format!(
                " {}={}",
                options.sim.faction_name(Faction(i as u8)),
                w
            ));
        }
        eprintln!("{}", line);
    }
    Ok(())
}

fn main() {
    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(1);
        }
    };

    let result = match options.games {
        Some(games) => run_games(&options, games),
        None => run_single(&options),
    };
    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
