//! Run the attrition simulator benchmark and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_simulator
//!   cargo run --release --bin benchmark_simulator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, battles_per_sec, battles_per_min, rounds_per_sec, rounds_per_battle).

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Utc};
use warband::combat::{battle_attrition, AttritionConfig, Rng};
use warband::data::catalog::Catalog;

const LOG_PATH: &str = "benchmark_log.csv";
const LOG_HEADER: &[u8] = b"date,battles_per_sec,battles_per_min,rounds_per_sec,rounds_per_battle\n";

/// No unit on one side shares its effectiveness with a unit on the other, so every battle ends.
const ROSTER_A: [&str; 6] = ["Terminator", "Scout", "Terminator", "Scout", "Terminator", "Scout"];
const ROSTER_B: [&str; 6] = [
    "Marine",
    "Assault Marine",
    "Marine",
    "Assault Marine",
    "Marine",
    "Assault Marine",
];

#[derive(Debug, Clone, Copy)]
struct Throughput {
    battles_per_sec: f64,
    battles_per_min: f64,
    rounds_per_sec: f64,
    rounds_per_battle: f64,
}

impl Throughput {
    fn log_row(&self, at: DateTime<Utc>) -> String {
        format!(
            "{},{:.4},{:.4},{:.4},{:.2}",
            at.format("%Y-%m-%dT%H:%M:%SZ"),
            self.battles_per_sec,
            self.battles_per_min,
            self.rounds_per_sec,
            self.rounds_per_battle
        )
    }
}

fn main() {
    let log = std::env::args().any(|a| a == "--log");

    let codex = Catalog::default_codex();
    let (Some(army_a), Some(army_b)) = (codex.army(&ROSTER_A), codex.army(&ROSTER_B)) else {
        eprintln!("benchmark rosters reference units missing from the codex");
        std::process::exit(1);
    };
    let config = AttritionConfig::default();

    // Run for at least this long or this many battles
    const MIN_DURATION_MS: u128 = 2000;
    const MIN_BATTLES: u64 = 500;

    let start = Instant::now();
    let mut battles: u64 = 0;
    let mut rounds: u64 = 0;
    let mut inconclusive: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS || battles < MIN_BATTLES {
        let mut rng = Rng::new(battles);
        let result = battle_attrition(&army_a, &army_b, &mut rng, &config);
        rounds += u64::from(result.verdict.rounds);
        inconclusive += u64::from(result.verdict.inconclusive);
        battles += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let battles_per_sec = battles as f64 / elapsed_secs;
    let throughput = Throughput {
        battles_per_sec,
        battles_per_min: battles_per_sec * 60.0,
        rounds_per_sec: rounds as f64 / elapsed_secs,
        rounds_per_battle: rounds as f64 / battles as f64,
    };

    println!(
        "Attrition benchmark ({} vs {} units):",
        army_a.len(),
        army_b.len()
    );
    println!("  Battles:       {}", battles);
    println!("  Inconclusive:  {}", inconclusive);
    println!("  Duration:      {:.2} s", elapsed_secs);
    println!("  Battles/s:     {:.2}", throughput.battles_per_sec);
    println!("  Battles/min:   {:.2}", throughput.battles_per_min);
    println!("  Rounds/s:      {:.2}", throughput.rounds_per_sec);
    println!("  Rounds/battle: {:.2}", throughput.rounds_per_battle);

    if log {
        if let Err(err) = append_log_line(&throughput) {
            eprintln!("failed to append {LOG_PATH}: {err}");
            std::process::exit(1);
        }
        println!("Appended to {}", LOG_PATH);
    }
}

fn append_log_line(throughput: &Throughput) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(LOG_PATH)?;
    if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
        file.write_all(LOG_HEADER)?;
    }
    writeln!(file, "{}", throughput.log_row(Utc::now()))?;
    file.flush()
}
