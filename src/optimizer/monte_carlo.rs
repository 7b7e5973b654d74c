//! Repeated seeded attrition battles between two armies, run in parallel.
//! Iteration `i` is seeded with `seed + i`, so summaries do not depend on the worker count.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{
    battle_attrition, AttritionConfig, Battlefield, Rng, TraceMode, Verdict, Winner,
    DEFAULT_ROUND_CAP,
};
use crate::data::army::Army;
use crate::parallel::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchupConfig {
    pub iterations: usize,
    pub seed: u64,
    pub round_cap: u32,
    /// Battlefield used to break simultaneous wipe-outs.
    pub distance: i32,
    pub objectives: i32,
    /// 0 uses every core.
    pub workers: usize,
}

impl Default for MatchupConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            seed: 0,
            round_cap: DEFAULT_ROUND_CAP,
            distance: 5,
            objectives: 0,
            workers: 0,
        }
    }
}

impl MatchupConfig {
    fn attrition_config(&self) -> AttritionConfig {
        AttritionConfig {
            round_cap: self.round_cap,
            tiebreak_field: Battlefield::new(self.distance, self.objectives),
            trace_mode: TraceMode::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchupSummary {
    pub iterations: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    /// Includes inconclusive battles.
    pub draws: usize,
    pub inconclusive: usize,
    pub a_win_rate: f64,
    pub b_win_rate: f64,
    pub avg_rounds: f64,
}

impl MatchupSummary {
    fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let iterations = verdicts.len();
        let count = |winner: Winner| verdicts.iter().filter(|v| v.winner == winner).count();
        let a_wins = count(Winner::A);
        let b_wins = count(Winner::B);
        let rate = |wins: usize| {
            if iterations == 0 {
                0.0
            } else {
                wins as f64 / iterations as f64
            }
        };
        let total_rounds: u64 = verdicts.iter().map(|v| u64::from(v.rounds)).sum();

        Self {
            iterations,
            a_wins,
            b_wins,
            draws: count(Winner::Draw),
            inconclusive: verdicts.iter().filter(|v| v.inconclusive).count(),
            a_win_rate: rate(a_wins),
            b_win_rate: rate(b_wins),
            avg_rounds: if iterations == 0 {
                0.0
            } else {
                total_rounds as f64 / iterations as f64
            },
        }
    }
}

pub fn run_matchup(army_a: &Army, army_b: &Army, config: &MatchupConfig) -> MatchupSummary {
    let attrition = config.attrition_config();
    let run_one = |iteration: usize| {
        let mut rng = Rng::new(config.seed.wrapping_add(iteration as u64));
        battle_attrition(army_a, army_b, &mut rng, &attrition).verdict
    };

    let verdicts: Vec<Verdict> = WorkerPool::with_workers(config.workers)
        .install(|| (0..config.iterations).into_par_iter().map(run_one).collect());

    let summary = MatchupSummary::from_verdicts(&verdicts);
    tracing::debug!(
        "matchup over {} iteration(s): a={} b={} draws={} inconclusive={}",
        summary.iterations,
        summary.a_wins,
        summary.b_wins,
        summary.draws,
        summary.inconclusive
    );
    summary
}

/// Sequential variant for callers already inside a parallel loop.
pub fn run_matchup_sequential(
    army_a: &Army,
    army_b: &Army,
    config: &MatchupConfig,
) -> MatchupSummary {
    let attrition = config.attrition_config();
    let verdicts: Vec<Verdict> = (0..config.iterations)
        .map(|iteration| {
            let mut rng = Rng::new(config.seed.wrapping_add(iteration as u64));
            battle_attrition(army_a, army_b, &mut rng, &attrition).verdict
        })
        .collect();
    MatchupSummary::from_verdicts(&verdicts)
}
