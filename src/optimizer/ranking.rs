use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::data::army::Army;
use crate::data::unit::Unit;
use crate::error::Result;
use crate::optimizer::knapsack::optimize;
use crate::optimizer::monte_carlo::{run_matchup_sequential, MatchupConfig, MatchupSummary};
use crate::parallel::WorkerPool;

const WIN_RATE_WEIGHT: f64 = 0.8;
const EFFECTIVENESS_WEIGHT: f64 = 0.2;
/// Budgets simulated between progress callbacks.
const PROGRESS_CHUNK: usize = 4;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankingScore {
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedArmy {
    pub max_points: i64,
    pub units: Vec<String>,
    pub total_points: i64,
    pub total_effectiveness: f64,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub score: RankingScore,
}

/// Optimize one army per budget, fight each against `opponent`, best first.
pub fn rank_budgets(
    units: &[Arc<Unit>],
    budgets: &[i64],
    opponent: &Army,
    config: &MatchupConfig,
) -> Result<Vec<RankedArmy>> {
    rank_budgets_with_progress(units, budgets, opponent, config, |_, _| {})
}

/// Like [rank_budgets] but reports `(done, total)` budgets as simulation proceeds.
pub fn rank_budgets_with_progress<F>(
    units: &[Arc<Unit>],
    budgets: &[i64],
    opponent: &Army,
    config: &MatchupConfig,
    mut on_progress: F,
) -> Result<Vec<RankedArmy>>
where
    F: FnMut(usize, usize),
{
    let candidates = budgets
        .iter()
        .map(|&budget| optimize(units, budget).map(|army| (budget, army)))
        .collect::<Result<Vec<_>>>()?;

    let total = candidates.len();
    on_progress(0, total);

    let pool = WorkerPool::with_workers(config.workers).capped(total).build();
    let mut summaries: Vec<MatchupSummary> = Vec::with_capacity(total);
    for chunk in candidates.chunks(PROGRESS_CHUNK) {
        let batch: Vec<MatchupSummary> = pool.install(|| {
            chunk
                .par_iter()
                .map(|(_, army)| run_matchup_sequential(army, opponent, config))
                .collect()
        });
        summaries.extend(batch);
        on_progress(summaries.len(), total);
    }

    Ok(rank_results(candidates, summaries))
}

fn rank_results(candidates: Vec<(i64, Army)>, summaries: Vec<MatchupSummary>) -> Vec<RankedArmy> {
    let best_effectiveness = candidates
        .iter()
        .map(|(_, army)| army.total_effectiveness())
        .fold(0.0_f64, f64::max);

    let mut ranked: Vec<RankedArmy> = candidates
        .into_iter()
        .zip(summaries)
        .map(|((max_points, army), summary)| {
            let effectiveness = army.total_effectiveness();
            let share = if best_effectiveness > 0.0 {
                effectiveness / best_effectiveness
            } else {
                0.0
            };
            let draw_rate = if summary.iterations == 0 {
                0.0
            } else {
                summary.draws as f64 / summary.iterations as f64
            };
            RankedArmy {
                max_points,
                units: army.unit_names(),
                total_points: army.total_points(),
                total_effectiveness: effectiveness,
                win_rate: summary.a_win_rate,
                draw_rate,
                score: RankingScore {
                    value: summary.a_win_rate * WIN_RATE_WEIGHT + share * EFFECTIVENESS_WEIGHT,
                },
            }
        })
        .collect();

    ranked.sort_by(|left, right| {
        right
            .score
            .value
            .total_cmp(&left.score.value)
            .then_with(|| right.win_rate.total_cmp(&left.win_rate))
            .then_with(|| left.total_points.cmp(&right.total_points))
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::Catalog;

    fn config() -> MatchupConfig {
        MatchupConfig {
            iterations: 30,
            seed: 5,
            ..MatchupConfig::default()
        }
    }

    #[test]
    fn bigger_budget_ranks_first_against_fixed_opponent() {
        let codex = Catalog::default_codex();
        let opponent = Army::from_units(vec![codex.units()[1].clone()]);
        let ranked = rank_budgets(codex.units(), &[60, 350], &opponent, &config()).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].max_points, 350);
        assert!(ranked[0].score.value >= ranked[1].score.value);
    }

    #[test]
    fn progress_reports_every_chunk() {
        let codex = Catalog::default_codex();
        let opponent = Army::from_units(vec![codex.units()[3].clone()]);
        let budgets: Vec<i64> = (1..=9).map(|step| step * 40).collect();
        let mut calls = Vec::new();
        rank_budgets_with_progress(codex.units(), &budgets, &opponent, &config(), |done, total| {
            calls.push((done, total))
        })
        .unwrap();
        assert_eq!(calls, vec![(0, 9), (4, 9), (8, 9), (9, 9)]);
    }

    #[test]
    fn dedicated_workers_rank_like_global_pool() {
        let codex = Catalog::default_codex();
        let opponent = Army::from_units(vec![codex.units()[0].clone()]);
        let budgets = [60, 140, 200, 290, 350];
        let global = rank_budgets(codex.units(), &budgets, &opponent, &config()).unwrap();
        let dedicated = rank_budgets(
            codex.units(),
            &budgets,
            &opponent,
            &MatchupConfig {
                workers: 3,
                ..config()
            },
        )
        .unwrap();
        let order = |ranked: &[RankedArmy]| ranked.iter().map(|r| r.max_points).collect::<Vec<_>>();
        assert_eq!(order(&global), order(&dedicated));
        for (left, right) in global.iter().zip(&dedicated) {
            assert_eq!(left.win_rate, right.win_rate);
        }
    }

    #[test]
    fn invalid_budget_aborts_ranking() {
        let codex = Catalog::default_codex();
        let result = rank_budgets(codex.units(), &[100, -1], &Army::new(), &config());
        assert!(result.is_err());
    }
}
