pub mod knapsack;
pub mod monte_carlo;
pub mod ranking;

pub use knapsack::{optimal_effectiveness, optimize};
pub use monte_carlo::{run_matchup, run_matchup_sequential, MatchupConfig, MatchupSummary};
pub use ranking::{rank_budgets, rank_budgets_with_progress, RankedArmy, RankingScore};
