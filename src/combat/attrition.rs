//! Round-based attrition: random single-combat exchanges until a side runs out of units.
//!
//! Each round draws one live unit per side and a distance in `[0, 10]` (in that order) from the
//! injected [RandomSource]. Units carry health equal to their effectiveness; both participants
//! of an exchange lose a share of the raw effectiveness gap. If both pools empty in the same
//! round the pre-battle rosters are compared with the aggregate model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combat::aggregate::army_score;
use crate::combat::battlefield::{Battlefield, DISTANCE_PIVOT, MAX_FIELD_VALUE, MIN_FIELD_VALUE};
use crate::combat::rng::RandomSource;
use crate::combat::verdict::{Resolution, Verdict, Winner};
use crate::data::army::Army;
use crate::data::unit::Unit;

pub const DEFAULT_ROUND_CAP: u32 = 10_000;

/// Share of the effectiveness gap lost by the loser of an exchange.
pub const LOSER_DAMAGE_SHARE: f64 = 0.5;
/// Share of the effectiveness gap lost by the winner of an exchange.
pub const WINNER_DAMAGE_SHARE: f64 = 0.2;
/// Share lost by each side when scaled values tie.
pub const DRAW_DAMAGE_SHARE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    #[default]
    Off,
    Events,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttritionConfig {
    pub round_cap: u32,
    /// Field used to score the starting rosters when both sides are wiped out together.
    pub tiebreak_field: Battlefield,
    pub trace_mode: TraceMode,
}

impl Default for AttritionConfig {
    fn default() -> Self {
        Self {
            round_cap: DEFAULT_ROUND_CAP,
            tiebreak_field: Battlefield::neutral(),
            trace_mode: TraceMode::Off,
        }
    }
}

/// A unit plus the health it has left in one simulation run.
#[derive(Debug, Clone)]
pub struct BattleUnit {
    unit: Arc<Unit>,
    health: f64,
}

impl BattleUnit {
    pub fn new(unit: Arc<Unit>) -> Self {
        let health = unit.effectiveness();
        Self { unit, health }
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
    }

    fn is_down(&self) -> bool {
        self.health <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyKind {
    Shooting,
    CloseCombat,
}

impl AccuracyKind {
    /// Shooting beyond the pivot distance, close combat at or inside it.
    pub fn for_distance(distance: u32) -> Self {
        if distance > DISTANCE_PIVOT as u32 {
            Self::Shooting
        } else {
            Self::CloseCombat
        }
    }

    pub fn of(self, unit: &Unit) -> f64 {
        match self {
            Self::Shooting => unit.shooting_accuracy,
            Self::CloseCombat => unit.close_combat_accuracy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exchange {
    pub accuracy: AccuracyKind,
    pub winner: Winner,
    pub damage_a: f64,
    pub damage_b: f64,
}

pub fn resolve_exchange(unit_a: &Unit, unit_b: &Unit, distance: u32) -> Exchange {
    let accuracy = AccuracyKind::for_distance(distance);
    let raw_a = unit_a.effectiveness();
    let raw_b = unit_b.effectiveness();
    let winner = Winner::from_scores(raw_a * accuracy.of(unit_a), raw_b * accuracy.of(unit_b));
    let diff = (raw_a - raw_b).abs();

    let (damage_a, damage_b) = match winner {
        Winner::A => (WINNER_DAMAGE_SHARE * diff, LOSER_DAMAGE_SHARE * diff),
        Winner::B => (LOSER_DAMAGE_SHARE * diff, WINNER_DAMAGE_SHARE * diff),
        Winner::Draw => (DRAW_DAMAGE_SHARE * diff, DRAW_DAMAGE_SHARE * diff),
    };

    Exchange {
        accuracy,
        winner,
        damage_a,
        damage_b,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEvent {
    pub round: u32,
    pub unit_a: String,
    pub unit_b: String,
    pub distance: u32,
    pub accuracy: AccuracyKind,
    pub winner: Winner,
    pub damage_a: f64,
    pub damage_b: f64,
    pub health_a: f64,
    pub health_b: f64,
    pub a_removed: bool,
    pub b_removed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttritionResult {
    pub verdict: Verdict,
    pub survivors_a: usize,
    pub survivors_b: usize,
    pub events: Vec<RoundEvent>,
}

pub fn battle_attrition<R: RandomSource + ?Sized>(
    army_a: &Army,
    army_b: &Army,
    rng: &mut R,
    config: &AttritionConfig,
) -> AttritionResult {
    let mut pool_a = build_pool(army_a);
    let mut pool_b = build_pool(army_b);
    let mut events = Vec::new();
    let mut rounds = 0u32;

    while !pool_a.is_empty() && !pool_b.is_empty() {
        if rounds >= config.round_cap {
            tracing::warn!(
                "attrition hit round cap {} with {} vs {} units alive; reporting inconclusive draw",
                config.round_cap,
                pool_a.len(),
                pool_b.len()
            );
            let verdict = Verdict {
                winner: Winner::Draw,
                army_a_score: remaining_health(&pool_a),
                army_b_score: remaining_health(&pool_b),
                resolution: Resolution::RoundCap,
                inconclusive: true,
                rounds,
            };
            return AttritionResult {
                verdict,
                survivors_a: pool_a.len(),
                survivors_b: pool_b.len(),
                events,
            };
        }
        rounds += 1;

        let index_a = rng.index_below(pool_a.len());
        let index_b = rng.index_below(pool_b.len());
        let distance = rng.range_inclusive(MIN_FIELD_VALUE as u32, MAX_FIELD_VALUE as u32);

        let exchange = resolve_exchange(pool_a[index_a].unit(), pool_b[index_b].unit(), distance);
        pool_a[index_a].take_damage(exchange.damage_a);
        pool_b[index_b].take_damage(exchange.damage_b);
        let a_removed = pool_a[index_a].is_down();
        let b_removed = pool_b[index_b].is_down();

        tracing::trace!(
            round = rounds,
            distance,
            winner = ?exchange.winner,
            "{} vs {}",
            pool_a[index_a].unit().name,
            pool_b[index_b].unit().name
        );

        if config.trace_mode == TraceMode::Events {
            events.push(RoundEvent {
                round: rounds,
                unit_a: pool_a[index_a].unit().name.clone(),
                unit_b: pool_b[index_b].unit().name.clone(),
                distance,
                accuracy: exchange.accuracy,
                winner: exchange.winner,
                damage_a: exchange.damage_a,
                damage_b: exchange.damage_b,
                health_a: pool_a[index_a].health(),
                health_b: pool_b[index_b].health(),
                a_removed,
                b_removed,
            });
        }

        if a_removed {
            pool_a.swap_remove(index_a);
        }
        if b_removed {
            pool_b.swap_remove(index_b);
        }
    }

    let verdict = match (pool_a.is_empty(), pool_b.is_empty()) {
        (false, true) => attrition_verdict(Winner::A, &pool_a, &pool_b, rounds),
        (true, false) => attrition_verdict(Winner::B, &pool_a, &pool_b, rounds),
        _ => {
            let score_a = army_score(army_a, &config.tiebreak_field);
            let score_b = army_score(army_b, &config.tiebreak_field);
            Verdict {
                winner: Winner::from_scores(score_a, score_b),
                army_a_score: score_a,
                army_b_score: score_b,
                resolution: Resolution::TieBreak,
                inconclusive: false,
                rounds,
            }
        }
    };

    tracing::debug!(
        "attrition battle finished after {} round(s): {:?} via {:?}",
        rounds,
        verdict.winner,
        verdict.resolution
    );

    AttritionResult {
        verdict,
        survivors_a: pool_a.len(),
        survivors_b: pool_b.len(),
        events,
    }
}

fn build_pool(army: &Army) -> Vec<BattleUnit> {
    army.units().iter().cloned().map(BattleUnit::new).collect()
}

fn remaining_health(pool: &[BattleUnit]) -> f64 {
    pool.iter().map(BattleUnit::health).sum()
}

fn attrition_verdict(
    winner: Winner,
    pool_a: &[BattleUnit],
    pool_b: &[BattleUnit],
    rounds: u32,
) -> Verdict {
    Verdict {
        winner,
        army_a_score: remaining_health(pool_a),
        army_b_score: remaining_health(pool_b),
        resolution: Resolution::Attrition,
        inconclusive: false,
        rounds,
    }
}
