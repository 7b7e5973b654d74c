//! Closed-form battle resolution: each army collapses to one terrain-weighted score.

use crate::combat::battlefield::Battlefield;
use crate::combat::verdict::Verdict;
use crate::data::army::Army;
use crate::data::unit::Unit;

/// Per-unit bonus added to the unit-force multiplier.
pub const FORCE_BONUS_PER_UNIT: f64 = 0.01;
pub const ARMY_SCORE_DIVISOR: f64 = 50.0;

pub fn unit_value(unit: &Unit, field: &Battlefield) -> f64 {
    let range =
        f64::from(unit.shooting_damage) * unit.shooting_accuracy * field.range_multiplier();
    let melee =
        f64::from(unit.close_combat_damage) * unit.close_combat_accuracy * field.melee_multiplier();
    let agility = f64::from(unit.speed) * field.speed_multiplier();
    let stamina = f64::from(unit.wounds) * unit.armor;
    (range + melee) * (agility + stamina)
}

pub fn army_score(army: &Army, field: &Battlefield) -> f64 {
    let force = field.unit_force_multiplier() + FORCE_BONUS_PER_UNIT * army.len() as f64;
    army.units()
        .iter()
        .map(|unit| unit_value(unit, field) * force / ARMY_SCORE_DIVISOR)
        .sum()
}

pub fn battle_aggregate(army_a: &Army, army_b: &Army, field: &Battlefield) -> Verdict {
    let verdict = Verdict::aggregate(army_score(army_a, field), army_score(army_b, field));
    tracing::debug!(
        "aggregate battle: a={:.3} b={:.3} winner={:?}",
        verdict.army_a_score,
        verdict.army_b_score,
        verdict.winner
    );
    verdict
}
