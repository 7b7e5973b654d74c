//! Terrain-derived multipliers. Distance favours shooting above the pivot and melee below it;
//! objectives raise speed and unit-force multipliers.

use serde::{Deserialize, Serialize};

pub const MIN_FIELD_VALUE: i32 = 0;
pub const MAX_FIELD_VALUE: i32 = 10;
pub const DISTANCE_PIVOT: i32 = 5;

const DISTANCE_STEP: f64 = 0.1;
const SPEED_PER_OBJECTIVE: f64 = 0.05;
const FORCE_PER_OBJECTIVE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlefieldSize {
    Small,
    Medium,
    Large,
}

impl BattlefieldSize {
    /// 0-3 small, 4-6 medium, 7-10 large.
    pub fn from_distance(distance: i32) -> Self {
        match distance {
            i32::MIN..=3 => Self::Small,
            4..=6 => Self::Medium,
            _ => Self::Large,
        }
    }
}

/// Immutable after construction: only getters are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Battlefield {
    distance: i32,
    objectives: i32,
    size: BattlefieldSize,
    range_multiplier: f64,
    melee_multiplier: f64,
    speed_multiplier: f64,
    unit_force_multiplier: f64,
}

impl Battlefield {
    /// Both inputs are clamped to `[0, 10]`.
    pub fn new(distance: i32, objectives: i32) -> Self {
        let distance = distance.clamp(MIN_FIELD_VALUE, MAX_FIELD_VALUE);
        let objectives = objectives.clamp(MIN_FIELD_VALUE, MAX_FIELD_VALUE);

        let offset = f64::from(distance - DISTANCE_PIVOT) * DISTANCE_STEP;
        // offset < 0 at close range: melee gains what range loses, and vice versa.
        let range_multiplier = 1.0 + offset;
        let melee_multiplier = 1.0 - offset;

        let objectives_f = f64::from(objectives);
        Self {
            distance,
            objectives,
            size: BattlefieldSize::from_distance(distance),
            range_multiplier,
            melee_multiplier,
            speed_multiplier: 1.0 + SPEED_PER_OBJECTIVE * objectives_f,
            unit_force_multiplier: 1.0 + FORCE_PER_OBJECTIVE * objectives_f,
        }
    }

    /// Distance at the pivot, no objectives: every multiplier is 1.0.
    pub fn neutral() -> Self {
        Self::new(DISTANCE_PIVOT, 0)
    }

    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn objectives(&self) -> i32 {
        self.objectives
    }

    pub fn size(&self) -> BattlefieldSize {
        self.size
    }

    pub fn range_multiplier(&self) -> f64 {
        self.range_multiplier
    }

    pub fn melee_multiplier(&self) -> f64 {
        self.melee_multiplier
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn unit_force_multiplier(&self) -> f64 {
        self.unit_force_multiplier
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "expected {b}, got {a}");
    }

    #[test]
    fn pivot_distance_without_objectives_is_neutral() {
        let field = Battlefield::new(5, 0);
        assert_eq!(field.range_multiplier(), 1.0);
        assert_eq!(field.melee_multiplier(), 1.0);
        assert_eq!(field.speed_multiplier(), 1.0);
        assert_eq!(field.unit_force_multiplier(), 1.0);
        assert_eq!(field.size(), BattlefieldSize::Medium);
    }

    #[test]
    fn close_range_favours_melee() {
        let field = Battlefield::new(3, 3);
        assert_eq!(field.size(), BattlefieldSize::Small);
        approx_eq(field.range_multiplier(), 0.8);
        approx_eq(field.melee_multiplier(), 1.2);
        approx_eq(field.speed_multiplier(), 1.15);
        approx_eq(field.unit_force_multiplier(), 1.03);
    }

    #[test]
    fn long_range_favours_shooting() {
        let field = Battlefield::new(9, 0);
        assert_eq!(field.size(), BattlefieldSize::Large);
        approx_eq(field.range_multiplier(), 1.4);
        approx_eq(field.melee_multiplier(), 0.6);
    }

    #[test]
    fn inputs_are_clamped() {
        assert_eq!(Battlefield::new(-5, 20), Battlefield::new(0, 10));
        let field = Battlefield::new(-5, 20);
        assert_eq!(field.distance(), 0);
        assert_eq!(field.objectives(), 10);
        approx_eq(field.range_multiplier(), 0.5);
        approx_eq(field.melee_multiplier(), 1.5);
        approx_eq(field.speed_multiplier(), 1.5);
        approx_eq(field.unit_force_multiplier(), 1.1);
    }
}
