//! Unit records: the read-only stat blocks every army is built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WarbandError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub speed: u32,
    pub wounds: u32,
    pub armor: f64,
    pub shooting_accuracy: f64,
    pub shooting_damage: u32,
    pub close_combat_accuracy: f64,
    pub close_combat_damage: u32,
    /// Signed so that non-positive costs in loaded data can be rejected.
    pub point_cost: i32,
}

impl Unit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        speed: u32,
        wounds: u32,
        armor: f64,
        shooting_accuracy: f64,
        shooting_damage: u32,
        close_combat_accuracy: f64,
        close_combat_damage: u32,
        point_cost: i32,
    ) -> Self {
        Self {
            name: name.into(),
            speed,
            wounds,
            armor,
            shooting_accuracy,
            shooting_damage,
            close_combat_accuracy,
            close_combat_damage,
            point_cost,
        }
    }

    /// Combat value: `(ranged + melee output) * (speed + wounds * armor)`.
    /// Recomputed on every call.
    pub fn effectiveness(&self) -> f64 {
        let output = f64::from(self.shooting_damage) * self.shooting_accuracy
            + f64::from(self.close_combat_damage) * self.close_combat_accuracy;
        let resilience = f64::from(self.speed) + f64::from(self.wounds) * self.armor;
        output * resilience
    }

    /// Rejects units the optimizer and simulators cannot reason about.
    pub fn validate(&self) -> Result<()> {
        if self.point_cost <= 0 {
            return Err(self.invalid(format!(
                "point_cost must be positive, got {}",
                self.point_cost
            )));
        }
        for (field, value) in self.ratios() {
            if !(0.0..=1.0).contains(&value) {
                return Err(self.invalid(format!("{field} must be within [0, 1], got {value}")));
            }
        }
        Ok(())
    }

    /// Ratio fields paired with their names, in declaration order.
    pub fn ratios(&self) -> [(&'static str, f64); 3] {
        [
            ("armor", self.armor),
            ("shooting_accuracy", self.shooting_accuracy),
            ("close_combat_accuracy", self.close_combat_accuracy),
        ]
    }

    fn invalid(&self, reason: String) -> WarbandError {
        WarbandError::InvalidUnit {
            name: self.name.clone(),
            reason,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [Speed: {}, Wounds: {}, Armor: {}, Shooting: {} ({}), Close Combat: {} ({}), Points: {}]",
            self.name,
            self.speed,
            self.wounds,
            self.armor,
            self.shooting_damage,
            self.shooting_accuracy,
            self.close_combat_damage,
            self.close_combat_accuracy,
            self.point_cost
        )
    }
}
