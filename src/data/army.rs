//! Ordered collection of shared unit references with aggregate queries.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::unit::Unit;

/// Divisor applied by [Army::display_effectiveness].
pub const EFFECTIVENESS_DISPLAY_DIVISOR: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Army {
    units: Vec<Arc<Unit>>,
}

impl Army {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: Vec<Arc<Unit>>) -> Self {
        Self { units }
    }

    pub fn add_unit(&mut self, unit: Arc<Unit>) {
        self.units.push(unit);
    }

    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn total_points(&self) -> i64 {
        self.units.iter().map(|unit| i64::from(unit.point_cost)).sum()
    }

    pub fn total_effectiveness(&self) -> f64 {
        self.units.iter().map(|unit| unit.effectiveness()).sum()
    }

    pub fn display_effectiveness(&self) -> f64 {
        self.total_effectiveness() / EFFECTIVENESS_DISPLAY_DIVISOR
    }

    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|unit| unit.name.clone()).collect()
    }
}

impl fmt::Display for Army {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Army:")?;
        for unit in &self.units {
            writeln!(f, "{unit}")?;
        }
        Ok(())
    }
}

/// Serializable snapshot of an army for CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct ArmySummary {
    pub units: Vec<String>,
    pub total_points: i64,
    pub total_effectiveness: f64,
    pub display_effectiveness: f64,
}

impl From<&Army> for ArmySummary {
    fn from(army: &Army) -> Self {
        Self {
            units: army.unit_names(),
            total_points: army.total_points(),
            total_effectiveness: army.total_effectiveness(),
            display_effectiveness: army.display_effectiveness(),
        }
    }
}
