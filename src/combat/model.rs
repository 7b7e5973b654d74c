//! Single entry point over both battle variants, selected by [BattleConfig::model].

use serde::{Deserialize, Serialize};

use crate::combat::aggregate::battle_aggregate;
use crate::combat::attrition::{
    battle_attrition, AttritionConfig, RoundEvent, TraceMode, DEFAULT_ROUND_CAP,
};
use crate::combat::battlefield::{Battlefield, DISTANCE_PIVOT};
use crate::combat::rng::{entropy_seed, Rng};
use crate::combat::verdict::Verdict;
use crate::data::army::Army;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatModel {
    #[default]
    Aggregate,
    Attrition,
}

impl CombatModel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "aggregate" => Some(Self::Aggregate),
            "attrition" => Some(Self::Attrition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub model: CombatModel,
    pub distance: i32,
    pub objectives: i32,
    /// When None, attrition runs are seeded from OS entropy.
    pub seed: Option<u64>,
    pub round_cap: u32,
    pub trace_mode: TraceMode,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            model: CombatModel::Aggregate,
            distance: DISTANCE_PIVOT,
            objectives: 0,
            seed: None,
            round_cap: DEFAULT_ROUND_CAP,
            trace_mode: TraceMode::Off,
        }
    }
}

impl BattleConfig {
    pub fn battlefield(&self) -> Battlefield {
        Battlefield::new(self.distance, self.objectives)
    }

    pub fn attrition_config(&self) -> AttritionConfig {
        AttritionConfig {
            round_cap: self.round_cap,
            tiebreak_field: self.battlefield(),
            trace_mode: self.trace_mode,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub model: CombatModel,
    pub battlefield: Battlefield,
    /// Seed actually used; None for the aggregate model.
    pub seed: Option<u64>,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RoundEvent>,
}

pub fn resolve_battle(army_a: &Army, army_b: &Army, config: &BattleConfig) -> BattleReport {
    let battlefield = config.battlefield();
    match config.model {
        CombatModel::Aggregate => BattleReport {
            model: CombatModel::Aggregate,
            battlefield,
            seed: None,
            verdict: battle_aggregate(army_a, army_b, &battlefield),
            events: Vec::new(),
        },
        CombatModel::Attrition => {
            let seed = config.seed.unwrap_or_else(entropy_seed);
            let mut rng = Rng::new(seed);
            let result = battle_attrition(army_a, army_b, &mut rng, &config.attrition_config());
            BattleReport {
                model: CombatModel::Attrition,
                battlefield,
                seed: Some(seed),
                verdict: result.verdict,
                events: result.events,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::combat::verdict::Resolution;
    use crate::data::unit::Unit;

    fn armies() -> (Army, Army) {
        let marine = Arc::new(Unit::new("Marine", 6, 10, 0.9, 0.85, 18, 0.75, 12, 80));
        let scout = Arc::new(Unit::new("Scout", 8, 6, 0.7, 0.65, 12, 0.6, 10, 60));
        (
            Army::from_units(vec![Arc::clone(&marine), marine]),
            Army::from_units(vec![scout]),
        )
    }

    #[test]
    fn parse_model_names() {
        assert_eq!(CombatModel::parse("Attrition"), Some(CombatModel::Attrition));
        assert_eq!(CombatModel::parse(" aggregate "), Some(CombatModel::Aggregate));
        assert_eq!(CombatModel::parse("melee"), None);
    }

    #[test]
    fn aggregate_model_has_no_seed() {
        let (a, b) = armies();
        let report = resolve_battle(&a, &b, &BattleConfig::default());
        assert_eq!(report.seed, None);
        assert_eq!(report.verdict.resolution, Resolution::Aggregate);
    }

    #[test]
    fn attrition_model_is_reproducible_with_seed() {
        let (a, b) = armies();
        let config = BattleConfig {
            model: CombatModel::Attrition,
            seed: Some(11),
            trace_mode: TraceMode::Events,
            ..BattleConfig::default()
        };
        let first = resolve_battle(&a, &b, &config);
        let second = resolve_battle(&a, &b, &config);
        assert_eq!(first.seed, Some(11));
        assert_eq!(first.verdict, second.verdict);
        assert_eq!(first.events, second.events);
        assert!(!first.events.is_empty());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: BattleConfig =
            serde_json::from_str(r#"{"model":"attrition","distance":8}"#).unwrap();
        assert_eq!(config.model, CombatModel::Attrition);
        assert_eq!(config.distance, 8);
        assert_eq!(config.objectives, 0);
        assert_eq!(config.round_cap, DEFAULT_ROUND_CAP);
    }
}
