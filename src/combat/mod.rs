pub mod aggregate;
pub mod attrition;
pub mod battlefield;
pub mod export_csv;
pub mod model;
pub mod rng;
pub mod verdict;

pub use aggregate::{army_score, battle_aggregate, unit_value, ARMY_SCORE_DIVISOR};
pub use attrition::{
    battle_attrition, resolve_exchange, AccuracyKind, AttritionConfig, AttritionResult,
    BattleUnit, Exchange, RoundEvent, TraceMode, DEFAULT_ROUND_CAP,
};
pub use battlefield::{Battlefield, BattlefieldSize};
pub use export_csv::{round_events_to_csv, write_round_events};
pub use model::{resolve_battle, BattleConfig, BattleReport, CombatModel};
pub use rng::{RandomSource, Rng};
pub use verdict::{Resolution, Verdict, Winner};
