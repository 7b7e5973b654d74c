use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    Draw,
}

impl Winner {
    /// Winner of a score comparison; exact equality is a draw.
    pub fn from_scores(a: f64, b: f64) -> Self {
        if a > b {
            Self::A
        } else if b > a {
            Self::B
        } else {
            Self::Draw
        }
    }

    /// The same result seen from the other side.
    pub fn swapped(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
            Self::Draw => Self::Draw,
        }
    }
}

/// How a verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Closed-form aggregate comparison.
    Aggregate,
    /// One side's pool ran out during attrition.
    Attrition,
    /// Both pools ran out in the same round; aggregate scores decided.
    TieBreak,
    /// Round cap reached with both pools alive.
    RoundCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub winner: Winner,
    pub army_a_score: f64,
    pub army_b_score: f64,
    pub resolution: Resolution,
    /// Set only when the round cap cut the battle short.
    pub inconclusive: bool,
    pub rounds: u32,
}

impl Verdict {
    pub fn aggregate(army_a_score: f64, army_b_score: f64) -> Self {
        Self {
            winner: Winner::from_scores(army_a_score, army_b_score),
            army_a_score,
            army_b_score,
            resolution: Resolution::Aggregate,
            inconclusive: false,
            rounds: 0,
        }
    }
}
