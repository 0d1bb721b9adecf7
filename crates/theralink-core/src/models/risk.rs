use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Scores at or below this value are classified [`RiskTier::Red`].
pub const RED_MAX_SCORE: f64 = 2.0;

/// Scores above [`RED_MAX_SCORE`] and at or below this value are
/// classified [`RiskTier::Yellow`].
pub const YELLOW_MAX_SCORE: f64 = 3.5;

/// Triage tier derived from a patient's latest wellness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Red,
    Yellow,
    Green,
}

impl RiskTier {
    /// Badge text shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Red => "RED ZONE",
            RiskTier::Yellow => "YELLOW ZONE",
            RiskTier::Green => "GREEN ZONE",
        }
    }

    /// Single-glyph marker used in the overview table.
    pub fn marker(&self) -> &'static str {
        match self {
            RiskTier::Red => "🔴",
            RiskTier::Yellow => "🟡",
            RiskTier::Green => "🟢",
        }
    }

    /// Lowercase name, used for CSS classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Red => "red",
            RiskTier::Yellow => "yellow",
            RiskTier::Green => "green",
        }
    }
}

/// Classify a wellness score.
///
/// A step function over the score domain: `<= 2.0` is red, `<= 3.5` is
/// yellow, anything higher is green.
pub fn classify(score: f64) -> RiskTier {
    if score <= RED_MAX_SCORE {
        RiskTier::Red
    } else if score <= YELLOW_MAX_SCORE {
        RiskTier::Yellow
    } else {
        RiskTier::Green
    }
}
