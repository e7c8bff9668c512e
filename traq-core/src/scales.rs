//! Ordered classification scales for TRAQ risk assessment
//!
//! Global invariants enforced:
//! - Every scale is a strict total order (declaration order = severity order)
//! - Scale values never compare by display string, only by rank
//! - Deterministic serialization (snake_case wire names)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Likelihood that a specific tree defect leads to structural failure.
///
/// Declaration order is severity order: `Improbable < Possible < Probable
/// < Imminent`. Both the highest-severity-wins resolution and the mitigation
/// step-down rely on this ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureProbability {
    Improbable,
    Possible,
    Probable,
    Imminent,
}

impl FailureProbability {
    /// All values from most to least severe, the scan order used when
    /// resolving the governing failure probability.
    pub const DESCENDING: [FailureProbability; 4] = [
        FailureProbability::Imminent,
        FailureProbability::Probable,
        FailureProbability::Possible,
        FailureProbability::Improbable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureProbability::Improbable => "Improbable",
            FailureProbability::Possible => "Possible",
            FailureProbability::Probable => "Probable",
            FailureProbability::Imminent => "Imminent",
        }
    }

    /// Step down `steps` ranks on the severity scale, clamped at
    /// `Improbable`. Never wraps and never raises severity.
    pub fn step_down(self, steps: u8) -> FailureProbability {
        match (self as u8).saturating_sub(steps) {
            0 => FailureProbability::Improbable,
            1 => FailureProbability::Possible,
            2 => FailureProbability::Probable,
            _ => FailureProbability::Imminent,
        }
    }
}

impl fmt::Display for FailureProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Likelihood the target is occupied at failure time, derived from the
/// target occupancy category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactProbability {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ImpactProbability {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactProbability::VeryLow => "Very Low",
            ImpactProbability::Low => "Low",
            ImpactProbability::Medium => "Medium",
            ImpactProbability::High => "High",
        }
    }
}

impl fmt::Display for ImpactProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined probability that failure occurs and impacts the target.
///
/// Derived, never stored independently: always a function of
/// (failure probability, impact probability) via the likelihood matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLikelihood {
    VeryUnlikely,
    Unlikely,
    Likely,
    VeryLikely,
}

impl EventLikelihood {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLikelihood::VeryUnlikely => "Very Unlikely",
            EventLikelihood::Unlikely => "Unlikely",
            EventLikelihood::Likely => "Likely",
            EventLikelihood::VeryLikely => "Very Likely",
        }
    }
}

impl fmt::Display for EventLikelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of harm if the event occurs.
///
/// The classifier only emits `Significant` and `Severe`; the lower two
/// values exist because the risk-rating matrix defines columns for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consequence {
    Minimal,
    Minor,
    Significant,
    Severe,
}

impl Consequence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Consequence::Minimal => "Minimal",
            Consequence::Minor => "Minor",
            Consequence::Significant => "Significant",
            Consequence::Severe => "Severe",
        }
    }
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final qualitative risk rating from the risk-rating matrix, used both as
/// initial risk and as residual (post-mitigation) risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target occupancy category (1-4, monotonically increasing occupancy).
///
/// A closed enum so the engine can never receive an out-of-range category;
/// numeric inputs are validated at the boundary with `TryFrom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TargetCategory {
    /// Area rarely occupied (< 1 hour/week)
    Rare = 1,
    /// Occasional occupancy (1-4 hours/week)
    Occasional = 2,
    /// Frequent occupancy (5-20 hours/week)
    Frequent = 3,
    /// Constant occupancy (> 20 hours/week)
    Constant = 4,
}

/// Error for numeric target categories outside 1-4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTargetCategory(pub i64);

impl fmt::Display for InvalidTargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target category must be between 1 and 4 (got {})", self.0)
    }
}

impl std::error::Error for InvalidTargetCategory {}

impl TryFrom<i64> for TargetCategory {
    type Error = InvalidTargetCategory;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TargetCategory::Rare),
            2 => Ok(TargetCategory::Occasional),
            3 => Ok(TargetCategory::Frequent),
            4 => Ok(TargetCategory::Constant),
            other => Err(InvalidTargetCategory(other)),
        }
    }
}

impl From<TargetCategory> for i64 {
    fn from(category: TargetCategory) -> i64 {
        category as i64
    }
}

impl TargetCategory {
    pub const ALL: [TargetCategory; 4] = [
        TargetCategory::Rare,
        TargetCategory::Occasional,
        TargetCategory::Frequent,
        TargetCategory::Constant,
    ];

    /// Numeric category value (1-4).
    pub fn value(&self) -> i64 {
        *self as i64
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetCategory::Rare => "1 - Raro",
            TargetCategory::Occasional => "2 - Ocasional",
            TargetCategory::Frequent => "3 - Frequente",
            TargetCategory::Constant => "4 - Constante",
        }
    }

    /// Occupancy description for checklist display.
    pub fn occupancy(&self) -> &'static str {
        match self {
            TargetCategory::Rare => "Área raramente ocupada (< 1 hora/semana)",
            TargetCategory::Occasional => "Ocupação ocasional (1-4 horas/semana)",
            TargetCategory::Frequent => "Ocupação frequente (5-20 horas/semana)",
            TargetCategory::Constant => "Ocupação constante (> 20 horas/semana)",
        }
    }

    pub fn examples(&self) -> &'static str {
        match self {
            TargetCategory::Rare => "Áreas remotas, trilhas pouco usadas",
            TargetCategory::Occasional => "Áreas de manutenção, estacionamentos",
            TargetCategory::Frequent => "Calçadas, áreas de lazer",
            TargetCategory::Constant => "Playgrounds, áreas de grande circulação",
        }
    }

    /// Reference-compatible lossy conversion: out-of-range values silently
    /// map to `Rare` (lowest impact), matching the original system's
    /// fallback. Prefer `TryFrom<i64>` at input boundaries; this exists for
    /// callers that must reproduce stored results bit-for-bit.
    pub fn from_category_lossy(value: i64) -> TargetCategory {
        TargetCategory::try_from(value).unwrap_or(TargetCategory::Rare)
    }
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
