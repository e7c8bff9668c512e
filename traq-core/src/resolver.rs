//! Failure-probability resolution and target classification
//!
//! Global invariants enforced:
//! - Highest severity wins; weights never influence probability
//! - First factor in catalog order wins severity ties (reproducible
//!   driving factor)
//! - Empty input resolves to `Improbable`, never an error

use crate::assessment::SelectedFactor;
use crate::scales::{Consequence, FailureProbability, ImpactProbability, TargetCategory};

/// Outcome of failure-probability resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProbability {
    pub probability: FailureProbability,
    /// Description of the factor whose severity determined the rating.
    /// `None` when no selected factor carries a severity.
    pub driving_factor: Option<String>,
}

/// Resolve the governing failure probability from the factors the assessor
/// marked present.
///
/// Scans severities from most to least severe and returns the first selected
/// factor (in catalog order) at the highest severity present. Factors
/// without a severity (informational checklist items) contribute nothing.
pub fn resolve_failure_probability(factors: &[SelectedFactor]) -> ResolvedProbability {
    for severity in FailureProbability::DESCENDING {
        if let Some(factor) = factors.iter().find(|f| f.severity == Some(severity)) {
            return ResolvedProbability {
                probability: severity,
                driving_factor: Some(factor.description.clone()),
            };
        }
    }

    ResolvedProbability {
        probability: FailureProbability::Improbable,
        driving_factor: None,
    }
}

/// Map a target occupancy category to impact probability (TRAQ table 4).
pub fn impact_probability(category: TargetCategory) -> ImpactProbability {
    match category {
        TargetCategory::Rare => ImpactProbability::VeryLow,
        TargetCategory::Occasional => ImpactProbability::Low,
        TargetCategory::Frequent => ImpactProbability::Medium,
        TargetCategory::Constant => ImpactProbability::High,
    }
}

/// Classify consequence severity from the target category: constant
/// occupancy is `Severe`, everything else `Significant`.
pub fn consequence(category: TargetCategory) -> Consequence {
    if category == TargetCategory::Constant {
        Consequence::Severe
    } else {
        Consequence::Significant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mitigation::MitigationAction;

    fn factor(description: &str, severity: Option<FailureProbability>) -> SelectedFactor {
        SelectedFactor {
            factor_id: 0,
            description: description.to_string(),
            weight: 1,
            severity,
            mitigation: MitigationAction::None,
        }
    }

    #[test]
    fn test_empty_input_resolves_improbable() {
        let resolved = resolve_failure_probability(&[]);
        assert_eq!(resolved.probability, FailureProbability::Improbable);
        assert_eq!(resolved.driving_factor, None);
    }

    #[test]
    fn test_highest_severity_wins() {
        let factors = vec![
            factor("rachaduras no tronco", Some(FailureProbability::Probable)),
            factor("inclinação recente", Some(FailureProbability::Imminent)),
            factor("galhos cruzados", Some(FailureProbability::Possible)),
        ];
        let resolved = resolve_failure_probability(&factors);
        assert_eq!(resolved.probability, FailureProbability::Imminent);
        assert_eq!(
            resolved.driving_factor.as_deref(),
            Some("inclinação recente")
        );
    }

    #[test]
    fn test_tie_break_first_in_catalog_order() {
        let factors = vec![
            factor("rachaduras no tronco", Some(FailureProbability::Probable)),
            factor("apodrecimento do tronco", Some(FailureProbability::Probable)),
        ];
        let resolved = resolve_failure_probability(&factors);
        assert_eq!(resolved.probability, FailureProbability::Probable);
        assert_eq!(
            resolved.driving_factor.as_deref(),
            Some("rachaduras no tronco")
        );
    }

    #[test]
    fn test_factors_without_severity_are_excluded() {
        let factors = vec![
            factor("observação informativa", None),
            factor("galhos cruzados", Some(FailureProbability::Possible)),
        ];
        let resolved = resolve_failure_probability(&factors);
        assert_eq!(resolved.probability, FailureProbability::Possible);
        assert_eq!(resolved.driving_factor.as_deref(), Some("galhos cruzados"));

        // All-informational selections resolve like an empty selection.
        let informational = vec![factor("observação informativa", None)];
        let resolved = resolve_failure_probability(&informational);
        assert_eq!(resolved.probability, FailureProbability::Improbable);
        assert_eq!(resolved.driving_factor, None);
    }

    #[test]
    fn test_impact_probability_table() {
        assert_eq!(
            impact_probability(TargetCategory::Rare),
            ImpactProbability::VeryLow
        );
        assert_eq!(
            impact_probability(TargetCategory::Occasional),
            ImpactProbability::Low
        );
        assert_eq!(
            impact_probability(TargetCategory::Frequent),
            ImpactProbability::Medium
        );
        assert_eq!(
            impact_probability(TargetCategory::Constant),
            ImpactProbability::High
        );
    }

    #[test]
    fn test_consequence_severe_only_for_constant() {
        assert_eq!(consequence(TargetCategory::Constant), Consequence::Severe);
        for category in [
            TargetCategory::Rare,
            TargetCategory::Occasional,
            TargetCategory::Frequent,
        ] {
            assert_eq!(consequence(category), Consequence::Significant);
        }
    }
}
