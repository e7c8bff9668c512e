//! Assessment workflow and result
//!
//! Composes the resolver, matrices, and mitigation reducer into the one
//! operation callers run per completed checklist pass. The result is
//! computed once from current inputs and immutable afterwards; persistence
//! is the caller's concern.
//!
//! Global invariants enforced:
//! - Pure computation, no I/O, no shared state
//! - Selected factors are evaluated in catalog display order
//! - Residual risk comes from one pipeline pass over the worst reduced
//!   probability, never from combining per-factor ratings

use crate::catalog::Catalog;
use crate::matrices::run_risk_pipeline;
use crate::mitigation::{aggregate_residual_risk, MitigationAction};
use crate::resolver::{impact_probability, resolve_failure_probability};
use crate::scales::{FailureProbability, ImpactProbability, RiskLevel, TargetCategory};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One factor the assessor marked present, paired with its chosen
/// mitigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SelectedFactor {
    pub factor_id: u32,
    pub description: String,
    /// Legacy weight, informational only.
    pub weight: u32,
    /// Severity feeding resolution; `None` for informational factors.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub severity: Option<FailureProbability>,
    #[serde(default)]
    pub mitigation: MitigationAction,
}

/// Completed TRAQ assessment for one tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Assessment {
    pub target_category: TargetCategory,
    pub selected_factor_count: usize,
    /// Sum of legacy weights across selected factors. Informational.
    pub total_weight_score: u32,
    pub failure_probability: FailureProbability,
    pub impact_probability: ImpactProbability,
    pub initial_risk: RiskLevel,
    pub residual_risk: RiskLevel,
    /// Worst failure probability remaining after mitigation.
    pub reduced_failure_probability: FailureProbability,
    /// Description of the factor that determined the failure probability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_factor: Option<String>,
}

/// Run the full assessment over the selected factors.
///
/// `factors` must be in catalog display order; the severity tie-break (and
/// therefore the reported driving factor) depends on it.
///
/// A selection with no factors at all rates `Low` outright, on both the
/// initial and residual side: the matrices describe the risk of an
/// *observed* defect, and a clean checklist must not inherit the target's
/// occupancy as risk. Selections containing only informational factors
/// still go through the matrices (with `Improbable`), matching the field
/// application.
pub fn assess(factors: &[SelectedFactor], target_category: TargetCategory) -> Assessment {
    let resolved = resolve_failure_probability(factors);
    let impact = impact_probability(target_category);
    let residual = aggregate_residual_risk(factors, impact, target_category);

    let (initial_risk, residual_risk) = if factors.is_empty() {
        (RiskLevel::Low, RiskLevel::Low)
    } else {
        (
            run_risk_pipeline(resolved.probability, impact, target_category),
            residual.residual_risk,
        )
    };

    Assessment {
        target_category,
        selected_factor_count: factors.len(),
        total_weight_score: factors.iter().map(|f| f.weight).sum(),
        failure_probability: resolved.probability,
        impact_probability: impact,
        initial_risk,
        residual_risk,
        reduced_failure_probability: residual.worst_reduced_severity,
        driving_factor: resolved.driving_factor,
    }
}

/// Assessment request document, the boundary format the checklist wizard
/// (or the CLI) hands in: a target category and the ids of the factors
/// marked present, each with an optional mitigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct AssessmentInput {
    pub target_category: i64,
    #[serde(default)]
    pub factors: Vec<FactorSelection>,
}

/// One checked factor in an assessment request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FactorSelection {
    pub id: u32,
    #[serde(default)]
    pub mitigation: MitigationAction,
}

impl AssessmentInput {
    /// Parse an input document from JSON.
    pub fn from_json(content: &str) -> Result<AssessmentInput> {
        serde_json::from_str(content).map_err(Into::into)
    }

    /// Validate the request against a catalog and produce the selected
    /// factors in catalog display order, plus the validated category.
    ///
    /// Contract violations (out-of-range category, unknown or inactive
    /// factor id, duplicate selection) are errors; the caller sent
    /// malformed input.
    pub fn resolve(&self, catalog: &Catalog) -> Result<(Vec<SelectedFactor>, TargetCategory)> {
        let target_category = TargetCategory::try_from(self.target_category)?;

        let mut selected = Vec::with_capacity(self.factors.len());
        for selection in &self.factors {
            let factor = match catalog.get(selection.id) {
                Some(factor) => factor,
                None => bail!("unknown risk factor id {} in assessment input", selection.id),
            };
            if !factor.active {
                bail!(
                    "risk factor {} (\"{}\") is inactive in the catalog",
                    factor.id,
                    factor.description
                );
            }
            if selected
                .iter()
                .any(|s: &(u32, SelectedFactor)| s.1.factor_id == factor.id)
            {
                bail!("risk factor {} selected more than once", factor.id);
            }
            selected.push((
                factor.display_order,
                SelectedFactor {
                    factor_id: factor.id,
                    description: factor.description.clone(),
                    weight: factor.weight,
                    severity: factor.severity_input(),
                    mitigation: selection.mitigation,
                },
            ));
        }

        // Catalog display order, not input order: keeps the severity
        // tie-break reproducible no matter how the wizard serialized the
        // checkboxes.
        selected.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.factor_id.cmp(&b.1.factor_id)));

        Ok((
            selected.into_iter().map(|(_, factor)| factor).collect(),
            target_category,
        ))
    }

    /// Factors carrying an action this version does not model. Callers
    /// should warn when this is non-empty: the conservative reduction floor
    /// may be hiding an upstream data bug.
    pub fn unrecognized_mitigations(&self) -> Vec<u32> {
        self.factors
            .iter()
            .filter(|f| f.mitigation == MitigationAction::Unrecognized)
            .map(|f| f.id)
            .collect()
    }
}

/// Validate and assess an input document against a catalog in one step.
pub fn assess_input(input: &AssessmentInput, catalog: &Catalog) -> Result<Assessment> {
    let (factors, target_category) = input.resolve(catalog)?;
    Ok(assess(&factors, target_category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(target_category: i64, ids: &[(u32, MitigationAction)]) -> AssessmentInput {
        AssessmentInput {
            target_category,
            factors: ids
                .iter()
                .map(|(id, mitigation)| FactorSelection {
                    id: *id,
                    mitigation: *mitigation,
                })
                .collect(),
        }
    }

    #[test]
    fn test_assess_empty_selection() {
        let assessment = assess(&[], TargetCategory::Constant);
        assert_eq!(assessment.selected_factor_count, 0);
        assert_eq!(assessment.total_weight_score, 0);
        assert_eq!(
            assessment.failure_probability,
            FailureProbability::Improbable
        );
        assert_eq!(assessment.impact_probability, ImpactProbability::High);
        assert_eq!(assessment.initial_risk, RiskLevel::Low);
        assert_eq!(assessment.residual_risk, RiskLevel::Low);
        assert_eq!(assessment.driving_factor, None);
    }

    #[test]
    fn test_informational_only_selection_uses_matrices() {
        // Unlike an empty checklist, a selection of checklist-only factors
        // is still an observation: Improbable runs through the pipeline
        // (Unlikely x Severe = High at constant occupancy).
        let factors = vec![SelectedFactor {
            factor_id: 40,
            description: "Presença de fauna associada".to_string(),
            weight: 1,
            severity: None,
            mitigation: MitigationAction::None,
        }];
        let assessment = assess(&factors, TargetCategory::Constant);
        assert_eq!(
            assessment.failure_probability,
            FailureProbability::Improbable
        );
        assert_eq!(assessment.initial_risk, RiskLevel::High);
        assert_eq!(assessment.residual_risk, RiskLevel::High);
    }

    #[test]
    fn test_resolve_orders_by_catalog_not_input() {
        let catalog = Catalog::defaults();
        // Input lists factor 9 (order 10) before factor 2 (order 2); both
        // are Probable, so catalog order decides the driving factor.
        let input = input(
            3,
            &[
                (9, MitigationAction::None),
                (2, MitigationAction::None),
            ],
        );
        let (factors, category) = input.resolve(&catalog).unwrap();
        assert_eq!(category, TargetCategory::Frequent);
        assert_eq!(factors[0].factor_id, 2);
        assert_eq!(factors[1].factor_id, 9);

        let assessment = assess(&factors, category);
        assert_eq!(
            assessment.driving_factor.as_deref(),
            Some("Existem rachaduras ou fendas no tronco ou galhos principais?")
        );
    }

    #[test]
    fn test_resolve_rejects_out_of_range_category() {
        let catalog = Catalog::defaults();
        assert!(input(0, &[]).resolve(&catalog).is_err());
        assert!(input(5, &[]).resolve(&catalog).is_err());
        assert!(input(4, &[]).resolve(&catalog).is_ok());
    }

    #[test]
    fn test_resolve_rejects_unknown_factor() {
        let catalog = Catalog::defaults();
        let err = input(2, &[(99, MitigationAction::None)])
            .resolve(&catalog)
            .unwrap_err();
        assert!(err.to_string().contains("unknown risk factor id 99"));
    }

    #[test]
    fn test_resolve_rejects_duplicate_selection() {
        let catalog = Catalog::defaults();
        let err = input(
            2,
            &[(3, MitigationAction::None), (3, MitigationAction::Monitoring)],
        )
        .resolve(&catalog)
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_resolve_rejects_inactive_factor() {
        let mut factors = Catalog::defaults().factors().to_vec();
        factors[0].active = false;
        let retired_id = factors[0].id;
        let catalog = Catalog::new(factors);
        let err = input(2, &[(retired_id, MitigationAction::None)])
            .resolve(&catalog)
            .unwrap_err();
        assert!(err.to_string().contains("inactive"));
    }

    #[test]
    fn test_assess_input_end_to_end() {
        let catalog = Catalog::defaults();
        // Factor 7 is Imminent; heavy pruning steps it down two ranks.
        let assessment = assess_input(
            &input(4, &[(7, MitigationAction::HeavyPruning)]),
            &catalog,
        )
        .unwrap();
        assert_eq!(assessment.failure_probability, FailureProbability::Imminent);
        assert_eq!(assessment.initial_risk, RiskLevel::Extreme);
        assert_eq!(
            assessment.reduced_failure_probability,
            FailureProbability::Possible
        );
        assert_eq!(assessment.residual_risk, RiskLevel::Extreme);
        assert_eq!(assessment.total_weight_score, 5);
    }

    #[test]
    fn test_unrecognized_mitigations_reported() {
        let doc = r#"{
            "target_category": 2,
            "factors": [
                {"id": 1, "mitigation": "poda_leve"},
                {"id": 2, "mitigation": "explosivos"}
            ]
        }"#;
        let parsed: AssessmentInput = serde_json::from_str(doc).unwrap();
        assert_eq!(parsed.unrecognized_mitigations(), vec![2]);
    }

    #[test]
    fn test_input_rejects_unknown_fields() {
        let doc = r#"{"target_category": 2, "factors": [], "extra": true}"#;
        assert!(serde_json::from_str::<AssessmentInput>(doc).is_err());
    }

    #[test]
    fn test_assessment_serializes_snake_case() {
        let assessment = assess(&[], TargetCategory::Rare);
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["target_category"], 1);
        assert_eq!(json["failure_probability"], "improbable");
        assert_eq!(json["initial_risk"], "low");
        assert!(json.get("driving_factor").is_none());
    }
}
