//! TRAQ likelihood and risk-rating matrices
//!
//! Both tables are fixed by the ISA TRAQ methodology and reproduced
//! cell-for-cell; neither reduces to a formula (note `Imminent` over a
//! `VeryLow` impact is only `Unlikely`, not `VeryLikely`).
//!
//! Global invariants enforced:
//! - Deterministic lookups, no state
//! - Non-decreasing in failure probability for fixed impact and category

use crate::resolver::consequence;
use crate::scales::{
    Consequence, EventLikelihood, FailureProbability, ImpactProbability, RiskLevel, TargetCategory,
};

/// Event-likelihood matrix: failure probability x impact probability.
///
/// Rows ordered `Improbable..Imminent`, columns `VeryLow..High`.
const EVENT_LIKELIHOOD: [[EventLikelihood; 4]; 4] = {
    use crate::scales::EventLikelihood::{Likely, Unlikely, VeryLikely, VeryUnlikely};
    [
        [VeryUnlikely, VeryUnlikely, Unlikely, Unlikely],
        [VeryUnlikely, Unlikely, Likely, Likely],
        [Unlikely, Likely, VeryLikely, VeryLikely],
        [Unlikely, VeryLikely, VeryLikely, VeryLikely],
    ]
};

/// Risk-rating matrix: event likelihood x consequence.
///
/// Rows ordered `VeryUnlikely..VeryLikely`, columns `Minimal..Severe`. The
/// classifier only produces the upper two consequence columns today; the
/// lower columns are part of the published matrix and kept for catalog
/// growth.
const RISK_RATING: [[RiskLevel; 4]; 4] = {
    use crate::scales::RiskLevel::{Extreme, High, Low, Moderate};
    [
        [Low, Low, Low, Moderate],
        [Low, Low, Moderate, High],
        [Low, Moderate, High, Extreme],
        [Moderate, High, Extreme, Extreme],
    ]
};

/// Combine failure probability and impact probability into the likelihood
/// that failure occurs and strikes the target.
pub fn event_likelihood(
    failure: FailureProbability,
    impact: ImpactProbability,
) -> EventLikelihood {
    EVENT_LIKELIHOOD[failure as usize][impact as usize]
}

/// Combine event likelihood and consequence into the final risk rating.
pub fn rate_risk(likelihood: EventLikelihood, consequence: Consequence) -> RiskLevel {
    RISK_RATING[likelihood as usize][consequence as usize]
}

/// The full rating pipeline: likelihood matrix, consequence classification,
/// risk-rating matrix. Called once with the raw failure probability for
/// initial risk and once with the reduced probability for residual risk.
pub fn run_risk_pipeline(
    failure: FailureProbability,
    impact: ImpactProbability,
    category: TargetCategory,
) -> RiskLevel {
    rate_risk(event_likelihood(failure, impact), consequence(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::Consequence::{Minimal, Minor, Severe, Significant};
    use crate::scales::EventLikelihood::{Likely, Unlikely, VeryLikely, VeryUnlikely};
    use crate::scales::FailureProbability::{Imminent, Improbable, Possible, Probable};
    use crate::scales::ImpactProbability::{High as HighImpact, Low as LowImpact, Medium, VeryLow};

    #[test]
    fn test_event_likelihood_matrix_verbatim() {
        let expected = [
            (Improbable, [VeryUnlikely, VeryUnlikely, Unlikely, Unlikely]),
            (Possible, [VeryUnlikely, Unlikely, Likely, Likely]),
            (Probable, [Unlikely, Likely, VeryLikely, VeryLikely]),
            (Imminent, [Unlikely, VeryLikely, VeryLikely, VeryLikely]),
        ];
        let impacts = [VeryLow, LowImpact, Medium, HighImpact];
        for (failure, row) in expected {
            for (impact, want) in impacts.iter().zip(row) {
                assert_eq!(
                    event_likelihood(failure, *impact),
                    want,
                    "likelihood({failure:?}, {impact:?})"
                );
            }
        }
    }

    // The published matrix is asymmetric on purpose: an imminent failure
    // over an almost-never-occupied target stays merely Unlikely.
    #[test]
    fn test_imminent_very_low_asymmetry() {
        assert_eq!(event_likelihood(Imminent, VeryLow), Unlikely);
        assert_eq!(event_likelihood(Probable, Medium), VeryLikely);
    }

    #[test]
    fn test_risk_rating_matrix_verbatim() {
        use crate::scales::RiskLevel::{Extreme, High, Low, Moderate};
        let expected = [
            (VeryLikely, [Moderate, High, Extreme, Extreme]),
            (Likely, [Low, Moderate, High, Extreme]),
            (Unlikely, [Low, Low, Moderate, High]),
            (VeryUnlikely, [Low, Low, Low, Moderate]),
        ];
        let consequences = [Minimal, Minor, Significant, Severe];
        for (likelihood, row) in expected {
            for (cons, want) in consequences.iter().zip(row) {
                assert_eq!(
                    rate_risk(likelihood, *cons),
                    want,
                    "rating({likelihood:?}, {cons:?})"
                );
            }
        }
    }

    #[test]
    fn test_pipeline_monotonic_in_failure_probability() {
        for category in TargetCategory::ALL {
            for impact in [VeryLow, LowImpact, Medium, HighImpact] {
                let mut previous = None;
                for failure in [Improbable, Possible, Probable, Imminent] {
                    let risk = run_risk_pipeline(failure, impact, category);
                    if let Some(prev) = previous {
                        assert!(
                            risk >= prev,
                            "risk must not decrease with severity ({failure:?}, {impact:?}, {category:?})"
                        );
                    }
                    previous = Some(risk);
                }
            }
        }
    }

    #[test]
    fn test_pipeline_extremes() {
        use crate::scales::RiskLevel::{Extreme, Low};
        assert_eq!(
            run_risk_pipeline(Improbable, VeryLow, TargetCategory::Rare),
            Low
        );
        assert_eq!(
            run_risk_pipeline(Imminent, HighImpact, TargetCategory::Constant),
            Extreme
        );
    }
}
