//! Mitigation actions, failure-probability reduction, residual risk
//!
//! Mitigation reduces risk strictly at the failure-probability level: every
//! selected factor's probability is reduced independently, the single worst
//! reduced probability is taken, and the risk pipeline runs once on it.
//! Residual risk is never combined from per-factor risk ratings.

use crate::assessment::SelectedFactor;
use crate::matrices::run_risk_pipeline;
use crate::scales::{FailureProbability, ImpactProbability, RiskLevel, TargetCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mitigation action chosen for one selected factor.
///
/// Wire names are the snake_case keys the field application has always
/// stored, so existing assessment records deserialize unchanged. Unknown
/// stored values map to `Unrecognized` instead of failing deserialization
/// (deserialization goes through `From<String>`, so any string is
/// accepted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum MitigationAction {
    #[default]
    #[serde(rename = "nenhuma")]
    None,
    #[serde(rename = "monitoramento")]
    Monitoring,
    #[serde(rename = "poda_leve")]
    LightPruning,
    #[serde(rename = "poda_pesada")]
    HeavyPruning,
    #[serde(rename = "remocao_galhos")]
    BranchRemoval,
    #[serde(rename = "instalacao_cabos")]
    CableInstallation,
    #[serde(rename = "remocao_arvore")]
    TreeRemoval,
    /// Catch-all for action values this version does not model. Reduction
    /// treats it as a drastic unmodeled intervention and floors to
    /// `Improbable`; callers should surface a warning when they see one,
    /// since it usually means an upstream enum mismatch.
    #[serde(rename = "desconhecida")]
    Unrecognized,
}

impl From<String> for MitigationAction {
    fn from(value: String) -> Self {
        MitigationAction::from_wire(&value)
    }
}

impl MitigationAction {
    /// The modeled actions, in checklist display order.
    pub const ALL: [MitigationAction; 7] = [
        MitigationAction::None,
        MitigationAction::Monitoring,
        MitigationAction::LightPruning,
        MitigationAction::HeavyPruning,
        MitigationAction::BranchRemoval,
        MitigationAction::CableInstallation,
        MitigationAction::TreeRemoval,
    ];

    /// The stored snake_case key for this action.
    pub fn wire_name(&self) -> &'static str {
        match self {
            MitigationAction::None => "nenhuma",
            MitigationAction::Monitoring => "monitoramento",
            MitigationAction::LightPruning => "poda_leve",
            MitigationAction::HeavyPruning => "poda_pesada",
            MitigationAction::BranchRemoval => "remocao_galhos",
            MitigationAction::CableInstallation => "instalacao_cabos",
            MitigationAction::TreeRemoval => "remocao_arvore",
            MitigationAction::Unrecognized => "desconhecida",
        }
    }

    /// Parse a stored action key. Anything outside the modeled set maps to
    /// `Unrecognized`, never an error.
    pub fn from_wire(value: &str) -> MitigationAction {
        MitigationAction::ALL
            .into_iter()
            .find(|action| action.wire_name() == value)
            .unwrap_or(MitigationAction::Unrecognized)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MitigationAction::None => "Nenhuma",
            MitigationAction::Monitoring => "Monitoramento Periódico",
            MitigationAction::LightPruning => "Poda Leve",
            MitigationAction::HeavyPruning => "Poda Pesada",
            MitigationAction::BranchRemoval => "Remoção de Galhos Críticos",
            MitigationAction::CableInstallation => "Instalação de Cabos de Suporte",
            MitigationAction::TreeRemoval => "Remoção da Árvore",
            MitigationAction::Unrecognized => "Ação não reconhecida",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MitigationAction::None => "Não requer ação imediata",
            MitigationAction::Monitoring => "Acompanhar evolução do risco",
            MitigationAction::LightPruning => "Remoção de galhos pequenos",
            MitigationAction::HeavyPruning => "Redução significativa da copa",
            MitigationAction::BranchRemoval => "Eliminar partes específicas de risco",
            MitigationAction::CableInstallation => "Reforço estrutural",
            MitigationAction::TreeRemoval => "Eliminação completa do risco",
            MitigationAction::Unrecognized => "Valor de ação fora do catálogo",
        }
    }

    /// Whether this action changes failure probability at all.
    pub fn reduces_probability(&self) -> bool {
        !matches!(
            self,
            MitigationAction::None | MitigationAction::Monitoring
        )
    }
}

impl fmt::Display for MitigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reduce a failure probability according to the chosen mitigation.
///
/// - `None` / `Monitoring`: unchanged
/// - `LightPruning`: one severity step down
/// - `HeavyPruning` / `BranchRemoval` / `CableInstallation`: two steps down
/// - `TreeRemoval`: `Improbable` unconditionally
/// - `Unrecognized`: `Improbable` (conservative floor, see the variant docs)
///
/// All reductions clamp at `Improbable`; the result is never more severe
/// than the input.
pub fn reduce_failure_probability(
    severity: FailureProbability,
    action: MitigationAction,
) -> FailureProbability {
    match action {
        MitigationAction::None | MitigationAction::Monitoring => severity,
        MitigationAction::LightPruning => severity.step_down(1),
        MitigationAction::HeavyPruning
        | MitigationAction::BranchRemoval
        | MitigationAction::CableInstallation => severity.step_down(2),
        MitigationAction::TreeRemoval | MitigationAction::Unrecognized => {
            FailureProbability::Improbable
        }
    }
}

/// Residual (post-mitigation) outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidualRisk {
    pub residual_risk: RiskLevel,
    /// Highest failure probability remaining after per-factor reduction.
    pub worst_reduced_severity: FailureProbability,
}

/// Aggregate residual risk across all selected factors.
///
/// Each factor's severity is reduced independently by its own mitigation;
/// the worst reduced severity feeds one risk-pipeline pass. Factors without
/// a severity contribute nothing, and an empty selection aggregates as
/// `Improbable`.
pub fn aggregate_residual_risk(
    factors: &[SelectedFactor],
    impact: ImpactProbability,
    category: TargetCategory,
) -> ResidualRisk {
    let worst_reduced_severity = factors
        .iter()
        .filter_map(|f| {
            f.severity
                .map(|severity| reduce_failure_probability(severity, f.mitigation))
        })
        .max()
        .unwrap_or(FailureProbability::Improbable);

    ResidualRisk {
        residual_risk: run_risk_pipeline(worst_reduced_severity, impact, category),
        worst_reduced_severity,
    }
}
