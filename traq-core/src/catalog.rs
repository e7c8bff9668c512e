//! Risk-factor catalog
//!
//! The checklist of observable tree defects an assessor can mark as
//! present. Leaf data: each factor carries the failure-probability severity
//! it implies, plus legacy weight and display metadata. The catalog is
//! always passed to the engine explicitly; there is no global state.

use crate::scales::FailureProbability;
use serde::{Deserialize, Serialize};

/// One observable defect criterion in the assessment checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RiskFactor {
    pub id: u32,
    /// Checklist grouping (e.g. "Tronco", "Raízes").
    pub category: String,
    pub description: String,
    /// Legacy checklist weight. Informational only: summed into the weight
    /// score for report compatibility, never used in probability logic.
    pub weight: u32,
    /// Severity this defect implies when present. Absent for informational
    /// checklist items that carry no probability signal.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failure_probability: Option<FailureProbability>,
    pub display_order: u32,
    /// Whether this factor participates in failure-probability resolution.
    /// Factors with `false` are checklist-only and contribute nothing to
    /// severity, regardless of any `failure_probability` value.
    #[serde(default = "default_true")]
    pub requires_probability_input: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl RiskFactor {
    /// The severity this factor feeds into resolution, or `None` when the
    /// factor is informational. Informational factors must be excluded from
    /// resolution, not treated as `Improbable`.
    pub fn severity_input(&self) -> Option<FailureProbability> {
        if self.requires_probability_input {
            self.failure_probability
        } else {
            None
        }
    }
}

/// An ordered collection of risk factors.
///
/// Factors are kept sorted by `display_order` (ties broken by id) so the
/// first-match tie-break in severity resolution is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    factors: Vec<RiskFactor>,
}

impl Catalog {
    pub fn new(mut factors: Vec<RiskFactor>) -> Self {
        factors.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.id.cmp(&b.id))
        });
        Catalog { factors }
    }

    /// The built-in default catalog, used whenever no external catalog
    /// source is available.
    pub fn defaults() -> Self {
        Catalog::new(default_factors())
    }

    /// All factors in display order, including inactive ones.
    pub fn factors(&self) -> &[RiskFactor] {
        &self.factors
    }

    /// Active factors in display order: the checklist an assessor sees.
    pub fn active_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.factors.iter().filter(|f| f.active)
    }

    pub fn get(&self, id: u32) -> Option<&RiskFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Default TRAQ criteria, mirroring the reference checklist shipped with
/// the field application.
fn default_factors() -> Vec<RiskFactor> {
    use crate::scales::FailureProbability::{Imminent, Possible, Probable};

    let entries: [(u32, &str, &str, u32, FailureProbability, u32); 17] = [
        (
            1,
            "Copa e Galhos",
            "Galhos > 5 cm necessitando poda (mortos/pendurados)",
            3,
            Possible,
            1,
        ),
        (
            2,
            "Tronco",
            "Existem rachaduras ou fendas no tronco ou galhos principais?",
            5,
            Probable,
            2,
        ),
        (
            3,
            "Tronco",
            "Há sinais de apodrecimento (madeira esponjosa, fungos, cavidades)?",
            5,
            Probable,
            3,
        ),
        (
            17,
            "Tronco",
            "Cancros no tronco principal (estrutura comprometida)",
            3,
            Probable,
            4,
        ),
        (
            4,
            "Estrutura",
            "A árvore possui uniões em \"V\" com casca inclusa?",
            4,
            Possible,
            5,
        ),
        (
            5,
            "Copa e Galhos",
            "Há galhos cruzados ou friccionando entre si?",
            2,
            Possible,
            6,
        ),
        (
            6,
            "Copa e Galhos",
            "A árvore apresenta copa assimétrica (>30% de desequilíbrio)?",
            2,
            Possible,
            7,
        ),
        (
            7,
            "Estabilidade",
            "Há sinais de inclinação anormal ou recente?",
            5,
            Imminent,
            8,
        ),
        (
            8,
            "Alvo",
            "A árvore está próxima a vias públicas ou áreas de circulação?",
            5,
            Possible,
            9,
        ),
        (
            9,
            "Alvo",
            "Há risco de queda sobre edificações, veículos ou pessoas?",
            5,
            Probable,
            10,
        ),
        (
            10,
            "Conflitos",
            "A árvore interfere em redes elétricas ou estruturas urbanas?",
            4,
            Possible,
            11,
        ),
        (
            11,
            "Espécie",
            "A espécie é conhecida por apresentar alta taxa de falhas?",
            3,
            Possible,
            12,
        ),
        (
            12,
            "Histórico",
            "A árvore já sofreu podas drásticas ou brotação epicórmica intensa?",
            3,
            Possible,
            13,
        ),
        (
            13,
            "Raízes",
            "Há calçadas rachadas ou tubulações expostas próximas à base?",
            3,
            Possible,
            14,
        ),
        (
            14,
            "Raízes",
            "Há perda visível de raízes de sustentação (>40%)?",
            5,
            Imminent,
            15,
        ),
        (
            15,
            "Raízes",
            "Há sinais de compactação ou asfixia radicular?",
            3,
            Possible,
            16,
        ),
        (
            16,
            "Raízes",
            "Há apodrecimento em raízes primárias (>3 cm)?",
            5,
            Probable,
            17,
        ),
    ];

    entries
        .into_iter()
        .map(
            |(id, category, description, weight, severity, order)| RiskFactor {
                id,
                category: category.to_string(),
                description: description.to_string(),
                weight,
                failure_probability: Some(severity),
                display_order: order,
                requires_probability_input: true,
                active: true,
            },
        )
        .collect()
}
