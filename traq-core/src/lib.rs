//! TRAQ core library - ISA tree risk assessment engine
//!
//! Deterministic scoring pipeline from a checklist of observed tree defects
//! to a qualitative risk rating and a post-mitigation residual rating.

#![deny(warnings)]

// Global invariants enforced in this crate:
// - The engine is pure: no I/O, no global state, no clocks, threads, or async
// - Classification scales are explicit total orders, never compared by string
// - The likelihood and risk-rating matrices are reproduced cell-for-cell
// - Mitigation reduces failure probability only; risk is rated in one pass
// - Identical input yields byte-for-byte identical output

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod matrices;
pub mod mitigation;
pub mod report;
pub mod resolver;
pub mod scales;

pub use assessment::{assess, assess_input, Assessment, AssessmentInput, SelectedFactor};
pub use catalog::{Catalog, RiskFactor};
pub use config::{load_and_resolve, CatalogSource, ResolvedCatalog};
pub use matrices::{event_likelihood, rate_risk, run_risk_pipeline};
pub use mitigation::{
    aggregate_residual_risk, reduce_failure_probability, MitigationAction, ResidualRisk,
};
pub use report::{render_catalog_json, render_catalog_text, render_json, render_text};
pub use resolver::{
    consequence, impact_probability, resolve_failure_probability, ResolvedProbability,
};
pub use scales::{
    Consequence, EventLikelihood, FailureProbability, ImpactProbability, RiskLevel, TargetCategory,
};
