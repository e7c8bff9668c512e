//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::assessment::Assessment;
use crate::catalog::Catalog;

/// Render one assessment as aligned text.
pub fn render_text(assessment: &Assessment) -> String {
    let mut output = String::new();

    output.push_str("TRAQ Risk Assessment\n");
    output.push_str("--------------------\n");
    push_row(
        &mut output,
        "Target category",
        &format!(
            "{} ({})",
            assessment.target_category.label(),
            assessment.target_category.occupancy()
        ),
    );
    push_row(
        &mut output,
        "Selected factors",
        &assessment.selected_factor_count.to_string(),
    );
    push_row(
        &mut output,
        "Weight score",
        &assessment.total_weight_score.to_string(),
    );
    push_row(
        &mut output,
        "Failure probability",
        assessment.failure_probability.as_str(),
    );
    if let Some(ref driving) = assessment.driving_factor {
        push_row(&mut output, "Driving factor", driving);
    }
    push_row(
        &mut output,
        "Impact probability",
        assessment.impact_probability.as_str(),
    );
    push_row(&mut output, "Initial risk", assessment.initial_risk.as_str());
    push_row(
        &mut output,
        "Residual risk",
        &format!(
            "{} (reduced failure probability: {})",
            assessment.residual_risk.as_str(),
            assessment.reduced_failure_probability.as_str()
        ),
    );

    output
}

/// Render one assessment as JSON.
pub fn render_json(assessment: &Assessment) -> String {
    serde_json::to_string_pretty(assessment).unwrap_or_else(|_| "{}".to_string())
}

/// Render the catalog checklist as aligned text, in display order.
pub fn render_catalog_text(catalog: &Catalog) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<4} {:<6} {:<16} {:<12} {:<7} {}\n",
        "ID", "ORDER", "CATEGORY", "SEVERITY", "WEIGHT", "DESCRIPTION"
    ));

    for factor in catalog.active_factors() {
        let severity = factor
            .severity_input()
            .map(|severity| severity.as_str())
            .unwrap_or("-");
        output.push_str(&format!(
            "{:<4} {:<6} {:<16} {:<12} {:<7} {}\n",
            factor.id,
            factor.display_order,
            truncate_or_pad(&factor.category, 16),
            severity,
            factor.weight,
            factor.description,
        ));
    }

    output
}

/// Render the catalog as JSON.
pub fn render_catalog_json(catalog: &Catalog) -> String {
    serde_json::to_string_pretty(catalog.factors()).unwrap_or_else(|_| "[]".to_string())
}

fn push_row(output: &mut String, label: &str, value: &str) {
    output.push_str(&format!("{:<22} {}\n", label, value));
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let truncated: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        let padding = width - s.chars().count();
        format!("{}{}", s, " ".repeat(padding))
    }
}
