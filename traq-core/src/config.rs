//! Catalog configuration loading
//!
//! The criteria catalog normally comes from a JSON file maintained by the
//! back office; assessment must never block on its availability. Search
//! order:
//! 1. Explicit path (--catalog CLI flag)
//! 2. `.traqrc.json` in the project root
//! 3. `traq.config.json` in the project root
//! 4. Built-in default catalog
//!
//! A missing or empty source falls back to the defaults (with a stderr
//! warning for the empty case). A present but malformed file is a hard
//! error: silently swapping a corrupt catalog for defaults would hide data
//! bugs.

use crate::catalog::{Catalog, RiskFactor};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Upper bound for legacy weights, matching the checklist scale.
const MAX_WEIGHT: u32 = 10;

/// Catalog document as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
}

/// Where the resolved catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Explicit path passed by the caller.
    Explicit(PathBuf),
    /// Discovered in the project root.
    Discovered(PathBuf),
    /// Built-in default catalog.
    BuiltIn,
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Explicit(path) => format!("catalog file {}", path.display()),
            CatalogSource::Discovered(path) => {
                format!("discovered catalog {}", path.display())
            }
            CatalogSource::BuiltIn => "built-in default catalog".to_string(),
        }
    }
}

/// A catalog ready for assessment, with its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog: Catalog,
    pub source: CatalogSource,
}

impl CatalogDocument {
    /// Validate the document for logical errors.
    pub fn validate(&self) -> Result<()> {
        let mut seen_ids = HashSet::new();
        for factor in &self.factors {
            if !seen_ids.insert(factor.id) {
                anyhow::bail!("duplicate risk factor id {}", factor.id);
            }
            if factor.description.trim().is_empty() {
                anyhow::bail!("risk factor {} has an empty description", factor.id);
            }
            if factor.category.trim().is_empty() {
                anyhow::bail!("risk factor {} has an empty category", factor.id);
            }
            if factor.weight > MAX_WEIGHT {
                anyhow::bail!(
                    "risk factor {} weight must be at most {} (got {})",
                    factor.id,
                    MAX_WEIGHT,
                    factor.weight
                );
            }
            if factor.requires_probability_input && factor.failure_probability.is_none() {
                anyhow::bail!(
                    "risk factor {} requires probability input but defines no failure_probability",
                    factor.id
                );
            }
        }
        Ok(())
    }

    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.factors)
    }
}

/// Load and validate a catalog document from an explicit file path.
pub fn load_catalog_file(path: &Path) -> Result<CatalogDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    let document: CatalogDocument = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog file: {}", path.display()))?;

    document
        .validate()
        .with_context(|| format!("invalid catalog in: {}", path.display()))?;

    Ok(document)
}

/// Discover a catalog file in the project root.
///
/// Returns `None` if neither `.traqrc.json` nor `traq.config.json` exists
/// (use the built-in defaults).
pub fn discover_catalog(project_root: &Path) -> Result<Option<(CatalogDocument, PathBuf)>> {
    for name in [".traqrc.json", "traq.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let document = load_catalog_file(&path)?;
            return Ok(Some((document, path)));
        }
    }
    Ok(None)
}

/// Resolve the catalog for an assessment run.
///
/// If `catalog_path` is provided, loads from that file. Otherwise discovers
/// a catalog in `project_root`. A source that loads but contains no factors
/// falls back to the defaults with a warning, so an empty back-office
/// export never blocks field work.
pub fn load_and_resolve(project_root: &Path, catalog_path: Option<&Path>) -> Result<ResolvedCatalog> {
    let (document, source) = if let Some(path) = catalog_path {
        (
            load_catalog_file(path)?,
            CatalogSource::Explicit(path.to_path_buf()),
        )
    } else {
        match discover_catalog(project_root)? {
            Some((document, path)) => (document, CatalogSource::Discovered(path)),
            None => {
                return Ok(ResolvedCatalog {
                    catalog: Catalog::defaults(),
                    source: CatalogSource::BuiltIn,
                })
            }
        }
    };

    if document.factors.is_empty() {
        eprintln!(
            "warning: {} contains no risk factors, using built-in defaults",
            source.describe()
        );
        return Ok(ResolvedCatalog {
            catalog: Catalog::defaults(),
            source: CatalogSource::BuiltIn,
        });
    }

    Ok(ResolvedCatalog {
        catalog: document.into_catalog(),
        source,
    })
}
