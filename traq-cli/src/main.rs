//! TRAQ CLI - tree risk assessment from the command line
//!
//! Plays the checklist-wizard role for scripted use: loads the criteria
//! catalog, validates an assessment input document, runs the engine, and
//! renders the result.

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - Assessment never blocks on catalog availability

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use traq_core::{
    assess, config, render_catalog_json, render_catalog_text, render_json, render_text,
    AssessmentInput, TargetCategory,
};

#[derive(Parser)]
#[command(name = "traq")]
#[command(about = "ISA/TRAQ tree risk assessment (initial and residual risk rating)")]
#[command(version = env!("TRAQ_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a risk assessment from an input document
    Assess {
        /// Path to the assessment input JSON (target category + selected
        /// factor ids with mitigations)
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to a catalog file (default: auto-discover)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Target occupancy category 1-4 (overrides the input document)
        #[arg(long)]
        target_category: Option<i64>,
    },
    /// Inspect the risk-factor catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show catalog resolution
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List the resolved catalog checklist
    List {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to a catalog file (default: auto-discover)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Validate a catalog file without assessing
    Validate {
        /// Path to the catalog file
        #[arg(long)]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show which catalog source would be used
    Show {
        /// Path to a catalog file (default: auto-discover)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            input,
            format,
            catalog,
            target_category,
        } => run_assess(&input, format, catalog.as_deref(), target_category),
        Commands::Catalog { action } => match action {
            CatalogAction::List { format, catalog } => run_catalog_list(format, catalog.as_deref()),
            CatalogAction::Validate { path } => run_catalog_validate(&path),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { catalog } => run_config_show(catalog.as_deref()),
        },
    }
}

fn resolve_catalog(catalog_path: Option<&Path>) -> anyhow::Result<config::ResolvedCatalog> {
    let project_root = std::env::current_dir().context("failed to resolve current directory")?;
    let resolved = config::load_and_resolve(&project_root, catalog_path)?;
    eprintln!("Using {}", resolved.source.describe());
    Ok(resolved)
}

fn run_assess(
    input_path: &Path,
    format: OutputFormat,
    catalog_path: Option<&Path>,
    target_category: Option<i64>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("failed to read assessment input: {}", input_path.display()))?;
    let mut input = AssessmentInput::from_json(&content)
        .with_context(|| format!("failed to parse assessment input: {}", input_path.display()))?;

    if let Some(category) = target_category {
        // Validate the override eagerly so the error names the flag, not
        // the document.
        TargetCategory::try_from(category)
            .map_err(|e| anyhow::anyhow!("invalid --target-category: {}", e))?;
        input.target_category = category;
    }

    for factor_id in input.unrecognized_mitigations() {
        eprintln!(
            "warning: factor {} carries an unrecognized mitigation action; \
             treating it as a full reduction to Improbable",
            factor_id
        );
    }

    let resolved = resolve_catalog(catalog_path)?;
    let (factors, category) = input
        .resolve(&resolved.catalog)
        .context("invalid assessment input")?;
    let assessment = assess(&factors, category);

    match format {
        OutputFormat::Text => print!("{}", render_text(&assessment)),
        OutputFormat::Json => println!("{}", render_json(&assessment)),
    }

    Ok(())
}

fn run_catalog_list(format: OutputFormat, catalog_path: Option<&Path>) -> anyhow::Result<()> {
    let resolved = resolve_catalog(catalog_path)?;
    match format {
        OutputFormat::Text => print!("{}", render_catalog_text(&resolved.catalog)),
        OutputFormat::Json => println!("{}", render_catalog_json(&resolved.catalog)),
    }
    Ok(())
}

fn run_catalog_validate(path: &Path) -> anyhow::Result<()> {
    let document = config::load_catalog_file(path)?;
    println!(
        "{} is valid ({} risk factors)",
        path.display(),
        document.factors.len()
    );
    Ok(())
}

fn run_config_show(catalog_path: Option<&Path>) -> anyhow::Result<()> {
    let project_root = std::env::current_dir().context("failed to resolve current directory")?;
    let resolved = config::load_and_resolve(&project_root, catalog_path)?;
    println!("Catalog source: {}", resolved.source.describe());
    println!("Risk factors:   {}", resolved.catalog.len());
    println!(
        "Active factors: {}",
        resolved.catalog.active_factors().count()
    );
    Ok(())
}
