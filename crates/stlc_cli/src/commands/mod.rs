//! CLI command definitions.
//!
//! Each subcommand covers one stage of the flow, from keyword analysis up to
//! the full orchestration served over HTTP.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use stlc_core::Requirement;
use stlc_integrations::IntegrationConfig;

pub mod analyze;
pub mod generate;
pub mod orchestrate;
pub mod serve;

/// STLC Forge - requirement to test artifact generator
#[derive(Parser)]
#[command(name = "stlc")]
#[command(version, about = "STLC Forge - turn requirements into test catalogs and automation stubs")]
#[command(long_about = r#"
STLC Forge analyzes a free-text requirement, derives a categorized test
catalog, renders Cypress or Playwright automation code, and prepares QMetry
payloads with execution statuses.

COMMANDS:
  analyze      → Show the keyword analysis of a requirement
  generate     → Generate test cases and automation code
  orchestrate  → Run the full flow (Jira lookup, QMetry payloads, statuses)
  serve        → Expose the full flow as POST /api/orchestrate

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a requirement without generating tests
    Analyze(analyze::AnalyzeArgs),

    /// Generate the test catalog and automation code for a requirement
    Generate(generate::GenerateArgs),

    /// Run the complete orchestration for a summary or issue link
    Orchestrate(orchestrate::OrchestrateArgs),

    /// Start the HTTP server
    Serve(serve::ServeArgs),
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Requirement given inline or read from a file.
#[derive(Args, Debug, Clone)]
pub struct RequirementInput {
    /// Requirement summary text
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub summary: Option<String>,

    /// Read the requirement summary from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Requirement key used for test case identifiers
    #[arg(short, long)]
    pub key: Option<String>,
}

impl RequirementInput {
    /// Build the requirement this input describes.
    pub fn to_requirement(&self) -> Result<Requirement> {
        let summary = match (&self.summary, &self.file) {
            (Some(summary), _) => summary.clone(),
            (None, Some(path)) => read_summary(path)?,
            (None, None) => anyhow::bail!("Missing argument: provide a summary or --file"),
        };

        let requirement = Requirement::from_text(summary);
        Ok(match &self.key {
            Some(key) => requirement.with_key(key.clone()),
            None => requirement,
        })
    }
}

fn read_summary(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Requirement file not found or unreadable: {}", path.display()))?;
    Ok(content.trim().to_string())
}

/// Load configuration from an optional file and the environment.
pub fn load_config(path: Option<&Path>) -> Result<IntegrationConfig> {
    IntegrationConfig::load(path).context("Failed to load configuration")
}

/// Print a value as JSON or YAML. Returns `false` for text output, which
/// each command renders on its own.
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(value)?);
            Ok(true)
        }
        OutputFormat::Text => Ok(false),
    }
}

/// Join labels for text output, with a dash for empty sets.
pub fn join_or_dash<T: AsRef<str>>(items: &[T]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}
