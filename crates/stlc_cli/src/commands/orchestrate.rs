//! Orchestrate command - Run the full flow for one requirement.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use stlc_integrations::{ExecutionStatus, OrchestrateRequest, OrchestrationReport, Orchestrator};

use super::{load_config, print_structured, OutputFormat};

#[derive(Args)]
pub struct OrchestrateArgs {
    /// Requirement summary text (takes precedence over --link)
    #[arg(short, long, required_unless_present = "link")]
    summary: Option<String>,

    /// Jira issue link, e.g. https://acme.atlassian.net/browse/ABC-1
    #[arg(short, long)]
    link: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "STLC_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn execute(args: OrchestrateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let orchestrator = Orchestrator::from_config(config)?;

    let request = OrchestrateRequest {
        requirement_link: args.link,
        requirement_summary: args.summary,
    };
    info!("Orchestrating requirement");

    let report = orchestrator.orchestrate(&request).await?;

    if !print_structured(&report, args.format)? {
        print!("{}", render_text(&report));
    }
    Ok(())
}

fn render_text(report: &OrchestrationReport) -> String {
    let passed = report
        .execution_results
        .iter()
        .flat_map(|entry| entry.values())
        .filter(|status| **status == ExecutionStatus::Passed)
        .count();
    let pending = report.execution_results.len() - passed;

    let mut out = String::new();
    out.push_str(&format!("🚀 Run {}\n", report.run_id));
    out.push_str(&format!("   Requirement: {}\n", report.requirement_summary));
    if let Some(link) = &report.requirement_link {
        out.push_str(&format!("   Link:        {}\n", link));
    }
    out.push_str(&format!(
        "   Test cases:  {}\n",
        report.generated_test_cases.len()
    ));
    out.push_str(&format!(
        "   Automation:  {} ({})\n",
        report.automation_code.framework, report.automation_code.file
    ));

    let cycle = report
        .qmetry_payloads
        .test_cycles
        .first()
        .map(|c| c.cycle_name.as_str())
        .unwrap_or("-");
    let mode = if report.qmetry_payloads.dry_run {
        "dry run"
    } else {
        "live"
    };
    out.push_str(&format!("   QMetry:      {} ({})\n", cycle, mode));
    out.push_str(&format!(
        "   Execution:   {} passed, {} pending\n",
        passed, pending
    ));
    out
}
