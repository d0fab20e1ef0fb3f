//! Generate command - Build the test catalog and automation code.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use stlc_core::{generate_artifacts, Artifacts, Category};

use super::{OutputFormat, RequirementInput};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    input: RequirementInput,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print only the automation code
    #[arg(long)]
    code_only: bool,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let requirement = args.input.to_requirement()?;
    info!(
        "Generating test artifacts for {}",
        requirement.key_or_default()
    );

    let artifacts = generate_artifacts(&requirement);

    if args.code_only {
        print!("{}", artifacts.automation_code.code);
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", artifacts.to_json().context("Failed to serialize artifacts")?);
        }
        OutputFormat::Yaml => {
            print!("{}", artifacts.to_yaml().context("Failed to serialize artifacts")?);
        }
        OutputFormat::Text => print!("{}", render_text(&artifacts)),
    }
    Ok(())
}

fn render_text(artifacts: &Artifacts) -> String {
    let mut out = String::new();
    out.push_str(&format!("🧪 Test artifacts for: {}\n", artifacts.requirement_summary));
    out.push_str(&format!(
        "   Domain: {} | {} test cases | {} ({})\n\n",
        artifacts.analysis.domain,
        artifacts.test_cases.len(),
        artifacts.automation_code.framework,
        artifacts.automation_code.file
    ));

    for category in Category::ALL {
        let cases: Vec<_> = artifacts.cases_in(category).collect();
        out.push_str(&format!("{} ({})\n", category.as_str().to_uppercase(), cases.len()));
        for tc in cases {
            let marker = if tc.is_automated() { "auto" } else { "manual" };
            out.push_str(&format!("   {} [{}] {}\n", tc.id, marker, tc.title));
        }
    }

    out.push_str(&format!("\n📄 {}\n\n", artifacts.automation_code.file));
    out.push_str(&artifacts.automation_code.code);
    out
}
