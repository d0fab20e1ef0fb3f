//! Analyze command - Show the keyword analysis of a requirement.

use anyhow::Result;
use clap::Args;
use tracing::info;

use stlc_core::{Analysis, RequirementAnalyzer};

use super::{join_or_dash, print_structured, OutputFormat, RequirementInput};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    input: RequirementInput,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let requirement = args.input.to_requirement()?;
    let summary = requirement.summary_or_default();
    info!("Analyzing requirement: {}", summary);

    let analysis = RequirementAnalyzer::new().analyze(summary);

    if !print_structured(&analysis, args.format)? {
        print!("{}", render_text(summary, &analysis));
    }
    Ok(())
}

fn render_text(summary: &str, analysis: &Analysis) -> String {
    let functionality: Vec<&str> = analysis.functionality.iter().map(|f| f.as_str()).collect();

    let mut out = String::new();
    out.push_str(&format!("🔎 Requirement: {}\n\n", summary));
    out.push_str(&format!("   Domain:        {}\n", analysis.domain));
    out.push_str(&format!("   Functionality: {}\n", join_or_dash(&functionality)));
    out.push_str(&format!("   Input fields:  {}\n", join_or_dash(&analysis.input_fields)));
    out.push_str(&format!("   User actions:  {}\n", join_or_dash(&analysis.user_actions)));
    out.push_str(&format!("   Security:      {}\n", join_or_dash(&analysis.security_concerns)));
    out.push_str(&format!("   Performance:   {}\n", join_or_dash(&analysis.performance_concerns)));
    out.push_str(&format!("   Integrations:  {}\n", join_or_dash(&analysis.integrations)));
    out.push_str(&format!("   Error paths:   {}\n", join_or_dash(&analysis.error_scenarios)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let analysis = RequirementAnalyzer::new().analyze("User login with username and password");
        let text = render_text("User login with username and password", &analysis);

        assert!(text.contains("Domain:        authentication\n"));
        assert!(text.contains("Functionality: general\n"));
        assert!(text.contains("Input fields:  username, password\n"));
        assert!(text.contains("Integrations:  -\n"));
    }
}
