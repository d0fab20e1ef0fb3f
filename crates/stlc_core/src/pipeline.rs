//! Requirement-to-artifacts pipeline.

use tracing::debug;

use crate::analyzer::RequirementAnalyzer;
use crate::automation::AutomationCodeGenerator;
use crate::catalog::TestCatalogGenerator;
use crate::models::{Artifacts, Requirement};

/// Runs analysis, catalog generation, and code generation in order.
#[derive(Debug, Clone, Default)]
pub struct ArtifactGenerator {
    analyzer: RequirementAnalyzer,
    catalog: TestCatalogGenerator,
    automation: AutomationCodeGenerator,
}

impl ArtifactGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the full artifact set for a requirement.
    pub fn generate(&self, requirement: &Requirement) -> Artifacts {
        let summary = requirement.summary_or_default();
        let id_prefix = requirement.id_prefix();

        let analysis = self.analyzer.analyze(summary);
        let test_cases = self.catalog.generate(&id_prefix, &analysis);
        let automation_code = self
            .automation
            .generate(&id_prefix, summary, &test_cases, &analysis);

        debug!(
            "Generated {} test cases for {} ({} automation)",
            test_cases.len(),
            requirement.key_or_default(),
            automation_code.framework
        );

        Artifacts {
            requirement_summary: summary.to_string(),
            test_cases,
            automation_code,
            analysis,
        }
    }
}

/// Shorthand for [`ArtifactGenerator::generate`].
pub fn generate_artifacts(requirement: &Requirement) -> Artifacts {
    ArtifactGenerator::new().generate(requirement)
}
