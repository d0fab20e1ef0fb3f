//! End-to-end orchestration of one requirement.
//!
//! Resolves the requirement (inline text or issue link), runs the core
//! pipeline, and attaches the QMetry payloads and execution statuses.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use stlc_core::{ArtifactGenerator, AutomationArtifact, Requirement, TestCase, DEFAULT_KEY};

use crate::config::IntegrationConfig;
use crate::error::{IntegrationError, IntegrationResult};
use crate::executor::{map_statuses, ExecutionResult};
use crate::jira::{IssueTracker, JiraClient};
use crate::qmetry::{build_payloads, QmetryPayloads};

/// Inbound request. Empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrchestrateRequest {
    #[serde(default)]
    pub requirement_link: Option<String>,
    #[serde(default)]
    pub requirement_summary: Option<String>,
}

impl OrchestrateRequest {
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Self {
            requirement_summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            requirement_link: Some(link.into()),
            ..Self::default()
        }
    }

    pub fn link(&self) -> Option<&str> {
        non_empty(&self.requirement_link)
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty(&self.requirement_summary)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Result of one orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrchestrationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub requirement_link: Option<String>,
    pub requirement_summary: String,
    pub generated_test_cases: Vec<TestCase>,
    pub automation_code: AutomationArtifact,
    pub qmetry_payloads: QmetryPayloads,
    pub execution_results: Vec<ExecutionResult>,
}

/// Sequences requirement resolution, artifact generation, and the adapters.
pub struct Orchestrator {
    tracker: Arc<dyn IssueTracker>,
    config: IntegrationConfig,
    generator: ArtifactGenerator,
}

impl Orchestrator {
    /// Build an orchestrator backed by the Jira client.
    pub fn from_config(config: IntegrationConfig) -> IntegrationResult<Self> {
        let timeout = Duration::from_secs(config.http.request_timeout_secs);
        let client = JiraClient::new(config.jira.clone(), timeout)?;
        if !client.is_live() {
            info!("Jira credentials not configured, link lookups will use mock requirements");
        }
        Ok(Self::with_tracker(Arc::new(client), config))
    }

    /// Build an orchestrator around any issue tracker.
    pub fn with_tracker(tracker: Arc<dyn IssueTracker>, config: IntegrationConfig) -> Self {
        Self {
            tracker,
            config,
            generator: ArtifactGenerator::new(),
        }
    }

    /// Resolve the requirement a request refers to. An inline summary wins
    /// over a link.
    pub async fn resolve(&self, request: &OrchestrateRequest) -> IntegrationResult<Requirement> {
        if let Some(summary) = request.summary() {
            debug!("Using inline requirement summary");
            return Ok(Requirement::from_text(summary).with_key(DEFAULT_KEY));
        }
        match request.link() {
            Some(link) => {
                debug!("Resolving requirement from {}", link);
                Ok(self.tracker.fetch_requirement(link).await)
            }
            None => Err(IntegrationError::MissingRequirement),
        }
    }

    /// Run the whole flow for one request.
    pub async fn orchestrate(&self, request: &OrchestrateRequest) -> IntegrationResult<OrchestrationReport> {
        let requirement = self.resolve(request).await?;
        let artifacts = self.generator.generate(&requirement);

        let qmetry_payloads = build_payloads(&requirement, &artifacts.test_cases, &self.config.qmetry);
        let execution_results = map_statuses(&artifacts.test_cases);

        let report = OrchestrationReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            requirement_link: request.link().map(str::to_string),
            requirement_summary: artifacts.requirement_summary,
            generated_test_cases: artifacts.test_cases,
            automation_code: artifacts.automation_code,
            qmetry_payloads,
            execution_results,
        };

        info!(
            "Run {}: {} test cases for {} ({:?} requirement)",
            report.run_id,
            report.generated_test_cases.len(),
            requirement.key_or_default(),
            requirement.source
        );

        Ok(report)
    }
}
