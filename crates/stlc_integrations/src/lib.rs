//! # stlc_integrations
//!
//! Everything around the deterministic core: configuration, the Jira issue
//! tracker adapter, QMetry payloads, execution status mapping, and the
//! [`Orchestrator`] that sequences them for one request.
//!
//! Adapters receive their settings through [`IntegrationConfig`]; none of
//! them reads the environment directly.

pub mod config;
pub mod error;
pub mod executor;
pub mod jira;
pub mod orchestrator;
pub mod qmetry;

pub use config::{HttpConfig, IntegrationConfig, JiraConfig, QmetryConfig};
pub use error::{IntegrationError, IntegrationResult};
pub use executor::{map_statuses, ExecutionResult, ExecutionStatus};
pub use jira::{parse_issue_key, IssueTracker, JiraClient};
pub use orchestrator::{OrchestrateRequest, OrchestrationReport, Orchestrator};
pub use qmetry::{build_payloads, QmetryLink, QmetryPayloads, QmetryTestCase, QmetryTestCycle};
