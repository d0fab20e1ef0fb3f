//! Execution status mapping.
//!
//! No test is run. Automated cases report `Passed`, manual cases wait for a
//! tester and report `Pending`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use stlc_core::{CaseType, TestCase};

/// Reported status of a test case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExecutionStatus {
    Passed,
    Pending,
}

impl From<CaseType> for ExecutionStatus {
    fn from(case_type: CaseType) -> Self {
        match case_type {
            CaseType::Automated => ExecutionStatus::Passed,
            CaseType::Manual => ExecutionStatus::Pending,
        }
    }
}

/// One `{id: status}` entry per case, in catalog order.
pub type ExecutionResult = BTreeMap<String, ExecutionStatus>;

/// Map every case to its status.
pub fn map_statuses(cases: &[TestCase]) -> Vec<ExecutionResult> {
    let results: Vec<ExecutionResult> = cases
        .iter()
        .map(|tc| BTreeMap::from([(tc.id.clone(), ExecutionStatus::from(tc.case_type))]))
        .collect();

    let pending = cases.iter().filter(|tc| !tc.is_automated()).count();
    debug!(
        "Mapped {} execution statuses ({} pending)",
        results.len(),
        pending
    );

    results
}
