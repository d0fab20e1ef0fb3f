//! QMetry test-management payloads.
//!
//! Payloads are built, never sent. `dry_run` tells the consumer whether a
//! live QMetry instance is configured to receive them.

use serde::{Deserialize, Serialize};

use stlc_core::{CaseType, Requirement, TestCase};

use crate::config::QmetryConfig;

/// Test case record linked to its requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QmetryTestCase {
    pub name: String,
    pub linked_requirement: String,
    #[serde(rename = "type")]
    pub case_type: CaseType,
}

/// Test cycle grouping every case of one requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QmetryTestCycle {
    pub cycle_name: String,
    pub linked_requirement: String,
}

/// Association of a test case with a cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QmetryLink {
    pub test_case_id: String,
    pub test_cycle: String,
}

/// Complete payload set for one requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QmetryPayloads {
    pub test_cases: Vec<QmetryTestCase>,
    pub test_cycles: Vec<QmetryTestCycle>,
    pub links: Vec<QmetryLink>,
    pub dry_run: bool,
}

/// Name of the single cycle created for a requirement.
pub fn cycle_name(requirement_key: &str) -> String {
    format!("{} - Cycle 1", requirement_key)
}

/// Build the payloads for a requirement's test cases.
pub fn build_payloads(
    requirement: &Requirement,
    cases: &[TestCase],
    config: &QmetryConfig,
) -> QmetryPayloads {
    let requirement_key = requirement.key_or_default();
    let cycle = cycle_name(requirement_key);

    let test_cases = cases
        .iter()
        .map(|tc| QmetryTestCase {
            name: tc.title.clone(),
            linked_requirement: requirement_key.to_string(),
            case_type: tc.case_type,
        })
        .collect();

    let links = cases
        .iter()
        .map(|tc| QmetryLink {
            test_case_id: tc.id.clone(),
            test_cycle: cycle.clone(),
        })
        .collect();

    QmetryPayloads {
        test_cases,
        test_cycles: vec![QmetryTestCycle {
            cycle_name: cycle,
            linked_requirement: requirement_key.to_string(),
        }],
        links,
        dry_run: !config.is_enabled(),
    }
}
