//! Data models for requirements, analyses, and generated test artifacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Summary used when a requirement arrives without one.
pub const DEFAULT_SUMMARY: &str = "System requirement";

/// Key used when a requirement arrives without one.
pub const DEFAULT_KEY: &str = "REQ-UNKNOWN";

/// Where a requirement came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequirementSource {
    #[default]
    Text,
    Jira,
    Mock,
}

/// A requirement to derive test artifacts from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Requirement {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub source: RequirementSource,
}

impl Requirement {
    /// Create a requirement from inline text.
    pub fn from_text(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Create a placeholder requirement standing in for one that could not be fetched.
    pub fn mock(summary: impl Into<String>, key: Option<String>) -> Self {
        Self {
            summary: summary.into(),
            key,
            meta: BTreeMap::new(),
            source: RequirementSource::Mock,
        }
    }

    /// Set the requirement key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the requirement source.
    pub fn with_source(mut self, source: RequirementSource) -> Self {
        self.source = source;
        self
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Summary, falling back to [`DEFAULT_SUMMARY`] when blank.
    pub fn summary_or_default(&self) -> &str {
        if self.summary.trim().is_empty() {
            DEFAULT_SUMMARY
        } else {
            &self.summary
        }
    }

    /// Key, falling back to [`DEFAULT_KEY`] when absent or empty.
    pub fn key_or_default(&self) -> &str {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => DEFAULT_KEY,
        }
    }

    /// Identifier prefix for generated test cases.
    pub fn id_prefix(&self) -> String {
        id_prefix(self.key_or_default())
    }
}

/// Normalize a requirement key into a test case identifier prefix.
///
/// Every non-alphanumeric character is dropped and the rest is upper-cased,
/// so `"abc-1"` becomes `"ABC1"`.
pub fn id_prefix(key: &str) -> String {
    key.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Business domain a requirement belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Authentication,
    Payment,
    Search,
    Filehandling,
    Messaging,
    Reporting,
    UserManagement,
    #[default]
    General,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Authentication => "authentication",
            Domain::Payment => "payment",
            Domain::Search => "search",
            Domain::Filehandling => "filehandling",
            Domain::Messaging => "messaging",
            Domain::Reporting => "reporting",
            Domain::UserManagement => "user-management",
            Domain::General => "general",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of behavior a requirement asks for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Functionality {
    Create,
    Update,
    Delete,
    Read,
    Validation,
    Submit,
    General,
}

impl Functionality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Functionality::Create => "create",
            Functionality::Update => "update",
            Functionality::Delete => "delete",
            Functionality::Read => "read",
            Functionality::Validation => "validation",
            Functionality::Submit => "submit",
            Functionality::General => "general",
        }
    }
}

/// Keyword-derived description of a requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analysis {
    pub domain: Domain,
    pub functionality: Vec<Functionality>,
    pub input_fields: Vec<String>,
    pub user_actions: Vec<String>,
    pub security_concerns: Vec<String>,
    pub performance_concerns: Vec<String>,
    pub integrations: Vec<String>,
    pub error_scenarios: Vec<String>,
}

impl Analysis {
    pub fn is_domain(&self, domain: Domain) -> bool {
        self.domain == domain
    }

    pub fn has_functionality(&self, functionality: Functionality) -> bool {
        self.functionality.contains(&functionality)
    }

    pub fn has_input_field(&self, field: &str) -> bool {
        self.input_fields.iter().any(|f| f == field)
    }

    pub fn has_user_action(&self, action: &str) -> bool {
        self.user_actions.iter().any(|a| a == action)
    }

    pub fn has_security_concern(&self, concern: &str) -> bool {
        self.security_concerns.iter().any(|c| c == concern)
    }

    pub fn has_performance_concern(&self, concern: &str) -> bool {
        self.performance_concerns.iter().any(|c| c == concern)
    }

    pub fn has_integration(&self, integration: &str) -> bool {
        self.integrations.iter().any(|i| i == integration)
    }
}

/// Test classification tag. Declaration order is generation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Unit,
    Integration,
    Functional,
    E2e,
    Positive,
    Negative,
    EdgeCase,
    Security,
    Performance,
    Smoke,
    Regression,
}

impl Category {
    /// All categories in generation order.
    pub const ALL: [Category; 11] = [
        Category::Unit,
        Category::Integration,
        Category::Functional,
        Category::E2e,
        Category::Positive,
        Category::Negative,
        Category::EdgeCase,
        Category::Security,
        Category::Performance,
        Category::Smoke,
        Category::Regression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unit => "unit",
            Category::Integration => "integration",
            Category::Functional => "functional",
            Category::E2e => "e2e",
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::EdgeCase => "edge-case",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Smoke => "smoke",
            Category::Regression => "regression",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a test case is meant for automation or a human tester.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Automated,
    Manual,
}

/// A generated test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub steps: Vec<String>,
    pub expected: String,
    #[serde(rename = "type")]
    pub case_type: CaseType,
}

impl TestCase {
    pub fn is_automated(&self) -> bool {
        self.case_type == CaseType::Automated
    }
}

/// Format a test case identifier.
pub fn case_id(id_prefix: &str, sequence: u32) -> String {
    format!("{}-TC-{:03}", id_prefix, sequence)
}

/// Code generation target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Framework {
    Cypress,
    Playwright,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Cypress => "Cypress",
            Framework::Playwright => "Playwright",
        }
    }

    /// File extension of generated specs. Both targets emit JavaScript.
    pub fn extension(&self) -> &'static str {
        match self {
            Framework::Cypress | Framework::Playwright => "js",
        }
    }

    /// Spec file name for an identifier prefix.
    pub fn spec_file(&self, id_prefix: &str) -> String {
        format!("{}.spec.{}", id_prefix.to_lowercase(), self.extension())
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generated automation source for the automated part of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutomationArtifact {
    pub framework: Framework,
    pub file: String,
    pub code: String,
}

/// Everything produced for one requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artifacts {
    pub requirement_summary: String,
    pub test_cases: Vec<TestCase>,
    pub automation_code: AutomationArtifact,
    pub analysis: Analysis,
}

impl Artifacts {
    /// Test cases in one category, in catalog order.
    pub fn cases_in(&self, category: Category) -> impl Iterator<Item = &TestCase> {
        self.test_cases.iter().filter(move |tc| tc.category == category)
    }

    pub fn to_json(&self) -> crate::CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> crate::CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_prefix_strips_and_uppercases() {
        assert_eq!(id_prefix("abc-1"), "ABC1");
        assert_eq!(id_prefix("PROJ_42 / x"), "PROJ42X");
        assert_eq!(id_prefix(""), "");
    }

    #[test]
    fn test_requirement_defaults() {
        let req = Requirement::default();
        assert_eq!(req.summary_or_default(), DEFAULT_SUMMARY);
        assert_eq!(req.key_or_default(), DEFAULT_KEY);
        assert_eq!(req.id_prefix(), "REQUNKNOWN");

        let empty_key = Requirement::from_text("x").with_key("");
        assert_eq!(empty_key.key_or_default(), DEFAULT_KEY);
    }

    #[test]
    fn test_case_id_is_zero_padded() {
        assert_eq!(case_id("ABC1", 7), "ABC1-TC-007");
        assert_eq!(case_id("ABC1", 123), "ABC1-TC-123");
    }

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&Category::EdgeCase).unwrap();
        assert_eq!(json, "\"edge-case\"");
        let json = serde_json::to_string(&Domain::UserManagement).unwrap();
        assert_eq!(json, "\"user-management\"");
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_case_type_serializes_as_type() {
        let tc = TestCase {
            id: "A-TC-001".to_string(),
            title: "t".to_string(),
            category: Category::Unit,
            steps: vec![],
            expected: "e".to_string(),
            case_type: CaseType::Manual,
        };
        let value = serde_json::to_value(&tc).unwrap();
        assert_eq!(value["type"], "manual");
    }

    #[test]
    fn test_spec_file_name() {
        assert_eq!(Framework::Cypress.spec_file("ABC1"), "abc1.spec.js");
        assert_eq!(Framework::Playwright.spec_file("ABC1"), "abc1.spec.js");
    }
}
