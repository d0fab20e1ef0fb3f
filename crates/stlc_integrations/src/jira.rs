//! Jira issue-tracker adapter.
//!
//! Resolves a browse link such as `https://acme.atlassian.net/browse/ABC-1`
//! into a [`Requirement`]. Lookups never fail from the caller's point of
//! view: missing credentials, HTTP errors, and transport failures all
//! degrade to a mock requirement carrying the parsed key.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use stlc_core::{Requirement, RequirementSource};

use crate::config::JiraConfig;
use crate::error::IntegrationResult;

/// Summary used when no issue key can be parsed from the link.
pub const UNKNOWN_SUMMARY: &str = "Unknown requirement";

/// Source of requirements addressed by link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Resolve a link into a requirement. Always yields a well-formed value.
    async fn fetch_requirement(&self, link: &str) -> Requirement;
}

/// Extract the issue key from a `/browse/{KEY}` link.
pub fn parse_issue_key(link: &str) -> Option<String> {
    static KEY_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = KEY_PATTERN
        .get_or_init(|| Regex::new(r"(?i)/browse/([A-Z0-9-]+)").ok())
        .as_ref()?;
    pattern
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Requirement returned when the issue cannot be fetched.
pub fn mock_requirement(key: &str) -> Requirement {
    Requirement::mock(format!("Mock summary for {}", key), Some(key.to_string()))
}

#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: Option<String>,
    #[serde(default)]
    fields: JiraFields,
}

#[derive(Debug, Default, Deserialize)]
struct JiraFields {
    summary: Option<String>,
    status: Option<JiraStatus>,
}

#[derive(Debug, Deserialize)]
struct JiraStatus {
    name: Option<String>,
}

impl JiraIssue {
    fn into_requirement(self, issue_key: &str) -> Requirement {
        let summary = self
            .fields
            .summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Summary for {}", issue_key));
        let key = self
            .key
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| issue_key.to_string());
        let status = self.fields.status.and_then(|s| s.name);

        Requirement::from_text(summary)
            .with_key(key)
            .with_source(RequirementSource::Jira)
            .with_meta("status", status)
    }
}

/// Jira Cloud REST client.
pub struct JiraClient {
    config: JiraConfig,
    client: reqwest::Client,
}

impl JiraClient {
    /// Create a client with the given per-request timeout.
    pub fn new(config: JiraConfig, timeout: Duration) -> IntegrationResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { config, client })
    }

    /// Whether lookups will reach a live Jira instance.
    pub fn is_live(&self) -> bool {
        self.config.is_configured()
    }

    fn issue_url(&self, base_url: &str, key: &str) -> String {
        format!("{}/rest/api/3/issue/{}", base_url.trim_end_matches('/'), key)
    }

    async fn fetch_issue(&self, key: &str) -> Requirement {
        let (Some(base_url), Some(user), Some(token)) = (
            self.config.base_url.as_deref(),
            self.config.user.as_deref(),
            self.config.token.as_deref(),
        ) else {
            return mock_requirement(key).with_meta("priority", "Medium");
        };

        let url = self.issue_url(base_url, key);
        debug!("Fetching Jira issue from {}", url);

        let response = match self
            .client
            .get(&url)
            .basic_auth(user, Some(token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Jira request for {} failed: {}", key, e);
                return mock_requirement(key);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Jira returned {} for {}", status, key);
            return mock_requirement(key).with_meta("status", status.as_u16());
        }

        match response.json::<JiraIssue>().await {
            Ok(issue) => {
                info!("Fetched requirement {} from Jira", key);
                issue.into_requirement(key)
            }
            Err(e) => {
                warn!("Could not decode Jira issue {}: {}", key, e);
                mock_requirement(key)
            }
        }
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn fetch_requirement(&self, link: &str) -> Requirement {
        let Some(key) = parse_issue_key(link) else {
            debug!("No issue key in link {:?}", link);
            return Requirement::mock(UNKNOWN_SUMMARY, None);
        };

        if !self.is_live() {
            debug!("Jira not configured, using mock requirement for {}", key);
            return mock_requirement(&key).with_meta("priority", "Medium");
        }

        self.fetch_issue(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_issue_key() {
        assert_eq!(
            parse_issue_key("https://acme.atlassian.net/browse/ABC-123").as_deref(),
            Some("ABC-123")
        );
        assert_eq!(
            parse_issue_key("https://acme.atlassian.net/BROWSE/abc-9?focus=1").as_deref(),
            Some("abc-9")
        );
        assert_eq!(parse_issue_key("https://acme.atlassian.net/issues"), None);
        assert_eq!(parse_issue_key(""), None);
    }

    #[test]
    fn test_issue_into_requirement() {
        let issue: JiraIssue = serde_json::from_value(serde_json::json!({
            "key": "ABC-1",
            "fields": { "summary": "User login", "status": { "name": "In Progress" } }
        }))
        .unwrap();

        let req = issue.into_requirement("ABC-1");
        assert_eq!(req.summary, "User login");
        assert_eq!(req.key.as_deref(), Some("ABC-1"));
        assert_eq!(req.source, RequirementSource::Jira);
        assert_eq!(req.meta["status"], "In Progress");
    }

    #[test]
    fn test_issue_without_summary_uses_fallback() {
        let issue: JiraIssue = serde_json::from_value(serde_json::json!({ "fields": {} })).unwrap();
        let req = issue.into_requirement("XYZ-2");
        assert_eq!(req.summary, "Summary for XYZ-2");
        assert_eq!(req.key.as_deref(), Some("XYZ-2"));
        assert!(req.meta["status"].is_null());
    }

    #[tokio::test]
    async fn test_unconfigured_client_returns_mock() {
        let client = JiraClient::new(JiraConfig::default(), Duration::from_secs(1)).unwrap();
        assert!(!client.is_live());

        let req = client
            .fetch_requirement("https://acme.atlassian.net/browse/ABC-7")
            .await;
        assert_eq!(req.source, RequirementSource::Mock);
        assert_eq!(req.summary, "Mock summary for ABC-7");
        assert_eq!(req.key.as_deref(), Some("ABC-7"));
        assert_eq!(req.meta["priority"], "Medium");
    }

    #[tokio::test]
    async fn test_link_without_key_returns_unknown() {
        let client = JiraClient::new(JiraConfig::default(), Duration::from_secs(1)).unwrap();
        let req = client.fetch_requirement("not a link").await;
        assert_eq!(req.summary, UNKNOWN_SUMMARY);
        assert_eq!(req.key, None);
        assert_eq!(req.source, RequirementSource::Mock);
    }

    #[tokio::test]
    async fn test_unreachable_jira_degrades_to_mock() {
        let config = JiraConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            user: Some("qa".to_string()),
            token: Some("token".to_string()),
        };
        let client = JiraClient::new(config, Duration::from_millis(500)).unwrap();
        assert!(client.is_live());

        let req = client
            .fetch_requirement("http://127.0.0.1:9/browse/NET-1")
            .await;
        assert_eq!(req.source, RequirementSource::Mock);
        assert_eq!(req.summary, "Mock summary for NET-1");
    }
}
