//! Keyword-based requirement analysis.
//!
//! The analyzer lowercases the requirement text and runs it through fixed
//! keyword tables. Domain classification is single-label and first match
//! wins; every other field is an independent multi-label detector.

use tracing::debug;

use crate::models::{Analysis, Domain, Functionality};

/// Condition under which a rule fires.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any of the keywords occurs in the text.
    AnyOf(&'static [&'static str]),
    /// The keyword occurs and the excluded word does not.
    Without {
        keyword: &'static str,
        excluded: &'static str,
    },
}

impl Trigger {
    pub fn fires(&self, text: &str) -> bool {
        match self {
            Trigger::AnyOf(keywords) => keywords.iter().any(|k| text.contains(k)),
            Trigger::Without { keyword, excluded } => {
                text.contains(keyword) && !text.contains(excluded)
            }
        }
    }
}

/// A trigger paired with the labels it contributes.
#[derive(Debug, Clone, Copy)]
pub struct Rule<L: 'static> {
    pub trigger: Trigger,
    pub labels: &'static [L],
}

const fn rule<L: 'static>(keywords: &'static [&'static str], labels: &'static [L]) -> Rule<L> {
    Rule {
        trigger: Trigger::AnyOf(keywords),
        labels,
    }
}

/// Domain rules in priority order.
pub const DOMAIN_RULES: &[Rule<Domain>] = &[
    rule(&["login", "authentication", "signin"], &[Domain::Authentication]),
    rule(&["payment", "checkout", "billing"], &[Domain::Payment]),
    rule(&["search", "filter", "query"], &[Domain::Search]),
    rule(&["upload", "file", "document"], &[Domain::Filehandling]),
    rule(&["email", "notification", "message"], &[Domain::Messaging]),
    rule(&["report", "dashboard", "analytics"], &[Domain::Reporting]),
    rule(&["user", "profile", "account"], &[Domain::UserManagement]),
];

pub const FUNCTIONALITY_RULES: &[Rule<Functionality>] = &[
    rule(&["create", "add", "register"], &[Functionality::Create]),
    rule(&["update", "edit", "modify"], &[Functionality::Update]),
    rule(&["delete", "remove"], &[Functionality::Delete]),
    rule(&["view", "display", "show"], &[Functionality::Read]),
    rule(&["validate", "verify"], &[Functionality::Validation]),
    rule(&["submit", "send"], &[Functionality::Submit]),
];

pub const INPUT_FIELD_RULES: &[Rule<&str>] = &[
    rule(&["username", "user name"], &["username"]),
    rule(&["password", "pwd"], &["password"]),
    rule(&["email"], &["email"]),
    rule(&["phone", "mobile"], &["phone"]),
    Rule {
        trigger: Trigger::Without {
            keyword: "name",
            excluded: "username",
        },
        labels: &["name"],
    },
    rule(&["address"], &["address"]),
    rule(&["date"], &["date"]),
    rule(&["amount", "price"], &["amount"]),
];

pub const USER_ACTION_RULES: &[Rule<&str>] = &[
    rule(&["click", "button"], &["click"]),
    rule(&["type", "enter", "input"], &["input"]),
    rule(&["select", "choose"], &["select"]),
    rule(&["upload"], &["upload"]),
    rule(&["download"], &["download"]),
    rule(&["navigate", "redirect"], &["navigate"]),
];

/// One textual signal implies a cluster of related concerns.
pub const SECURITY_RULES: &[Rule<&str>] = &[
    rule(
        &["login", "password", "auth"],
        &["authentication", "brute-force", "session-management"],
    ),
    rule(&["input", "form"], &["injection", "xss", "input-validation"]),
    rule(&["file", "upload"], &["file-upload-security", "malicious-files"]),
    rule(&["payment", "credit"], &["pci-compliance", "data-encryption"]),
];

pub const PERFORMANCE_RULES: &[Rule<&str>] = &[
    rule(&["search", "query", "filter"], &["search-performance", "large-datasets"]),
    rule(&["upload", "file"], &["file-size-limits", "upload-speed"]),
    rule(&["load", "page", "response"], &["page-load-time", "response-time"]),
];

pub const INTEGRATION_RULES: &[Rule<&str>] = &[
    rule(&["api", "service"], &["external-api"]),
    rule(&["database", "db"], &["database"]),
    rule(&["email", "notification"], &["email-service"]),
    rule(&["payment", "gateway"], &["payment-gateway"]),
];

pub const ERROR_SCENARIO_RULES: &[Rule<&str>] = &[
    rule(&["invalid", "error"], &["invalid-input"]),
    rule(&["empty", "blank"], &["empty-fields"]),
    rule(&["network", "connection"], &["network-failure"]),
    rule(&["timeout"], &["timeout"]),
];

/// First-match classification over an ordered rule list.
pub fn classify<L: Copy + 'static>(text: &str, rules: &[Rule<L>]) -> Option<L> {
    rules
        .iter()
        .find(|r| r.trigger.fires(text))
        .and_then(|r| r.labels.first().copied())
}

/// Exhaustive detection: every label of every firing rule, in table order.
pub fn detect<L: Copy + PartialEq + 'static>(text: &str, rules: &[Rule<L>]) -> Vec<L> {
    let mut labels = Vec::new();
    for rule in rules.iter().filter(|r| r.trigger.fires(text)) {
        for label in rule.labels {
            if !labels.contains(label) {
                labels.push(*label);
            }
        }
    }
    labels
}

fn detect_strings(text: &str, rules: &[Rule<&'static str>]) -> Vec<String> {
    detect(text, rules).into_iter().map(str::to_string).collect()
}

/// Turns requirement text into an [`Analysis`].
#[derive(Debug, Clone, Default)]
pub struct RequirementAnalyzer;

impl RequirementAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze requirement text. Total over all inputs, including `""`.
    pub fn analyze(&self, text: &str) -> Analysis {
        let text = text.to_lowercase();

        let mut functionality = detect(&text, FUNCTIONALITY_RULES);
        if functionality.is_empty() {
            functionality.push(Functionality::General);
        }

        let analysis = Analysis {
            domain: classify(&text, DOMAIN_RULES).unwrap_or_default(),
            functionality,
            input_fields: detect_strings(&text, INPUT_FIELD_RULES),
            user_actions: detect_strings(&text, USER_ACTION_RULES),
            security_concerns: detect_strings(&text, SECURITY_RULES),
            performance_concerns: detect_strings(&text, PERFORMANCE_RULES),
            integrations: detect_strings(&text, INTEGRATION_RULES),
            error_scenarios: detect_strings(&text, ERROR_SCENARIO_RULES),
        };

        debug!(
            domain = %analysis.domain,
            fields = analysis.input_fields.len(),
            security = analysis.security_concerns.len(),
            performance = analysis.performance_concerns.len(),
            "Analyzed requirement"
        );

        analysis
    }
}
