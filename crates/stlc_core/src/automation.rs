//! Automation code generation.
//!
//! Renders the automated part of a catalog as a Cypress or Playwright spec.
//! Cypress output is grouped by category and dispatches each case through
//! [`CaseTemplate`]; Playwright output is a flat list of to-do stubs.

use tracing::debug;

use crate::models::{Analysis, AutomationArtifact, Category, Domain, Framework, TestCase};

/// Page load budget asserted by generated performance tests, in milliseconds.
pub const PAGE_LOAD_THRESHOLD_MS: u32 = 2000;

/// Body template chosen for a single Cypress test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseTemplate<'a> {
    /// Successful login through the UI.
    LoginSuccess,
    /// Rejected login through the UI.
    LoginFailure,
    /// Submitting with the named field left empty.
    EmptyField(Option<&'a str>),
    /// Timed navigation against [`PAGE_LOAD_THRESHOLD_MS`].
    PageLoadTiming,
    /// Root page visibility check followed by the case steps.
    Smoke,
    /// Steps rendered as comments, preceded by a category-specific preamble.
    Todo(Category),
}

impl<'a> CaseTemplate<'a> {
    /// Pick the template for a case. First matching row wins.
    pub fn select(case: &'a TestCase, analysis: &Analysis) -> Self {
        let login = case.title.contains("Login");
        match case.category {
            Category::Functional | Category::Positive
                if login && analysis.is_domain(Domain::Authentication) =>
            {
                CaseTemplate::LoginSuccess
            }
            Category::Negative if login => CaseTemplate::LoginFailure,
            Category::EdgeCase if case.title.contains("Empty") => {
                CaseTemplate::EmptyField(empty_field_name(&case.title))
            }
            Category::Performance => CaseTemplate::PageLoadTiming,
            Category::Smoke => CaseTemplate::Smoke,
            category => CaseTemplate::Todo(category),
        }
    }

    /// Render the body lines of an `it(...)` block.
    pub fn render(&self, case: &TestCase, out: &mut String) {
        match self {
            CaseTemplate::LoginSuccess => {
                out.push_str("    cy.get('[data-testid=\"username\"]').type('validuser');\n");
                out.push_str("    cy.get('[data-testid=\"password\"]').type('validpass');\n");
                out.push_str("    cy.get('[data-testid=\"login-button\"]').click();\n");
                out.push_str("    cy.url().should('include', '/dashboard');\n");
                out.push_str("    cy.contains('Welcome').should('be.visible');\n");
            }
            CaseTemplate::LoginFailure => {
                out.push_str("    cy.get('[data-testid=\"username\"]').type('validuser');\n");
                out.push_str("    cy.get('[data-testid=\"password\"]').type('invalidpass');\n");
                out.push_str("    cy.get('[data-testid=\"login-button\"]').click();\n");
                out.push_str("    cy.contains('Invalid credentials').should('be.visible');\n");
                out.push_str("    cy.url().should('include', '/login');\n");
            }
            CaseTemplate::EmptyField(field) => {
                out.push_str(&format!("    // Leave {} field empty\n", field.unwrap_or("required")));
                out.push_str("    cy.get('[data-testid=\"submit\"]').click();\n");
                out.push_str("    cy.contains('required').should('be.visible');\n");
            }
            CaseTemplate::PageLoadTiming => {
                out.push_str("    const start = Date.now();\n");
                out.push_str("    cy.visit('/page');\n");
                out.push_str("    cy.get('[data-testid=\"content\"]').should('be.visible').then(() => {\n");
                out.push_str("      const loadTime = Date.now() - start;\n");
                out.push_str(&format!(
                    "      expect(loadTime).to.be.lessThan({});\n",
                    PAGE_LOAD_THRESHOLD_MS
                ));
                out.push_str("    });\n");
            }
            CaseTemplate::Smoke => {
                out.push_str("    // Smoke test - Basic functionality verification\n");
                out.push_str("    cy.visit('/');\n");
                out.push_str("    cy.get('body').should('be.visible');\n");
                push_step_comments(case, "    ", out);
            }
            CaseTemplate::Todo(category) => {
                for line in todo_preamble(*category) {
                    out.push_str(&format!("    // {}\n", line));
                }
                push_step_comments(case, "    ", out);
            }
        }
    }
}

/// Field named by an edge-case title: its second whitespace-delimited token.
///
/// `"Empty email field validation"` yields `Some("email")`.
pub fn empty_field_name(title: &str) -> Option<&str> {
    title.split_whitespace().nth(1)
}

fn todo_preamble(category: Category) -> &'static [&'static str] {
    match category {
        Category::Unit => &[
            "Unit test - Test individual methods/functions",
            "TODO: Implement unit test logic",
        ],
        Category::Integration => &[
            "Integration test - Test component interactions",
            "TODO: Implement integration test logic",
        ],
        Category::Functional => &["TODO: Implement functional test steps"],
        Category::E2e => &[
            "End-to-end test - Complete user workflow",
            "TODO: Implement E2E test steps",
        ],
        Category::Positive => &["TODO: Implement positive test steps"],
        Category::Negative => &["TODO: Implement negative test steps"],
        Category::EdgeCase => &["TODO: Implement edge case test steps"],
        Category::Security => &[
            "Security test - Test security vulnerabilities",
            "TODO: Implement security test steps",
        ],
        Category::Regression => &[
            "Regression test - Ensure existing functionality works",
            "TODO: Implement regression test steps",
        ],
        // Both always match a dedicated template.
        Category::Performance | Category::Smoke => &[],
    }
}

fn push_step_comments(case: &TestCase, indent: &str, out: &mut String) {
    for step in &case.steps {
        out.push_str(&format!("{}// {}\n", indent, step));
    }
}

/// Keeps user-provided text inside a single-line comment. Only line breaks
/// are replaced; other whitespace is kept as written.
fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Renders automation artifacts from a catalog.
#[derive(Debug, Clone, Default)]
pub struct AutomationCodeGenerator;

impl AutomationCodeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Choose the target framework for an analysis.
    pub fn select_framework(&self, analysis: &Analysis) -> Framework {
        if analysis.is_domain(Domain::Authentication) || analysis.has_user_action("click") {
            Framework::Cypress
        } else if !analysis.performance_concerns.is_empty() {
            Framework::Playwright
        } else {
            Framework::Cypress
        }
    }

    /// Generate the automation artifact. Manual cases are never rendered.
    pub fn generate(
        &self,
        id_prefix: &str,
        summary: &str,
        cases: &[TestCase],
        analysis: &Analysis,
    ) -> AutomationArtifact {
        let automated: Vec<&TestCase> = cases.iter().filter(|tc| tc.is_automated()).collect();
        let summary = single_line(summary);

        if automated.is_empty() {
            debug!("No automated test cases, emitting stub");
            return AutomationArtifact {
                framework: Framework::Cypress,
                file: Framework::Cypress.spec_file(id_prefix),
                code: format!("// No automated test cases generated for: {}", summary),
            };
        }

        let framework = self.select_framework(analysis);
        debug!(%framework, cases = automated.len(), "Rendering automation code");

        let code = match framework {
            Framework::Cypress => self.render_cypress(&summary, &automated, analysis),
            Framework::Playwright => self.render_playwright(&summary, &automated),
        };

        AutomationArtifact {
            framework,
            file: framework.spec_file(id_prefix),
            code,
        }
    }

    fn render_cypress(&self, summary: &str, cases: &[&TestCase], analysis: &Analysis) -> String {
        let groups = group_by_category(cases);
        let category_list: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();

        let mut code = String::new();
        code.push_str(&format!("// Auto-generated Cypress tests for: {}\n", summary));
        code.push_str(&format!(
            "// Generated test categories: {}\n\n",
            category_list.join(", ")
        ));

        for (category, group) in &groups {
            code.push_str(&format!(
                "describe('{} Tests', () => {{\n",
                category.as_str().to_uppercase()
            ));

            if *category == Category::Functional && analysis.is_domain(Domain::Authentication) {
                code.push_str("  beforeEach(() => {\n");
                code.push_str("    cy.visit('/login');\n");
                code.push_str("  });\n\n");
            }

            for case in group {
                code.push_str(&format!("  it('{}', () => {{\n", case.title));
                CaseTemplate::select(case, analysis).render(case, &mut code);
                code.push_str("  });\n\n");
            }

            code.push_str("});\n\n");
        }

        code
    }

    fn render_playwright(&self, summary: &str, cases: &[&TestCase]) -> String {
        let mut code = String::new();
        code.push_str(&format!("// Auto-generated Playwright tests for: {}\n", summary));
        code.push_str("import { test, expect } from '@playwright/test';\n\n");

        for case in cases {
            code.push_str(&format!("test('{}', async ({{ page }}) => {{\n", case.title));
            code.push_str(&format!("  // TODO: Implement test steps for: {}\n", case.title));
            push_step_comments(case, "  ", &mut code);
            code.push_str("});\n\n");
        }

        code
    }
}

/// Group cases by category, groups ordered by first appearance.
fn group_by_category<'a>(cases: &[&'a TestCase]) -> Vec<(Category, Vec<&'a TestCase>)> {
    let mut groups: Vec<(Category, Vec<&'a TestCase>)> = Vec::new();
    for case in cases.iter().copied() {
        match groups.iter_mut().find(|(c, _)| *c == case.category) {
            Some((_, group)) => group.push(case),
            None => groups.push((case.category, vec![case])),
        }
    }
    groups
}
