//! Integration tests for the requirement-to-artifacts pipeline.

use pretty_assertions::assert_eq;

use stlc_core::{
    generate_artifacts, id_prefix, Artifacts, CaseType, Category, Domain, Framework,
    Functionality, Requirement,
};

const SUMMARIES: &[&str] = &[
    "",
    "User login with username and password",
    "Checkout with credit card payment and amount",
    "Search products with filter and query on results page",
    "Upload document file",
    "Send email notification",
    "Weekly analytics report dashboard",
    "Create, view, update and delete user profile with name, phone, address and date",
    "Contact form input with email and button",
    "Export data through the api service into the database",
    "!!! 123 ???",
];

fn generate(summary: &str, key: &str) -> Artifacts {
    generate_artifacts(&Requirement::from_text(summary).with_key(key))
}

fn sequence(id: &str, prefix: &str) -> u32 {
    let digits = id
        .strip_prefix(&format!("{}-TC-", prefix))
        .unwrap_or_else(|| panic!("unexpected id {}", id));
    assert!(digits.len() >= 3, "id not zero padded: {}", id);
    assert!(digits.chars().all(|c| c.is_ascii_digit()), "bad id {}", id);
    digits.parse().unwrap()
}

/// Every category is present regardless of the requirement text.
#[test]
fn test_every_category_is_covered() {
    for summary in SUMMARIES {
        let artifacts = generate(summary, "QA-7");
        for category in Category::ALL {
            assert!(
                artifacts.cases_in(category).next().is_some(),
                "category {} missing for {:?}",
                category,
                summary
            );
        }
    }
}

/// Identifiers are unique, gapless, and strictly increasing.
#[test]
fn test_identifiers_are_strictly_increasing() {
    for summary in SUMMARIES {
        let artifacts = generate(summary, "web-app/42");
        let prefix = "WEBAPP42";
        let sequences: Vec<u32> = artifacts
            .test_cases
            .iter()
            .map(|tc| sequence(&tc.id, prefix))
            .collect();
        let expected: Vec<u32> = (1..=sequences.len() as u32).collect();
        assert_eq!(sequences, expected, "for {:?}", summary);
    }
}

#[test]
fn test_id_prefix_normalization() {
    assert_eq!(id_prefix("abc-1"), "ABC1");
    let artifacts = generate("login", "proj.x_9");
    assert_eq!(artifacts.test_cases[0].id, "PROJX9-TC-001");
    assert_eq!(artifacts.automation_code.file, "projx9.spec.js");
}

#[test]
fn test_generation_is_deterministic() {
    for summary in SUMMARIES {
        let first = generate(summary, "DET-1");
        let second = generate(summary, "DET-1");
        assert_eq!(first, second);
    }
}

#[test]
fn test_login_outranks_payment() {
    let artifacts = generate("Login to see payment history", "P-1");
    assert_eq!(artifacts.analysis.domain, Domain::Authentication);
}

#[test]
fn test_security_is_backfilled_without_security_keywords() {
    let artifacts = generate("Weekly analytics report", "R-1");
    let security: Vec<_> = artifacts.cases_in(Category::Security).collect();
    assert_eq!(security.len(), 1);
    assert_eq!(security[0].title, "Security - XSS payload is sanitized");

    let artifacts = generate("Profile form input", "R-2");
    let titles: Vec<_> = artifacts
        .cases_in(Category::Security)
        .map(|tc| tc.title.as_str())
        .collect();
    assert_eq!(titles, vec!["SQL injection attempt", "XSS attack prevention"]);
}

#[test]
fn test_login_requirement_catalog() {
    let artifacts = generate("User login with username and password", "ABC-1");
    let analysis = &artifacts.analysis;

    assert_eq!(analysis.domain, Domain::Authentication);
    assert_eq!(analysis.functionality, vec![Functionality::General]);
    assert_eq!(analysis.input_fields, vec!["username", "password"]);

    let listing: Vec<(&str, Category, &str)> = artifacts
        .test_cases
        .iter()
        .map(|tc| (tc.id.as_str(), tc.category, tc.title.as_str()))
        .collect();

    assert_eq!(
        listing,
        vec![
            ("ABC1-TC-001", Category::Unit, "Unit test - Password validation method"),
            ("ABC1-TC-002", Category::Unit, "Unit test - Username format validation"),
            ("ABC1-TC-003", Category::Integration, "Integration test - Authentication service with database"),
            ("ABC1-TC-004", Category::Functional, "Functional test - User authentication workflow"),
            ("ABC1-TC-005", Category::E2e, "E2E test - Complete user login and dashboard access"),
            ("ABC1-TC-006", Category::Positive, "Login with valid credentials"),
            ("ABC1-TC-007", Category::Negative, "Login with invalid password"),
            ("ABC1-TC-008", Category::Negative, "Login with non-existent username"),
            ("ABC1-TC-009", Category::EdgeCase, "Empty username field validation"),
            ("ABC1-TC-010", Category::EdgeCase, "Empty password field validation"),
            ("ABC1-TC-011", Category::Security, "Brute force login protection"),
            ("ABC1-TC-012", Category::Smoke, "Smoke test - Application loads successfully"),
            ("ABC1-TC-013", Category::Smoke, "Smoke test - Login page accessibility"),
            ("ABC1-TC-014", Category::Regression, "Regression test - Existing user login functionality"),
            ("ABC1-TC-015", Category::Performance, "Performance - Page load under 2s"),
        ]
    );

    let positive = &artifacts.test_cases[5];
    assert_eq!(
        positive.steps,
        vec![
            "Navigate to login page",
            "Enter valid username",
            "Enter valid password",
            "Click login button",
        ]
    );
}

#[test]
fn test_login_automation_code() {
    let artifacts = generate("User login with username and password", "ABC-1");
    let automation = &artifacts.automation_code;

    assert_eq!(automation.framework, Framework::Cypress);
    assert_eq!(automation.file, "abc1.spec.js");

    let code = &automation.code;
    assert!(code.starts_with(
        "// Auto-generated Cypress tests for: User login with username and password\n\
         // Generated test categories: unit, integration, functional, e2e, positive, negative, edge-case, smoke, regression, performance\n\n"
    ));

    assert!(code.contains(
        "  it('Login with valid credentials', () => {\n\
         \x20   cy.get('[data-testid=\"username\"]').type('validuser');\n\
         \x20   cy.get('[data-testid=\"password\"]').type('validpass');\n\
         \x20   cy.get('[data-testid=\"login-button\"]').click();\n\
         \x20   cy.url().should('include', '/dashboard');\n\
         \x20   cy.contains('Welcome').should('be.visible');\n\
         \x20 });\n"
    ));

    assert!(code.contains(
        "  it('Login with invalid password', () => {\n\
         \x20   cy.get('[data-testid=\"username\"]').type('validuser');\n\
         \x20   cy.get('[data-testid=\"password\"]').type('invalidpass');\n\
         \x20   cy.get('[data-testid=\"login-button\"]').click();\n\
         \x20   cy.contains('Invalid credentials').should('be.visible');\n\
         \x20   cy.url().should('include', '/login');\n"
    ));

    // The functional group opens on the login route.
    assert!(code.contains(
        "describe('FUNCTIONAL Tests', () => {\n  beforeEach(() => {\n    cy.visit('/login');\n  });\n\n"
    ));

    // The security case is manual and never rendered.
    assert!(!code.contains("SECURITY Tests"));
    assert!(!code.contains("Brute force"));
}

#[test]
fn test_empty_field_name_matches_catalog_step() {
    let artifacts = generate("Newsletter signup with email", "N-1");
    let edge = artifacts
        .cases_in(Category::EdgeCase)
        .find(|tc| tc.title == "Empty email field validation")
        .expect("empty email case");
    assert_eq!(edge.steps[1], "Leave email field empty");
    assert!(artifacts.automation_code.code.contains(
        "  it('Empty email field validation', () => {\n    // Leave email field empty\n"
    ));
}

#[test]
fn test_performance_requirement_uses_playwright() {
    let artifacts = generate("Search products on results page", "S-1");
    assert_eq!(artifacts.automation_code.framework, Framework::Playwright);
    assert!(artifacts
        .automation_code
        .code
        .contains("test('Page load performance', async ({ page }) => {\n  // TODO: Implement test steps for: Page load performance\n  // Navigate to page\n  // Measure page load time\n});\n"));
    // Manual performance case stays out of the code.
    assert!(!artifacts
        .automation_code
        .code
        .contains("Search performance with large dataset"));
}

#[test]
fn test_manual_cases_stay_out_of_code() {
    for summary in SUMMARIES {
        let artifacts = generate(summary, "M-1");
        for tc in artifacts.test_cases.iter().filter(|tc| tc.case_type == CaseType::Manual) {
            assert!(
                !artifacts.automation_code.code.contains(&format!("'{}'", tc.title)),
                "manual case {} rendered",
                tc.title
            );
        }
    }
}
