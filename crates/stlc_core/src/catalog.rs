//! Test catalog generation.
//!
//! The catalog is built by a fixed-order registry of category generators.
//! A sequence counter threads through every generator so identifiers stay
//! globally monotonic, and a final backfill pass guarantees that every
//! category has at least one case.

use tracing::debug;

use crate::models::{case_id, Analysis, CaseType, Category, Domain, Functionality, TestCase};

/// Signature shared by all category generators.
pub type CategoryGenerator = fn(&str, &Analysis, u32) -> Vec<TestCase>;

/// One registry entry: the category, its generator, and the gate deciding
/// whether the generator runs at all for a given analysis.
#[derive(Clone, Copy)]
pub struct GeneratorEntry {
    pub category: Category,
    pub generate: CategoryGenerator,
    pub enabled: fn(&Analysis) -> bool,
}

fn always(_: &Analysis) -> bool {
    true
}

fn has_security_concerns(analysis: &Analysis) -> bool {
    !analysis.security_concerns.is_empty()
}

fn has_performance_concerns(analysis: &Analysis) -> bool {
    !analysis.performance_concerns.is_empty()
}

/// Category generators in invocation order.
pub const REGISTRY: [GeneratorEntry; 11] = [
    GeneratorEntry { category: Category::Unit, generate: unit_cases, enabled: always },
    GeneratorEntry { category: Category::Integration, generate: integration_cases, enabled: always },
    GeneratorEntry { category: Category::Functional, generate: functional_cases, enabled: always },
    GeneratorEntry { category: Category::E2e, generate: e2e_cases, enabled: always },
    GeneratorEntry { category: Category::Positive, generate: positive_cases, enabled: always },
    GeneratorEntry { category: Category::Negative, generate: negative_cases, enabled: always },
    GeneratorEntry { category: Category::EdgeCase, generate: edge_cases, enabled: always },
    GeneratorEntry {
        category: Category::Security,
        generate: security_cases,
        enabled: has_security_concerns,
    },
    GeneratorEntry {
        category: Category::Performance,
        generate: performance_cases,
        enabled: has_performance_concerns,
    },
    GeneratorEntry { category: Category::Smoke, generate: smoke_cases, enabled: always },
    GeneratorEntry { category: Category::Regression, generate: regression_cases, enabled: always },
];

/// Builds the test catalog for an analysis.
#[derive(Debug, Clone, Default)]
pub struct TestCatalogGenerator;

impl TestCatalogGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete catalog, backfill included.
    pub fn generate(&self, id_prefix: &str, analysis: &Analysis) -> Vec<TestCase> {
        let mut cases = Vec::new();
        let mut next = 1;

        for entry in &REGISTRY {
            if !(entry.enabled)(analysis) {
                continue;
            }
            let produced = (entry.generate)(id_prefix, analysis, next);
            debug!(category = %entry.category, count = produced.len(), "Generated test cases");
            next += produced.len() as u32;
            cases.extend(produced);
        }

        self.backfill(id_prefix, &mut cases, next);
        cases
    }

    /// Append one default case for every category with no cases yet.
    pub fn backfill(&self, id_prefix: &str, cases: &mut Vec<TestCase>, mut next: u32) {
        for category in Category::ALL {
            if cases.iter().any(|tc| tc.category == category) {
                continue;
            }
            debug!(category = %category, "Backfilling default test case");
            cases.push(default_case(id_prefix, category, next));
            next += 1;
        }
    }
}

/// Accumulates cases for one category, assigning sequential identifiers.
struct CaseWriter<'a> {
    id_prefix: &'a str,
    category: Category,
    next: u32,
    cases: Vec<TestCase>,
}

impl<'a> CaseWriter<'a> {
    fn new(id_prefix: &'a str, category: Category, start: u32) -> Self {
        Self {
            id_prefix,
            category,
            next: start,
            cases: Vec::new(),
        }
    }

    fn push(&mut self, case_type: CaseType, title: impl Into<String>, steps: Vec<String>, expected: impl Into<String>) {
        self.cases.push(TestCase {
            id: case_id(self.id_prefix, self.next),
            title: title.into(),
            category: self.category,
            steps,
            expected: expected.into(),
            case_type,
        });
        self.next += 1;
    }

    fn automated(&mut self, title: &str, steps: &[&str], expected: &str) {
        self.push(CaseType::Automated, title, owned(steps), expected);
    }

    fn manual(&mut self, title: &str, steps: &[&str], expected: &str) {
        self.push(CaseType::Manual, title, owned(steps), expected);
    }

    fn finish(self) -> Vec<TestCase> {
        self.cases
    }
}

fn owned(steps: &[&str]) -> Vec<String> {
    steps.iter().map(|s| s.to_string()).collect()
}

pub fn unit_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Unit, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Unit test - Password validation method",
            &[
                "Test password validation function with valid password",
                "Test password validation function with invalid password",
                "Test password validation function with empty password",
            ],
            "Password validation method returns correct boolean values",
        );
        w.automated(
            "Unit test - Username format validation",
            &[
                "Test username validation with valid format",
                "Test username validation with invalid characters",
                "Test username validation with length limits",
            ],
            "Username validation method handles all input scenarios correctly",
        );
    }

    if analysis.has_functionality(Functionality::Create) {
        w.automated(
            "Unit test - Data validation methods",
            &[
                "Test individual field validation methods",
                "Test data sanitization functions",
                "Test business rule validation logic",
            ],
            "All validation methods return expected results for various inputs",
        );
    }

    w.finish()
}

pub fn integration_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Integration, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Integration test - Authentication service with database",
            &[
                "Test authentication service connection to user database",
                "Verify user credential lookup functionality",
                "Test session management integration",
            ],
            "Authentication service successfully integrates with database layer",
        );
    }

    if analysis.has_integration("database") {
        w.automated(
            "Integration test - Database connectivity and queries",
            &[
                "Test database connection establishment",
                "Test CRUD operations with database",
                "Test transaction handling",
            ],
            "All database operations execute successfully",
        );
    }

    if analysis.has_integration("external-api") {
        w.automated(
            "Integration test - External API communication",
            &[
                "Test API endpoint connectivity",
                "Test request/response handling",
                "Test error handling for API failures",
            ],
            "External API integration works as expected",
        );
    }

    w.finish()
}

pub fn functional_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Functional, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Functional test - User authentication workflow",
            &[
                "Navigate to login page",
                "Enter valid credentials",
                "Submit login form",
                "Verify successful authentication",
            ],
            "User is authenticated and granted access to the system",
        );
    }

    if analysis.has_functionality(Functionality::Create) {
        w.automated(
            "Functional test - Create new record workflow",
            &[
                "Navigate to create form",
                "Fill all required fields with valid data",
                "Submit form",
                "Verify record creation",
            ],
            "New record is created successfully and appears in the system",
        );
    }

    w.finish()
}

pub fn e2e_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::E2e, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "E2E test - Complete user login and dashboard access",
            &[
                "Open application in browser",
                "Navigate to login page",
                "Enter valid user credentials",
                "Click login button",
                "Verify redirect to dashboard",
                "Verify user can access protected features",
            ],
            "Complete user authentication flow works end-to-end",
        );
    }

    if analysis.has_functionality(Functionality::Create)
        && analysis.has_functionality(Functionality::Read)
    {
        w.automated(
            "E2E test - Create and view record workflow",
            &[
                "Login to application",
                "Navigate to create form",
                "Create new record",
                "Navigate to records list",
                "Verify created record appears",
                "Click on record to view details",
            ],
            "Complete create and view workflow functions properly",
        );
    }

    if analysis.is_domain(Domain::Payment) {
        w.automated(
            "E2E test - Complete payment processing workflow",
            &[
                "Add items to cart",
                "Proceed to checkout",
                "Enter payment information",
                "Submit payment",
                "Verify payment confirmation",
                "Check order status",
            ],
            "Complete payment workflow processes successfully",
        );
    }

    w.finish()
}

pub fn positive_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Positive, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Login with valid credentials",
            &[
                "Navigate to login page",
                "Enter valid username",
                "Enter valid password",
                "Click login button",
            ],
            "User is successfully logged in and redirected to dashboard/homepage",
        );
    }

    if analysis.has_functionality(Functionality::Create) {
        w.automated(
            "Create new record with valid data",
            &[
                "Navigate to create form",
                "Fill all required fields with valid data",
                "Submit form",
            ],
            "Record is created successfully and confirmation message is displayed",
        );
    }

    w.finish()
}

pub fn negative_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Negative, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Login with invalid password",
            &[
                "Navigate to login page",
                "Enter valid username",
                "Enter invalid password",
                "Click login button",
            ],
            "Error message is displayed: 'Invalid credentials' and user remains on login page",
        );
        w.automated(
            "Login with non-existent username",
            &[
                "Navigate to login page",
                "Enter non-existent username",
                "Enter any password",
                "Click login button",
            ],
            "Error message is displayed and login is rejected",
        );
    }

    for field in analysis.input_fields.iter().filter(|f| *f == "email") {
        w.push(
            CaseType::Automated,
            "Invalid email format validation",
            vec![
                "Navigate to form".to_string(),
                format!("Enter invalid email format in {} field", field),
                "Submit form".to_string(),
            ],
            "Validation error message is displayed for email field",
        );
    }

    w.finish()
}

pub fn edge_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::EdgeCase, start);

    for field in &analysis.input_fields {
        w.push(
            CaseType::Automated,
            format!("Empty {} field validation", field),
            vec![
                "Navigate to form".to_string(),
                format!("Leave {} field empty", field),
                "Fill other required fields".to_string(),
                "Submit form".to_string(),
            ],
            format!("Validation message is displayed for empty {} field", field),
        );
    }

    // Only reachable when the text mentions an amount or price.
    if analysis.has_input_field("amount") {
        w.manual(
            "Maximum amount boundary test",
            &["Navigate to form", "Enter maximum allowed amount", "Submit form"],
            "Amount is accepted and processed successfully",
        );
    }

    w.finish()
}

pub fn security_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Security, start);

    if analysis.has_security_concern("injection") {
        w.manual(
            "SQL injection attempt",
            &[
                "Navigate to input form",
                "Enter SQL injection payload in input fields",
                "Submit form",
            ],
            "Input is sanitized and no SQL injection occurs",
        );
    }

    if analysis.has_security_concern("xss") {
        w.manual(
            "XSS attack prevention",
            &[
                "Navigate to input form",
                "Enter XSS script in input fields",
                "Submit and view output",
            ],
            "Script is sanitized and not executed",
        );
    }

    if analysis.has_security_concern("brute-force") {
        w.manual(
            "Brute force login protection",
            &["Attempt multiple failed login attempts", "Exceed rate limit threshold"],
            "Account is temporarily locked or CAPTCHA is required",
        );
    }

    w.finish()
}

pub fn performance_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Performance, start);

    if analysis.has_performance_concern("search-performance") {
        w.manual(
            "Search performance with large dataset",
            &[
                "Navigate to search",
                "Perform search on large dataset",
                "Measure response time",
            ],
            "Search completes within acceptable time limits (< 3 seconds)",
        );
    }

    if analysis.has_performance_concern("page-load-time") {
        w.automated(
            "Page load performance",
            &["Navigate to page", "Measure page load time"],
            "Page loads within 2 seconds",
        );
    }

    w.finish()
}

pub fn smoke_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Smoke, start);

    w.automated(
        "Smoke test - Application loads successfully",
        &[
            "Open application URL",
            "Verify page loads without errors",
            "Check basic UI elements are visible",
        ],
        "Application loads and displays main interface",
    );

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Smoke test - Login page accessibility",
            &[
                "Navigate to login page",
                "Verify login form is displayed",
                "Check username and password fields are present",
            ],
            "Login page loads with all required elements",
        );
    }

    if analysis.has_functionality(Functionality::Create) {
        w.automated(
            "Smoke test - Create form accessibility",
            &[
                "Navigate to create form",
                "Verify form fields are displayed",
                "Check submit button is present",
            ],
            "Create form loads with all required elements",
        );
    }

    w.finish()
}

pub fn regression_cases(id_prefix: &str, analysis: &Analysis, start: u32) -> Vec<TestCase> {
    let mut w = CaseWriter::new(id_prefix, Category::Regression, start);

    if analysis.is_domain(Domain::Authentication) {
        w.automated(
            "Regression test - Existing user login functionality",
            &[
                "Test login with previously working credentials",
                "Verify authentication flow remains unchanged",
                "Check session management still works",
            ],
            "Existing authentication functionality continues to work",
        );
    }

    if analysis.has_functionality(Functionality::Read) {
        w.automated(
            "Regression test - Data retrieval functionality",
            &[
                "Access existing data records",
                "Verify data display functionality",
                "Check data integrity and formatting",
            ],
            "Data retrieval functionality remains intact",
        );
    }

    if analysis.has_functionality(Functionality::Update) {
        w.automated(
            "Regression test - Data modification functionality",
            &["Edit existing record", "Save changes", "Verify changes are persisted"],
            "Data modification functionality works as before",
        );
    }

    w.finish()
}

/// The generic case synthesized for a category no generator covered.
pub fn default_case(id_prefix: &str, category: Category, sequence: u32) -> TestCase {
    let (title, step, expected, case_type) = match category {
        Category::Unit => (
            "Unit test - Basic validation utility",
            "Invoke utility with sample inputs",
            "Returns expected outputs",
            CaseType::Automated,
        ),
        Category::Integration => (
            "Integration test - Service to DB connectivity",
            "Connect and run simple query",
            "Query succeeds with expected result",
            CaseType::Automated,
        ),
        Category::Functional => (
            "Functional test - Primary user workflow",
            "Execute main flow",
            "Workflow completes successfully",
            CaseType::Automated,
        ),
        Category::E2e => (
            "E2E test - Happy path",
            "Run end-to-end scenario",
            "End-to-end flow passes",
            CaseType::Automated,
        ),
        Category::Positive => (
            "Positive - Valid input scenario",
            "Provide valid inputs",
            "Operation succeeds",
            CaseType::Automated,
        ),
        Category::Negative => (
            "Negative - Invalid input scenario",
            "Provide invalid inputs",
            "Validation error shown",
            CaseType::Automated,
        ),
        Category::EdgeCase => (
            "Edge case - Empty required field",
            "Leave required field empty",
            "Required field validation triggers",
            CaseType::Automated,
        ),
        Category::Security => (
            "Security - XSS payload is sanitized",
            "Submit XSS payload",
            "Script not executed, input sanitized",
            CaseType::Manual,
        ),
        Category::Performance => (
            "Performance - Page load under 2s",
            "Measure load time",
            "Under threshold",
            CaseType::Automated,
        ),
        Category::Smoke => (
            "Smoke - App renders main screen",
            "Open app",
            "Main UI visible",
            CaseType::Automated,
        ),
        Category::Regression => (
            "Regression - Existing core flow still works",
            "Re-run previously passing flow",
            "Still passes",
            CaseType::Automated,
        ),
    };

    TestCase {
        id: case_id(id_prefix, sequence),
        title: title.to_string(),
        category,
        steps: vec![step.to_string()],
        expected: expected.to_string(),
        case_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::RequirementAnalyzer;

    fn catalog(text: &str) -> Vec<TestCase> {
        let analysis = RequirementAnalyzer::new().analyze(text);
        TestCatalogGenerator::new().generate("ABC1", &analysis)
    }

    fn titles(cases: &[TestCase], category: Category) -> Vec<&str> {
        cases
            .iter()
            .filter(|tc| tc.category == category)
            .map(|tc| tc.title.as_str())
            .collect()
    }

    #[test]
    fn test_registry_order_matches_categories() {
        let order: Vec<Category> = REGISTRY.iter().map(|e| e.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_generators_respect_start_sequence() {
        let analysis = RequirementAnalyzer::new().analyze("login");
        let cases = unit_cases("X", &analysis, 41);
        assert_eq!(cases[0].id, "X-TC-041");
        assert_eq!(cases[1].id, "X-TC-042");
    }

    #[test]
    fn test_generator_may_emit_nothing() {
        let analysis = RequirementAnalyzer::new().analyze("");
        assert!(unit_cases("X", &analysis, 1).is_empty());
        assert!(edge_cases("X", &analysis, 1).is_empty());
        assert!(security_cases("X", &analysis, 1).is_empty());
    }

    #[test]
    fn test_general_requirement_is_fully_backfilled() {
        let cases = catalog("");
        // Smoke always emits its own case; the other ten are defaults.
        assert_eq!(cases.len(), 11);
        assert_eq!(cases[0].title, "Smoke test - Application loads successfully");
        assert_eq!(cases[0].id, "ABC1-TC-001");
        assert_eq!(cases[1].title, "Unit test - Basic validation utility");
        assert_eq!(cases[1].id, "ABC1-TC-002");
        assert_eq!(cases.last().map(|tc| tc.category), Some(Category::Regression));
        assert_eq!(titles(&cases, Category::Security), vec!["Security - XSS payload is sanitized"]);
    }

    #[test]
    fn test_backfill_only_fills_missing_categories() {
        let mut cases = vec![default_case("P", Category::Unit, 1)];
        TestCatalogGenerator::new().backfill("P", &mut cases, 2);
        assert_eq!(cases.len(), 11);
        assert_eq!(cases.iter().filter(|tc| tc.category == Category::Unit).count(), 1);
        assert_eq!(cases[1].id, "P-TC-002");
        assert_eq!(cases[1].category, Category::Integration);
    }

    #[test]
    fn test_email_field_emits_negative_case() {
        let cases = catalog("Subscribe with email");
        assert_eq!(titles(&cases, Category::Negative), vec!["Invalid email format validation"]);
        let negative = cases.iter().find(|tc| tc.category == Category::Negative).unwrap();
        assert_eq!(negative.steps[1], "Enter invalid email format in email field");
    }

    #[test]
    fn test_amount_boundary_case_is_manual() {
        let cases = catalog("Enter transfer amount");
        let edge = titles(&cases, Category::EdgeCase);
        assert_eq!(edge, vec!["Empty amount field validation", "Maximum amount boundary test"]);
        let boundary = cases.iter().find(|tc| tc.title == "Maximum amount boundary test").unwrap();
        assert_eq!(boundary.case_type, CaseType::Manual);
    }

    #[test]
    fn test_security_cases_follow_concerns() {
        let cases = catalog("Contact form input");
        assert_eq!(
            titles(&cases, Category::Security),
            vec!["SQL injection attempt", "XSS attack prevention"]
        );
        assert!(cases
            .iter()
            .filter(|tc| tc.category == Category::Security)
            .all(|tc| tc.case_type == CaseType::Manual));
    }

    #[test]
    fn test_performance_cases() {
        let cases = catalog("Search results page");
        assert_eq!(
            titles(&cases, Category::Performance),
            vec!["Search performance with large dataset", "Page load performance"]
        );
    }

    #[test]
    fn test_payment_and_crud_cases() {
        let cases = catalog("Add items and view payment history, update billing");
        assert!(titles(&cases, Category::E2e).contains(&"E2E test - Create and view record workflow"));
        assert!(titles(&cases, Category::E2e).contains(&"E2E test - Complete payment processing workflow"));
        assert_eq!(
            titles(&cases, Category::Regression),
            vec![
                "Regression test - Data retrieval functionality",
                "Regression test - Data modification functionality",
            ]
        );
    }
}
