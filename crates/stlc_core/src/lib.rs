//! # stlc_core
//!
//! Requirement analysis and test artifact generation for STLC Forge.
//!
//! A free-text requirement flows through three deterministic stages:
//!
//! | Stage | Type | Output |
//! |-------|------|--------|
//! | Analysis | [`RequirementAnalyzer`] | [`Analysis`] |
//! | Catalog | [`TestCatalogGenerator`] | ordered [`TestCase`] list |
//! | Automation | [`AutomationCodeGenerator`] | [`AutomationArtifact`] |
//!
//! Every stage is a pure function of its input. Nothing here performs I/O or
//! reads configuration, and none of the stages can fail.
//!
//! ## Example
//!
//! ```rust
//! use stlc_core::{generate_artifacts, Category, Requirement};
//!
//! let requirement = Requirement::from_text("User login with username and password")
//!     .with_key("ABC-1");
//! let artifacts = generate_artifacts(&requirement);
//!
//! assert_eq!(artifacts.test_cases[0].id, "ABC1-TC-001");
//! assert!(Category::ALL
//!     .iter()
//!     .all(|c| artifacts.test_cases.iter().any(|tc| tc.category == *c)));
//! ```

pub mod analyzer;
pub mod automation;
pub mod catalog;
pub mod error;
pub mod models;
pub mod pipeline;

pub use analyzer::RequirementAnalyzer;
pub use automation::{AutomationCodeGenerator, CaseTemplate, PAGE_LOAD_THRESHOLD_MS};
pub use catalog::{TestCatalogGenerator, REGISTRY};
pub use error::{CoreError, CoreResult};
pub use models::*;
pub use pipeline::{generate_artifacts, ArtifactGenerator};
