//! # whatif-engine
//!
//! The counterfactual engine behind `whatif`.
//!
//! - [`kb`]: the knowledge base, loaded once and validated eagerly
//! - [`coverage`]: which controls still mitigate each threat under a hypothesis
//! - [`expectation`]: the facts a correct analysis of a disabled control must state
//! - [`validator`]: lexical scoring of a free-text analysis against those facts
//! - [`demo`]: pre-written analyses with known mistakes
//!
//! Everything here is synchronous and free of shared mutable state. A
//! [`KnowledgeBase`] is built once and handed to each operation by reference.
//!
//! ```
//! use whatif_engine::{KnowledgeBase, derive_expected_impact, validate_response};
//!
//! let kb = KnowledgeBase::embedded().expect("embedded ontology is valid");
//! let expected = derive_expected_impact(&kb, "Offline Backups").expect("known control");
//! let result = validate_response("Ransomware would hit Customer Data and Internal Systems.", &expected);
//! assert!((result.score - 100.0).abs() < f64::EPSILON);
//! ```

pub mod coverage;
pub mod demo;
pub mod expectation;
pub mod kb;
pub mod validator;

mod error;

pub use coverage::{compute_coverage, coverage_delta, coverage_matrix};
pub use demo::{DemoLibrary, DemoResponse};
pub use error::KbError;
pub use expectation::derive_expected_impact;
pub use kb::{KnowledgeBase, OntologyDocument};
pub use validator::{Validator, validate_response};
