#![deny(missing_docs)]

//! # reaktor-core: Domain Types for the Reaktor Issue Tracker
//!
//! Professors report issues (a broken projector, a missing cable) against
//! the class they teach in. This crate holds everything about an issue that
//! does not touch I/O: the record itself, its composite identity, the four
//! status labels, the submission validator, filter predicates, and the
//! error hierarchy shared by every layer above it.
//!
//! ## Design Principles
//!
//! 1. **Identity and equality are different things.** An [`IssueId`] is the
//!    storage key `(class number, professor mail, date)`. [`Issue`] equality
//!    is the *logical* key `(class number, description, professor mail)`,
//!    which is what duplicate detection compares.
//!
//! 2. **Status labels are closed.** [`IssueStatus`] has exactly four
//!    variants serialised with their literal labels. Unknown labels never
//!    reach storage.
//!
//! 3. **Validation is a pure predicate.** [`validation::validate`] answers
//!    yes or no; the caller decides what error to raise.

pub mod error;
pub mod filter;
pub mod issue;
pub mod status;
pub mod temporal;
pub mod validation;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{IssueError, UnknownStatus, ValidationError};
pub use filter::IssueFilter;
pub use issue::{Issue, IssueContent, IssueId, NewIssue};
pub use status::IssueStatus;
pub use temporal::assign_timestamp;
pub use validation::{validate, STUDENT_MAIL_SUFFIX};
