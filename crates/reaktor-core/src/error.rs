//! # Error Hierarchy
//!
//! Structured error types for the issue tracker, built with `thiserror`.
//!
//! [`IssueError`] is the request-level taxonomy: every operation on an
//! issue either succeeds or fails with exactly one of its variants, and
//! each variant is terminal for the request. [`ValidationError`] records
//! *which* submission rule failed so operators can read it in the logs,
//! while clients only ever see the fixed [`IssueError::InvalidInput`]
//! message.

use thiserror::Error;

/// Request-level failure of an issue operation.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The submitted fields do not form a legal issue.
    #[error("invalid issue values")]
    InvalidInput(#[source] ValidationError),

    /// An issue with the same class number, description and professor
    /// mail is already stored.
    #[error("issue already exists")]
    AlreadyExists,

    /// No issue is stored under the requested identity.
    #[error("issue not found")]
    NotFound,

    /// A filter query matched no stored issue.
    #[error("issue list is empty")]
    EmptyResult,

    /// The requested status label is not one of the recognised labels.
    #[error("issue status could not be changed to \"{0}\"")]
    TransitionRejected(String),

    /// The storage backend failed. The message is for operators only.
    #[error("storage error: {0}")]
    Storage(String),
}

impl IssueError {
    /// Whether the failure was caused by the client rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl From<ValidationError> for IssueError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err)
    }
}

/// The submission rule an issue candidate broke.
///
/// Only the first failing rule is reported, checked in the order
/// professor mail, class number, description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Professor mail is empty or whitespace-only.
    #[error("professor mail must not be blank")]
    BlankProfessorMail,

    /// Professor mail belongs to a student account.
    #[error("professor mail \"{0}\" is a student address")]
    StudentMail(String),

    /// Class number is empty or whitespace-only.
    #[error("class number must not be blank")]
    BlankClassNumber,

    /// Description is empty or whitespace-only.
    #[error("description must not be blank")]
    BlankDescription,
}

/// A status label that is not one of the four recognised labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown issue status: \"{0}\" (expected one of \"To do\", \"In process\", \"Finished\", \"Canceled\")")]
pub struct UnknownStatus(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_hides_rule_in_display() {
        let err = IssueError::from(ValidationError::BlankDescription);
        assert_eq!(err.to_string(), "invalid issue values");
    }

    #[test]
    fn invalid_input_keeps_rule_as_source() {
        let err = IssueError::from(ValidationError::StudentMail("a@g.educaand.es".into()));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("professor mail \"a@g.educaand.es\" is a student address")
        );
    }

    #[test]
    fn transition_rejected_names_label() {
        let err = IssueError::TransitionRejected("Bogus".into());
        assert!(err.to_string().contains("Bogus"));
    }

    #[test]
    fn only_storage_is_a_server_error() {
        assert!(IssueError::NotFound.is_client_error());
        assert!(IssueError::AlreadyExists.is_client_error());
        assert!(IssueError::EmptyResult.is_client_error());
        assert!(IssueError::TransitionRejected("x".into()).is_client_error());
        assert!(IssueError::from(ValidationError::BlankClassNumber).is_client_error());
        assert!(!IssueError::Storage("pool closed".into()).is_client_error());
    }

    #[test]
    fn unknown_status_lists_expected_labels() {
        let msg = UnknownStatus("done".into()).to_string();
        assert!(msg.contains("\"done\""));
        assert!(msg.contains("In process"));
    }
}
