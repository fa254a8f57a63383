//! # Issue Records
//!
//! An [`Issue`] is a problem a professor reported against a class. It is
//! stored under a composite [`IssueId`] of class number, professor mail and
//! creation date: two otherwise identical reports can only be told apart by
//! when they were filed, so the date is part of the key.
//!
//! Equality on [`Issue`] is narrower than identity. Two
//! records with the same class number, description and professor mail are
//! the same complaint regardless of status or date, and compare equal.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::status::IssueStatus;

/// The fields an issue submission is judged on.
///
/// Implemented by both stored records and create candidates so that the
/// validator and duplicate detection accept either.
pub trait IssueContent {
    /// Class the issue was reported against.
    fn class_number(&self) -> &str;
    /// Mail of the professor who reported it.
    fn professor_mail(&self) -> &str;
    /// Free-text description of the problem.
    fn description(&self) -> &str;

    /// Whether `other` reports the same problem as `self`.
    ///
    /// Compares class number, description and professor mail. Date and
    /// status are ignored.
    fn is_duplicate_of(&self, other: &impl IssueContent) -> bool
    where
        Self: Sized,
    {
        self.class_number() == other.class_number()
            && self.description() == other.description()
            && self.professor_mail() == other.professor_mail()
    }
}

/// Composite storage key of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueId {
    /// Class the issue was reported against.
    pub class_number: String,
    /// Mail of the professor who reported it.
    pub professor_mail: String,
    /// Server-assigned creation time.
    pub date: DateTime<Utc>,
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}@{}",
            self.class_number,
            self.professor_mail,
            self.date.to_rfc3339()
        )
    }
}

/// A stored issue.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Class the issue was reported against.
    pub class_number: String,
    /// Mail of the professor who reported it.
    pub professor_mail: String,
    /// Server-assigned creation time.
    pub date: DateTime<Utc>,
    /// Free-text description of the problem.
    pub description: String,
    /// Current lifecycle status.
    pub status: IssueStatus,
}

impl Issue {
    /// The composite key this issue is stored under.
    pub fn id(&self) -> IssueId {
        IssueId {
            class_number: self.class_number.clone(),
            professor_mail: self.professor_mail.clone(),
            date: self.date,
        }
    }

    /// Whether this issue is stored under `id`.
    pub fn has_id(&self, id: &IssueId) -> bool {
        self.class_number == id.class_number
            && self.professor_mail == id.professor_mail
            && self.date == id.date
    }
}

impl IssueContent for Issue {
    fn class_number(&self) -> &str {
        &self.class_number
    }

    fn professor_mail(&self) -> &str {
        &self.professor_mail
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.is_duplicate_of(other)
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_number.hash(state);
        self.description.hash(state);
        self.professor_mail.hash(state);
    }
}

/// A create candidate: the client-supplied fields of a new issue.
///
/// Status and date are not part of a candidate; they are assigned by
/// [`NewIssue::into_issue`] once the candidate has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Class the issue is reported against.
    pub class_number: String,
    /// Mail of the submitting professor.
    pub professor_mail: String,
    /// Free-text description of the problem.
    pub description: String,
}

impl NewIssue {
    /// Turn an accepted candidate into a stored record with status `To do`.
    pub fn into_issue(self, date: DateTime<Utc>) -> Issue {
        Issue {
            class_number: self.class_number,
            professor_mail: self.professor_mail,
            date,
            description: self.description,
            status: IssueStatus::default(),
        }
    }
}

impl IssueContent for NewIssue {
    fn class_number(&self) -> &str {
        &self.class_number
    }

    fn professor_mail(&self) -> &str {
        &self.professor_mail
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn issue(date_secs: i64, status: IssueStatus) -> Issue {
        Issue {
            class_number: "101".to_string(),
            professor_mail: "j.smith@school.org".to_string(),
            date: Utc.timestamp_opt(date_secs, 0).unwrap(),
            description: "Broken projector".to_string(),
            status,
        }
    }

    #[test]
    fn equality_ignores_date_and_status() {
        let a = issue(1_700_000_000, IssueStatus::ToDo);
        let b = issue(1_800_000_000, IssueStatus::Finished);
        assert_eq!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn equality_compares_description() {
        let a = issue(1_700_000_000, IssueStatus::ToDo);
        let mut b = a.clone();
        b.description = "Broken speakers".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(issue(1, IssueStatus::ToDo));
        set.insert(issue(2, IssueStatus::Canceled));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn candidate_matches_stored_record() {
        let stored = issue(1, IssueStatus::InProcess);
        let candidate = NewIssue {
            class_number: "101".to_string(),
            professor_mail: "j.smith@school.org".to_string(),
            description: "Broken projector".to_string(),
        };
        assert!(candidate.is_duplicate_of(&stored));

        let other_class = NewIssue {
            class_number: "102".to_string(),
            ..candidate
        };
        assert!(!other_class.is_duplicate_of(&stored));
    }

    #[test]
    fn into_issue_defaults_status_and_keeps_date() {
        let date = Utc.timestamp_opt(42, 0).unwrap();
        let record = NewIssue {
            class_number: "2B".to_string(),
            professor_mail: "p@school.org".to_string(),
            description: "No chalk".to_string(),
        }
        .into_issue(date);
        assert_eq!(record.status, IssueStatus::ToDo);
        assert_eq!(record.date, date);
        assert!(record.has_id(&record.id()));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(issue(0, IssueStatus::ToDo)).unwrap();
        assert_eq!(json["classNumber"], "101");
        assert_eq!(json["professorMail"], "j.smith@school.org");
        assert_eq!(json["status"], "To do");
        assert!(json["date"].is_string());
    }

    #[test]
    fn id_deserializes_from_camel_case() {
        let id: IssueId = serde_json::from_value(serde_json::json!({
            "classNumber": "101",
            "professorMail": "j.smith@school.org",
            "date": "2026-01-15T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(id.class_number, "101");
        assert_eq!(id.date, Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap());
    }
}
