//! # Issue Filters
//!
//! A filter is a partial issue: every field is optional, a present field
//! must match exactly, and an absent field matches anything. All present
//! predicates must hold at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::issue::Issue;
use crate::status::IssueStatus;

/// Field predicates for an issue query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueFilter {
    /// Exact class number.
    pub class_number: Option<String>,
    /// Exact professor mail.
    pub professor_mail: Option<String>,
    /// Exact creation time.
    pub date: Option<DateTime<Utc>>,
    /// Exact description.
    pub description: Option<String>,
    /// Exact status.
    pub status: Option<IssueStatus>,
}

impl IssueFilter {
    /// Whether no predicate is set, so every issue matches.
    pub fn is_wildcard(&self) -> bool {
        self == &Self::default()
    }

    /// Whether `issue` satisfies every present predicate.
    pub fn matches(&self, issue: &Issue) -> bool {
        fn field<T: PartialEq + ?Sized>(want: Option<&T>, have: &T) -> bool {
            want.map_or(true, |w| w == have)
        }

        field(self.class_number.as_deref(), issue.class_number.as_str())
            && field(self.professor_mail.as_deref(), issue.professor_mail.as_str())
            && field(self.date.as_ref(), &issue.date)
            && field(self.description.as_deref(), issue.description.as_str())
            && field(self.status.as_ref(), &issue.status)
    }
}
