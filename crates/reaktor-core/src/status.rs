//! # Issue Status
//!
//! The status of an issue is a flat set of four labels. There is no
//! transition graph: any recognised label may replace any other, including
//! moving back out of `Finished` or `Canceled`. The only rule is that the
//! label must be one of the four below, matched exactly.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::UnknownStatus;

/// Lifecycle status of an issue.
///
/// Serialises to the literal labels `"To do"`, `"In process"`,
/// `"Finished"` and `"Canceled"`, which are also the values stored in the
/// `status` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
pub enum IssueStatus {
    /// Reported, nobody is working on it yet.
    #[default]
    #[serde(rename = "To do")]
    ToDo,
    /// Someone is working on it.
    #[serde(rename = "In process")]
    InProcess,
    /// Resolved.
    #[serde(rename = "Finished")]
    Finished,
    /// Withdrawn without being resolved.
    #[serde(rename = "Canceled")]
    Canceled,
}

impl IssueStatus {
    /// Every recognised status, in lifecycle order.
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::ToDo,
        IssueStatus::InProcess,
        IssueStatus::Finished,
        IssueStatus::Canceled,
    ];

    /// Return the literal label of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To do",
            Self::InProcess => "In process",
            Self::Finished => "Finished",
            Self::Canceled => "Canceled",
        }
    }

    /// Resolve a label to a status.
    ///
    /// The match is exact and case-sensitive: `"finished"` and
    /// `" Finished"` are not recognised.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
