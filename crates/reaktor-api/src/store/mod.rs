//! # Issue Storage
//!
//! [`IssueStore`] is the persistence seam of the service. Route handlers
//! and [`crate::service::IssueService`] only ever see `Arc<dyn IssueStore>`;
//! the concrete backend is picked at startup:
//!
//! - [`memory::InMemoryIssueStore`] when `DATABASE_URL` is unset (and in tests);
//! - [`crate::db::issues::PgIssueStore`] when a Postgres pool is available.
//!
//! Two operations are provided on top of the backend primitives:
//! [`IssueStore::change_status`], the status transition registry, and
//! [`IssueStore::exists`], duplicate detection.

pub mod memory;

use async_trait::async_trait;
use reaktor_core::{Issue, IssueContent, IssueFilter, IssueId, IssueStatus, NewIssue};
use thiserror::Error;

/// Backend failure. Never caused by the request contents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to an issue.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

impl From<StoreError> for reaktor_core::IssueError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Persistence operations over issue records.
///
/// Write primitives report whether a row was touched instead of failing on
/// a missing identity; callers check existence first and raise
/// `NotFound` themselves.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Store a new record.
    async fn insert(&self, issue: &Issue) -> Result<(), StoreError>;

    /// Fetch the record stored under `id`.
    async fn get(&self, id: &IssueId) -> Result<Option<Issue>, StoreError>;

    /// Whether a record is stored under `id`.
    async fn contains(&self, id: &IssueId) -> Result<bool, StoreError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Replace the description and status of the record stored under
    /// `issue.id()`. Returns `false` if there is no such record.
    async fn replace(&self, issue: &Issue) -> Result<bool, StoreError>;

    /// Overwrite the status of the record stored under `id`.
    /// Returns `false` if there is no such record.
    async fn set_status(&self, id: &IssueId, status: IssueStatus) -> Result<bool, StoreError>;

    /// Delete the record stored under `id`. Returns `false` if there was
    /// no such record.
    async fn remove(&self, id: &IssueId) -> Result<bool, StoreError>;

    /// First stored record reporting the same problem as the candidate:
    /// same class number, description and professor mail.
    async fn find_duplicate(
        &self,
        class_number: &str,
        description: &str,
        professor_mail: &str,
    ) -> Result<Option<Issue>, StoreError>;

    /// Every record matching all present predicates of `filter`, oldest first.
    async fn find_by_filter(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    /// Set the status of the record under `id` to the status named by `label`.
    ///
    /// Any recognised label may follow any other. Returns `false`, leaving
    /// the record untouched, when `label` is not exactly one of `"To do"`,
    /// `"In process"`, `"Finished"` or `"Canceled"`.
    async fn change_status(&self, id: &IssueId, label: &str) -> Result<bool, StoreError> {
        match IssueStatus::from_label(label) {
            Some(status) => self.set_status(id, status).await,
            None => Ok(false),
        }
    }

    /// Whether a record reporting the same problem as `candidate` is stored,
    /// regardless of its date or status.
    async fn exists(&self, candidate: &NewIssue) -> Result<bool, StoreError> {
        Ok(self
            .find_duplicate(
                candidate.class_number(),
                candidate.description(),
                candidate.professor_mail(),
            )
            .await?
            .is_some())
    }
}
