//! # Issue Operations
//!
//! [`IssueService`] runs every issue operation as one validate → check →
//! write sequence against an [`IssueStore`]. There is no transaction
//! spanning the check and the write: two concurrent requests on the same
//! identity race, and the store's single-row atomicity is all that holds.
//!
//! Every failure is one [`IssueError`] variant and aborts the operation
//! before anything is written.

use std::sync::Arc;

use reaktor_core::validation;
use reaktor_core::{assign_timestamp, Issue, IssueError, IssueFilter, IssueId, NewIssue};

use crate::store::IssueStore;

/// Issue operations over a shared store.
#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
}

impl std::fmt::Debug for IssueService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueService").finish_non_exhaustive()
    }
}

impl IssueService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }

    /// File a new issue.
    ///
    /// The candidate must pass validation and must not duplicate a stored
    /// issue (same class number, description and professor mail, whatever
    /// its status or date). The stored record gets status `To do` and the
    /// current server time.
    pub async fn create(&self, candidate: NewIssue) -> Result<Issue, IssueError> {
        validation::check(&candidate)?;

        if self.exists(&candidate).await? {
            tracing::debug!(
                class_number = %candidate.class_number,
                professor_mail = %candidate.professor_mail,
                "candidate duplicates a stored issue"
            );
            return Err(IssueError::AlreadyExists);
        }

        let issue = candidate.into_issue(assign_timestamp());
        self.store.insert(&issue).await?;

        tracing::info!(id = %issue.id(), "issue created");
        Ok(issue)
    }

    /// Fetch the issue stored under `id`.
    pub async fn get(&self, id: &IssueId) -> Result<Issue, IssueError> {
        self.store.get(id).await?.ok_or(IssueError::NotFound)
    }

    /// Delete the issue stored under `id`.
    pub async fn delete(&self, id: &IssueId) -> Result<(), IssueError> {
        if !self.store.remove(id).await? {
            return Err(IssueError::NotFound);
        }

        tracing::info!(%id, "issue deleted");
        Ok(())
    }

    /// Replace the stored issue with the same identity as `issue`.
    ///
    /// The replacement is validated like a new submission and must not
    /// duplicate another stored issue. Identity fields locate the record;
    /// description and status are overwritten.
    pub async fn update(&self, issue: Issue) -> Result<Issue, IssueError> {
        validation::check(&issue)?;

        let id = issue.id();
        if let Some(other) = self
            .store
            .find_duplicate(
                &issue.class_number,
                &issue.description,
                &issue.professor_mail,
            )
            .await?
        {
            if other.id() != id {
                tracing::debug!(
                    %id,
                    duplicate_of = %other.id(),
                    "replacement duplicates a stored issue"
                );
                return Err(IssueError::AlreadyExists);
            }
        }
        if !self.store.replace(&issue).await? {
            return Err(IssueError::NotFound);
        }

        tracing::info!(%id, status = %issue.status, "issue updated");
        Ok(issue)
    }

    /// Every issue matching all present predicates of `filter`.
    ///
    /// A query that matches nothing is an error, not an empty list.
    pub async fn filter(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssueError> {
        let found = self.store.find_by_filter(filter).await?;
        if found.is_empty() {
            return Err(IssueError::EmptyResult);
        }
        Ok(found)
    }

    /// Move the issue stored under `id` to the status named by `label`.
    ///
    /// Any of the four recognised labels is accepted from any current
    /// status. Returns the issue as stored after the change.
    pub async fn transition(&self, id: &IssueId, label: &str) -> Result<Issue, IssueError> {
        if !self.store.contains(id).await? {
            return Err(IssueError::NotFound);
        }
        if !self.store.change_status(id, label).await? {
            return Err(IssueError::TransitionRejected(label.to_string()));
        }

        let issue = self.get(id).await?;
        tracing::info!(%id, status = %issue.status, "issue status changed");
        Ok(issue)
    }

    /// Whether an issue reporting the same problem as `candidate` is stored.
    pub async fn exists(&self, candidate: &NewIssue) -> Result<bool, IssueError> {
        Ok(self.store.exists(candidate).await?)
    }
}
