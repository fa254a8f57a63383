//! # In-Memory Issue Store
//!
//! Backend used when no database is configured, and the fake every test
//! runs against. Records are kept in insertion order so filter results come
//! back oldest first, like the Postgres backend.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use reaktor_core::{Issue, IssueContent, IssueFilter, IssueId, IssueStatus};

use super::{IssueStore, StoreError};

/// Thread-safe, cloneable in-memory issue store.
///
/// The lock is `parking_lot`, not `tokio::sync`: it is never held across an
/// `.await`, and it does not poison when a writer panics. Lookups are a
/// linear scan, which is fine at the size of one school's issue list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueStore {
    issues: Arc<RwLock<Vec<Issue>>>,
}

impl InMemoryIssueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.issues.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn insert(&self, issue: &Issue) -> Result<(), StoreError> {
        self.issues.write().push(issue.clone());
        Ok(())
    }

    async fn get(&self, id: &IssueId) -> Result<Option<Issue>, StoreError> {
        Ok(self.issues.read().iter().find(|i| i.has_id(id)).cloned())
    }

    async fn replace(&self, issue: &Issue) -> Result<bool, StoreError> {
        let id = issue.id();
        let mut guard = self.issues.write();
        match guard.iter_mut().find(|i| i.has_id(&id)) {
            Some(entry) => {
                entry.description = issue.description.clone();
                entry.status = issue.status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(&self, id: &IssueId, status: IssueStatus) -> Result<bool, StoreError> {
        let mut guard = self.issues.write();
        match guard.iter_mut().find(|i| i.has_id(id)) {
            Some(entry) => {
                entry.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &IssueId) -> Result<bool, StoreError> {
        let mut guard = self.issues.write();
        let before = guard.len();
        guard.retain(|i| !i.has_id(id));
        Ok(guard.len() != before)
    }

    async fn find_duplicate(
        &self,
        class_number: &str,
        description: &str,
        professor_mail: &str,
    ) -> Result<Option<Issue>, StoreError> {
        Ok(self
            .issues
            .read()
            .iter()
            .find(|i| {
                i.class_number() == class_number
                    && i.description() == description
                    && i.professor_mail() == professor_mail
            })
            .cloned())
    }

    async fn find_by_filter(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        Ok(self
            .issues
            .read()
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }
}
