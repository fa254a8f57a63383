//! Issue persistence operations.
//!
//! All queries run against the `issues` table. Status labels are stored as
//! their literal text; the column's CHECK constraint mirrors
//! [`IssueStatus::ALL`], and the application never writes anything else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reaktor_core::{Issue, IssueFilter, IssueId, IssueStatus};
use sqlx::PgPool;

use crate::store::{IssueStore, StoreError};

const SELECT_COLUMNS: &str =
    "SELECT class_number, professor_mail, created_at, description, status FROM issues";

/// [`IssueStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgIssueStore {
    pool: PgPool,
}

impl PgIssueStore {
    /// Wrap an initialised pool. Migrations must already have run.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    async fn insert(&self, issue: &Issue) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO issues (class_number, professor_mail, created_at, description, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&issue.class_number)
        .bind(&issue.professor_mail)
        .bind(issue.date)
        .bind(&issue.description)
        .bind(issue.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &IssueId) -> Result<Option<Issue>, StoreError> {
        let row = sqlx::query_as::<_, IssueRow>(&format!(
            "{SELECT_COLUMNS} WHERE class_number = $1 AND professor_mail = $2 AND created_at = $3"
        ))
        .bind(&id.class_number)
        .bind(&id.professor_mail)
        .bind(id.date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(IssueRow::into_issue).transpose()
    }

    async fn contains(&self, id: &IssueId) -> Result<bool, StoreError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM issues
             WHERE class_number = $1 AND professor_mail = $2 AND created_at = $3)",
        )
        .bind(&id.class_number)
        .bind(&id.professor_mail)
        .bind(id.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn replace(&self, issue: &Issue) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE issues SET description = $1, status = $2
             WHERE class_number = $3 AND professor_mail = $4 AND created_at = $5",
        )
        .bind(&issue.description)
        .bind(issue.status.as_str())
        .bind(&issue.class_number)
        .bind(&issue.professor_mail)
        .bind(issue.date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_status(&self, id: &IssueId, status: IssueStatus) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE issues SET status = $1
             WHERE class_number = $2 AND professor_mail = $3 AND created_at = $4",
        )
        .bind(status.as_str())
        .bind(&id.class_number)
        .bind(&id.professor_mail)
        .bind(id.date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: &IssueId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM issues
             WHERE class_number = $1 AND professor_mail = $2 AND created_at = $3",
        )
        .bind(&id.class_number)
        .bind(&id.professor_mail)
        .bind(id.date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_duplicate(
        &self,
        class_number: &str,
        description: &str,
        professor_mail: &str,
    ) -> Result<Option<Issue>, StoreError> {
        let row = sqlx::query_as::<_, IssueRow>(&format!(
            "{SELECT_COLUMNS} WHERE class_number = $1 AND description = $2 AND professor_mail = $3
             ORDER BY created_at LIMIT 1"
        ))
        .bind(class_number)
        .bind(description)
        .bind(professor_mail)
        .fetch_optional(&self.pool)
        .await?;

        row.map(IssueRow::into_issue).transpose()
    }

    async fn find_by_filter(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let rows = sqlx::query_as::<_, IssueRow>(&format!(
            "{SELECT_COLUMNS} WHERE
                 ($1::TEXT IS NULL OR class_number = $1) AND
                 ($2::TEXT IS NULL OR professor_mail = $2) AND
                 ($3::TIMESTAMPTZ IS NULL OR created_at = $3) AND
                 ($4::TEXT IS NULL OR description = $4) AND
                 ($5::TEXT IS NULL OR status = $5)
             ORDER BY created_at"
        ))
        .bind(filter.class_number.as_deref())
        .bind(filter.professor_mail.as_deref())
        .bind(filter.date)
        .bind(filter.description.as_deref())
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(IssueRow::into_issue).collect()
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct IssueRow {
    class_number: String,
    professor_mail: String,
    created_at: DateTime<Utc>,
    description: String,
    status: String,
}

impl IssueRow {
    /// An unknown status is an error. The CHECK constraint rules it out
    /// unless the table was edited by hand.
    fn into_issue(self) -> Result<Issue, StoreError> {
        let status = self.status.parse::<IssueStatus>().map_err(|e| {
            tracing::error!(
                class_number = %self.class_number,
                professor_mail = %self.professor_mail,
                status = %self.status,
                "unknown issue status in database"
            );
            StoreError::CorruptRow(e.to_string())
        })?;

        Ok(Issue {
            class_number: self.class_number,
            professor_mail: self.professor_mail,
            date: self.created_at,
            description: self.description,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(status: &str) -> IssueRow {
        IssueRow {
            class_number: "101".to_string(),
            professor_mail: "j.smith@school.org".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            description: "Broken projector".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn row_with_known_status_converts() {
        let issue = row("In process").into_issue().unwrap();
        assert_eq!(issue.status, IssueStatus::InProcess);
        assert_eq!(issue.date, Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap());
        assert_eq!(issue.class_number, "101");
    }

    #[test]
    fn row_with_unknown_status_is_corrupt() {
        let err = row("Done").into_issue().unwrap_err();
        assert!(matches!(err, StoreError::CorruptRow(_)));
    }
}
