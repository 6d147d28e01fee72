//! Job postings - Vacancies managed by staff and listed on the public site.
//!
//! Unlike timesheets, postings can be hard-deleted. Hiding a posting without
//! losing it is done by clearing `is_active`.

use crate::{
    core::validation::{optional_text, require_text},
    entities::{JobPosting, job_posting},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Fields an admin supplies when creating or editing a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostingInput {
    pub title: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub pay_rate: Option<String>,
    pub employment_type: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

struct CleanInput {
    title: String,
    location: String,
    description: String,
    pay_rate: Option<String>,
    employment_type: String,
}

fn clean(input: &JobPostingInput) -> Result<CleanInput> {
    Ok(CleanInput {
        title: require_text("title", &input.title)?,
        location: require_text("location", &input.location)?,
        description: require_text("description", &input.description)?,
        pay_rate: optional_text(input.pay_rate.as_deref()),
        employment_type: require_text("employment_type", &input.employment_type)?,
    })
}

/// Creates a new job posting.
///
/// # Errors
/// Returns `Error::Validation` if a required field is blank.
#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_job(
    db: &DatabaseConnection,
    input: JobPostingInput,
) -> Result<job_posting::Model> {
    let fields = clean(&input)?;
    let now = chrono::Utc::now();
    let posting = job_posting::ActiveModel {
        title: Set(fields.title),
        location: Set(fields.location),
        description: Set(fields.description),
        pay_rate: Set(fields.pay_rate),
        employment_type: Set(fields.employment_type),
        is_active: Set(input.is_active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = posting.insert(db).await?;
    info!("Created job posting {} '{}'", created.id, created.title);
    Ok(created)
}

/// Active postings, newest first. This is what the public site shows.
pub async fn list_active_jobs(db: &DatabaseConnection) -> Result<Vec<job_posting::Model>> {
    JobPosting::find()
        .filter(job_posting::Column::IsActive.eq(true))
        .order_by_desc(job_posting::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every posting, newest first, for the admin table.
pub async fn list_all_jobs(db: &DatabaseConnection) -> Result<Vec<job_posting::Model>> {
    JobPosting::find()
        .order_by_desc(job_posting::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_job(db: &DatabaseConnection, id: i64) -> Result<job_posting::Model> {
    JobPosting::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::JobNotFound { id })
}

/// Replaces every editable field of a posting.
///
/// # Errors
/// Returns `Error::Validation` for blank fields or `Error::JobNotFound`.
#[instrument(skip(db, input))]
pub async fn update_job(
    db: &DatabaseConnection,
    id: i64,
    input: JobPostingInput,
) -> Result<job_posting::Model> {
    let fields = clean(&input)?;
    let mut posting: job_posting::ActiveModel = find_job(db, id).await?.into();
    posting.title = Set(fields.title);
    posting.location = Set(fields.location);
    posting.description = Set(fields.description);
    posting.pay_rate = Set(fields.pay_rate);
    posting.employment_type = Set(fields.employment_type);
    posting.is_active = Set(input.is_active);
    posting.updated_at = Set(chrono::Utc::now());
    posting.update(db).await.map_err(Into::into)
}

/// Shows or hides a posting on the public site.
pub async fn set_job_active(
    db: &DatabaseConnection,
    id: i64,
    is_active: bool,
) -> Result<job_posting::Model> {
    let mut posting: job_posting::ActiveModel = find_job(db, id).await?.into();
    posting.is_active = Set(is_active);
    posting.updated_at = Set(chrono::Utc::now());
    posting.update(db).await.map_err(Into::into)
}

/// Permanently removes a posting.
///
/// # Errors
/// Returns `Error::JobNotFound` if no posting has this id.
#[instrument(skip(db))]
pub async fn delete_job(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = JobPosting::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::JobNotFound { id });
    }
    info!("Deleted job posting {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_job_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = sample_job_input("Locum Dental Nurse");
        input.title = "   ".to_string();
        let result = create_job(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { field: "title", .. })));

        let mut input = sample_job_input("Locum Dental Nurse");
        input.description = String::new();
        let result = create_job(&db, input).await;
        assert!(matches!(
            result,
            Err(Error::Validation { field: "description", .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_jobs() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_job(&db, sample_job_input("Locum Dental Nurse")).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let mut hidden = sample_job_input("Head Nurse");
        hidden.is_active = false;
        let second = create_job(&db, hidden).await?;

        let active = list_active_jobs(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, first.id);

        let all = list_all_jobs(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_job() -> Result<()> {
        let db = setup_test_db().await?;
        let job = create_job(&db, sample_job_input("Locum Dental Nurse")).await?;

        let mut input = sample_job_input("Senior Dental Nurse");
        input.pay_rate = Some("  ".to_string());
        let updated = update_job(&db, job.id, input).await?;
        assert_eq!(updated.title, "Senior Dental Nurse");
        assert_eq!(updated.pay_rate, None);
        assert!(updated.updated_at >= job.updated_at);

        let missing = update_job(&db, 999, sample_job_input("x")).await;
        assert!(matches!(missing, Err(Error::JobNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_and_delete_job() -> Result<()> {
        let db = setup_test_db().await?;
        let job = create_job(&db, sample_job_input("Locum Dental Nurse")).await?;

        let hidden = set_job_active(&db, job.id, false).await?;
        assert!(!hidden.is_active);
        assert!(list_active_jobs(&db).await?.is_empty());

        delete_job(&db, job.id).await?;
        assert!(list_all_jobs(&db).await?.is_empty());
        assert!(matches!(
            delete_job(&db, job.id).await,
            Err(Error::JobNotFound { .. })
        ));
        Ok(())
    }
}
