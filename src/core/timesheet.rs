//! Timesheet store - Persistence operations for submitted shifts.
//!
//! Rows are only ever appended and have their status changed; there is no
//! delete. Status changes are not checked against the lifecycle order here:
//! an admin may move a row backwards, which is logged but allowed.

use crate::{
    entities::{Timesheet, TimesheetStatus, timesheet},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A validated shift ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTimesheet {
    pub nurse_name: String,
    pub nurse_email: String,
    pub practice_name: String,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_minutes: u32,
    /// Cached result of `hours::total_hours` at submission time
    pub total_hours: f64,
    pub verifier_name: String,
    pub verifier_role: String,
    pub feedback: Option<String>,
}

/// Inserts a new timesheet with status `pending`.
///
/// The id and creation timestamp are assigned here. Duplicate submissions for
/// the same nurse and date are accepted.
///
/// # Errors
/// Returns an error if the break does not fit the column or the insert fails.
#[instrument(skip(db, record), fields(nurse = %record.nurse_name, date = %record.shift_date))]
pub async fn create_timesheet(
    db: &DatabaseConnection,
    record: NewTimesheet,
) -> Result<timesheet::Model> {
    let break_minutes = i32::try_from(record.break_minutes)
        .map_err(|_| Error::validation("break_minutes", "break is too long"))?;

    let model = timesheet::ActiveModel {
        id: Set(Uuid::new_v4()),
        nurse_name: Set(record.nurse_name),
        nurse_email: Set(record.nurse_email),
        practice_name: Set(record.practice_name),
        shift_date: Set(record.shift_date),
        start_time: Set(record.start_time),
        end_time: Set(record.end_time),
        break_minutes: Set(break_minutes),
        total_hours: Set(record.total_hours),
        verifier_name: Set(record.verifier_name),
        verifier_role: Set(record.verifier_role),
        feedback: Set(record.feedback),
        status: Set(TimesheetStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    let inserted = model.insert(db).await?;
    info!("Stored timesheet {}", inserted.id);
    Ok(inserted)
}

/// Returns every timesheet, newest first.
pub async fn list_timesheets(db: &DatabaseConnection) -> Result<Vec<timesheet::Model>> {
    Timesheet::find()
        .order_by_desc(timesheet::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches a timesheet by id.
///
/// # Errors
/// Returns `Error::TimesheetNotFound` if no row has this id.
pub async fn get_timesheet(db: &DatabaseConnection, id: Uuid) -> Result<timesheet::Model> {
    Timesheet::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::TimesheetNotFound { id })
}

/// Sets the status of a timesheet to `new_status`, whatever it was before.
///
/// # Errors
/// Returns `Error::TimesheetNotFound` if no row has this id.
#[instrument(skip(db))]
pub async fn update_status(
    db: &DatabaseConnection,
    id: Uuid,
    new_status: TimesheetStatus,
) -> Result<timesheet::Model> {
    let current = get_timesheet(db, id).await?;
    if new_status.rank() < current.status.rank() {
        warn!(
            "Timesheet {} moved backwards from {} to {}",
            id, current.status, new_status
        );
    }

    let mut active: timesheet::ActiveModel = current.into();
    active.status = Set(new_status);
    let updated = active.update(db).await?;
    debug!("Timesheet {} is now {}", id, updated.status);
    Ok(updated)
}

/// Moves a `pending` timesheet to `invoiced`. Any other status is left as is.
///
/// Returns the row and whether it was changed.
pub async fn mark_invoiced(db: &DatabaseConnection, id: Uuid) -> Result<(timesheet::Model, bool)> {
    let current = get_timesheet(db, id).await?;
    if current.status != TimesheetStatus::Pending {
        debug!(
            "Timesheet {} already {}, leaving status unchanged",
            id, current.status
        );
        return Ok((current, false));
    }
    let updated = update_status(db, id, TimesheetStatus::Invoiced).await?;
    Ok((updated, true))
}
