//! Timesheet entity - One submitted shift record.
//!
//! Rows are written by the nurse-facing submission form and only ever mutated
//! through their `status` column. `total_hours` is computed once at submission
//! and stored as-is; it is never re-derived from the time columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a timesheet: `pending` -> `invoiced` -> `paid`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    /// Submitted by a nurse, not yet billed
    #[sea_orm(string_value = "pending")]
    Pending,
    /// An invoice derived from this timesheet was printed or emailed
    #[sea_orm(string_value = "invoiced")]
    Invoiced,
    /// Marked paid by an admin
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl TimesheetStatus {
    /// Position in the lifecycle, used to spot backwards moves.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Invoiced => 1,
            Self::Paid => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Invoiced => "invoiced",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timesheet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheets")]
pub struct Model {
    /// Opaque identifier assigned by the server
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nurse_name: String,
    pub nurse_email: String,
    /// Dental practice the shift was worked at
    pub practice_name: String,
    pub shift_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    /// Unpaid break in minutes
    pub break_minutes: i32,
    /// Worked hours, rounded to two decimals at submission time
    pub total_hours: f64,
    /// Person at the practice who confirmed the shift
    pub verifier_name: String,
    pub verifier_role: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub status: TimesheetStatus,
    pub created_at: DateTimeUtc,
}

/// Timesheets have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
