//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod job_posting;
pub mod timesheet;

// Re-export specific types to avoid conflicts
pub use job_posting::{Column as JobPostingColumn, Entity as JobPosting, Model as JobPostingModel};
pub use timesheet::{
    Column as TimesheetColumn, Entity as Timesheet, Model as TimesheetModel, TimesheetStatus,
};
