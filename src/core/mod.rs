//! Core business logic - framework-agnostic timesheet, invoice and job operations.

/// Invoice print and email paths with their status side effect
pub mod dispatch;
/// Shift length arithmetic
pub mod hours;
/// Invoice draft composition and totals
pub mod invoice;
/// Job posting management
pub mod job;
/// HTML rendering of invoices
pub mod render;
/// Nurse-facing capture form and optimistic submission
pub mod submission;
/// Timesheet persistence
pub mod timesheet;
/// Shared field validation
pub mod validation;
