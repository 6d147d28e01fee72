//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database, building sample records with
//! sensible defaults, and a mailer double that records what it was asked to send.

use crate::{
    config::{AppConfig, BusinessConfig},
    core::{invoice::InvoiceDraft, job::JobPostingInput, timesheet::NewTimesheet},
    entities::{TimesheetStatus, timesheet},
    errors::{Error, Result},
    notify::{EmailMessage, Mailer},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::DatabaseConnection;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use uuid::Uuid;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A 09:00-17:00 shift with an hour's break (7.00 hours).
pub fn sample_new_timesheet() -> NewTimesheet {
    NewTimesheet {
        nurse_name: "Amira Khan".to_string(),
        nurse_email: "amira@example.com".to_string(),
        practice_name: "Bright Smile Dental".to_string(),
        shift_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap_or_default(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        break_minutes: 60,
        total_hours: 7.0,
        verifier_name: "Dr Patel".to_string(),
        verifier_role: "Practice Manager".to_string(),
        feedback: Some("Very helpful".to_string()),
    }
}

/// An unsaved pending timesheet row billing `total_hours`.
pub fn sample_timesheet_model(total_hours: f64) -> timesheet::Model {
    let record = sample_new_timesheet();
    timesheet::Model {
        id: Uuid::new_v4(),
        nurse_name: record.nurse_name,
        nurse_email: record.nurse_email,
        practice_name: record.practice_name,
        shift_date: record.shift_date,
        start_time: record.start_time,
        end_time: record.end_time,
        break_minutes: 60,
        total_hours,
        verifier_name: record.verifier_name,
        verifier_role: record.verifier_role,
        feedback: record.feedback,
        status: TimesheetStatus::Pending,
        created_at: Utc::now(),
    }
}

/// A draft for an unsaved timesheet with the given hours and rate.
pub fn sample_draft(hours: f64, rate: f64) -> InvoiceDraft {
    InvoiceDraft::open(
        &sample_timesheet_model(hours),
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap_or_default(),
        rate,
    )
}

/// Letterhead details used across rendering tests.
pub fn test_business() -> BusinessConfig {
    BusinessConfig {
        name: "Test Staffing Agency".to_string(),
        address_lines: vec!["1 High Street".to_string(), "Leeds".to_string()],
        email: "accounts@agency.com".to_string(),
        phone: "0113 000 0000".to_string(),
        website: None,
        currency_symbol: "£".to_string(),
        vat_number: None,
        payment_terms: "Payment due within 14 days.".to_string(),
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig {
        business: test_business(),
        ..AppConfig::default()
    };
    config.notifications.admin_email = "office@agency.com".to_string();
    config
}

/// An active locum posting titled `title`.
pub fn sample_job_input(title: &str) -> JobPostingInput {
    JobPostingInput {
        title: title.to_string(),
        location: "Leeds".to_string(),
        description: "Two days a week covering a busy NHS practice.".to_string(),
        pay_rate: Some("£18-£22/hr".to_string()),
        employment_type: "locum".to_string(),
        is_active: true,
    }
}

/// Mailer double that records messages, or fails every send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Sends attempted so far, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, message: &EmailMessage) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Notification {
                message: "relay offline".to_string(),
            });
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        Ok(())
    }
}
