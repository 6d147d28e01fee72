//! Timesheet capture - The three-step nurse form and its optimistic submit.
//!
//! The form moves through identity, shift and verification steps. Submitting
//! validates everything, acknowledges the nurse straight away, and leaves the
//! insert and the two notification emails to a background task whose failures
//! are logged and otherwise ignored.

use crate::{
    core::{
        hours,
        timesheet::{NewTimesheet, create_timesheet},
        validation::{optional_text, require_email, require_text},
    },
    errors::{Error, Result},
    notify::{Mailer, templates},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Steps of the capture form, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    /// Nurse name and email
    Identity,
    /// Practice, date, start/end and break
    Shift,
    /// Who confirmed the shift, plus optional feedback
    Verification,
}

impl FormStep {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Identity => Self::Shift,
            Self::Shift | Self::Verification => Self::Verification,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Identity | Self::Shift => Self::Identity,
            Self::Verification => Self::Shift,
        }
    }

    /// 1-based position shown to the nurse ("Step 2 of 3").
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Shift => 2,
            Self::Verification => 3,
        }
    }
}

/// Raw form input as typed by the nurse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimesheetForm {
    pub nurse_name: String,
    pub nurse_email: String,
    pub practice_name: String,
    pub shift_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub break_minutes: u32,
    /// Live preview of worked hours; recomputed from the times on submit
    pub total_hours: f64,
    pub verifier_name: String,
    pub verifier_role: String,
    pub feedback: Option<String>,
}

impl TimesheetForm {
    /// Refreshes `total_hours` once both times are present.
    pub fn recalculate_hours(&mut self) {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            self.total_hours = hours::total_hours(start, end, self.break_minutes);
        }
    }

    /// Validates every field and builds the record to store.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the first missing or malformed field.
    pub fn validate(&self) -> Result<NewTimesheet> {
        let nurse_name = require_text("nurse_name", &self.nurse_name)?;
        let nurse_email = require_email("nurse_email", &self.nurse_email)?;
        let practice_name = require_text("practice_name", &self.practice_name)?;
        let shift_date = self
            .shift_date
            .ok_or_else(|| Error::validation("shift_date", "is required"))?;
        let start_time = self
            .start_time
            .ok_or_else(|| Error::validation("start_time", "is required"))?;
        let end_time = self
            .end_time
            .ok_or_else(|| Error::validation("end_time", "is required"))?;
        if i32::try_from(self.break_minutes).is_err() {
            return Err(Error::validation("break_minutes", "break is too long"));
        }
        let verifier_name = require_text("verifier_name", &self.verifier_name)?;
        let verifier_role = require_text("verifier_role", &self.verifier_role)?;

        Ok(NewTimesheet {
            nurse_name,
            nurse_email,
            practice_name,
            shift_date,
            start_time,
            end_time,
            break_minutes: self.break_minutes,
            total_hours: hours::total_hours(start_time, end_time, self.break_minutes),
            verifier_name,
            verifier_role,
            feedback: optional_text(self.feedback.as_deref()),
        })
    }
}

/// The capture form together with the step the nurse is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetWizard {
    step: FormStep,
    form: TimesheetForm,
}

impl Default for TimesheetWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl TimesheetWizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: FormStep::Identity,
            form: TimesheetForm::default(),
        }
    }

    #[must_use]
    pub const fn step(&self) -> FormStep {
        self.step
    }

    #[must_use]
    pub const fn form(&self) -> &TimesheetForm {
        &self.form
    }

    pub fn set_identity(&mut self, nurse_name: &str, nurse_email: &str) {
        self.form.nurse_name = nurse_name.to_string();
        self.form.nurse_email = nurse_email.to_string();
    }

    /// Fills the shift step; worked hours update immediately.
    pub fn set_shift(
        &mut self,
        practice_name: &str,
        shift_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        break_minutes: u32,
    ) {
        self.form.practice_name = practice_name.to_string();
        self.form.shift_date = Some(shift_date);
        self.form.start_time = Some(start_time);
        self.form.end_time = Some(end_time);
        self.form.break_minutes = break_minutes;
        self.form.recalculate_hours();
    }

    pub fn set_verification(
        &mut self,
        verifier_name: &str,
        verifier_role: &str,
        feedback: Option<&str>,
    ) {
        self.form.verifier_name = verifier_name.to_string();
        self.form.verifier_role = verifier_role.to_string();
        self.form.feedback = feedback.map(ToString::to_string);
    }

    /// Moves to the following step. A no-op on the last step.
    pub fn next(&mut self) -> FormStep {
        self.step = self.step.next();
        self.step
    }

    /// Moves to the preceding step. A no-op on the first step.
    pub fn back(&mut self) -> FormStep {
        self.step = self.step.previous();
        self.step
    }

    /// Validates the form and resets it for the next entry.
    ///
    /// # Errors
    /// Returns a validation error if called before the verification step or if
    /// any field is invalid; the form is kept intact in that case.
    pub fn submit(&mut self) -> Result<NewTimesheet> {
        if self.step != FormStep::Verification {
            return Err(Error::validation(
                "step",
                format!("cannot submit from step {}", self.step.number()),
            ));
        }
        let record = self.form.validate()?;
        *self = Self::new();
        Ok(record)
    }
}

/// What the nurse sees immediately after submitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub message: String,
    pub nurse_name: String,
    pub total_hours: f64,
}

/// Everything the background submission task needs.
#[derive(Clone)]
pub struct SubmissionContext {
    pub db: DatabaseConnection,
    pub mailer: Arc<dyn Mailer>,
    pub admin_email: String,
    /// Sign-off used in the nurse confirmation
    pub sender_name: String,
}

/// Acknowledges a validated record and persists/notifies in the background.
///
/// The acknowledgement does not depend on the background work; the returned
/// handle is only useful to callers (tests) that want to wait for it.
pub fn submit_timesheet(
    ctx: SubmissionContext,
    record: NewTimesheet,
) -> (SubmissionAck, JoinHandle<()>) {
    let ack = SubmissionAck {
        message: "Thank you! Your timesheet has been submitted.".to_string(),
        nurse_name: record.nurse_name.clone(),
        total_hours: record.total_hours,
    };
    let task = tokio::spawn(persist_and_notify(ctx, record));
    (ack, task)
}

async fn persist_and_notify(ctx: SubmissionContext, record: NewTimesheet) {
    match create_timesheet(&ctx.db, record.clone()).await {
        Ok(stored) => info!("Timesheet {} saved for {}", stored.id, stored.nurse_name),
        Err(e) => error!("Failed to save timesheet for {}: {}", record.nurse_name, e),
    }

    let confirmation = templates::nurse_confirmation(&record, &ctx.sender_name);
    if let Err(e) = ctx.mailer.send_email(&confirmation).await {
        warn!("Failed to send timesheet confirmation to {}: {}", record.nurse_email, e);
    }

    let alert = templates::admin_alert(&record, &ctx.admin_email);
    if let Err(e) = ctx.mailer.send_email(&alert).await {
        warn!("Failed to send timesheet alert to {}: {}", ctx.admin_email, e);
    }
}
