//! Invoice composer - Turns a stored timesheet into an editable invoice draft.
//!
//! Drafts are never persisted. One is built each time an admin opens the
//! editor and is thrown away when the editor closes; only the rendered HTML
//! leaves the session. Subtotal, VAT and total are always derived from hours
//! and rate, so a draft coming back from the browser is recalculated before
//! anything is rendered from it.

use crate::{
    core::{hours::round_to_cents, validation},
    entities::timesheet,
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// VAT charged on nurse cover. Kept as a line so the totals block has a slot for it.
pub const VAT_RATE: f64 = 0.0;

/// An invoice being edited by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Timesheet this invoice bills; its status moves to `invoiced` on print/send
    pub timesheet_id: Uuid,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub nurse_name: String,
    pub nurse_email: String,
    pub practice_name: String,
    /// Where the invoice is emailed; must be filled in before sending
    #[serde(default)]
    pub practice_email: String,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_minutes: i32,
    pub verifier_name: String,
    pub verifier_role: String,
    /// Line-item description
    pub description: String,
    pub hours: f64,
    pub hourly_rate: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub vat: f64,
    #[serde(default)]
    pub total: f64,
}

/// Admin edits applied to a draft. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceEdits {
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub practice_email: Option<String>,
    pub description: Option<String>,
    pub hours: Option<f64>,
    pub hourly_rate: Option<f64>,
}

/// Invoice number for `date` with the given three-digit suffix: `INV-YYYYMM-NNN`.
///
/// # Errors
/// Returns `Error::Validation` if `suffix` does not fit in three digits.
pub fn format_invoice_number(date: NaiveDate, suffix: u16) -> Result<String> {
    if suffix > 999 {
        return Err(Error::validation(
            "invoice_number",
            format!("suffix {suffix} does not fit in three digits"),
        ));
    }
    Ok(format!("INV-{:04}{:02}-{suffix:03}", date.year(), date.month()))
}

/// Fresh invoice number for `date` with a random suffix between 100 and 999.
#[must_use]
pub fn generate_invoice_number(date: NaiveDate) -> String {
    let suffix: u16 = rand::rng().random_range(100..1000);
    format!("INV-{:04}{:02}-{suffix}", date.year(), date.month())
}

fn check_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

impl InvoiceDraft {
    /// Opens a draft for `timesheet`, dated `today`, billed at `hourly_rate`.
    ///
    /// A stored negative total (break longer than the shift) is billed as zero
    /// hours so the draft stays editable.
    #[must_use]
    pub fn open(timesheet: &timesheet::Model, today: NaiveDate, hourly_rate: f64) -> Self {
        if timesheet.total_hours < 0.0 {
            warn!(
                "Timesheet {} has {} hours; opening invoice at 0",
                timesheet.id, timesheet.total_hours
            );
        }
        let hours = timesheet.total_hours.max(0.0);
        let mut draft = Self {
            timesheet_id: timesheet.id,
            invoice_number: generate_invoice_number(today),
            issue_date: today,
            nurse_name: timesheet.nurse_name.clone(),
            nurse_email: timesheet.nurse_email.clone(),
            practice_name: timesheet.practice_name.clone(),
            practice_email: String::new(),
            shift_date: timesheet.shift_date,
            start_time: timesheet.start_time,
            end_time: timesheet.end_time,
            break_minutes: timesheet.break_minutes,
            verifier_name: timesheet.verifier_name.clone(),
            verifier_role: timesheet.verifier_role.clone(),
            description: default_description(&timesheet.practice_name, timesheet.shift_date),
            hours,
            hourly_rate,
            subtotal: 0.0,
            vat: 0.0,
            total: 0.0,
        };
        draft.recalculate();
        draft
    }

    /// Recomputes subtotal, VAT and total from hours and rate.
    pub fn recalculate(&mut self) {
        self.subtotal = round_to_cents(self.hours * self.hourly_rate);
        self.vat = round_to_cents(self.subtotal * VAT_RATE);
        self.total = round_to_cents(self.subtotal + self.vat);
    }

    /// Changes the billed hours and recomputes the totals.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` for negative or non-finite hours.
    pub fn set_hours(&mut self, hours: f64) -> Result<()> {
        self.hours = check_amount(hours)?;
        self.recalculate();
        Ok(())
    }

    /// Changes the hourly rate and recomputes the totals.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` for a negative or non-finite rate.
    pub fn set_rate(&mut self, hourly_rate: f64) -> Result<()> {
        self.hourly_rate = check_amount(hourly_rate)?;
        self.recalculate();
        Ok(())
    }

    /// Applies a set of edits. Nothing is changed if any edit is invalid.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` for a negative or non-finite hours or rate
    /// edit, or `Error::Validation` for a blank invoice number.
    pub fn apply(&mut self, edits: InvoiceEdits) -> Result<()> {
        let hours = edits.hours.map(check_amount).transpose()?;
        let hourly_rate = edits.hourly_rate.map(check_amount).transpose()?;

        if let Some(number) = edits.invoice_number {
            self.invoice_number = validation::require_text("invoice_number", &number)?;
        }
        if let Some(date) = edits.issue_date {
            self.issue_date = date;
        }
        if let Some(email) = edits.practice_email {
            self.practice_email = email.trim().to_string();
        }
        if let Some(description) = edits.description {
            self.description = description;
        }
        if let Some(hours) = hours {
            self.hours = hours;
        }
        if let Some(hourly_rate) = hourly_rate {
            self.hourly_rate = hourly_rate;
        }
        self.recalculate();
        Ok(())
    }

    /// Applies `edits` to a draft received from a client, then checks the
    /// result and rederives its totals.
    ///
    /// Only the edited draft has to be valid, so an edit can repair bad hours
    /// or rate sent back by the client.
    ///
    /// # Errors
    /// Returns an error if an edit is invalid, or if the resulting hours, rate
    /// or invoice number are.
    pub fn edited(mut self, edits: InvoiceEdits) -> Result<Self> {
        self.apply(edits)?;
        self.normalized()
    }

    /// Checks a draft received from a client and rederives its totals.
    ///
    /// # Errors
    /// Returns an error if hours or rate are invalid or the invoice number is blank.
    pub fn normalized(mut self) -> Result<Self> {
        check_amount(self.hours)?;
        check_amount(self.hourly_rate)?;
        self.invoice_number = validation::require_text("invoice_number", &self.invoice_number)?;
        self.practice_email = self.practice_email.trim().to_string();
        self.recalculate();
        Ok(self)
    }

    /// The address the invoice can be sent to.
    ///
    /// # Errors
    /// Returns `Error::MissingRecipient` if no practice email has been entered,
    /// or a validation error if it is malformed.
    pub fn recipient(&self) -> Result<&str> {
        let email = self.practice_email.trim();
        if email.is_empty() {
            return Err(Error::MissingRecipient);
        }
        if !validation::is_valid_email(email) {
            return Err(Error::validation(
                "practice_email",
                "is not a valid email address",
            ));
        }
        Ok(email)
    }

    /// Subject line used when the invoice is emailed.
    #[must_use]
    pub fn email_subject(&self, business_name: &str) -> String {
        format!(
            "Invoice {} from {} - {}",
            self.invoice_number, business_name, self.practice_name
        )
    }
}

fn default_description(practice_name: &str, shift_date: NaiveDate) -> String {
    format!(
        "Dental nurse cover - {} ({})",
        practice_name,
        shift_date.format("%d/%m/%Y")
    )
}
