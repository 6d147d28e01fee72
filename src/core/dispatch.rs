//! Invoice dispatch - The print and email paths and their status side effect.
//!
//! Both paths move the source timesheet from `pending` to `invoiced`. Printing
//! cannot report failure, so it flips unconditionally. Sending flips only after
//! the mail relay accepted the message; a failed send leaves the status alone.
//! The two steps are not transactional and nothing is retried.

use crate::{
    config::BusinessConfig,
    core::{
        invoice::InvoiceDraft,
        render::{render_email_body, render_print_document},
        timesheet::{get_timesheet, mark_invoiced},
    },
    entities::timesheet,
    errors::Result,
    notify::{EmailMessage, Mailer},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info, instrument};

/// Outcome of the print path.
#[derive(Debug, Clone)]
pub struct PrintedInvoice {
    /// Page to hand to the browser's print dialog
    pub document: String,
    pub timesheet: timesheet::Model,
    /// Whether this call moved the timesheet to `invoiced`
    pub status_changed: bool,
}

/// Outcome of the email path.
#[derive(Debug, Clone, Serialize)]
pub struct SentInvoice {
    pub invoice_number: String,
    pub recipient: String,
    pub timesheet: timesheet::Model,
    /// Whether this call moved the timesheet to `invoiced`
    pub status_changed: bool,
}

/// Renders the print document and marks the timesheet invoiced.
///
/// # Errors
/// Returns an error if the timesheet does not exist or the status update fails.
#[instrument(skip(db, draft, business), fields(invoice = %draft.invoice_number, timesheet = %draft.timesheet_id))]
pub async fn print_invoice(
    db: &DatabaseConnection,
    draft: &InvoiceDraft,
    business: &BusinessConfig,
) -> Result<PrintedInvoice> {
    let document = render_print_document(draft, business);
    let (timesheet, status_changed) = mark_invoiced(db, draft.timesheet_id).await?;
    info!("Invoice {} opened for printing", draft.invoice_number);
    Ok(PrintedInvoice {
        document,
        timesheet,
        status_changed,
    })
}

/// Emails the invoice to the practice and, on success, marks the timesheet invoiced.
///
/// The recipient is checked before anything else so a draft without a
/// practice email never reaches the store or the mail relay.
///
/// # Errors
/// Returns `Error::MissingRecipient` or a validation error for a bad address,
/// `Error::TimesheetNotFound` for an unknown timesheet, or the mailer's error
/// if delivery failed.
#[instrument(skip(db, mailer, draft, business), fields(invoice = %draft.invoice_number, timesheet = %draft.timesheet_id))]
pub async fn send_invoice(
    db: &DatabaseConnection,
    mailer: &dyn Mailer,
    draft: &InvoiceDraft,
    business: &BusinessConfig,
) -> Result<SentInvoice> {
    let recipient = draft.recipient()?.to_string();
    get_timesheet(db, draft.timesheet_id).await?;

    let message = EmailMessage::new(
        recipient.clone(),
        draft.email_subject(&business.name),
        render_email_body(draft, business),
    );
    mailer
        .send_email(&message)
        .await
        .inspect_err(|e| error!("Failed to send invoice {}: {}", draft.invoice_number, e))?;

    let (timesheet, status_changed) = mark_invoiced(db, draft.timesheet_id).await?;
    info!("Invoice {} sent to {}", draft.invoice_number, recipient);
    Ok(SentInvoice {
        invoice_number: draft.invoice_number.clone(),
        recipient,
        timesheet,
        status_changed,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::timesheet::{create_timesheet, update_status},
        entities::TimesheetStatus,
        errors::Error,
        test_utils::*,
    };
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn open_draft(ts: &timesheet::Model) -> InvoiceDraft {
        InvoiceDraft::open(ts, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), 20.0)
    }

    #[tokio::test]
    async fn test_print_marks_pending_as_invoiced() -> Result<()> {
        let db = setup_test_db().await?;
        let ts = create_timesheet(&db, sample_new_timesheet()).await?;
        let draft = open_draft(&ts);

        // No practice email needed to print
        let printed = print_invoice(&db, &draft, &test_business()).await?;
        assert!(printed.status_changed);
        assert_eq!(printed.timesheet.status, TimesheetStatus::Invoiced);
        assert!(printed.document.contains("window.print()"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_without_recipient_touches_nothing() -> Result<()> {
        // A mock database with no queued results fails any query it receives
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let mailer = RecordingMailer::new();
        let draft = open_draft(&sample_timesheet_model(7.5));

        let result = send_invoice(&db, &mailer, &draft, &test_business()).await;
        assert!(matches!(result, Err(Error::MissingRecipient)));
        assert!(mailer.sent().is_empty());
        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_send_success_marks_invoiced() -> Result<()> {
        let db = setup_test_db().await?;
        let mailer = RecordingMailer::new();
        let ts = create_timesheet(&db, sample_new_timesheet()).await?;
        let mut draft = open_draft(&ts);
        draft.practice_email = "billing@brightsmile.co.uk".to_string();

        let sent = send_invoice(&db, &mailer, &draft, &test_business()).await?;
        assert!(sent.status_changed);
        assert_eq!(sent.timesheet.status, TimesheetStatus::Invoiced);

        let messages = mailer.sent();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "billing@brightsmile.co.uk");
        assert!(messages[0].subject.contains(&draft.invoice_number));
        assert!(messages[0].html.contains("£140.00"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_failure_leaves_status_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let mailer = RecordingMailer::failing();
        let ts = create_timesheet(&db, sample_new_timesheet()).await?;
        let mut draft = open_draft(&ts);
        draft.practice_email = "billing@brightsmile.co.uk".to_string();

        let result = send_invoice(&db, &mailer, &draft, &test_business()).await;
        assert!(matches!(result, Err(Error::Notification { .. })));

        let stored = get_timesheet(&db, ts.id).await?;
        assert_eq!(stored.status, TimesheetStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn test_sending_twice_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let mailer = RecordingMailer::new();
        let ts = create_timesheet(&db, sample_new_timesheet()).await?;
        let mut draft = open_draft(&ts);
        draft.practice_email = "billing@brightsmile.co.uk".to_string();

        let first = send_invoice(&db, &mailer, &draft, &test_business()).await?;
        let second = send_invoice(&db, &mailer, &draft, &test_business()).await?;
        assert!(first.status_changed);
        assert!(!second.status_changed);
        assert_eq!(second.timesheet.status, TimesheetStatus::Invoiced);
        assert_eq!(mailer.sent().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_invoicing_a_paid_timesheet_keeps_it_paid() -> Result<()> {
        let db = setup_test_db().await?;
        let ts = create_timesheet(&db, sample_new_timesheet()).await?;
        update_status(&db, ts.id, TimesheetStatus::Paid).await?;

        let printed = print_invoice(&db, &open_draft(&ts), &test_business()).await?;
        assert!(!printed.status_changed);
        assert_eq!(printed.timesheet.status, TimesheetStatus::Paid);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_for_unknown_timesheet_does_not_email() -> Result<()> {
        let db = setup_test_db().await?;
        let mailer = RecordingMailer::new();
        let mut draft = open_draft(&sample_timesheet_model(7.5));
        draft.practice_email = "billing@brightsmile.co.uk".to_string();

        let result = send_invoice(&db, &mailer, &draft, &test_business()).await;
        assert!(matches!(result, Err(Error::TimesheetNotFound { .. })));
        assert!(mailer.sent().is_empty());
        Ok(())
    }
}
