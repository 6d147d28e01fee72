//! Emails sent when a nurse submits a timesheet.

use crate::{
    core::{hours::format_hours, render::escape_html, timesheet::NewTimesheet},
    notify::EmailMessage,
};

fn shift_rows(record: &NewTimesheet) -> String {
    let rows = [
        ("Nurse", escape_html(&record.nurse_name)),
        ("Email", escape_html(&record.nurse_email)),
        ("Practice", escape_html(&record.practice_name)),
        ("Date", record.shift_date.format("%d/%m/%Y").to_string()),
        (
            "Time",
            format!(
                "{} - {}",
                record.start_time.format("%H:%M"),
                record.end_time.format("%H:%M")
            ),
        ),
        ("Break", format!("{} min", record.break_minutes)),
        ("Total hours", format_hours(record.total_hours)),
        (
            "Verified by",
            format!(
                "{} ({})",
                escape_html(&record.verifier_name),
                escape_html(&record.verifier_role)
            ),
        ),
    ];
    rows.iter()
        .map(|(label, value)| {
            format!(
                "<tr><td style=\"padding: 4px 12px 4px 0; color: #6b7280;\">{label}</td><td style=\"padding: 4px 0;\">{value}</td></tr>"
            )
        })
        .collect()
}

/// Confirmation sent back to the nurse who submitted the shift.
#[must_use]
pub fn nurse_confirmation(record: &NewTimesheet, sender_name: &str) -> EmailMessage {
    let html = format!(
        "<div style=\"font-family: Arial, sans-serif;\"><p>Hi {},</p><p>Thanks for submitting your timesheet. Here is what we received:</p><table>{}</table><p>{}</p></div>",
        escape_html(&record.nurse_name),
        shift_rows(record),
        escape_html(sender_name)
    );
    EmailMessage::new(
        record.nurse_email.clone(),
        format!("Timesheet received - {}", record.shift_date.format("%d/%m/%Y")),
        html,
    )
}

/// Alert sent to the office inbox for a new timesheet.
#[must_use]
pub fn admin_alert(record: &NewTimesheet, admin_email: &str) -> EmailMessage {
    let feedback = record
        .feedback
        .as_deref()
        .map(|text| format!("<p><strong>Practice feedback:</strong> {}</p>", escape_html(text)))
        .unwrap_or_default();
    let html = format!(
        "<div style=\"font-family: Arial, sans-serif;\"><p>A new timesheet has been submitted.</p><table>{}</table>{}</div>",
        shift_rows(record),
        feedback
    );
    EmailMessage::new(
        admin_email,
        format!(
            "New timesheet: {} at {}",
            record.nurse_name, record.practice_name
        ),
        html,
    )
}
