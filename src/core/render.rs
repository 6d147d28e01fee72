//! Invoice renderer - HTML output for printing and email.
//!
//! [`render_invoice`] produces one self-contained fragment with inline styles.
//! The print document and the email body both embed that exact fragment, so
//! what an admin prints is what the practice receives.

use crate::{config::BusinessConfig, core::hours::format_hours, core::invoice::InvoiceDraft};

/// Escapes text for safe interpolation into HTML element content and attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn money(symbol: &str, amount: f64) -> String {
    format!("{}{amount:.2}", escape_html(symbol))
}

/// Renders the invoice fragment shared by the print and email paths.
#[must_use]
pub fn render_invoice(draft: &InvoiceDraft, business: &BusinessConfig) -> String {
    let symbol = business.currency_symbol.as_str();
    let mut html = String::with_capacity(4096);

    html.push_str(
        r#"<div class="invoice" style="font-family: Arial, Helvetica, sans-serif; color: #1f2937; max-width: 760px; margin: 0 auto; padding: 32px;">"#,
    );

    // Letterhead
    html.push_str(&format!(
        r#"<div class="letterhead" style="display: flex; justify-content: space-between; border-bottom: 3px solid #0f766e; padding-bottom: 16px; margin-bottom: 24px;"><div><h1 style="margin: 0; font-size: 24px; color: #0f766e;">{}</h1>"#,
        escape_html(&business.name)
    ));
    for line in &business.address_lines {
        html.push_str(&format!(r#"<div style="font-size: 13px;">{}</div>"#, escape_html(line)));
    }
    html.push_str(&format!(
        r#"<div style="font-size: 13px;">{}</div>"#,
        escape_html(&business.email)
    ));
    if !business.phone.is_empty() {
        html.push_str(&format!(
            r#"<div style="font-size: 13px;">{}</div>"#,
            escape_html(&business.phone)
        ));
    }
    if let Some(website) = &business.website {
        html.push_str(&format!(r#"<div style="font-size: 13px;">{}</div>"#, escape_html(website)));
    }
    if let Some(vat_number) = &business.vat_number {
        html.push_str(&format!(
            r#"<div style="font-size: 13px;">VAT No: {}</div>"#,
            escape_html(vat_number)
        ));
    }
    html.push_str(&format!(
        r#"</div><div style="text-align: right;"><h2 style="margin: 0; font-size: 28px; letter-spacing: 2px;">INVOICE</h2><div style="font-size: 13px;">Invoice No: <strong>{}</strong></div><div style="font-size: 13px;">Date: {}</div></div></div>"#,
        escape_html(&draft.invoice_number),
        draft.issue_date.format("%d/%m/%Y")
    ));

    // Bill-to and provider blocks
    html.push_str(&format!(
        r#"<div class="parties" style="display: flex; justify-content: space-between; margin-bottom: 24px;"><div><h3 style="margin: 0 0 6px; font-size: 14px; text-transform: uppercase; color: #6b7280;">Bill To</h3><div><strong>{}</strong></div><div style="font-size: 13px;">{}</div></div>"#,
        escape_html(&draft.practice_name),
        escape_html(&draft.practice_email)
    ));
    html.push_str(&format!(
        r#"<div style="text-align: right;"><h3 style="margin: 0 0 6px; font-size: 14px; text-transform: uppercase; color: #6b7280;">Provider</h3><div><strong>{}</strong></div><div style="font-size: 13px;">via {}</div></div></div>"#,
        escape_html(&draft.nurse_name),
        escape_html(&business.name)
    ));

    // Shift summary
    html.push_str(&format!(
        r#"<div class="shift" style="font-size: 13px; background: #f3f4f6; padding: 12px 16px; border-radius: 6px; margin-bottom: 24px;">Shift on {} from {} to {} ({} min break). Verified by {} ({}).</div>"#,
        draft.shift_date.format("%d/%m/%Y"),
        draft.start_time.format("%H:%M"),
        draft.end_time.format("%H:%M"),
        draft.break_minutes,
        escape_html(&draft.verifier_name),
        escape_html(&draft.verifier_role)
    ));

    // Line items
    html.push_str(&format!(
        r#"<table class="items" style="width: 100%; border-collapse: collapse; font-size: 14px;"><thead><tr style="background: #0f766e; color: #ffffff;"><th style="text-align: left; padding: 8px;">Description</th><th style="text-align: right; padding: 8px;">Hours</th><th style="text-align: right; padding: 8px;">Rate</th><th style="text-align: right; padding: 8px;">Total</th></tr></thead><tbody><tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{}</td><td style="text-align: right; padding: 8px; border-bottom: 1px solid #e5e7eb;">{}</td><td style="text-align: right; padding: 8px; border-bottom: 1px solid #e5e7eb;">{}</td><td style="text-align: right; padding: 8px; border-bottom: 1px solid #e5e7eb;">{}</td></tr></tbody></table>"#,
        escape_html(&draft.description),
        format_hours(draft.hours),
        money(symbol, draft.hourly_rate),
        money(symbol, draft.subtotal)
    ));

    // Totals
    html.push_str(&format!(
        r#"<table class="totals" style="margin-left: auto; margin-top: 16px; font-size: 14px;"><tr><td style="padding: 4px 12px;">Subtotal</td><td style="text-align: right; padding: 4px 12px;">{}</td></tr><tr><td style="padding: 4px 12px;">VAT</td><td style="text-align: right; padding: 4px 12px;">{}</td></tr><tr style="font-weight: bold; border-top: 2px solid #1f2937;"><td style="padding: 6px 12px;">Total</td><td style="text-align: right; padding: 6px 12px;">{}</td></tr></table>"#,
        money(symbol, draft.subtotal),
        money(symbol, draft.vat),
        money(symbol, draft.total)
    ));

    html.push_str(&format!(
        r#"<p class="terms" style="font-size: 12px; color: #6b7280; margin-top: 32px;">{}</p></div>"#,
        escape_html(&business.payment_terms)
    ));

    html
}

const PRINT_STYLES: &str = "@page { size: A4; margin: 12mm; }
body { margin: 0; background: #ffffff; }
@media print {
  .invoice { padding: 0 !important; }
  .items thead tr { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
  .shift { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
}";

/// Full page for the browser's print dialog: the fragment, print rules, and an
/// onload call to `window.print()`.
#[must_use]
pub fn render_print_document(draft: &InvoiceDraft, business: &BusinessConfig) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Invoice {}</title><style>{}</style></head><body>{}<script>window.addEventListener('load', function () {{ window.print(); }});</script></body></html>",
        escape_html(&draft.invoice_number),
        PRINT_STYLES,
        render_invoice(draft, business)
    )
}

/// Email body: the fragment in a minimal container document.
#[must_use]
pub fn render_email_body(draft: &InvoiceDraft, business: &BusinessConfig) -> String {
    format!(
        "<!DOCTYPE html><html><body style=\"margin: 0; padding: 16px; background: #f9fafb;\"><div style=\"background: #ffffff;\">{}</div></body></html>",
        render_invoice(draft, business)
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_draft, test_business};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_fragment_contains_line_item_and_totals() {
        let draft = sample_draft(7.5, 20.0);
        let html = render_invoice(&draft, &test_business());

        assert!(html.contains("Test Staffing Agency"));
        assert!(html.contains(&draft.invoice_number));
        assert!(html.contains("Bill To"));
        assert!(html.contains("Provider"));
        assert!(html.contains(&draft.practice_name));
        assert!(html.contains("7.50"));
        assert!(html.contains("£20.00"));
        assert!(html.contains("£150.00"));
        assert!(html.contains("£0.00"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut draft = sample_draft(1.0, 20.0);
        draft.description = "<script>alert(1)</script>".to_string();
        let html = render_invoice(&draft, &test_business());
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_print_and_email_share_the_fragment() {
        let draft = sample_draft(7.5, 20.0);
        let business = test_business();
        let fragment = render_invoice(&draft, &business);

        let print = render_print_document(&draft, &business);
        assert!(print.contains(&fragment));
        assert!(print.contains("@media print"));
        assert!(print.contains("window.print()"));

        let email = render_email_body(&draft, &business);
        assert!(email.contains(&fragment));
        assert!(!email.contains("window.print()"));
    }
}
