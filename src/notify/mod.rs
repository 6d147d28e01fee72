//! Outbound email.
//!
//! The crate never talks SMTP itself. It hands a fully rendered HTML body to a
//! [`Mailer`], whose production implementation posts it to a small mail relay
//! service that owns the SMTP credentials.

pub mod mailer;
pub mod templates;

pub use mailer::{EmailMessage, HttpMailer, Mailer};
