//! HTTP layer - axum routes over the core operations.
//!
//! The public routes take nurse submissions and list open jobs. Everything
//! under `/admin` is expected to sit behind the identity provider's proxy;
//! this service does no authentication of its own.

pub mod error;
pub mod invoices;
pub mod jobs;
pub mod timesheets;

use crate::{config::AppConfig, core::submission::SubmissionContext, notify::Mailer};
use axum::{
    Router,
    routing::{get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
///
/// Built once in `main` and cloned per request; handlers only read from it.
#[derive(Clone)]
pub struct AppContext {
    pub db: DatabaseConnection,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>, config: Arc<AppConfig>) -> Self {
        Self { db, mailer, config }
    }

    /// What a background timesheet submission needs from the context.
    #[must_use]
    pub fn submission_context(&self) -> SubmissionContext {
        SubmissionContext {
            db: self.db.clone(),
            mailer: Arc::clone(&self.mailer),
            admin_email: self.config.notifications.admin_email.clone(),
            sender_name: self.config.notifications.from_name.clone(),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/timesheets", post(timesheets::submit))
        .route("/jobs", get(jobs::list_public))
        .route("/admin/timesheets", get(timesheets::list))
        .route("/admin/timesheets/{id}", get(timesheets::show))
        .route("/admin/timesheets/{id}/status", patch(timesheets::set_status))
        .route("/admin/timesheets/{id}/invoice", post(invoices::open))
        .route("/admin/invoices/preview", post(invoices::preview))
        .route("/admin/invoices/print", post(invoices::print))
        .route("/admin/invoices/send", post(invoices::send))
        .route("/admin/jobs", get(jobs::list_all).post(jobs::create))
        .route("/admin/jobs/{id}", put(jobs::update).delete(jobs::remove))
        .route("/admin/jobs/{id}/active", patch(jobs::set_active))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
