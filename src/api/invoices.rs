use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{AppContext, error::ApiResult};
use crate::core::{
    dispatch,
    invoice::{InvoiceDraft, InvoiceEdits},
    render::render_invoice,
    timesheet,
};

/// `POST /admin/timesheets/{id}/invoice` - a fresh draft pre-filled from the timesheet.
pub async fn open(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let timesheet = timesheet::get_timesheet(&ctx.db, id).await?;
    let today = chrono::Utc::now().date_naive();
    let draft = InvoiceDraft::open(
        &timesheet,
        today,
        ctx.config.invoice.default_hourly_rate,
    );
    Ok((StatusCode::CREATED, Json(draft)))
}

#[derive(Deserialize)]
pub struct PreviewBody {
    pub draft: InvoiceDraft,
    #[serde(default)]
    pub edits: InvoiceEdits,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub draft: InvoiceDraft,
    pub html: String,
}

/// `POST /admin/invoices/preview` - applies edits, recomputes totals, renders.
pub async fn preview(
    State(ctx): State<AppContext>,
    body: Result<Json<PreviewBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(body)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let draft = body.draft.edited(body.edits)?;
    let html = render_invoice(&draft, &ctx.config.business);
    Ok(Json(PreviewResponse { draft, html }).into_response())
}

/// `POST /admin/invoices/print` - the printable page; marks the timesheet invoiced.
pub async fn print(
    State(ctx): State<AppContext>,
    body: Result<Json<InvoiceDraft>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(draft)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let draft = draft.normalized()?;
    let printed = dispatch::print_invoice(&ctx.db, &draft, &ctx.config.business).await?;
    Ok(Html(printed.document).into_response())
}

/// `POST /admin/invoices/send` - emails the invoice to the practice.
pub async fn send(
    State(ctx): State<AppContext>,
    body: Result<Json<InvoiceDraft>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(draft)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let draft = draft.normalized()?;
    let sent =
        dispatch::send_invoice(&ctx.db, ctx.mailer.as_ref(), &draft, &ctx.config.business).await?;
    Ok(Json(sent).into_response())
}
