use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::{AppContext, error::ApiResult};
use crate::core::{
    submission::{TimesheetForm, submit_timesheet},
    timesheet,
};
use crate::entities::TimesheetStatus;

/// `POST /timesheets` - validates, acknowledges, and stores in the background.
pub async fn submit(
    State(ctx): State<AppContext>,
    body: Result<Json<TimesheetForm>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(form)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let record = form.validate()?;
    let (ack, _task) = submit_timesheet(ctx.submission_context(), record);
    Ok((StatusCode::ACCEPTED, Json(ack)).into_response())
}

/// `GET /admin/timesheets` - newest first.
pub async fn list(State(ctx): State<AppContext>) -> ApiResult<impl IntoResponse> {
    let timesheets = timesheet::list_timesheets(&ctx.db).await?;
    Ok(Json(timesheets))
}

pub async fn show(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let timesheet = timesheet::get_timesheet(&ctx.db, id).await?;
    Ok(Json(timesheet))
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: TimesheetStatus,
}

/// `PATCH /admin/timesheets/{id}/status` - any status may be set.
pub async fn set_status(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(body)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let updated = timesheet::update_status(&ctx.db, id, body.status).await?;
    info!("Admin set timesheet {} to {}", id, updated.status);
    Ok(Json(updated).into_response())
}
