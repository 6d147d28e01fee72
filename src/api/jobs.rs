use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::api::{AppContext, error::ApiResult};
use crate::core::job::{self, JobPostingInput};

/// `GET /jobs` - active postings for the public site.
pub async fn list_public(State(ctx): State<AppContext>) -> ApiResult<impl IntoResponse> {
    Ok(Json(job::list_active_jobs(&ctx.db).await?))
}

/// `GET /admin/jobs` - every posting, including hidden ones.
pub async fn list_all(State(ctx): State<AppContext>) -> ApiResult<impl IntoResponse> {
    Ok(Json(job::list_all_jobs(&ctx.db).await?))
}

pub async fn create(
    State(ctx): State<AppContext>,
    body: Result<Json<JobPostingInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(input)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let created = job::create_job(&ctx.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

pub async fn update(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    body: Result<Json<JobPostingInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(input)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let updated = job::update_job(&ctx.db, id, input).await?;
    Ok(Json(updated).into_response())
}

#[derive(Deserialize)]
pub struct ActiveBody {
    pub is_active: bool,
}

pub async fn set_active(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    body: Result<Json<ActiveBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Ok(Json(body)) = body else {
        return Ok(StatusCode::UNPROCESSABLE_ENTITY.into_response());
    };
    let updated = job::set_job_active(&ctx.db, id, body.is_active).await?;
    Ok(Json(updated).into_response())
}

pub async fn remove(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    job::delete_job(&ctx.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
