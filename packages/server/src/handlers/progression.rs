use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::ProgressEvent;
use judge::outputs_match;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::challenge;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::progress::*;
use crate::progression::ProgressionService;
use crate::recorder::SubmissionRecorder;
use crate::state::AppState;
use crate::utils::lookup::find_visible_challenge;

#[utoipa::path(
    post,
    path = "/{id}/flag",
    tag = "Progression",
    operation_id = "submitFlag",
    summary = "Submit the algorithmic flag",
    description = "Compares the flag with the challenge's expected output after trimming surrounding whitespace (case-sensitive). A match unlocks the buildathon phase; re-submitting a correct flag never moves progress backwards. Requires `challenge:submit` permission.",
    params(("id" = i32, Path, description = "Challenge ID")),
    request_body = FlagRequest,
    responses(
        (status = 200, description = "Flag accepted", body = FlagResponse),
        (status = 400, description = "Empty or wrong flag (VALIDATION_ERROR, INCORRECT_FLAG)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(team_id = auth_user.team_id, challenge_id))]
pub async fn submit_flag(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(challenge_id): Path<i32>,
    AppJson(payload): AppJson<FlagRequest>,
) -> Result<Json<FlagResponse>, AppError> {
    auth_user.require_permission("challenge:submit")?;
    let flag = validate_flag(&payload.flag)?;

    let challenge = find_visible_challenge(&state.db, &auth_user, challenge_id).await?;
    if !outputs_match(flag, &challenge.expected_flag) {
        info!("Incorrect flag");
        return Err(AppError::IncorrectFlag);
    }

    let txn = state.db.begin().await?;
    let progress = ProgressionService::new(&txn)
        .advance(auth_user.team_id, challenge.id, ProgressEvent::FlagAccepted)
        .await?;
    txn.commit().await?;

    info!(state = %progress.state, "Flag accepted");
    Ok(Json(FlagResponse {
        success: true,
        message: "Flag accepted! Buildathon phase unlocked.".into(),
        state: progress.state,
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/buildathon",
    tag = "Progression",
    operation_id = "submitBuildathon",
    summary = "Submit a buildathon repository",
    description = "Records a pending buildathon submission and queues it for admin review. Only allowed after the flag was accepted; resubmission is allowed until a review accepts the challenge. Requires `challenge:submit` permission.",
    params(("id" = i32, Path, description = "Challenge ID")),
    request_body = BuildathonRequest,
    responses(
        (status = 201, description = "Submitted for review", body = BuildathonResponse),
        (status = 400, description = "Invalid repository link (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Flag not solved yet (PHASE_LOCKED) or forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Challenge already completed (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(team_id = auth_user.team_id, challenge_id))]
pub async fn submit_buildathon(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(challenge_id): Path<i32>,
    AppJson(payload): AppJson<BuildathonRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("challenge:submit")?;
    let repository_url =
        validate_repository_url(&payload.github_link, &state.config.review.repository_hosts)?;

    let challenge = find_visible_challenge(&state.db, &auth_user, challenge_id).await?;

    let txn = state.db.begin().await?;
    let progress = ProgressionService::new(&txn)
        .advance(
            auth_user.team_id,
            challenge.id,
            ProgressEvent::BuildathonSubmitted,
        )
        .await?;

    let recorder = SubmissionRecorder::new(&txn);
    let submission = recorder
        .record_buildathon(auth_user.team_id, challenge.id, repository_url)
        .await?;
    recorder
        .notify_admins(&auth_user.team_name, &challenge, &submission)
        .await?;
    txn.commit().await?;

    info!(submission_id = submission.id, "Buildathon submitted");
    Ok((
        StatusCode::CREATED,
        Json(BuildathonResponse {
            success: true,
            message: "Buildathon submitted for review".into(),
            submission_id: submission.id,
            state: progress.state,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Progression",
    operation_id = "listProgress",
    summary = "The caller's progress on every active challenge",
    responses(
        (status = 200, description = "Progress per challenge", body = Vec<ProgressResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(team_id = auth_user.team_id))]
pub async fn list_progress(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgressResponse>>, AppError> {
    let challenges = challenge::Entity::find()
        .filter(challenge::Column::IsActive.eq(true))
        .order_by_asc(challenge::Column::Position)
        .order_by_asc(challenge::Column::Id)
        .all(&state.db)
        .await?;

    let rows: HashMap<i32, _> = ProgressionService::new(&state.db)
        .for_team(auth_user.team_id)
        .await?
        .into_iter()
        .map(|p| (p.challenge_id, p))
        .collect();

    let progress = challenges
        .iter()
        .map(|c| ProgressResponse::new(c, rows.get(&c.id)))
        .collect();
    Ok(Json(progress))
}
