use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::ProgressState;
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{challenge, submission, team_progress};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::challenge::*;
use crate::progression::ProgressionService;
use crate::state::AppState;
use crate::utils::lookup::{find_challenge, find_visible_challenge};

#[utoipa::path(
    post,
    path = "/",
    tag = "Challenges",
    operation_id = "createChallenge",
    summary = "Create a challenge",
    description = "Requires `challenge:manage` permission. Position is appended after the last challenge if omitted.",
    request_body = CreateChallengeRequest,
    responses(
        (status = 201, description = "Challenge created", body = ChallengeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateChallengeRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("challenge:manage")?;
    validate_create_challenge(&payload)?;

    let txn = state.db.begin().await?;
    let position = match payload.position {
        Some(p) => p,
        None => next_position(&txn).await?,
    };

    let now = chrono::Utc::now();
    let new_challenge = challenge::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        points: Set(payload.points),
        position: Set(position),
        is_active: Set(payload.is_active.unwrap_or(true)),
        problem_description: Set(payload.problem_description),
        constraints: Set(payload.constraints),
        sample_input: Set(payload.sample_input),
        sample_output: Set(payload.sample_output),
        time_limit: Set(payload.time_limit.unwrap_or(2000)),
        memory_limit: Set(payload.memory_limit.unwrap_or(262_144)),
        buildathon_description: Set(payload.buildathon_description),
        buildathon_requirements: Set(serde_json::json!(payload.buildathon_requirements)),
        expected_flag: Set(payload.expected_flag.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_challenge.insert(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ChallengeResponse::new(model, ProgressState::Available, true)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Challenges",
    operation_id = "listChallenges",
    summary = "List challenges",
    description = "Returns challenges ordered by position, each with the caller's progress state. Inactive challenges are only listed for callers with `challenge:manage`.",
    responses(
        (status = 200, description = "Challenges", body = Vec<ChallengeListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(team_id = auth_user.team_id))]
pub async fn list_challenges(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ChallengeListItem>>, AppError> {
    let mut select = challenge::Entity::find();
    if !auth_user.has_permission("challenge:manage") {
        select = select.filter(challenge::Column::IsActive.eq(true));
    }
    let challenges = select
        .order_by_asc(challenge::Column::Position)
        .order_by_asc(challenge::Column::Id)
        .all(&state.db)
        .await?;

    let states: HashMap<i32, ProgressState> = ProgressionService::new(&state.db)
        .for_team(auth_user.team_id)
        .await?
        .into_iter()
        .map(|p| (p.challenge_id, p.state))
        .collect();

    let items = challenges
        .iter()
        .map(|c| ChallengeListItem::new(c, states.get(&c.id).copied().unwrap_or_default()))
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Challenges",
    operation_id = "getChallenge",
    summary = "Get a challenge by ID",
    description = "Buildathon details are included once the caller has solved the algorithmic phase. The expected flag is only included for callers with `challenge:manage`.",
    params(("id" = i32, Path, description = "Challenge ID")),
    responses(
        (status = 200, description = "Challenge details", body = ChallengeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ChallengeResponse>, AppError> {
    let model = find_visible_challenge(&state.db, &auth_user, id).await?;
    let progress = ProgressionService::new(&state.db)
        .state(auth_user.team_id, id)
        .await?;

    Ok(Json(ChallengeResponse::new(
        model,
        progress,
        auth_user.has_permission("challenge:manage"),
    )))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Challenges",
    operation_id = "updateChallenge",
    summary = "Update a challenge",
    description = "Partially updates a challenge; only provided fields change. Requires `challenge:manage` permission. Changing `points` does not alter points already awarded.",
    params(("id" = i32, Path, description = "Challenge ID")),
    request_body = UpdateChallengeRequest,
    responses(
        (status = 200, description = "Challenge updated", body = ChallengeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateChallengeRequest>,
) -> Result<Json<ChallengeResponse>, AppError> {
    auth_user.require_permission("challenge:manage")?;
    validate_update_challenge(&payload)?;

    if payload == UpdateChallengeRequest::default() {
        let existing = find_challenge(&state.db, id).await?;
        return Ok(Json(ChallengeResponse::new(
            existing,
            ProgressState::Available,
            true,
        )));
    }

    let txn = state.db.begin().await?;

    let existing = find_challenge_for_update(&txn, id).await?;
    let mut active: challenge::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(points) = payload.points {
        active.points = Set(points);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(desc) = payload.problem_description {
        active.problem_description = Set(desc);
    }
    if let Some(constraints) = payload.constraints {
        active.constraints = Set(constraints);
    }
    if let Some(input) = payload.sample_input {
        active.sample_input = Set(input);
    }
    if let Some(output) = payload.sample_output {
        active.sample_output = Set(output);
    }
    if let Some(tl) = payload.time_limit {
        active.time_limit = Set(tl);
    }
    if let Some(ml) = payload.memory_limit {
        active.memory_limit = Set(ml);
    }
    if let Some(desc) = payload.buildathon_description {
        active.buildathon_description = Set(desc);
    }
    if let Some(requirements) = payload.buildathon_requirements {
        active.buildathon_requirements = Set(serde_json::json!(requirements));
    }
    if let Some(ref flag) = payload.expected_flag {
        active.expected_flag = Set(flag.trim().to_string());
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(ChallengeResponse::new(
        model,
        ProgressState::Available,
        true,
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Challenges",
    operation_id = "deleteChallenge",
    summary = "Delete a challenge",
    description = "Requires `challenge:manage` permission. Returns 409 CONFLICT if the challenge has submissions; deactivate it instead.",
    params(("id" = i32, Path, description = "Challenge ID")),
    responses(
        (status = 204, description = "Challenge deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Challenge has submissions (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("challenge:manage")?;

    let txn = state.db.begin().await?;
    find_challenge_for_update(&txn, id).await?;

    let sub_count = submission::Entity::find()
        .filter(submission::Column::ChallengeId.eq(id))
        .count(&txn)
        .await?;
    if sub_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete challenge with existing submissions".into(),
        ));
    }

    // Flag-only progress has no submission behind it.
    team_progress::Entity::delete_many()
        .filter(team_progress::Column::ChallengeId.eq(id))
        .exec(&txn)
        .await?;
    challenge::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_challenge_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<challenge::Model, AppError> {
    challenge::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".into()))
}

async fn next_position<C: ConnectionTrait>(db: &C) -> Result<i32, AppError> {
    let max_pos: Option<i32> = challenge::Entity::find()
        .select_only()
        .column_as(challenge::Column::Position.max(), "max_pos")
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?
        .flatten();
    max_pos
        .unwrap_or(-1)
        .checked_add(1)
        .ok_or_else(|| AppError::Validation("Position overflow".into()))
}
