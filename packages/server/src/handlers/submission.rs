use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{challenge, submission, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::shared::Pagination;
use crate::models::submission::*;
use crate::state::AppState;
use crate::utils::lookup::{find_challenge, find_submission, find_team};

#[utoipa::path(
    get,
    path = "/",
    tag = "Submissions",
    operation_id = "listSubmissions",
    summary = "List submissions",
    description = "Newest first. Teams see their own submissions; callers with `submission:view_all` see every team's and may filter by `team_id`.",
    params(SubmissionListQuery),
    responses(
        (status = 200, description = "Submissions", body = SubmissionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(team_id = auth_user.team_id))]
pub async fn list_submissions(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    let (page, per_page) = Pagination::normalize(query.page, query.per_page);

    let mut select = submission::Entity::find();
    if auth_user.has_permission("submission:view_all") {
        if let Some(team_id) = query.team_id {
            select = select.filter(submission::Column::TeamId.eq(team_id));
        }
    } else {
        select = select.filter(submission::Column::TeamId.eq(auth_user.team_id));
    }
    if let Some(challenge_id) = query.challenge_id {
        select = select.filter(submission::Column::ChallengeId.eq(challenge_id));
    }
    if let Some(kind) = query.kind {
        select = select.filter(submission::Column::Kind.eq(kind));
    }
    if let Some(verdict) = query.verdict {
        select = select.filter(submission::Column::Verdict.eq(verdict));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let rows = select
        .order_by_desc(submission::Column::CreatedAt)
        .order_by_desc(submission::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = attach_names(&state.db, rows).await?;

    Ok(Json(SubmissionListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get a submission by ID",
    description = "Teams can only read their own submissions unless they have `submission:view_all`.",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission", body = SubmissionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let model = find_submission(&state.db, id).await?;
    if model.team_id != auth_user.team_id && !auth_user.has_permission("submission:view_all") {
        return Err(AppError::NotFound("Submission not found".into()));
    }

    let team = find_team(&state.db, model.team_id).await?;
    let challenge = find_challenge(&state.db, model.challenge_id).await?;
    Ok(Json(SubmissionResponse::new(model, team.name, challenge.title)))
}

/// Resolve team names and challenge titles for a page of submissions.
async fn attach_names<C: ConnectionTrait>(
    db: &C,
    rows: Vec<submission::Model>,
) -> Result<Vec<SubmissionResponse>, AppError> {
    let team_ids: Vec<i32> = rows.iter().map(|s| s.team_id).collect();
    let challenge_ids: Vec<i32> = rows.iter().map(|s| s.challenge_id).collect();

    let teams: HashMap<i32, String> = team::Entity::find()
        .filter(team::Column::Id.is_in(team_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();
    let titles: HashMap<i32, String> = challenge::Entity::find()
        .filter(challenge::Column::Id.is_in(challenge_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.title))
        .collect();

    Ok(rows
        .into_iter()
        .map(|s| {
            let team_name = teams.get(&s.team_id).cloned().unwrap_or_default();
            let title = titles.get(&s.challenge_id).cloned().unwrap_or_default();
            SubmissionResponse::new(s, team_name, title)
        })
        .collect())
}
