use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{notification, submission, team, team_completion, team_progress};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::team::TeamResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/teams",
    tag = "Admin",
    operation_id = "listTeams",
    summary = "List all accounts",
    description = "Requires `team:manage` permission.",
    responses(
        (status = 200, description = "Teams", body = Vec<TeamResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_teams(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    auth_user.require_permission("team:manage")?;

    let teams = team::Entity::find()
        .order_by_asc(team::Column::Id)
        .all(&state.db)
        .await?;

    let mut completed: HashMap<i32, Vec<i32>> = HashMap::new();
    for c in team_completion::Entity::find()
        .order_by_asc(team_completion::Column::ChallengeId)
        .all(&state.db)
        .await?
    {
        completed.entry(c.team_id).or_default().push(c.challenge_id);
    }

    let items = teams
        .into_iter()
        .map(|t| {
            let done = completed.remove(&t.id).unwrap_or_default();
            TeamResponse::new(t, done)
        })
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "Admin",
    operation_id = "deleteTeam",
    summary = "Delete a team and everything it submitted",
    description = "Requires `team:manage` permission. Callers cannot delete their own account.",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 400, description = "Attempt to delete own account (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_team(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("team:manage")?;
    if id == auth_user.team_id {
        return Err(AppError::Validation("Cannot delete your own account".into()));
    }

    let txn = state.db.begin().await?;
    team::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))?;

    notification::Entity::delete_many()
        .filter(notification::Column::TeamId.eq(id))
        .exec(&txn)
        .await?;
    team_completion::Entity::delete_many()
        .filter(team_completion::Column::TeamId.eq(id))
        .exec(&txn)
        .await?;
    team_progress::Entity::delete_many()
        .filter(team_progress::Column::TeamId.eq(id))
        .exec(&txn)
        .await?;
    let removed = submission::Entity::delete_many()
        .filter(submission::Column::TeamId.eq(id))
        .exec(&txn)
        .await?;
    team::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(submissions = removed.rows_affected, "Team deleted");
    Ok(StatusCode::NO_CONTENT)
}
