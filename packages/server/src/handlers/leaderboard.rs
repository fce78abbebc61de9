use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{submission, team, team_completion};
use crate::error::{AppError, ErrorBody};
use crate::scoring::{self, TeamStanding};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Leaderboard",
    operation_id = "getLeaderboard",
    summary = "Ranked team standings",
    description = "Public. Ranks are contiguous from 1; equal totals keep registration order.",
    responses(
        (status = 200, description = "Standings", body = Vec<TeamStanding>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamStanding>>, AppError> {
    let teams = load_teams(&state.db).await?;
    let completions = team_completion::Entity::find().all(&state.db).await?;
    let submissions = submission::Entity::find().all(&state.db).await?;

    Ok(Json(scoring::standings(
        &teams,
        &completions,
        &submissions,
        None,
    )))
}

/// Accounts eligible for ranking, in registration order.
pub(crate) async fn load_teams<C: ConnectionTrait>(db: &C) -> Result<Vec<team::Model>, DbErr> {
    team::Entity::find()
        .filter(team::Column::Role.eq(team::DEFAULT_ROLE))
        .order_by_asc(team::Column::Id)
        .all(db)
        .await
}
