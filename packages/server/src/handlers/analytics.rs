use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use common::{SubmissionKind, Verdict};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{challenge, submission, team_completion};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::leaderboard::load_teams;
use crate::models::analytics::*;
use crate::scoring::{self, Window};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/analytics",
    tag = "Admin",
    operation_id = "getAnalytics",
    summary = "Submission analytics over a time window",
    description = "Standings, a per-day submission series split by kind, and language usage, all restricted to submissions inside the window. Requires `analytics:view` permission.",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics", body = AnalyticsResponse),
        (status = 400, description = "Unknown range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn get_analytics(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    auth_user.require_permission("analytics:view")?;
    let window = match query.range.as_deref() {
        Some(range) => range.parse::<Window>()?,
        None => Window::default(),
    };

    let now = Utc::now();
    let since = window.since(now);

    let mut select = submission::Entity::find();
    if let Some(since) = since {
        select = select.filter(submission::Column::CreatedAt.gte(since));
    }
    let submissions = select.all(&state.db).await?;
    let mut select = team_completion::Entity::find();
    if let Some(since) = since {
        select = select.filter(team_completion::Column::CompletedAt.gte(since));
    }
    let completions = select.all(&state.db).await?;
    let teams = load_teams(&state.db).await?;
    let challenges = challenge::Entity::find().all(&state.db).await?;

    let total_submissions = submissions.len() as u64;
    let accepted_submissions = count(&submissions, |s| s.verdict == Verdict::Accepted);

    let overview = AnalyticsOverview {
        total_teams: teams.len() as u64,
        active_challenges: challenges.iter().filter(|c| c.is_active).count() as u64,
        total_submissions,
        algorithmic_submissions: count(&submissions, |s| s.kind == SubmissionKind::Algorithmic),
        buildathon_submissions: count(&submissions, |s| s.kind == SubmissionKind::Buildathon),
        accepted_submissions,
        pending_reviews: count(&submissions, |s| {
            s.kind == SubmissionKind::Buildathon && s.verdict == Verdict::Pending
        }),
        success_rate: scoring::percentage(accepted_submissions, total_submissions),
    };

    Ok(Json(AnalyticsResponse {
        range: window.as_str().into(),
        overview,
        team_performance: scoring::standings(&teams, &completions, &submissions, since),
        daily_submissions: scoring::daily_series(&submissions, window, now.date_naive()),
        languages: scoring::language_usage(&submissions),
    }))
}

fn count(submissions: &[submission::Model], pred: impl Fn(&submission::Model) -> bool) -> u64 {
    submissions.iter().filter(|s| pred(s)).count() as u64
}
