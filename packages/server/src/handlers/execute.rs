use axum::Json;
use axum::extract::State;
use judge::PollPolicy;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::execute::*;
use crate::recorder::SubmissionRecorder;
use crate::state::AppState;
use crate::utils::lookup::find_visible_challenge;

#[utoipa::path(
    post,
    path = "/",
    tag = "Execution",
    operation_id = "executeCode",
    summary = "Run code on the judge",
    description = "Submits the code to the judge and polls for the result (up to `judge.max_attempts` polls, `judge.poll_interval_ms` apart). Finished runs are recorded as algorithmic submissions. Timeouts and judge failures record nothing. Requires `challenge:submit` permission.",
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "Run finished", body = ExecuteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 408, description = "Judge did not finish in time (JUDGE_TIMEOUT)", body = ErrorBody),
        (status = 500, description = "Judge unreachable (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user, payload),
    fields(
        team_id = auth_user.team_id,
        challenge_id = payload.challenge_id,
        language_id = payload.language_id
    )
)]
pub async fn execute_code(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, AppError> {
    auth_user.require_permission("challenge:submit")?;
    validate_execute_request(&payload)?;

    let challenge = find_visible_challenge(&state.db, &auth_user, payload.challenge_id).await?;
    let request = payload.to_judge_request();
    let policy = PollPolicy::from(&state.config.judge);
    let team_id = auth_user.team_id;

    // Spawned so polling and recording finish even if the client disconnects.
    let task = tokio::spawn(async move {
        let outcome = judge::execute(state.judge.as_ref(), &request, policy).await?;
        let record = SubmissionRecorder::new(&state.db)
            .record_execution(team_id, challenge.id, &request, &outcome)
            .await?;
        Ok::<_, AppError>((outcome, record))
    });

    let (outcome, record) = task
        .await
        .map_err(|e| AppError::Internal(format!("Execution task failed: {e}")))??;

    info!(
        submission_id = record.id,
        status_id = outcome.status_id,
        verdict = %record.verdict,
        "Execution recorded"
    );
    Ok(Json(ExecuteResponse::new(outcome, &record)))
}
