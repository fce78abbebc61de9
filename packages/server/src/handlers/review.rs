use axum::Json;
use axum::extract::State;
use common::{ProgressEvent, SubmissionKind};
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::submission;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::review::*;
use crate::progression::ProgressionService;
use crate::recorder::SubmissionRecorder;
use crate::state::AppState;
use crate::utils::lookup::{find_challenge, find_team};

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Admin",
    operation_id = "reviewSubmission",
    summary = "Accept or reject a buildathon submission",
    description = "Accepting completes the challenge for the team and awards `points` (default: the challenge's points). Points are awarded at most once per team and challenge, so repeating an accept keeps the originally credited points and only re-sends the notification. Reversing an earlier verdict is refused with 409. Requires `submission:review` permission.",
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review applied", body = ReviewResponse),
        (status = 400, description = "Invalid action or not a buildathon submission (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Submission, team or challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Submission already reviewed differently (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user, payload),
    fields(reviewer = auth_user.team_id, submission_id = payload.submission_id)
)]
pub async fn review_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    auth_user.require_permission("submission:review")?;
    let action = validate_review_request(&payload)?;

    let txn = state.db.begin().await?;

    let sub = submission::Entity::find_by_id(payload.submission_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    if sub.kind != SubmissionKind::Buildathon {
        return Err(AppError::Validation(
            "Only buildathon submissions can be reviewed".into(),
        ));
    }
    let verdict = action.verdict();
    if sub.verdict.is_final() && sub.verdict != verdict {
        return Err(AppError::Conflict(format!(
            "Submission was already {}",
            sub.verdict
        )));
    }

    let challenge = find_challenge(&txn, sub.challenge_id).await?;
    let team = find_team(&txn, sub.team_id).await?;
    let feedback = payload
        .feedback
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from);

    let mut active: submission::ActiveModel = sub.clone().into();
    active.verdict = Set(verdict);
    active.evaluated_at = Set(Some(sub.evaluated_at.unwrap_or_else(chrono::Utc::now)));
    if feedback.is_some() {
        active.feedback = Set(feedback.clone());
    }

    let progression = ProgressionService::new(&txn);
    let recorder = SubmissionRecorder::new(&txn);

    let points_added = match action {
        ReviewAction::Accept => {
            let points = payload.points.unwrap_or(challenge.points);
            progression
                .advance(team.id, challenge.id, ProgressEvent::ReviewAccepted)
                .await?;
            let awarded = progression
                .award_points(team.id, challenge.id, points)
                .await?;

            // Only the first accept decides the points; later ones keep what was credited.
            let credited = if awarded {
                active.points_awarded = Set(Some(points));
                points
            } else {
                sub.points_awarded.unwrap_or(0)
            };
            let sub = active.update(&txn).await?;

            let mut message = format!(
                "Your buildathon for \"{}\" was accepted. +{} points",
                challenge.title, credited
            );
            if let Some(ref feedback) = feedback {
                message.push_str(&format!("\n\n{feedback}"));
            }
            recorder
                .notify_team(&sub, "Buildathon accepted", message)
                .await?;

            if awarded { points } else { 0 }
        }
        ReviewAction::Reject => {
            let sub = active.update(&txn).await?;

            progression
                .advance(team.id, challenge.id, ProgressEvent::ReviewRejected)
                .await?;

            let mut message = format!(
                "Your buildathon for \"{}\" was rejected. You may resubmit.",
                challenge.title
            );
            if let Some(ref feedback) = feedback {
                message.push_str(&format!("\n\n{feedback}"));
            }
            recorder
                .notify_team(&sub, "Buildathon rejected", message)
                .await?;

            0
        }
    };

    recorder.mark_admin_notifications_read(sub.id).await?;
    txn.commit().await?;

    info!(
        action = action.as_str(),
        team_id = team.id,
        challenge_id = challenge.id,
        points_added,
        "Submission reviewed"
    );
    Ok(Json(ReviewResponse {
        success: true,
        message: match action {
            ReviewAction::Accept => "Submission accepted".into(),
            ReviewAction::Reject => "Submission rejected".into(),
        },
        action: action.as_str().into(),
        submission_id: sub.id,
        points_added,
    }))
}
