use chrono::Utc;
use common::{SubmissionKind, Verdict};
use judge::{ExecutionOutcome, JudgeRequest};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::entity::{challenge, notification, submission};

/// Persists submissions and the notifications they trigger.
pub struct SubmissionRecorder<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SubmissionRecorder<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Store a finished run. Only terminal outcomes reach this point.
    pub async fn record_execution(
        &self,
        team_id: i32,
        challenge_id: i32,
        request: &JudgeRequest,
        outcome: &ExecutionOutcome,
    ) -> Result<submission::Model, DbErr> {
        let now = Utc::now();
        let stderr = outcome
            .compilation_error()
            .or_else(|| (!outcome.stderr.is_empty()).then(|| outcome.stderr.clone()));

        let model = submission::ActiveModel {
            team_id: Set(team_id),
            challenge_id: Set(challenge_id),
            kind: Set(SubmissionKind::Algorithmic),
            source_code: Set(Some(request.source_code.clone())),
            language_id: Set(Some(request.language_id)),
            repository_url: Set(None),
            verdict: Set(outcome.verdict()),
            status_description: Set(Some(outcome.status.clone())),
            time_used: Set(outcome.time),
            memory_used: Set(outcome.memory),
            stdout: Set(Some(outcome.stdout.clone())),
            stderr: Set(stderr),
            feedback: Set(None),
            points_awarded: Set(None),
            created_at: Set(now),
            evaluated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        debug!(submission_id = model.id, verdict = %model.verdict, "Recorded execution");
        Ok(model)
    }

    /// Store a repository link awaiting review.
    pub async fn record_buildathon(
        &self,
        team_id: i32,
        challenge_id: i32,
        repository_url: String,
    ) -> Result<submission::Model, DbErr> {
        submission::ActiveModel {
            team_id: Set(team_id),
            challenge_id: Set(challenge_id),
            kind: Set(SubmissionKind::Buildathon),
            source_code: Set(None),
            language_id: Set(None),
            repository_url: Set(Some(repository_url)),
            verdict: Set(Verdict::Pending),
            status_description: Set(None),
            time_used: Set(None),
            memory_used: Set(None),
            stdout: Set(None),
            stderr: Set(None),
            feedback: Set(None),
            points_awarded: Set(None),
            created_at: Set(Utc::now()),
            evaluated_at: Set(None),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Queue a review request for administrators.
    pub async fn notify_admins(
        &self,
        team_name: &str,
        challenge: &challenge::Model,
        submission: &submission::Model,
    ) -> Result<notification::Model, DbErr> {
        let link = submission.repository_url.as_deref().unwrap_or_default();
        self.insert_notification(
            notification::AUDIENCE_ADMIN,
            submission.team_id,
            submission.id,
            "New buildathon submission".into(),
            format!(
                "{team_name} submitted {link} for \"{}\"",
                challenge.title
            ),
        )
        .await
    }

    /// Tell a team about a review outcome.
    pub async fn notify_team(
        &self,
        submission: &submission::Model,
        title: &str,
        message: String,
    ) -> Result<notification::Model, DbErr> {
        self.insert_notification(
            notification::AUDIENCE_TEAM,
            submission.team_id,
            submission.id,
            title.into(),
            message,
        )
        .await
    }

    /// Mark the admin queue entries of a submission as handled.
    pub async fn mark_admin_notifications_read(&self, submission_id: i32) -> Result<u64, DbErr> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Audience.eq(notification::AUDIENCE_ADMIN))
            .filter(notification::Column::SubmissionId.eq(submission_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert_notification(
        &self,
        audience: &str,
        team_id: i32,
        submission_id: i32,
        title: String,
        message: String,
    ) -> Result<notification::Model, DbErr> {
        notification::ActiveModel {
            audience: Set(audience.to_string()),
            team_id: Set(Some(team_id)),
            submission_id: Set(Some(submission_id)),
            title: Set(title),
            message: Set(message),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }
}
