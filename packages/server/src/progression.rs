use chrono::{DateTime, Utc};
use common::{ProgressEvent, ProgressState};
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait, QueryFilter,
    QuerySelect, Set,
};
use tracing::{debug, info};

use crate::entity::{team, team_completion, team_progress};
use crate::error::AppError;

/// Reads and advances a team's progress on challenges.
///
/// Every state change goes through [`ProgressState::apply`]; run it inside a
/// transaction so the row lock covers the read-modify-write.
pub struct ProgressionService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ProgressionService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(
        &self,
        team_id: i32,
        challenge_id: i32,
    ) -> Result<Option<team_progress::Model>, DbErr> {
        team_progress::Entity::find_by_id((team_id, challenge_id))
            .one(self.conn)
            .await
    }

    pub async fn state(&self, team_id: i32, challenge_id: i32) -> Result<ProgressState, DbErr> {
        Ok(self
            .find(team_id, challenge_id)
            .await?
            .map_or(ProgressState::Available, |p| p.state))
    }

    /// All stored progress rows of one team.
    pub async fn for_team(&self, team_id: i32) -> Result<Vec<team_progress::Model>, DbErr> {
        team_progress::Entity::find()
            .filter(team_progress::Column::TeamId.eq(team_id))
            .all(self.conn)
            .await
    }

    /// Apply `event` to the stored state and persist the result.
    ///
    /// Illegal moves leave the row untouched and surface as
    /// [`AppError::PhaseLocked`] or [`AppError::Conflict`].
    pub async fn advance(
        &self,
        team_id: i32,
        challenge_id: i32,
        event: ProgressEvent,
    ) -> Result<team_progress::Model, AppError> {
        let now = Utc::now();
        let existing = team_progress::Entity::find_by_id((team_id, challenge_id))
            .lock(LockType::Update)
            .one(self.conn)
            .await?;

        let current = existing.as_ref().map_or(ProgressState::Available, |p| p.state);
        let next = current.apply(event)?;
        debug!(team_id, challenge_id, ?event, from = %current, to = %next, "Progress transition");

        let model = match existing {
            Some(row) => {
                let mut active = stamped(row.clone().into(), &row, event, now);
                active.state = Set(next);
                active.update(self.conn).await?
            }
            None => {
                let blank = team_progress::Model {
                    team_id,
                    challenge_id,
                    state: current,
                    attempts: 0,
                    algorithmic_completed_at: None,
                    buildathon_submitted_at: None,
                    buildathon_completed_at: None,
                    updated_at: now,
                };
                let active = team_progress::ActiveModel {
                    team_id: Set(team_id),
                    challenge_id: Set(challenge_id),
                    state: Set(next),
                    attempts: Set(0),
                    algorithmic_completed_at: Set(None),
                    buildathon_submitted_at: Set(None),
                    buildathon_completed_at: Set(None),
                    updated_at: Set(now),
                };
                let active = stamped(active, &blank, event, now);
                // A concurrent first transition may have inserted the row already.
                team_progress::Entity::insert(active)
                    .on_conflict(
                        OnConflict::columns([
                            team_progress::Column::TeamId,
                            team_progress::Column::ChallengeId,
                        ])
                        .do_nothing()
                        .to_owned(),
                    )
                    .exec_without_returning(self.conn)
                    .await?;
                self.find(team_id, challenge_id).await?.ok_or_else(|| {
                    AppError::Internal("progress row missing after insert".into())
                })?
            }
        };

        Ok(model)
    }

    /// Record `points` for a completed challenge and add them to the team total.
    ///
    /// Returns `false` without touching the total when the team was already
    /// awarded this challenge.
    pub async fn award_points(
        &self,
        team_id: i32,
        challenge_id: i32,
        points: i32,
    ) -> Result<bool, DbErr> {
        let completion = team_completion::ActiveModel {
            team_id: Set(team_id),
            challenge_id: Set(challenge_id),
            points: Set(points),
            completed_at: Set(Utc::now()),
        };
        let inserted = team_completion::Entity::insert(completion)
            .on_conflict(
                OnConflict::columns([
                    team_completion::Column::TeamId,
                    team_completion::Column::ChallengeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        if inserted == 0 {
            debug!(team_id, challenge_id, "Points already awarded");
            return Ok(false);
        }

        team::Entity::update_many()
            .col_expr(
                team::Column::TotalPoints,
                Expr::col(team::Column::TotalPoints).add(points),
            )
            .filter(team::Column::Id.eq(team_id))
            .exec(self.conn)
            .await?;

        info!(team_id, challenge_id, points, "Points awarded");
        Ok(true)
    }

    /// Challenge IDs the team has been awarded points for.
    pub async fn completed_challenges(&self, team_id: i32) -> Result<Vec<i32>, DbErr> {
        let rows = team_completion::Entity::find()
            .filter(team_completion::Column::TeamId.eq(team_id))
            .all(self.conn)
            .await?;
        Ok(rows.into_iter().map(|c| c.challenge_id).collect())
    }
}

/// Fill the timestamps and counters `event` touches.
fn stamped(
    mut active: team_progress::ActiveModel,
    row: &team_progress::Model,
    event: ProgressEvent,
    now: DateTime<Utc>,
) -> team_progress::ActiveModel {
    match event {
        ProgressEvent::FlagAccepted if row.algorithmic_completed_at.is_none() => {
            active.algorithmic_completed_at = Set(Some(now));
        }
        ProgressEvent::BuildathonSubmitted => {
            active.attempts = Set(row.attempts + 1);
            active.buildathon_submitted_at = Set(Some(now));
        }
        ProgressEvent::ReviewAccepted if row.buildathon_completed_at.is_none() => {
            active.buildathon_completed_at = Set(Some(now));
        }
        _ => {}
    }
    active.updated_at = Set(now);
    active
}
