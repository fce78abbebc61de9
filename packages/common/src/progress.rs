//! Per-team, per-challenge progression.
//!
//! A team starts every challenge in [`ProgressState::Available`] (no stored
//! record). Solving the algorithmic problem's flag unlocks the buildathon
//! phase, and an accepted buildathon review completes the challenge. All
//! moves go through [`ProgressState::apply`].

#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// Nothing solved yet. Never persisted.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "available"))]
    Available,
    /// Flag accepted, buildathon unlocked.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "algorithmic_solved"))]
    AlgorithmicSolved,
    /// A buildathon submission is waiting for review.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending_review"))]
    PendingReview,
    /// Buildathon accepted.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "completed"))]
    Completed,
    /// Last buildathon submission was rejected; resubmission allowed.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "rejected"))]
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    FlagAccepted,
    BuildathonSubmitted,
    ReviewAccepted,
    ReviewRejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("The algorithmic phase must be solved first")]
    PhaseLocked,
    #[error("Challenge already completed")]
    AlreadyCompleted,
    #[error("No buildathon submission to review")]
    NothingToReview,
}

impl ProgressState {
    pub const ALL: &'static [ProgressState] = &[
        Self::Available,
        Self::AlgorithmicSolved,
        Self::PendingReview,
        Self::Completed,
        Self::Rejected,
    ];

    /// Compute the state that follows `event`, or why the move is illegal.
    pub fn apply(self, event: ProgressEvent) -> Result<ProgressState, TransitionError> {
        use ProgressEvent::*;
        use ProgressState::*;

        match (self, event) {
            (Available, FlagAccepted) => Ok(AlgorithmicSolved),
            // Re-entering a correct flag never moves a team backwards.
            (state, FlagAccepted) => Ok(state),

            (Available, BuildathonSubmitted) => Err(TransitionError::PhaseLocked),
            (Completed, BuildathonSubmitted) => Err(TransitionError::AlreadyCompleted),
            (_, BuildathonSubmitted) => Ok(PendingReview),

            (Available, ReviewAccepted | ReviewRejected) => Err(TransitionError::NothingToReview),
            (_, ReviewAccepted) => Ok(Completed),
            (Completed, ReviewRejected) => Ok(Completed),
            (_, ReviewRejected) => Ok(Rejected),
        }
    }

    pub fn algorithmic_completed(&self) -> bool {
        !matches!(self, Self::Available)
    }

    pub fn buildathon_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::AlgorithmicSolved => "algorithmic_solved",
            Self::PendingReview => "pending_review",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::Available
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
