use common::ProgressState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Progress of one team on one challenge. A missing row means `Available`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub challenge_id: i32,

    pub state: ProgressState,
    /// Buildathon submissions made. Advisory only.
    pub attempts: i32,

    pub algorithmic_completed_at: Option<DateTimeUtc>,
    pub buildathon_submitted_at: Option<DateTimeUtc>,
    pub buildathon_completed_at: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_delete = "Cascade"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::challenge::Entity",
        from = "Column::ChallengeId",
        to = "super::challenge::Column::Id",
        on_delete = "Cascade"
    )]
    Challenge,
}

impl ActiveModelBehavior for ActiveModel {}
