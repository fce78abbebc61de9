use common::{SubmissionKind, Verdict};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One execution attempt or buildathon attempt.
///
/// Which content columns are filled depends on `kind`; see
/// [`crate::models::submission::SubmissionContent`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub team_id: i32,
    pub challenge_id: i32,
    pub kind: SubmissionKind,

    #[sea_orm(column_type = "Text", nullable)]
    pub source_code: Option<String>,
    pub language_id: Option<i32>,
    pub repository_url: Option<String>,

    pub verdict: Verdict,
    /// Judge status description, e.g. "Wrong Answer".
    pub status_description: Option<String>,
    pub time_used: Option<f64>,   // in seconds
    pub memory_used: Option<i64>, // in kilobytes
    #[sea_orm(column_type = "Text", nullable)]
    pub stdout: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub stderr: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub points_awarded: Option<i32>,

    pub created_at: DateTimeUtc,
    pub evaluated_at: Option<DateTimeUtc>,
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

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Challenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
