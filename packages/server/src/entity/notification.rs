use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const AUDIENCE_ADMIN: &str = "admin";
pub const AUDIENCE_TEAM: &str = "team";

/// Admin work-queue entries and team-facing notices.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// `admin` or `team`.
    pub audience: String,
    /// Recipient for team notices; the submitting team for admin entries.
    pub team_id: Option<i32>,
    pub submission_id: Option<i32>,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub is_read: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
