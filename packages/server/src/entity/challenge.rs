use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    /// Awarded once, when the buildathon phase is accepted.
    pub points: i32,
    pub position: i32,
    pub is_active: bool,

    // Algorithmic phase, in Markdown.
    #[sea_orm(column_type = "Text")]
    pub problem_description: String,
    #[sea_orm(column_type = "Text")]
    pub constraints: String,
    #[sea_orm(column_type = "Text")]
    pub sample_input: String,
    #[sea_orm(column_type = "Text")]
    pub sample_output: String,
    pub time_limit: i32,   // in milliseconds
    pub memory_limit: i32, // in kilobytes

    // Buildathon phase.
    #[sea_orm(column_type = "Text")]
    pub buildathon_description: String,
    /// JSON array of requirement strings.
    #[sea_orm(column_type = "Json")]
    pub buildathon_requirements: Json,

    /// Correct output of the algorithmic problem.
    pub expected_flag: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
