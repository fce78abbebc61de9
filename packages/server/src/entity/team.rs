use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role given to self-registered accounts.
pub const DEFAULT_ROLE: &str = "team";

/// Team account. Admins are stored here too, with role `admin`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,

    /// Sum of points awarded by accepted buildathon reviews.
    pub total_points: i32,

    pub created_at: DateTimeUtc,
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
