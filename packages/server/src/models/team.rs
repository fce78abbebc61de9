use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::team;

/// Team account as seen by administrators.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamResponse {
    pub id: i32,
    #[schema(example = "Null Pointers")]
    pub name: String,
    pub email: String,
    #[schema(example = "team")]
    pub role: String,
    pub total_points: i32,
    /// IDs of challenges with an accepted buildathon.
    pub completed_challenges: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl TeamResponse {
    pub fn new(m: team::Model, completed_challenges: Vec<i32>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            role: m.role,
            total_points: m.total_points,
            completed_challenges,
            created_at: m.created_at,
        }
    }
}
