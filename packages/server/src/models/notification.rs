use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::notification;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    /// Only return unread notifications.
    pub unread: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub team_id: Option<i32>,
    pub submission_id: Option<i32>,
    #[schema(example = "New buildathon submission")]
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notification::Model> for NotificationResponse {
    fn from(m: notification::Model) -> Self {
        Self {
            id: m.id,
            team_id: m.team_id,
            submission_id: m.submission_id,
            title: m.title,
            message: m.message,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}
