use chrono::{DateTime, Utc};
use common::{SubmissionKind, Verdict};
use serde::{Deserialize, Serialize};

use crate::entity::submission;
use crate::utils::language::language_name;

use super::shared::Pagination;

/// What was submitted. Exactly one shape per submission kind.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionContent {
    Algorithmic {
        source_code: String,
        language_id: i32,
        #[schema(example = "Python")]
        language: String,
    },
    Buildathon {
        #[schema(example = "https://github.com/null-pointers/two-sum-app")]
        repository_url: String,
    },
}

impl From<&submission::Model> for SubmissionContent {
    fn from(m: &submission::Model) -> Self {
        match m.kind {
            SubmissionKind::Algorithmic => {
                let language_id = m.language_id.unwrap_or_default();
                SubmissionContent::Algorithmic {
                    source_code: m.source_code.clone().unwrap_or_default(),
                    language_id,
                    language: language_name(language_id).into_owned(),
                }
            }
            SubmissionKind::Buildathon => SubmissionContent::Buildathon {
                repository_url: m.repository_url.clone().unwrap_or_default(),
            },
        }
    }
}

/// Query parameters for submission listing.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionListQuery {
    #[param(example = 1)]
    pub page: Option<u64>,
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Filter by challenge ID.
    pub challenge_id: Option<i32>,
    /// Filter by team ID. Ignored unless the caller can view all submissions.
    pub team_id: Option<i32>,
    /// Filter by kind.
    pub kind: Option<SubmissionKind>,
    /// Filter by verdict.
    pub verdict: Option<Verdict>,
}

/// Full submission details.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub team_id: i32,
    pub team_name: String,
    pub challenge_id: i32,
    pub challenge_title: String,
    pub content: SubmissionContent,
    pub verdict: Verdict,
    #[schema(example = "Accepted")]
    pub status_description: Option<String>,
    /// Seconds.
    pub time_used: Option<f64>,
    /// Kilobytes.
    pub memory_used: Option<i64>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    /// Reviewer feedback on buildathon submissions.
    pub feedback: Option<String>,
    pub points_awarded: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl SubmissionResponse {
    pub fn new(m: submission::Model, team_name: String, challenge_title: String) -> Self {
        Self {
            content: SubmissionContent::from(&m),
            id: m.id,
            team_id: m.team_id,
            team_name,
            challenge_id: m.challenge_id,
            challenge_title,
            verdict: m.verdict,
            status_description: m.status_description,
            time_used: m.time_used,
            memory_used: m.memory_used,
            stdout: m.stdout,
            stderr: m.stderr,
            feedback: m.feedback,
            points_awarded: m.points_awarded,
            created_at: m.created_at,
            evaluated_at: m.evaluated_at,
        }
    }
}

/// Paginated submission list.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionListResponse {
    pub data: Vec<SubmissionResponse>,
    pub pagination: Pagination,
}
