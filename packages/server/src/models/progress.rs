use chrono::{DateTime, Utc};
use common::ProgressState;
use serde::{Deserialize, Serialize};

use crate::entity::{challenge, team_progress};
use crate::error::AppError;

/// Request body for submitting an algorithmic flag.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FlagRequest {
    /// Program output. Compared after trimming surrounding whitespace.
    #[schema(example = "6")]
    pub flag: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FlagResponse {
    pub success: bool,
    #[schema(example = "Flag accepted! Buildathon phase unlocked.")]
    pub message: String,
    pub state: ProgressState,
}

/// Request body for submitting a buildathon repository.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct BuildathonRequest {
    /// Public repository URL.
    #[serde(alias = "githubLink")]
    #[schema(example = "https://github.com/null-pointers/two-sum-app")]
    pub github_link: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BuildathonResponse {
    pub success: bool,
    #[schema(example = "Buildathon submitted for review")]
    pub message: String,
    #[schema(example = 17)]
    pub submission_id: i32,
    pub state: ProgressState,
}

/// The caller's progress on one challenge.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProgressResponse {
    #[schema(example = 1)]
    pub challenge_id: i32,
    #[schema(example = "Two Sum")]
    pub challenge_title: String,
    pub state: ProgressState,
    pub algorithmic_completed: bool,
    pub buildathon_completed: bool,
    /// Buildathon submissions made so far.
    pub attempts: i32,
    pub algorithmic_completed_at: Option<DateTime<Utc>>,
    pub buildathon_submitted_at: Option<DateTime<Utc>>,
    pub buildathon_completed_at: Option<DateTime<Utc>>,
}

impl ProgressResponse {
    pub fn new(challenge: &challenge::Model, progress: Option<&team_progress::Model>) -> Self {
        let state = progress.map_or(ProgressState::Available, |p| p.state);
        Self {
            challenge_id: challenge.id,
            challenge_title: challenge.title.clone(),
            state,
            algorithmic_completed: state.algorithmic_completed(),
            buildathon_completed: state.buildathon_completed(),
            attempts: progress.map_or(0, |p| p.attempts),
            algorithmic_completed_at: progress.and_then(|p| p.algorithmic_completed_at),
            buildathon_submitted_at: progress.and_then(|p| p.buildathon_submitted_at),
            buildathon_completed_at: progress.and_then(|p| p.buildathon_completed_at),
        }
    }
}

/// Trim a submitted flag and reject empty or oversized input.
pub fn validate_flag(flag: &str) -> Result<&str, AppError> {
    let flag = flag.trim();
    if flag.is_empty() {
        return Err(AppError::Validation("Flag must not be empty".into()));
    }
    if flag.len() > 1024 {
        return Err(AppError::Validation(
            "Flag must be at most 1024 characters".into(),
        ));
    }
    Ok(flag)
}

/// Check that `url` is an http(s) link on one of `hosts` (or a subdomain).
pub fn validate_repository_url(url: &str, hosts: &[String]) -> Result<String, AppError> {
    let url = url.trim();
    let invalid = || {
        AppError::Validation(format!(
            "Repository link must be an http(s) URL on {}",
            hosts.join(", ")
        ))
    };

    if url.len() > 2048 {
        return Err(invalid());
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(invalid)?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority
        .rsplit('@')
        .next()
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let allowed = hosts.iter().any(|allowed| {
        let allowed = allowed.to_ascii_lowercase();
        host == allowed || host.ends_with(&format!(".{allowed}"))
    });
    if host.is_empty() || !allowed {
        return Err(invalid());
    }
    Ok(url.to_string())
}
