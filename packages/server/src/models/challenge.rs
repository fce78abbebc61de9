use chrono::{DateTime, Utc};
use common::ProgressState;
use serde::{Deserialize, Serialize};

use crate::entity::challenge;
use crate::error::AppError;

use super::shared::{validate_optional_position, validate_points, validate_title};

/// Request body for creating a challenge.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateChallengeRequest {
    #[schema(example = "Two Sum")]
    pub title: String,
    /// Points awarded when the buildathon phase is accepted.
    #[schema(example = 100)]
    pub points: i32,
    /// Display order. Appended after the last challenge if omitted.
    pub position: Option<i32>,
    /// Inactive challenges are hidden from teams. Default: true.
    pub is_active: Option<bool>,
    /// Markdown statement of the algorithmic problem.
    pub problem_description: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub sample_input: String,
    #[serde(default)]
    pub sample_output: String,
    /// Milliseconds. Default: 2000.
    pub time_limit: Option<i32>,
    /// Kilobytes. Default: 262144.
    pub memory_limit: Option<i32>,
    #[serde(default)]
    pub buildathon_description: String,
    #[serde(default)]
    pub buildathon_requirements: Vec<String>,
    /// Output that unlocks the buildathon phase.
    #[schema(example = "6")]
    pub expected_flag: String,
}

/// PATCH body for a challenge. Absent fields are left unchanged.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateChallengeRequest {
    pub title: Option<String>,
    pub points: Option<i32>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub problem_description: Option<String>,
    pub constraints: Option<String>,
    pub sample_input: Option<String>,
    pub sample_output: Option<String>,
    pub time_limit: Option<i32>,
    pub memory_limit: Option<i32>,
    pub buildathon_description: Option<String>,
    pub buildathon_requirements: Option<Vec<String>>,
    pub expected_flag: Option<String>,
}

/// Challenge row in list results.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeListItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Two Sum")]
    pub title: String,
    #[schema(example = 100)]
    pub points: i32,
    pub position: i32,
    pub is_active: bool,
    /// The caller's progress on this challenge.
    pub state: ProgressState,
}

/// Full challenge details.
///
/// Buildathon fields are only present once the caller has solved the
/// algorithmic phase; the flag is only present for challenge managers.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeResponse {
    pub id: i32,
    pub title: String,
    pub points: i32,
    pub position: i32,
    pub is_active: bool,
    pub problem_description: String,
    pub constraints: String,
    pub sample_input: String,
    pub sample_output: String,
    pub time_limit: i32,
    pub memory_limit: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildathon_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildathon_requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_flag: Option<String>,
    pub state: ProgressState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChallengeResponse {
    pub fn new(m: challenge::Model, state: ProgressState, is_manager: bool) -> Self {
        let show_buildathon = is_manager || state.algorithmic_completed();
        let requirements = requirements_of(&m);
        Self {
            id: m.id,
            title: m.title,
            points: m.points,
            position: m.position,
            is_active: m.is_active,
            problem_description: m.problem_description,
            constraints: m.constraints,
            sample_input: m.sample_input,
            sample_output: m.sample_output,
            time_limit: m.time_limit,
            memory_limit: m.memory_limit,
            buildathon_description: show_buildathon.then_some(m.buildathon_description),
            buildathon_requirements: show_buildathon.then_some(requirements),
            expected_flag: is_manager.then_some(m.expected_flag),
            state,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl ChallengeListItem {
    pub fn new(m: &challenge::Model, state: ProgressState) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            points: m.points,
            position: m.position,
            is_active: m.is_active,
            state,
        }
    }
}

/// Decode the stored requirements column; malformed data reads as empty.
pub fn requirements_of(m: &challenge::Model) -> Vec<String> {
    serde_json::from_value(m.buildathon_requirements.clone()).unwrap_or_default()
}

fn validate_statement(text: &str, field: &str) -> Result<(), AppError> {
    if text.len() > 1_000_000 {
        return Err(AppError::Validation(format!(
            "{field} must be at most 1MB"
        )));
    }
    Ok(())
}

fn validate_limits(time_limit: Option<i32>, memory_limit: Option<i32>) -> Result<(), AppError> {
    if let Some(tl) = time_limit
        && !(1..=30000).contains(&tl)
    {
        return Err(AppError::Validation("Time limit must be 1-30000 ms".into()));
    }
    if let Some(ml) = memory_limit
        && !(1..=1_048_576).contains(&ml)
    {
        return Err(AppError::Validation(
            "Memory limit must be 1-1048576 KB".into(),
        ));
    }
    Ok(())
}

fn validate_flag_value(flag: &str) -> Result<(), AppError> {
    if flag.trim().is_empty() || flag.len() > 1024 {
        return Err(AppError::Validation(
            "Expected flag must be 1-1024 characters".into(),
        ));
    }
    Ok(())
}

fn validate_requirements(requirements: &[String]) -> Result<(), AppError> {
    if requirements.len() > 50 || requirements.iter().any(|r| r.trim().is_empty()) {
        return Err(AppError::Validation(
            "Requirements must be at most 50 non-empty entries".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_challenge(req: &CreateChallengeRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_points(req.points)?;
    validate_optional_position(req.position)?;
    if req.problem_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Problem description must not be empty".into(),
        ));
    }
    validate_statement(&req.problem_description, "Problem description")?;
    validate_statement(&req.buildathon_description, "Buildathon description")?;
    validate_limits(req.time_limit, req.memory_limit)?;
    validate_requirements(&req.buildathon_requirements)?;
    validate_flag_value(&req.expected_flag)
}

pub fn validate_update_challenge(req: &UpdateChallengeRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(points) = req.points {
        validate_points(points)?;
    }
    validate_optional_position(req.position)?;
    if let Some(ref desc) = req.problem_description {
        if desc.trim().is_empty() {
            return Err(AppError::Validation(
                "Problem description must not be empty".into(),
            ));
        }
        validate_statement(desc, "Problem description")?;
    }
    if let Some(ref desc) = req.buildathon_description {
        validate_statement(desc, "Buildathon description")?;
    }
    validate_limits(req.time_limit, req.memory_limit)?;
    if let Some(ref requirements) = req.buildathon_requirements {
        validate_requirements(requirements)?;
    }
    if let Some(ref flag) = req.expected_flag {
        validate_flag_value(flag)?;
    }
    Ok(())
}
