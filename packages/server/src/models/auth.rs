use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Request body for team registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique team name (1-32 chars: letters, digits, spaces, `_` and `-`).
    #[schema(example = "Null Pointers")]
    pub name: String,
    /// Contact email.
    #[schema(example = "team@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let name = payload.name.trim();
    if name.is_empty() || name.chars().count() > 32 {
        return Err(AppError::Validation(
            "Team name must be 1-32 characters".into(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
    {
        return Err(AppError::Validation(
            "Team name must contain only letters, digits, spaces, underscores, and hyphens"
                .into(),
        ));
    }
    let email = payload.email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && email.len() <= 254 => {}
        _ => return Err(AppError::Validation("Email is invalid".into())),
    }
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for team login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Team name of the account to log into.
    #[schema(example = "Null Pointers")]
    pub name: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Team name must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// ID of the newly created team.
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Null Pointers")]
    pub name: String,
}

impl From<crate::entity::team::Model> for RegisterResponse {
    fn from(team: crate::entity::team::Model) -> Self {
        Self {
            id: team.id,
            name: team.name,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Null Pointers")]
    pub name: String,
    #[schema(example = "team")]
    pub role: String,
    /// Permissions granted to the account.
    #[schema(example = json!(["challenge:submit"]))]
    pub permissions: Vec<String>,
}

/// Current authenticated team's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Null Pointers")]
    pub name: String,
    #[schema(example = "team@example.com")]
    pub email: String,
    #[schema(example = "team")]
    pub role: String,
    #[schema(example = json!(["challenge:submit"]))]
    pub permissions: Vec<String>,
    /// Points awarded so far.
    #[schema(example = 300)]
    pub total_points: i32,
    /// IDs of challenges whose buildathon phase has been accepted.
    #[schema(example = json!([1, 3]))]
    pub completed_challenges: Vec<i32>,
}
