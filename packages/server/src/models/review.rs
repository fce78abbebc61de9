use common::Verdict;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::validate_points;

/// Request body for reviewing a buildathon submission.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReviewRequest {
    #[serde(alias = "submissionId")]
    #[schema(example = 17)]
    pub submission_id: i32,
    /// `accept` or `reject`.
    #[schema(example = "accept")]
    pub action: String,
    pub feedback: Option<String>,
    /// Points to award on accept. Defaults to the challenge's points.
    pub points: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewAction {
    Accept,
    Reject,
}

impl ReviewAction {
    pub fn verdict(self) -> Verdict {
        match self {
            Self::Accept => Verdict::Accepted,
            Self::Reject => Verdict::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewResponse {
    pub success: bool,
    #[schema(example = "Submission accepted")]
    pub message: String,
    #[schema(example = "accept")]
    pub action: String,
    pub submission_id: i32,
    /// Points added to the team's total by this review (0 when already awarded).
    pub points_added: i32,
}

pub fn validate_review_request(req: &ReviewRequest) -> Result<ReviewAction, AppError> {
    let action = match req.action.trim().to_ascii_lowercase().as_str() {
        "accept" => ReviewAction::Accept,
        "reject" => ReviewAction::Reject,
        _ => {
            return Err(AppError::Validation(
                "Action must be one of: accept, reject".into(),
            ));
        }
    };
    if let Some(points) = req.points {
        validate_points(points)?;
    }
    if let Some(ref feedback) = req.feedback
        && feedback.len() > 10_000
    {
        return Err(AppError::Validation(
            "Feedback must be at most 10000 characters".into(),
        ));
    }
    Ok(action)
}
