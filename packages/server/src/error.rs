use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::TransitionError;
use judge::JudgeError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `INCORRECT_FLAG`,
    /// `TOKEN_MISSING`, `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `PERMISSION_DENIED`,
    /// `PHASE_LOCKED`, `NOT_FOUND`, `JUDGE_TIMEOUT`, `CONFLICT`, `NAME_TAKEN`,
    /// `UPSTREAM_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Flag must not be empty")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    IncorrectFlag,
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    PermissionDenied,
    /// The requested phase is not unlocked yet.
    PhaseLocked(String),
    NotFound(String),
    Conflict(String),
    NameTaken,
    /// Judge polling budget exhausted.
    JudgeTimeout,
    /// The judge service failed. `message` is shown, `detail` only logged.
    Upstream {
        message: &'static str,
        detail: String,
    },
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::IncorrectFlag => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INCORRECT_FLAG",
                    message: "Incorrect flag. Try again.".into(),
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid team name or password".into(),
                },
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PERMISSION_DENIED",
                    message: "Insufficient permissions".into(),
                },
            ),
            AppError::PhaseLocked(msg) => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PHASE_LOCKED",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::NameTaken => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "NAME_TAKEN",
                    message: "Team name is already taken".into(),
                },
            ),
            AppError::JudgeTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                ErrorBody {
                    code: "JUDGE_TIMEOUT",
                    message: "Execution is taking too long. Please try again later.".into(),
                },
            ),
            AppError::Upstream { message, detail } => {
                tracing::error!("Judge service error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "UPSTREAM_ERROR",
                        message: message.into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<JudgeError> for AppError {
    fn from(err: JudgeError) -> Self {
        match err {
            JudgeError::Timeout { .. } => AppError::JudgeTimeout,
            JudgeError::Submit(detail) => AppError::Upstream {
                message: "Failed to submit code",
                detail,
            },
            JudgeError::Poll(detail) => AppError::Upstream {
                message: "Failed to get result",
                detail,
            },
            JudgeError::Config(detail) => AppError::Internal(detail),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::PhaseLocked => AppError::PhaseLocked(err.to_string()),
            TransitionError::AlreadyCompleted => AppError::Conflict(err.to_string()),
            TransitionError::NothingToReview => AppError::Conflict(err.to_string()),
        }
    }
}
