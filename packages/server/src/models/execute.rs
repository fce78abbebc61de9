use common::Verdict;
use judge::{ExecutionOutcome, JudgeRequest};
use serde::{Deserialize, Serialize};

use crate::entity::submission;
use crate::error::AppError;

const MAX_SOURCE_BYTES: usize = 64 * 1024;
const MAX_IO_BYTES: usize = 1024 * 1024;

/// Request body for running code against the judge.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ExecuteRequest {
    /// Challenge the run is recorded against.
    #[serde(alias = "challengeId")]
    #[schema(example = 1)]
    pub challenge_id: i32,
    #[serde(alias = "sourceCode")]
    #[schema(example = "print(sum(map(int, input().split())))")]
    pub source_code: String,
    /// Judge language id (e.g. 71 for Python 3).
    #[serde(alias = "languageId")]
    #[schema(example = 71)]
    pub language_id: i32,
    pub stdin: Option<String>,
    /// When present and non-empty, stdout is compared against it.
    #[serde(alias = "expectedOutput")]
    pub expected_output: Option<String>,
}

impl ExecuteRequest {
    pub fn to_judge_request(&self) -> JudgeRequest {
        JudgeRequest {
            source_code: self.source_code.clone(),
            language_id: self.language_id,
            stdin: self.stdin.clone(),
            expected_output: self.expected_output.clone(),
        }
    }
}

pub fn validate_execute_request(req: &ExecuteRequest) -> Result<(), AppError> {
    if req.source_code.trim().is_empty() {
        return Err(AppError::Validation("Source code must not be empty".into()));
    }
    if req.source_code.len() > MAX_SOURCE_BYTES {
        return Err(AppError::Validation(
            "Source code must be at most 64KB".into(),
        ));
    }
    if req.language_id <= 0 {
        return Err(AppError::Validation("Language id must be positive".into()));
    }
    let io_len = req.stdin.as_ref().map_or(0, String::len)
        + req.expected_output.as_ref().map_or(0, String::len);
    if io_len > MAX_IO_BYTES {
        return Err(AppError::Validation(
            "Input and expected output must be at most 1MB".into(),
        ));
    }
    Ok(())
}

/// Result of a finished run.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ExecuteResponse {
    /// ID of the recorded submission.
    #[schema(example = 12)]
    pub submission_id: i32,
    pub stdout: String,
    pub stderr: String,
    /// Judge status description, e.g. "Accepted".
    #[schema(example = "Accepted")]
    pub status: String,
    #[schema(example = 3)]
    pub status_id: i32,
    /// Seconds.
    pub time: Option<f64>,
    /// Kilobytes.
    pub memory: Option<i64>,
    /// Present only when an expected output was supplied.
    pub is_correct: Option<bool>,
    pub verdict: Verdict,
    pub compilation_error: Option<String>,
    pub runtime_error: Option<String>,
}

impl ExecuteResponse {
    pub fn new(outcome: ExecutionOutcome, record: &submission::Model) -> Self {
        let compilation_error = outcome.compilation_error();
        let runtime_error = outcome.runtime_error();
        Self {
            submission_id: record.id,
            verdict: record.verdict,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            status: outcome.status,
            status_id: outcome.status_id,
            time: outcome.time,
            memory: outcome.memory,
            is_correct: outcome.is_correct,
            compilation_error,
            runtime_error,
        }
    }
}
