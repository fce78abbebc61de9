use common::Verdict;
use common::judge_status::{STATUS_COMPILATION_ERROR, is_runtime_error, verdict_for};
use serde::{Deserialize, Serialize};

/// Source code to run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub source_code: String,
    /// Judge language id (e.g. 71 for Python 3).
    pub language_id: i32,
    pub stdin: Option<String>,
    /// Compared locally against stdout; never forwarded to the judge.
    #[serde(skip_serializing)]
    pub expected_output: Option<String>,
}

/// One snapshot of a judge job, as returned by a poll.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JudgeStatusReport {
    pub status_id: i32,
    pub status_description: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    /// Wall time in seconds.
    pub time: Option<f64>,
    /// Peak memory in kilobytes.
    pub memory: Option<i64>,
}

/// Normalized result of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub status_id: i32,
    pub status: String,
    pub time: Option<f64>,
    pub memory: Option<i64>,
    /// Present only when an expected output was supplied.
    pub is_correct: Option<bool>,
}

/// Trimmed, case-sensitive comparison used for both run output and flags.
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}

impl ExecutionOutcome {
    pub fn from_report(report: JudgeStatusReport, expected_output: Option<&str>) -> Self {
        let stdout = report.stdout.unwrap_or_default();
        let is_correct = expected_output
            .filter(|e| !e.is_empty())
            .map(|e| outputs_match(&stdout, e));

        Self {
            stdout,
            stderr: report.stderr.unwrap_or_default(),
            compile_output: report.compile_output,
            message: report.message,
            status_id: report.status_id,
            status: report.status_description,
            time: report.time,
            memory: report.memory,
            is_correct,
        }
    }

    pub fn verdict(&self) -> Verdict {
        verdict_for(self.status_id, self.is_correct)
    }

    pub fn compilation_error(&self) -> Option<String> {
        if self.status_id != STATUS_COMPILATION_ERROR {
            return None;
        }
        self.compile_output
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| Some(self.stderr.clone()))
    }

    pub fn runtime_error(&self) -> Option<String> {
        if !is_runtime_error(self.status_id) {
            return None;
        }
        if self.stderr.is_empty() {
            self.message.clone()
        } else {
            Some(self.stderr.clone())
        }
    }
}
