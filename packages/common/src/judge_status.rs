use crate::Verdict;

/// Judge status ids at or below this value mean the job is still queued or running.
pub const LAST_PENDING_STATUS: i32 = 2;

pub const STATUS_IN_QUEUE: i32 = 1;
pub const STATUS_PROCESSING: i32 = 2;
pub const STATUS_ACCEPTED: i32 = 3;
pub const STATUS_WRONG_ANSWER: i32 = 4;
pub const STATUS_TIME_LIMIT_EXCEEDED: i32 = 5;
pub const STATUS_COMPILATION_ERROR: i32 = 6;

/// Returns true if the judge will not change this status any more.
pub fn is_terminal(status_id: i32) -> bool {
    status_id > LAST_PENDING_STATUS
}

/// Runtime failures reported by the judge (signals, non-zero exit, other).
pub fn is_runtime_error(status_id: i32) -> bool {
    (7..=12).contains(&status_id)
}

/// Map a terminal judge status to a stored verdict.
///
/// `is_correct` is only present when the caller supplied an expected output.
/// A judge-accepted run whose output does not match the flag is rejected.
pub fn verdict_for(status_id: i32, is_correct: Option<bool>) -> Verdict {
    match status_id {
        STATUS_ACCEPTED if is_correct == Some(false) => Verdict::Rejected,
        STATUS_ACCEPTED => Verdict::Accepted,
        STATUS_WRONG_ANSWER | STATUS_TIME_LIMIT_EXCEEDED => Verdict::Rejected,
        STATUS_COMPILATION_ERROR => Verdict::CompilationError,
        // Runtime errors, internal judge errors and exec format errors.
        _ => Verdict::RuntimeError,
    }
}
