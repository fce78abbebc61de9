pub mod judge_status;
pub mod progress;
pub mod submission;

pub use progress::{ProgressEvent, ProgressState, TransitionError};
pub use submission::{SubmissionKind, Verdict};
