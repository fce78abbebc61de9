use thiserror::Error;

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("Failed to submit code: {0}")]
    Submit(String),

    #[error("Failed to get result: {0}")]
    Poll(String),

    #[error("Execution still running after {attempts} polls")]
    Timeout { attempts: u32 },

    #[error("Invalid judge client configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, JudgeError>;
