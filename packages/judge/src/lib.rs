//! Client for the remote code-execution service.
//!
//! A run is one `submit` followed by bounded polling until the service
//! reports a terminal status. See [`execute`].

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;

pub use client::Judge0Client;
pub use config::JudgeConfig;
pub use error::JudgeError;
pub use executor::{JudgeBackend, PollPolicy, execute};
pub use models::{ExecutionOutcome, JudgeRequest, JudgeStatusReport, outputs_match};
