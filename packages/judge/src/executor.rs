use std::time::Duration;

use async_trait::async_trait;
use common::judge_status::is_terminal;
use tracing::{debug, instrument, warn};

use crate::config::JudgeConfig;
use crate::error::{JudgeError, Result};
use crate::models::{ExecutionOutcome, JudgeRequest, JudgeStatusReport};

/// Transport to a judge service.
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Queue a run and return the job token.
    async fn submit(&self, request: &JudgeRequest) -> Result<String>;

    /// Read the current state of a queued run.
    async fn fetch(&self, token: &str) -> Result<JudgeStatusReport>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 15,
        }
    }
}

impl From<&JudgeConfig> for PollPolicy {
    fn from(config: &JudgeConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.poll_interval_ms),
            max_attempts: config.max_attempts,
        }
    }
}

/// Submit `request` and wait for a terminal status.
///
/// Each poll is preceded by `policy.interval`. Neither the submit nor any
/// poll is retried; the first transport failure is returned as is.
#[instrument(skip_all, fields(language_id = request.language_id))]
pub async fn execute<B>(
    backend: &B,
    request: &JudgeRequest,
    policy: PollPolicy,
) -> Result<ExecutionOutcome>
where
    B: JudgeBackend + ?Sized,
{
    let token = backend.submit(request).await?;
    debug!(%token, "Code submitted to judge");

    for attempt in 1..=policy.max_attempts {
        tokio::time::sleep(policy.interval).await;

        let report = backend.fetch(&token).await?;
        if is_terminal(report.status_id) {
            debug!(
                %token,
                attempt,
                status_id = report.status_id,
                "Judge finished"
            );
            return Ok(ExecutionOutcome::from_report(
                report,
                request.expected_output.as_deref(),
            ));
        }
    }

    warn!(%token, attempts = policy.max_attempts, "Judge polling exhausted");
    Err(JudgeError::Timeout {
        attempts: policy.max_attempts,
    })
}
