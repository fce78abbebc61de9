use serde::Deserialize;

/// Connection and polling settings for the judge service.
#[derive(Debug, Deserialize, Clone)]
pub struct JudgeConfig {
    /// Base URL of the Judge0-compatible API. Default: "http://localhost:2358".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `X-RapidAPI-Key` when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sent as `X-RapidAPI-Host` when set.
    #[serde(default)]
    pub api_host: Option<String>,
    /// Delay before each poll. Default: 1000.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Polls before giving up. Default: 15.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Per-request HTTP timeout. Default: 10.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:2358".into()
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_max_attempts() -> u32 {
    15
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_host: None,
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
