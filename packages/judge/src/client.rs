use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::error;

use crate::config::JudgeConfig;
use crate::error::{JudgeError, Result};
use crate::executor::JudgeBackend;
use crate::models::{JudgeRequest, JudgeStatusReport};

const RESULT_FIELDS: &str = "stdout,stderr,compile_output,message,status,time,memory";

#[derive(Deserialize)]
struct SubmitResponse {
    token: String,
}

#[derive(Deserialize)]
struct StatusField {
    id: i32,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ResultResponse {
    status: StatusField,
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    message: Option<String>,
    /// Seconds, serialized as a decimal string.
    time: Option<String>,
    memory: Option<i64>,
}

impl From<ResultResponse> for JudgeStatusReport {
    fn from(r: ResultResponse) -> Self {
        Self {
            status_id: r.status.id,
            status_description: r.status.description,
            stdout: r.stdout,
            stderr: r.stderr,
            compile_output: r.compile_output,
            message: r.message,
            time: r.time.and_then(|t| t.trim().parse().ok()),
            memory: r.memory,
        }
    }
}

/// HTTP client for a Judge0-compatible service.
#[derive(Clone)]
pub struct Judge0Client {
    http: Client,
    base_url: String,
}

impl Judge0Client {
    pub fn new(config: &JudgeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(
                HeaderName::from_static("x-rapidapi-key"),
                HeaderValue::from_str(key).map_err(|e| JudgeError::Config(e.to_string()))?,
            );
        }
        if let Some(host) = &config.api_host {
            headers.insert(
                HeaderName::from_static("x-rapidapi-host"),
                HeaderValue::from_str(host).map_err(|e| JudgeError::Config(e.to_string()))?,
            );
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| JudgeError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl JudgeBackend for Judge0Client {
    async fn submit(&self, request: &JudgeRequest) -> Result<String> {
        let url = format!("{}/submissions", self.base_url);
        let res = self
            .http
            .post(&url)
            .query(&[("base64_encoded", "false"), ("wait", "false")])
            .json(request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, "Judge submission request failed");
                JudgeError::Submit(e.to_string())
            })?;

        let body: SubmitResponse = res.json().await.map_err(|e| {
            error!(error = %e, "Judge submission response unreadable");
            JudgeError::Submit(e.to_string())
        })?;
        Ok(body.token)
    }

    async fn fetch(&self, token: &str) -> Result<JudgeStatusReport> {
        let url = format!("{}/submissions/{}", self.base_url, token);
        let res = self
            .http
            .get(&url)
            .query(&[("base64_encoded", "false"), ("fields", RESULT_FIELDS)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, token, "Judge result request failed");
                JudgeError::Poll(e.to_string())
            })?;

        let body: ResultResponse = res.json().await.map_err(|e| {
            error!(error = %e, token, "Judge result response unreadable");
            JudgeError::Poll(e.to_string())
        })?;
        Ok(body.into())
    }
}
