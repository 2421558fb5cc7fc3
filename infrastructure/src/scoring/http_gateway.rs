//! HTTP judgment service client.

use crate::config::ScoringConfig;
use async_trait::async_trait;
use chatcheck_application::ports::scoring_gateway::{ScoringError, ScoringGateway};
use chatcheck_domain::Judgment;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ScoreRequest<'a> {
    actual: &'a str,
    expected: &'a str,
}

#[derive(Deserialize)]
struct ScoreResponse {
    score: f64,
    #[serde(default)]
    label: String,
    #[serde(default)]
    explanation: String,
}

/// [`ScoringGateway`] over an HTTP judgment endpoint.
///
/// One JSON POST per exchange: `{actual, expected}` out,
/// `{score, label, explanation}` back. The judge identity comes from
/// configuration, not from the response.
pub struct HttpScoringGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    judge: String,
}

impl HttpScoringGateway {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            judge: config.judge.clone(),
        }
    }

    fn judgment_from(&self, response: ScoreResponse) -> Judgment {
        Judgment {
            score: response.score,
            label: response.label,
            explanation: response.explanation,
            provenance: self.judge.clone(),
        }
    }
}

#[async_trait]
impl ScoringGateway for HttpScoringGateway {
    async fn score(&self, actual: &str, expected: &str) -> Result<Judgment, ScoringError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest { actual, expected });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScoringError::Timeout
            } else {
                ScoringError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::BadResponse(status.to_string()));
        }

        let parsed: ScoreResponse = response
            .json()
            .await
            .map_err(|e| ScoringError::BadResponse(e.to_string()))?;
        debug!(score = parsed.score, judge = self.judge.as_str(), "reply scored");
        Ok(self.judgment_from(parsed))
    }

    fn provenance(&self) -> &str {
        &self.judge
    }
}
