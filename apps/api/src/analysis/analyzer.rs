//! AI analysis client: bounded retry around one provider call, with a
//! deterministic fallback once every attempt has failed.
//!
//! Each attempt moves `Attempting(n)` to either `Success` (return at once) or
//! a failure, which sleeps `base_backoff × n` and tries again. After the last
//! attempt the loop ends in `Fallback`. Both terminal states carry a
//! schema-valid `AnalysisResult`, so callers never see an analysis error.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::fallback::fallback_result;
use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::detect_language;
use crate::analysis::repair::{parse_analysis, RepairError};
use crate::llm_client::prompts::ANALYSIS_SYSTEM;
use crate::llm_client::{ChatCompletion, CompletionRequest, LlmError};

/// How many times to ask the model and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Linear backoff: 1× base after the first failure, 2× after the second, ...
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_backoff * attempt
    }
}

/// Why a single attempt did not produce a result.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error(transparent)]
    Output(#[from] RepairError),
}

#[derive(Debug)]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    Fallback {
        result: AnalysisResult,
        /// Error from the final attempt; kept for diagnostics only.
        last_error: Option<AttemptError>,
    },
}

impl AnalysisOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Fallback { result, .. } => result,
        }
    }
}

#[derive(Clone)]
pub struct AnalysisClient {
    llm: Arc<dyn ChatCompletion>,
    default_model: String,
    retry: RetryPolicy,
}

impl AnalysisClient {
    pub fn new(llm: Arc<dyn ChatCompletion>, default_model: impl Into<String>) -> Self {
        Self {
            llm,
            default_model: default_model.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Runs the analysis for `prompt` against `model` (or the default model).
    pub async fn analyze(&self, prompt: &str, model: Option<&str>) -> AnalysisOutcome {
        let model = model.unwrap_or(&self.default_model);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error: Option<AttemptError> = None;

        for attempt in 1..=max_attempts {
            match self.attempt(prompt, model).await {
                Ok(result) => {
                    info!(model, attempt, score = result.score, "Analysis completed");
                    return AnalysisOutcome::Success(result);
                }
                Err(e) => {
                    warn!(model, attempt, max_attempts, error = %e, "Analysis attempt failed");
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.retry.backoff(attempt)).await;
            }
        }

        let language = detect_language(prompt);
        warn!(
            model,
            %language,
            "All analysis attempts failed, returning fallback result"
        );
        AnalysisOutcome::Fallback {
            result: fallback_result(language, model),
            last_error,
        }
    }

    async fn attempt(&self, prompt: &str, model: &str) -> Result<AnalysisResult, AttemptError> {
        let raw = self
            .llm
            .complete(CompletionRequest {
                model,
                system: ANALYSIS_SYSTEM,
                prompt,
            })
            .await?;
        Ok(parse_analysis(&raw)?)
    }
}
