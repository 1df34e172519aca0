//! Analysis pipeline
//!
//! identity → classifier gate → quota gate → analyzer → non-fatal persist.
//! The classifier and the quota tracker run strictly before the analyzer, so
//! rejected text never costs quota or an AI call.

use super::bounded;
use super::types::{
    AnalysisPayload, AnalyzeRequest, AnalyzeResponse, ClassifyRequest, ClassifyResponse,
    QuotaStatusResponse, RateLimitInfo,
};
use crate::core::analysis::{Analyzer, AnalyzerError};
use crate::core::classifier::ErrorClassifier;
use crate::core::clock::SharedClock;
use crate::core::identity::ClientIdentity;
use crate::core::quota::QuotaTracker;
use crate::core::submissions::SubmissionRecord;
use crate::storage::SubmissionStore;
use crate::utils::error::{ExplainError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Composes classifier, quota tracker, analyzer and submission store
#[derive(Clone)]
pub struct ExplainService {
    classifier: Arc<ErrorClassifier>,
    quota: Arc<dyn QuotaTracker>,
    analyzer: Arc<dyn Analyzer>,
    submissions: Option<Arc<dyn SubmissionStore>>,
    clock: SharedClock,
    max_length: usize,
    analyzer_timeout: Duration,
    store_timeout: Duration,
}

impl ExplainService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        classifier: Arc<ErrorClassifier>,
        quota: Arc<dyn QuotaTracker>,
        analyzer: Arc<dyn Analyzer>,
        submissions: Option<Arc<dyn SubmissionStore>>,
        clock: SharedClock,
        max_length: usize,
        analyzer_timeout: Duration,
        store_timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            quota,
            analyzer,
            submissions,
            clock,
            max_length,
            analyzer_timeout,
            store_timeout,
        }
    }

    /// Classifier hint for the input form
    pub fn precheck(&self, request: &ClassifyRequest) -> ClassifyResponse {
        let result = self
            .classifier
            .classify(request.error_message.as_deref(), request.language.as_deref());
        ClassifyResponse {
            valid: result.valid,
            score: result.score,
            categories: result.categories,
            reason: result.reason,
            suggestion: result.suggestion,
            ruleset_version: self.classifier.ruleset_version().to_string(),
        }
    }

    /// Quota status without consuming anything
    pub async fn status(&self, client: &ClientIdentity) -> QuotaStatusResponse {
        let status = self.quota.peek(client).await;
        QuotaStatusResponse {
            remaining: status.remaining,
            max_requests: status.limit,
            reset_time: status.reset_time,
            can_analyze: status.can_analyze,
        }
    }

    /// Full analysis pipeline
    pub async fn analyze(
        &self,
        client: &ClientIdentity,
        request: &AnalyzeRequest,
    ) -> Result<AnalyzeResponse> {
        let (error_message, language) = self.validate(request)?;

        let classification = self.classifier.classify(Some(error_message), Some(language));
        if !classification.valid {
            debug!(client = %client, score = classification.score, "Submission rejected by classifier");
            return Err(ExplainError::not_an_error(
                classification.reason.unwrap_or_default(),
                classification.suggestion.unwrap_or_default(),
            ));
        }

        let decision = self.quota.check_and_reserve(client).await;
        if !decision.allowed {
            info!(client = %client, reset_time = %decision.reset_time, "Daily quota exhausted");
            return Err(ExplainError::QuotaExceeded {
                limit: decision.limit,
                remaining: 0,
                reset_time: decision.reset_time,
            });
        }

        let analysis = match tokio::time::timeout(
            self.analyzer_timeout,
            self.analyzer.analyze(error_message, language),
        )
        .await
        {
            Ok(Ok(analysis)) => analysis,
            Ok(Err(e)) => {
                warn!(analyzer = self.analyzer.name(), error = %e, "Analysis failed");
                return Err(ExplainError::analyzer_unavailable(e.to_string()));
            }
            Err(_) => {
                let e = AnalyzerError::Timeout(self.analyzer_timeout.as_secs());
                warn!(analyzer = self.analyzer.name(), error = %e, "Analysis failed");
                return Err(ExplainError::analyzer_unavailable(e.to_string()));
            }
        };

        let id = self
            .persist(client, error_message, language, &analysis)
            .await;

        Ok(AnalyzeResponse {
            success: true,
            analysis: AnalysisPayload {
                analysis,
                language: language.to_string(),
                id,
            },
            rate_limit: RateLimitInfo {
                remaining: decision.remaining,
                reset_time: decision.reset_time,
            },
        })
    }

    fn validate<'a>(&self, request: &'a AnalyzeRequest) -> Result<(&'a str, &'a str)> {
        let error_message = request
            .error_message
            .as_deref()
            .filter(|m| !m.trim().is_empty());
        let language = request.language.as_deref().filter(|l| !l.trim().is_empty());

        let (Some(error_message), Some(language)) = (error_message, language) else {
            return Err(ExplainError::validation(
                "Error message and language are required",
            ));
        };

        if error_message.chars().count() > self.max_length {
            return Err(ExplainError::validation(format!(
                "Error message too long (max {} chars)",
                self.max_length
            )));
        }

        Ok((error_message, language))
    }

    /// Store the submission; failures only cost the caller the history entry
    async fn persist(
        &self,
        client: &ClientIdentity,
        error_message: &str,
        language: &str,
        analysis: &crate::core::analysis::ErrorAnalysis,
    ) -> Option<String> {
        let store = self.submissions.as_ref()?;
        let record = SubmissionRecord::from_analysis(
            client.clone(),
            error_message,
            language,
            analysis,
            self.clock.now(),
        );

        match bounded(self.store_timeout, "submission write", store.create(&record)).await {
            Ok(()) => {
                debug!(id = %record.id, "Submission stored");
                Some(record.id)
            }
            Err(e) => {
                warn!(store = store.name(), error = %e, "Failed to store submission");
                None
            }
        }
    }
}
