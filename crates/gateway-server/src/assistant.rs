//! Request orchestration shared by the chat and probe endpoints.
//!
//! Both paths resolve a credential the same way and call the same provider.
//! They differ in what they send (a framed user message or the fixed probe
//! prompt) and in how failure is reported: chat propagates a
//! [`GatewayError`](gateway_core::GatewayError), the probe folds everything
//! into a [`ProbeResponse`].

use gateway_core::{
    ApiKey, ChatRequest, CredentialResolver, GatewayResult, ProbeRequest, ProbeResponse, Prompt,
    ProviderError, ProviderResult, TextProvider,
};
use gateway_telemetry::Metrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Prompt sent by the diagnostic probe.
pub const PROBE_PROMPT: &str = "What is solar energy? Answer briefly.";

/// Message returned by a successful probe.
pub const PROBE_SUCCESS_MESSAGE: &str = "API key is valid";

/// Default limit on a single provider call made on behalf of a request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Answers chat messages and probes through a text provider.
pub struct Assistant {
    resolver: CredentialResolver,
    provider: Arc<dyn TextProvider>,
    metrics: Arc<Metrics>,
    request_timeout: Duration,
}

impl Assistant {
    /// Create an assistant
    #[must_use]
    pub fn new(
        resolver: CredentialResolver,
        provider: Arc<dyn TextProvider>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            resolver,
            provider,
            metrics,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the per-request provider deadline
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether a configured credential is available
    #[must_use]
    pub fn has_configured_credential(&self) -> bool {
        self.resolver.has_fallback()
    }

    /// Name of the underlying provider
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model used by the underlying provider
    #[must_use]
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Answer a chat message.
    ///
    /// The message is validated before the credential is resolved, so a
    /// request missing both fails on the message.
    ///
    /// # Errors
    /// Returns [`GatewayError::MissingMessage`](gateway_core::GatewayError::MissingMessage),
    /// [`GatewayError::MissingCredential`](gateway_core::GatewayError::MissingCredential)
    /// or the provider failure
    pub async fn chat(&self, request: &ChatRequest) -> GatewayResult<String> {
        let message = request.validated_message()?;
        let credential = self.resolver.resolve(request.api_key.as_ref())?;

        debug!(
            credential_source = %credential.source,
            api_key = %credential.key.masked(),
            message_len = message.len(),
            "Forwarding chat message"
        );

        let answer = self.call(&credential.key, &Prompt::framed(message)).await?;
        Ok(answer)
    }

    /// Run the diagnostic probe. Never fails; failures are reported in the body.
    pub async fn probe(&self, request: &ProbeRequest) -> ProbeResponse {
        let credential = match self.resolver.resolve(request.api_key.as_ref()) {
            Ok(credential) => credential,
            Err(err) => return ProbeResponse::failure(err.to_string()),
        };

        info!(
            credential_source = %credential.source,
            api_key = %credential.key.masked(),
            "Probing provider"
        );

        match self.call(&credential.key, &Prompt::plain(PROBE_PROMPT)).await {
            Ok(answer) => ProbeResponse::success(PROBE_SUCCESS_MESSAGE, answer),
            Err(err) => ProbeResponse::failure(err.message),
        }
    }

    async fn call(&self, credential: &ApiKey, prompt: &Prompt) -> ProviderResult {
        let start = Instant::now();

        let result = match tokio::time::timeout(
            self.request_timeout,
            self.provider.generate(credential, prompt),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(format!(
                "No answer from {} within {}ms",
                self.provider.name(),
                self.request_timeout.as_millis()
            ))),
        };

        let elapsed = start.elapsed();
        match &result {
            Ok(answer) => {
                self.metrics.observe_provider_call("success", elapsed);
                debug!(
                    provider = %self.provider.name(),
                    latency_ms = elapsed.as_millis() as u64,
                    answer_len = answer.len(),
                    "Provider call succeeded"
                );
            }
            Err(err) => {
                self.metrics.observe_provider_call(err.kind.as_str(), elapsed);
                warn!(
                    provider = %self.provider.name(),
                    kind = err.kind.as_str(),
                    latency_ms = elapsed.as_millis() as u64,
                    error = %err.message,
                    "Provider call failed"
                );
            }
        }

        result
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .field("has_configured_credential", &self.resolver.has_fallback())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gateway_core::{GatewayError, ProviderErrorKind};
    use gateway_telemetry::MetricsConfig;
    use parking_lot::Mutex;

    enum Behavior {
        Answer(&'static str),
        Fail(ProviderError),
        Stall,
    }

    struct StubProvider {
        behavior: Behavior,
        seen: Mutex<Vec<(String, Prompt)>>,
    }

    impl StubProvider {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, Prompt)> {
            self.seen.lock().clone()
        }
    }

    #[async_trait]
    impl TextProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        async fn generate(&self, credential: &ApiKey, prompt: &Prompt) -> ProviderResult {
            self.seen
                .lock()
                .push((credential.expose().to_string(), prompt.clone()));
            match &self.behavior {
                Behavior::Answer(text) => Ok((*text).to_string()),
                Behavior::Fail(err) => Err(err.clone()),
                Behavior::Stall => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn assistant(provider: Arc<StubProvider>, fallback: Option<&str>) -> Assistant {
        let metrics = Arc::new(Metrics::new(&MetricsConfig::default()).unwrap());
        Assistant::new(
            CredentialResolver::new(fallback.and_then(ApiKey::new)),
            provider,
            metrics,
        )
    }

    #[tokio::test]
    async fn test_chat_frames_raw_message_and_prefers_request_key() {
        let provider = StubProvider::new(Behavior::Answer("Panels convert sunlight."));
        let assistant = assistant(provider.clone(), Some("configured-key-1"));

        let answer = assistant
            .chat(&ChatRequest::new("  How do panels work?  ").with_api_key("request-key-1"))
            .await
            .unwrap();

        assert_eq!(answer, "Panels convert sunlight.");
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "request-key-1");
        assert_eq!(calls[0].1, Prompt::framed("  How do panels work?  "));
    }

    #[tokio::test]
    async fn test_chat_falls_back_to_configured_key() {
        let provider = StubProvider::new(Behavior::Answer("ok"));
        let assistant = assistant(provider.clone(), Some("configured-key-1"));

        assistant.chat(&ChatRequest::new("hello")).await.unwrap();

        assert_eq!(provider.calls()[0].0, "configured-key-1");
    }

    #[tokio::test]
    async fn test_missing_message_checked_before_credential() {
        let provider = StubProvider::new(Behavior::Answer("ok"));
        let assistant = assistant(provider.clone(), None);

        let err = assistant.chat(&ChatRequest::default()).await.unwrap_err();

        assert!(matches!(err, GatewayError::MissingMessage));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_skips_provider() {
        let provider = StubProvider::new(Behavior::Answer("ok"));
        let assistant = assistant(provider.clone(), None);

        let err = assistant.chat(&ChatRequest::new("hello")).await.unwrap_err();

        assert!(matches!(err, GatewayError::MissingCredential));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let failure = ProviderError::new(
            ProviderErrorKind::Quota,
            "Quota exceeded",
            "HTTP 429",
        );
        let assistant = assistant(StubProvider::new(Behavior::Fail(failure.clone())), Some("k-123"));

        let err = assistant.chat(&ChatRequest::new("hello")).await.unwrap_err();

        match err {
            GatewayError::Provider(err) => assert_eq!(err, failure),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_provider_times_out() {
        let assistant = assistant(StubProvider::new(Behavior::Stall), Some("k-123"))
            .with_request_timeout(Duration::from_secs(5));

        let err = assistant.chat(&ChatRequest::new("hello")).await.unwrap_err();

        match err {
            GatewayError::Provider(err) => assert_eq!(err.kind, ProviderErrorKind::Timeout),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe_sends_fixed_prompt() {
        let provider = StubProvider::new(Behavior::Answer("Energy from the sun."));
        let assistant = assistant(provider.clone(), None);

        let response = assistant
            .probe(&ProbeRequest::with_api_key("probe-key-1"))
            .await;

        assert!(response.success);
        assert_eq!(response.message, PROBE_SUCCESS_MESSAGE);
        assert_eq!(response.response.as_deref(), Some("Energy from the sun."));
        assert_eq!(provider.calls()[0].1, Prompt::plain(PROBE_PROMPT));
    }

    #[tokio::test]
    async fn test_probe_reports_failures_in_body() {
        let assistant = assistant(StubProvider::new(Behavior::Answer("ok")), None);
        let response = assistant.probe(&ProbeRequest::default()).await;
        assert!(!response.success);
        assert_eq!(response.message, "API key is not provided");
        assert!(response.response.is_none());

        let failure = ProviderError::new(
            ProviderErrorKind::Authentication,
            "API key not valid. Please pass a valid API key.",
            "HTTP 400",
        );
        let assistant = assistant_with_failure(failure);
        let response = assistant
            .probe(&ProbeRequest::with_api_key("bad-key-1"))
            .await;
        assert!(!response.success);
        assert_eq!(
            response.message,
            "API key not valid. Please pass a valid API key."
        );
    }

    fn assistant_with_failure(failure: ProviderError) -> Assistant {
        assistant(StubProvider::new(Behavior::Fail(failure)), None)
    }
}
