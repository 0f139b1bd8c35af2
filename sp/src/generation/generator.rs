//! ContentGenerator backed by an LlmClient

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::parse::{EXPECTED_SESSIONS, parse_sessions};
use super::types::{GenerationError, GenerationRequest, Session};
use super::ContentGenerator;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::prompts::{ModuleContext, PromptLoader};

/// Default response budget for one study module
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Generates study modules with one completion call per request
pub struct LlmContentGenerator {
    client: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
}

impl LlmContentGenerator {
    pub fn new(client: Arc<dyn LlmClient>, prompts: PromptLoader) -> Self {
        debug!(provider = %client.provider(), model = %client.model(), "LlmContentGenerator::new: called");
        Self {
            client,
            prompts,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Label for the status line, e.g. "gemini/gemini-2.5-flash"
    pub fn label(&self) -> String {
        format!("{}/{}", self.client.provider(), self.client.model())
    }

    fn build_request(&self, request: &GenerationRequest) -> Result<CompletionRequest, GenerationError> {
        let context = ModuleContext {
            day: request.day,
            topic: request.topic.clone(),
            subject: request.subject.clone(),
            phase_description: request.phase_description.clone(),
            session_count: EXPECTED_SESSIONS,
        };
        let (system_prompt, user_prompt) = self
            .prompts
            .render_module(&context)
            .map_err(|e| GenerationError::setup(e.to_string()))?;

        Ok(CompletionRequest {
            system_prompt,
            messages: vec![Message::user(user_prompt)],
            max_tokens: self.max_tokens,
            json_output: true,
        })
    }
}

/// Map a transport-level failure onto what the user is told
pub fn classify_llm_error(err: &LlmError) -> GenerationError {
    let message = err.to_string();
    if err.is_transport() {
        GenerationError::network(message)
    } else if err.is_remote() {
        GenerationError::remote(message)
    } else {
        GenerationError::malformed(message)
    }
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Session>, GenerationError> {
        debug!(day = request.day, topic = %request.topic, "LlmContentGenerator::generate: called");
        let completion = self.build_request(request)?;

        let response = self.client.complete(completion).await.map_err(|e| {
            warn!(day = request.day, error = %e, "LlmContentGenerator::generate: completion failed");
            classify_llm_error(&e)
        })?;

        let text = response.content.unwrap_or_default();
        if text.trim().is_empty() {
            warn!(day = request.day, stop_reason = ?response.stop_reason, "LlmContentGenerator::generate: empty response");
            return Err(GenerationError::malformed("The model returned an empty response"));
        }

        let sessions = parse_sessions(&text)?;
        info!(
            day = request.day,
            sessions = sessions.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Generated study module"
        );
        Ok(sessions)
    }
}

/// Stands in when no LLM client could be built; every call reports why
///
/// Lets the plan be browsed without an API key.
pub struct UnavailableGenerator {
    reason: String,
}

impl UnavailableGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Session>, GenerationError> {
        debug!(day = request.day, "UnavailableGenerator::generate: called");
        Err(GenerationError::setup(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::curriculum::resolve;
    use crate::generation::GenerationErrorKind;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, Role};

    const MODULE: &str = r#"{"sessions": [
        {"title": "One", "type": "Theory", "content": "a"},
        {"title": "Two", "type": "Theory", "content": "b"},
        {"title": "Three", "type": "Application", "content": "c"},
        {"title": "Four", "type": "Application", "content": "d"}
    ]}"#;

    fn generator(client: Arc<MockLlmClient>) -> LlmContentGenerator {
        LlmContentGenerator::new(client, PromptLoader::embedded_only())
    }

    #[tokio::test]
    async fn test_generate_single_call() {
        let client = Arc::new(MockLlmClient::with_text(MODULE));
        let generator = generator(client.clone()).with_max_tokens(1000);
        let request = GenerationRequest::for_slot(&resolve(5));

        let sessions = generator.generate(&request).await.unwrap();
        assert_eq!(sessions.len(), 4);
        assert_eq!(client.call_count(), 1);

        let sent = &client.requests()[0];
        assert!(sent.json_output);
        assert_eq!(sent.max_tokens, 1000);
        assert_eq!(sent.messages.len(), 1);
        assert_eq!(sent.messages[0].role, Role::User);
        assert!(sent.messages[0].content.contains(&request.topic));
        assert!(sent.messages[0].content.contains("Day 5"));
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let client = Arc::new(MockLlmClient::new(vec![
            Err(LlmError::Timeout(Duration::from_secs(120))),
            Ok(CompletionResponse::text(MODULE)),
        ]));
        let generator = generator(client.clone());

        let err = generator
            .generate(&GenerationRequest::for_slot(&resolve(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::NetworkFailure);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_is_malformed() {
        let client = Arc::new(MockLlmClient::with_text("  "));
        let err = generator(client)
            .generate(&GenerationRequest::for_slot(&resolve(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let client = Arc::new(MockLlmClient::with_text("Here is your module!"));
        let err = generator(client)
            .generate(&GenerationRequest::for_slot(&resolve(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_unavailable_generator_reports_reason() {
        let generator = UnavailableGenerator::new("API key not found");
        let err = generator
            .generate(&GenerationRequest::for_slot(&resolve(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Setup);
        assert_eq!(err.message, "API key not found");
    }

    #[test]
    fn test_classify_llm_error() {
        let cases = [
            (LlmError::Timeout(Duration::from_secs(1)), GenerationErrorKind::NetworkFailure),
            (
                LlmError::RateLimited {
                    retry_after: Duration::from_secs(60),
                },
                GenerationErrorKind::RemoteServiceError,
            ),
            (
                LlmError::ApiError {
                    status: 503,
                    message: "unavailable".to_string(),
                },
                GenerationErrorKind::RemoteServiceError,
            ),
            (
                LlmError::InvalidResponse("no candidates".to_string()),
                GenerationErrorKind::MalformedResponse,
            ),
        ];
        for (err, kind) in cases {
            let mapped = classify_llm_error(&err);
            assert_eq!(mapped.kind, kind);
            assert_eq!(mapped.message, err.to_string());
        }
    }
}
