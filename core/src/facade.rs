//! Content Service Facade
//!
//! The single boundary to the generative model: four opaque operations, one
//! per content type. Each builds a prompt, issues one batch request against
//! the [`LlmBackend`], and parses the structured answer. Everything above
//! this module works with typed results and never sees raw model text.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::animal::{AnimalRecord, DualLangContent, VideoPrompts};
use crate::backend::{LlmBackend, LlmRequest};
use crate::prompts;

/// Errors from facade operations.
///
/// Every variant renders as a human-readable message suitable for display
/// near the triggering control.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// The backend request itself failed (network, HTTP error, timeout).
    #[error("model backend error: {0}")]
    Backend(#[from] anyhow::Error),
    /// The model returned nothing usable.
    #[error("the model returned an empty response")]
    EmptyResponse,
    /// The model answered, but not in the requested JSON shape.
    #[error("the model returned malformed JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// The Content Service Facade.
///
/// Stateless apart from its backend handle; safe to share across spawned
/// request tasks.
pub struct ContentFacade<B> {
    backend: Arc<B>,
    model: String,
    temperature: f32,
}

impl<B: LlmBackend> ContentFacade<B> {
    /// Create a facade over the given backend.
    pub fn new(backend: Arc<B>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            backend,
            model: model.into(),
            temperature,
        }
    }

    /// Issue one completion and return the fence-stripped text.
    async fn complete(&self, prompt: String) -> Result<String, FacadeError> {
        let request = LlmRequest::new(prompt, &self.model)
            .with_temperature(self.temperature)
            .with_system(prompts::STRUCTURED_OUTPUT_SYSTEM);

        let response = self.backend.send(&request).await?;
        let text = prompts::strip_code_fence(&response.content).to_string();
        if text.is_empty() {
            return Err(FacadeError::EmptyResponse);
        }
        Ok(text)
    }

    /// Issue one completion and parse the answer as JSON.
    async fn complete_json<T: DeserializeOwned>(&self, prompt: String) -> Result<T, FacadeError> {
        let text = self.complete(prompt).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Generate a new fictional animal.
    ///
    /// `excluded` is the list of names already in the session history. The
    /// model is asked to avoid them but may not comply; the caller owns the
    /// uniqueness check.
    pub async fn generate_animal(
        &self,
        excluded: &[String],
    ) -> Result<AnimalRecord, FacadeError> {
        self.complete_json(prompts::animal_prompt(excluded)).await
    }

    /// Generate YouTube title and description in both languages.
    pub async fn youtube_content(
        &self,
        animal: &AnimalRecord,
    ) -> Result<DualLangContent, FacadeError> {
        self.complete_json(prompts::youtube_content_prompt(animal))
            .await
    }

    /// Generate a comma-separated YouTube tag string (English).
    pub async fn youtube_tags(&self, animal: &AnimalRecord) -> Result<String, FacadeError> {
        let text = self.complete(prompts::youtube_tags_prompt(animal)).await?;
        Ok(text.trim().to_string())
    }

    /// Generate text-to-video prompts in both languages.
    pub async fn video_prompts(
        &self,
        animal: &AnimalRecord,
    ) -> Result<VideoPrompts, FacadeError> {
        self.complete_json(prompts::video_prompts_prompt(animal))
            .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::backend::{LlmResponse, ModelInfo};

    /// Backend that always answers with one fixed string.
    struct FixedBackend {
        content: String,
    }

    impl FixedBackend {
        fn new(content: &str) -> Self {
            Self {
                content: content.to_string(),
            }
        }

        fn facade(self) -> ContentFacade<Self> {
            ContentFacade::new(Arc::new(self), "test-model", 0.9)
        }
    }

    #[async_trait]
    impl LlmBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn health_check(&self) -> bool {
            true
        }

        async fn send(&self, request: &LlmRequest) -> anyhow::Result<LlmResponse> {
            Ok(LlmResponse {
                content: self.content.clone(),
                model: request.model.clone(),
                tokens_used: None,
                duration_ms: None,
            })
        }

        async fn list_models(&self) -> anyhow::Result<Vec<ModelInfo>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_generate_animal_parses_fenced_json() {
        let facade = FixedBackend::new(
            "```json\n{\"animalName\": \"Fox\", \"russianArticle\": \"Ру\", \
             \"englishArticle\": \"En\"}\n```",
        )
        .facade();

        let animal = facade.generate_animal(&[]).await.unwrap();
        assert_eq!(animal.name, "Fox");
        assert_eq!(animal.article_en, "En");
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let facade = FixedBackend::new("definitely not json").facade();
        let err = facade.generate_animal(&[]).await.unwrap_err();
        assert!(matches!(err, FacadeError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let facade = FixedBackend::new("   \n").facade();
        let err = facade.generate_animal(&[]).await.unwrap_err();
        assert!(matches!(err, FacadeError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_tags_are_returned_as_plain_text() {
        let facade = FixedBackend::new("fox, fictional animal, wildlife\n").facade();
        let animal = AnimalRecord {
            name: "Fox".to_string(),
            article_ru: "Ру".to_string(),
            article_en: "En".to_string(),
        };

        let tags = facade.youtube_tags(&animal).await.unwrap();
        assert_eq!(tags, "fox, fictional animal, wildlife");
    }

    #[tokio::test]
    async fn test_youtube_content_parses_both_languages() {
        let facade = FixedBackend::new(
            "{\"ru\": {\"title\": \"Заголовок\", \"description\": \"Описание\"}, \
             \"en\": {\"title\": \"Title\", \"description\": \"Description\"}}",
        )
        .facade();
        let animal = AnimalRecord {
            name: "Fox".to_string(),
            article_ru: "Ру".to_string(),
            article_en: "En".to_string(),
        };

        let content = facade.youtube_content(&animal).await.unwrap();
        assert_eq!(content.ru.title, "Заголовок");
        assert_eq!(content.en.description, "Description");
    }
}
