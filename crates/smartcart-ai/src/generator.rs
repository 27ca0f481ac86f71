//! The text-generation service the API layer calls into.

use crate::client::{CompletionBackend, CompletionRequest};
use crate::error::AiError;
use crate::prompt::{self, ChatMessage};
use std::sync::Arc;
use tracing::info;

/// Validated entry points over a completion backend.
pub struct TextGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl TextGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Generate product listing copy. The title is required.
    pub async fn describe_product(
        &self,
        title: &str,
        category: &str,
        features: &str,
    ) -> Result<String, AiError> {
        if title.trim().is_empty() {
            return Err(AiError::MissingField("Product title is required".to_string()));
        }
        let text = self
            .run(prompt::product_description(title.trim(), category, features))
            .await?;
        info!(title, "generated product description");
        Ok(text)
    }

    /// Answer a shopping-assistant message. The message is required.
    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, AiError> {
        if message.trim().is_empty() {
            return Err(AiError::MissingField("Message is required".to_string()));
        }
        self.run(prompt::shopping_chat(message.trim(), history)).await
    }

    /// Generate personalized recommendations. Both inputs are optional.
    pub async fn recommendations(
        &self,
        preferences: &str,
        purchase_history: &str,
    ) -> Result<String, AiError> {
        self.run(prompt::recommendations(preferences, purchase_history))
            .await
    }

    /// Generate SEO page content. The product name is required.
    pub async fn seo_content(
        &self,
        product_name: &str,
        category: &str,
        keywords: &str,
    ) -> Result<String, AiError> {
        if product_name.trim().is_empty() {
            return Err(AiError::MissingField("Product name is required".to_string()));
        }
        self.run(prompt::seo_content(product_name.trim(), category, keywords))
            .await
    }

    async fn run(&self, prompt: prompt::Prompt) -> Result<String, AiError> {
        let request = CompletionRequest::from_prompt(self.backend.model(), prompt);
        self.backend.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last request and answers with canned text.
    struct StubBackend {
        reply: String,
        last: Mutex<Option<CompletionRequest>>,
    }

    impl StubBackend {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                last: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
            *self.last.lock().unwrap() = Some(request);
            Ok(self.reply.clone())
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    #[tokio::test]
    async fn test_describe_requires_title() {
        let generator = TextGenerator::new(StubBackend::new("text"));
        let result = generator.describe_product("  ", "home", "").await;
        assert!(matches!(result, Err(AiError::MissingField(_))));
    }

    #[tokio::test]
    async fn test_describe_forwards_prompt() {
        let backend = StubBackend::new("A lovely lamp.");
        let generator = TextGenerator::new(backend.clone());

        let text = generator.describe_product("Lamp", "home", "warm light").await.unwrap();
        assert_eq!(text, "A lovely lamp.");

        let request = backend.last.lock().unwrap().take().unwrap();
        assert_eq!(request.model, "stub-model");
        assert_eq!(request.max_tokens, 200);
        assert!(request.messages[1].content.contains("Product: Lamp"));
    }

    #[tokio::test]
    async fn test_chat_requires_message() {
        let generator = TextGenerator::new(StubBackend::new("hi"));
        assert!(generator.chat("", &[]).await.is_err());
        assert!(generator.chat("hello", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_recommendations_accepts_empty_inputs() {
        let backend = StubBackend::new("[]");
        let generator = TextGenerator::new(backend.clone());
        generator.recommendations("", "").await.unwrap();

        let request = backend.last.lock().unwrap().take().unwrap();
        assert_eq!(request.max_tokens, 500);
        assert!(request.messages[1].content.contains("Not specified"));
    }
}
