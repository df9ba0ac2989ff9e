//! Text-to-vector embedding adapters.
//!
//! Provides the [`EmbeddingProvider`] trait and one adapter per backing
//! service: a local Ollama server ([`ollama::OllamaProvider`]) and the
//! OpenAI API ([`openai::OpenAiProvider`]). The provider is selected once
//! at startup via [`create_provider`] — there is no runtime fallback from
//! one backend to another, since their vector dimensions differ.

pub mod ollama;
pub mod openai;

use async_trait::async_trait;

use crate::config::EmbeddingConfig;
use crate::error::{ArcanaError, Result};

/// Text embedded once to discover a provider's vector dimension when the
/// service does not advertise it statically.
pub(crate) const DIMENSION_PROBE: &str = "test";

/// Trait for embedding text into fixed-length vectors.
///
/// The batch contract is order-preserving and all-or-nothing: N input texts
/// yield exactly N vectors in the same order, and any per-text failure fails
/// the whole call. Retry policy belongs to the caller.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            ArcanaError::Embedding("provider returned no vector for input".into())
        })
    }

    /// Embed a batch of texts, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The fixed vector length this provider produces. Determined by
    /// embedding [`DIMENSION_PROBE`] once and cached for the adapter's
    /// lifetime.
    async fn dimension(&self) -> Result<usize>;

    /// The configured model identifier.
    fn model(&self) -> &str;
}

/// Create an embedding provider from config.
///
/// Fails fast on an unknown provider name or a missing OpenAI API key —
/// misconfiguration is a startup error, never a silent substitution.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            &config.ollama_base_url,
            &config.model,
        ))),
        "openai" => {
            if config.openai_api_key.is_empty() {
                return Err(ArcanaError::InvalidArgument(
                    "OPENAI_API_KEY is not set and the openai provider is configured".into(),
                ));
            }
            Ok(Box::new(openai::OpenAiProvider::new(
                &config.openai_base_url,
                &config.model,
                &config.openai_api_key,
            )))
        }
        other => Err(ArcanaError::InvalidArgument(format!(
            "unknown embedding provider: {other}. Supported: ollama, openai"
        ))),
    }
}

/// Map a reqwest transport failure to the provider-unreachable condition.
pub(crate) fn unavailable(context: &str, err: reqwest::Error) -> ArcanaError {
    ArcanaError::ProviderUnavailable(format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_rejected() {
        let config = EmbeddingConfig {
            provider: "llamacpp".into(),
            ..EmbeddingConfig::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(ArcanaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn openai_without_key_is_rejected() {
        let config = EmbeddingConfig {
            provider: "openai".into(),
            openai_api_key: String::new(),
            ..EmbeddingConfig::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(ArcanaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn ollama_provider_is_default_selectable() {
        let config = EmbeddingConfig::default();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model(), "nomic-embed-text");
    }
}
