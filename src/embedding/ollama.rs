//! Ollama embedding adapter.
//!
//! Talks to a local Ollama server over its REST API. Ollama embeds one
//! prompt per request, so a batch is a sequence of calls — still
//! all-or-nothing: the first failure aborts the batch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use super::{unavailable, EmbeddingProvider, DIMENSION_PROBE};
use crate::error::{ArcanaError, Result};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: OnceCell<usize>,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dimension: OnceCell::new(),
        }
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| unavailable("ollama request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArcanaError::Embedding(format!(
                "ollama returned {status} for model {:?}: {body}",
                self.model
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ArcanaError::Embedding(format!("malformed ollama response: {e}")))?;
        if parsed.embedding.is_empty() {
            return Err(ArcanaError::Embedding("ollama returned an empty vector".into()));
        }
        Ok(parsed.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_one(text).await?);
        }
        Ok(vectors)
    }

    async fn dimension(&self) -> Result<usize> {
        self.dimension
            .get_or_try_init(|| async {
                let probe = self.embed_one(DIMENSION_PROBE).await?;
                debug!(model = %self.model, dimension = probe.len(), "probed ollama dimension");
                Ok(probe.len())
            })
            .await
            .copied()
    }

    fn model(&self) -> &str {
        &self.model
    }
}
