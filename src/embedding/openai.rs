//! OpenAI embedding adapter.
//!
//! One request per batch: the API accepts a list of inputs and returns one
//! vector per input, tagged with its index. Results are re-ordered by that
//! index so the output order always matches the input order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use super::{unavailable, EmbeddingProvider, DIMENSION_PROBE};
use crate::error::{ArcanaError, Result};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    dimension: OnceCell<usize>,
}

impl OpenAiProvider {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            dimension: OnceCell::new(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let url = format!("{}/v1/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await
            .map_err(|e| unavailable("openai request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArcanaError::Embedding(format!(
                "openai returned {status} for model {:?}: {body}",
                self.model
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ArcanaError::Embedding(format!("malformed openai response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(ArcanaError::Embedding(format!(
                "openai returned {} vectors for {} inputs",
                parsed.data.len(),
                texts.len()
            )));
        }

        let mut data = parsed.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    async fn dimension(&self) -> Result<usize> {
        self.dimension
            .get_or_try_init(|| async {
                let probe = self.embed(DIMENSION_PROBE).await?;
                debug!(model = %self.model, dimension = probe.len(), "probed openai dimension");
                Ok(probe.len())
            })
            .await
            .copied()
    }

    fn model(&self) -> &str {
        &self.model
    }
}
