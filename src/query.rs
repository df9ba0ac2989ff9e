//! Retrieval query service: free text in, ranked card payloads out.
//!
//! Each query embeds the text exactly once, searches the collection, drops
//! hits below the similarity threshold, and returns the survivors in
//! descending score order. An empty result is a legitimate outcome — the
//! caller maps it to a "no match" message, not a failure.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::{Arcana, CardRecord, Orientation};
use crate::embedding::EmbeddingProvider;
use crate::error::{ArcanaError, Result};
use crate::index::{Filter, QdrantStore};

/// Minimum cosine similarity for a hit to be surfaced.
pub const SIMILARITY_THRESHOLD: f32 = 0.5;

/// One surfaced hit: the stored card payload plus its rounded score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    #[serde(flatten)]
    pub card: CardRecord,
    pub score: f32,
}

/// Optional conjunctive equality filters on payload fields.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub arcana: Option<Arcana>,
    pub orientation: Option<Orientation>,
}

impl SearchFilters {
    /// Build filters from a loose key-value map, as handed over by the tool
    /// layer. Unsupported keys are silently ignored; a malformed value for
    /// a supported key is an [`ArcanaError::InvalidArgument`].
    pub fn from_map(params: &HashMap<String, String>) -> Result<Self> {
        let mut filters = Self::default();
        if let Some(value) = params.get("arcana") {
            filters.arcana = Some(Arcana::from_str(value).map_err(ArcanaError::InvalidArgument)?);
        }
        if let Some(value) = params.get("orientation") {
            filters.orientation =
                Some(Orientation::from_str(value).map_err(ArcanaError::InvalidArgument)?);
        }
        Ok(filters)
    }

    fn to_filter(&self) -> Option<Filter> {
        let mut filter = Filter::default();
        if let Some(arcana) = self.arcana {
            filter = filter.equals("arcana", arcana.as_str());
        }
        if let Some(orientation) = self.orientation {
            filter = filter.equals("orientation", orientation.as_str());
        }
        if filter.is_empty() {
            None
        } else {
            Some(filter)
        }
    }
}

/// The online retrieval path. Constructed once at startup with its provider
/// and store injected; shared read-only across callers.
pub struct RetrievalService {
    provider: Box<dyn EmbeddingProvider>,
    store: QdrantStore,
    collection: String,
}

impl RetrievalService {
    pub fn new(provider: Box<dyn EmbeddingProvider>, store: QdrantStore, collection: String) -> Self {
        Self {
            provider,
            store,
            collection,
        }
    }

    /// Embed `text`, search the collection, and return at most `limit` hits
    /// with score ≥ [`SIMILARITY_THRESHOLD`], descending.
    ///
    /// `limit` must be positive; zero is rejected rather than defaulted so
    /// caller contracts stay explicit.
    pub async fn query(
        &self,
        text: &str,
        limit: usize,
        filters: &SearchFilters,
    ) -> Result<Vec<RetrievalResult>> {
        if limit == 0 {
            return Err(ArcanaError::InvalidArgument(
                "limit must be a positive integer".into(),
            ));
        }

        let embedding = self.provider.embed(text).await?;
        let filter = filters.to_filter();
        let hits = self
            .store
            .search(&self.collection, &embedding, limit, filter.as_ref())
            .await?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            if hit.score < SIMILARITY_THRESHOLD {
                continue;
            }
            let payload = hit.payload.ok_or_else(|| {
                ArcanaError::Connection(format!(
                    "search hit {} in {:?} carried no payload",
                    hit.id, self.collection
                ))
            })?;
            let card: CardRecord = serde_json::from_value(payload)?;
            results.push(RetrievalResult {
                card,
                score: round_score(hit.score),
            });
        }

        debug!(
            collection = %self.collection,
            query = text,
            returned = results.len(),
            "query complete"
        );
        Ok(results)
    }
}

/// Round a similarity score to 4 decimal places for presentation.
fn round_score(score: f32) -> f32 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn filters_ignore_unsupported_keys() {
        let filters = SearchFilters::from_map(&map(&[
            ("arcana", "Major"),
            ("suit", "Wands"),
            ("mood", "anxious"),
        ]))
        .unwrap();
        assert_eq!(filters.arcana, Some(Arcana::Major));
        assert_eq!(filters.orientation, None);
    }

    #[test]
    fn malformed_filter_value_is_invalid_argument() {
        let err = SearchFilters::from_map(&map(&[("orientation", "sideways")])).unwrap_err();
        assert!(matches!(err, ArcanaError::InvalidArgument(_)));
    }

    #[test]
    fn empty_filters_produce_no_qdrant_filter() {
        assert!(SearchFilters::default().to_filter().is_none());
        let filters = SearchFilters {
            arcana: None,
            orientation: Some(Orientation::Reversed),
        };
        let filter = filters.to_filter().unwrap();
        assert_eq!(filter.must.len(), 1);
    }

    #[test]
    fn scores_round_to_four_decimals() {
        assert_eq!(round_score(0.123_456), 0.1235);
        assert_eq!(round_score(0.5), 0.5);
    }
}
