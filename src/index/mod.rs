//! Vector store access.
//!
//! [`QdrantStore`] is a thin client over the Qdrant REST API consuming only
//! the operations this engine needs: list/create collection, upsert points,
//! similarity search, and point count. One configured store is constructed
//! at process start and passed to callers; there is no hidden global client.

pub mod loader;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ArcanaError, Result};

/// One point to upsert: id, vector, and the full record payload.
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: Value,
}

/// One search hit, ranked by cosine similarity.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    pub id: u64,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// Conjunction of exact-match conditions on payload fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Filter {
    pub must: Vec<Condition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Condition {
    pub key: String,
    #[serde(rename = "match")]
    pub match_value: MatchValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchValue {
    pub value: Value,
}

impl Filter {
    pub fn equals(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.must.push(Condition {
            key: key.to_string(),
            match_value: MatchValue {
                value: value.into(),
            },
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
    }
}

/// Collection health as reported by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    pub status: String,
    #[serde(default)]
    pub points_count: Option<u64>,
}

// Qdrant wraps every response in `{"result": ..., "status": "ok", "time": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct CollectionList {
    collections: Vec<CollectionName>,
}

#[derive(Deserialize)]
struct CollectionName {
    name: String,
}

#[derive(Deserialize)]
struct CountResult {
    count: u64,
}

#[derive(Serialize)]
struct CreateCollectionBody {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Serialize)]
struct UpsertBody<'a> {
    points: &'a [Point],
}

#[derive(Serialize)]
struct SearchBody<'a> {
    vector: &'a [f32],
    limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Filter>,
    with_payload: bool,
}

#[derive(Serialize)]
struct CountBody {
    exact: bool,
}

/// Qdrant REST client. Cheap to clone via the shared inner `reqwest` client.
#[derive(Debug, Clone)]
pub struct QdrantStore {
    client: reqwest::Client,
    base_url: String,
}

impl QdrantStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn connection_err(&self, context: &str, err: reqwest::Error) -> ArcanaError {
        ArcanaError::Connection(format!("{context} ({}): {err}", self.base_url))
    }

    /// Names of all collections present in the store.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let url = format!("{}/collections", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_err("list collections failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArcanaError::Connection(format!(
                "list collections returned {status}"
            )));
        }

        let parsed: Envelope<CollectionList> = response
            .json()
            .await
            .map_err(|e| self.connection_err("malformed collections response", e))?;
        Ok(parsed.result.collections.into_iter().map(|c| c.name).collect())
    }

    /// Create a collection with the given vector size and cosine distance.
    pub async fn create_collection(&self, name: &str, vector_size: usize) -> Result<()> {
        let url = format!("{}/collections/{name}", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(&CreateCollectionBody {
                vectors: VectorParams {
                    size: vector_size,
                    distance: "Cosine",
                },
            })
            .send()
            .await
            .map_err(|e| self.connection_err("create collection failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArcanaError::Connection(format!(
                "create collection {name:?} returned {status}: {body}"
            )));
        }
        Ok(())
    }

    /// Fetch status and point count for a collection.
    pub async fn collection_info(&self, name: &str) -> Result<CollectionInfo> {
        let url = format!("{}/collections/{name}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_err("collection info failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArcanaError::Connection(format!(
                "collection info for {name:?} returned {status}"
            )));
        }

        let parsed: Envelope<CollectionInfo> = response
            .json()
            .await
            .map_err(|e| self.connection_err("malformed collection info", e))?;
        Ok(parsed.result)
    }

    /// Upsert a batch of points, waiting for the write to be applied.
    /// Last write wins per id.
    pub async fn upsert_points(&self, collection: &str, points: &[Point]) -> Result<()> {
        let url = format!("{}/collections/{collection}/points?wait=true", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(&UpsertBody { points })
            .send()
            .await
            .map_err(|e| {
                ArcanaError::IndexWrite(format!("upsert to {collection:?} failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArcanaError::IndexWrite(format!(
                "upsert to {collection:?} returned {status}: {body}"
            )));
        }
        Ok(())
    }

    /// Similarity search, highest score first, payloads included.
    pub async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
        filter: Option<&Filter>,
    ) -> Result<Vec<ScoredPoint>> {
        let url = format!("{}/collections/{collection}/points/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SearchBody {
                vector,
                limit,
                filter,
                with_payload: true,
            })
            .send()
            .await
            .map_err(|e| self.connection_err("search failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArcanaError::Connection(format!(
                "search in {collection:?} returned {status}: {body}"
            )));
        }

        let parsed: Envelope<Vec<ScoredPoint>> = response
            .json()
            .await
            .map_err(|e| self.connection_err("malformed search response", e))?;
        Ok(parsed.result)
    }

    /// Exact number of points in a collection.
    pub async fn count_points(&self, collection: &str) -> Result<u64> {
        let url = format!("{}/collections/{collection}/points/count", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CountBody { exact: true })
            .send()
            .await
            .map_err(|e| self.connection_err("count failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArcanaError::Connection(format!(
                "count in {collection:?} returned {status}"
            )));
        }

        let parsed: Envelope<CountResult> = response
            .json()
            .await
            .map_err(|e| self.connection_err("malformed count response", e))?;
        Ok(parsed.result.count)
    }
}
