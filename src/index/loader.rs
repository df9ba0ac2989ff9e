//! Bulk loading of an embedded corpus into a collection.
//!
//! `ensure_collection` is idempotent; `upsert_all` writes in fixed-size
//! batches with last-write-wins semantics per id, so re-running the load
//! with the same corpus and embeddings leaves the collection unchanged.
//! A failed batch aborts the load but earlier batches stay committed —
//! `verify_count` is the post-hoc check for a complete load.

use tracing::info;

use crate::corpus::CardRecord;
use crate::embedding::EmbeddingProvider;
use crate::error::{ArcanaError, Result};
use crate::index::{Point, QdrantStore};

/// Points per upsert request. Bounds request size; not correctness-relevant.
pub const UPSERT_BATCH_SIZE: usize = 32;

/// Create the collection if it does not exist yet; no-op if it does.
///
/// An existing collection is trusted as-is — its configured dimension is
/// not re-checked against `dimension`.
pub async fn ensure_collection(
    store: &QdrantStore,
    name: &str,
    dimension: usize,
) -> Result<()> {
    let existing = store.list_collections().await?;
    if existing.iter().any(|c| c == name) {
        info!(collection = name, "collection already exists");
        return Ok(());
    }
    info!(collection = name, dimension, "creating collection");
    store.create_collection(name, dimension).await
}

/// Upsert every (id, vector, payload) triple, batched.
///
/// `records` and `embeddings` must be parallel sequences; every vector must
/// have the collection's dimensionality. Both are checked up front so a
/// mismatch is a fatal configuration error, not a partial load.
pub async fn upsert_all(
    store: &QdrantStore,
    collection: &str,
    records: &[CardRecord],
    embeddings: &[Vec<f32>],
    dimension: usize,
) -> Result<()> {
    if records.len() != embeddings.len() {
        return Err(ArcanaError::IndexWrite(format!(
            "{} records but {} embeddings",
            records.len(),
            embeddings.len()
        )));
    }
    if let Some(bad) = embeddings.iter().position(|v| v.len() != dimension) {
        return Err(ArcanaError::IndexWrite(format!(
            "embedding for record {bad} has length {}, collection expects {dimension}",
            embeddings[bad].len()
        )));
    }

    let points: Vec<Point> = records
        .iter()
        .zip(embeddings)
        .map(|(record, vector)| {
            Ok(Point {
                id: record.id,
                vector: vector.clone(),
                payload: serde_json::to_value(record)?,
            })
        })
        .collect::<Result<_>>()?;

    for batch in points.chunks(UPSERT_BATCH_SIZE) {
        store.upsert_points(collection, batch).await?;
    }
    info!(collection, count = points.len(), "upsert complete");
    Ok(())
}

/// Check that the collection holds exactly `expected` points.
pub async fn verify_count(store: &QdrantStore, collection: &str, expected: u64) -> Result<()> {
    let count = store.count_points(collection).await?;
    if count != expected {
        return Err(ArcanaError::IndexWrite(format!(
            "collection {collection:?} holds {count} points, expected {expected}"
        )));
    }
    Ok(())
}

/// Embed every record's retrieval text in batches and report progress.
///
/// Returns one vector per record, in record order. Any batch failure aborts
/// the whole embedding run.
pub async fn embed_corpus(
    provider: &dyn EmbeddingProvider,
    records: &[CardRecord],
    mut on_batch: impl FnMut(usize),
) -> Result<Vec<Vec<f32>>> {
    let texts: Vec<String> = records.iter().map(|r| r.embedding_text()).collect();
    let mut embeddings = Vec::with_capacity(texts.len());
    for batch in texts.chunks(UPSERT_BATCH_SIZE) {
        let vectors = provider.embed_batch(batch).await?;
        embeddings.extend(vectors);
        on_batch(batch.len());
    }
    Ok(embeddings)
}
