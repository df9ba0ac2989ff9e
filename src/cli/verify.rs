use anyhow::Result;

use crate::config::ArcanaConfig;
use crate::corpus::DECK_RECORD_COUNT;
use crate::embedding;
use crate::index::QdrantStore;
use crate::query::{RetrievalService, SearchFilters};

/// Sample query used to confirm the collection answers retrievals.
const SAMPLE_QUERY: &str = "new beginnings and fresh starts";

/// Report collection health, point count, and a sample retrieval.
pub async fn run(config: &ArcanaConfig) -> Result<()> {
    let collection = config.collection_name();
    let store = QdrantStore::new(&config.qdrant_url());

    let info = store.collection_info(&collection).await?;
    println!("Collection {:?}: status {}", collection, info.status);

    let count = store.count_points(&collection).await?;
    let marker = if count == DECK_RECORD_COUNT as u64 {
        "ok"
    } else {
        "MISMATCH"
    };
    println!("Points: {count} (expected {DECK_RECORD_COUNT}) — {marker}");

    let provider = embedding::create_provider(&config.embedding)?;
    let service = RetrievalService::new(provider, store, collection);
    let results = service
        .query(SAMPLE_QUERY, 3, &SearchFilters::default())
        .await?;

    if results.is_empty() {
        println!("Sample query {SAMPLE_QUERY:?} returned no hits above threshold.");
    } else {
        println!("Sample query {SAMPLE_QUERY:?}:");
        for result in &results {
            println!(
                "  {} ({}) score {:.4}",
                result.card.name, result.card.orientation, result.score
            );
        }
    }

    Ok(())
}
