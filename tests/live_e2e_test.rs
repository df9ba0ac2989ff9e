//! End-to-end tests against live services.
//!
//! Requires a local Ollama server with the `nomic-embed-text` model and a
//! local Qdrant instance — run with: cargo test -- --ignored

mod helpers;

use arcana::corpus::{build_corpus, seed_facts};
use arcana::embedding::{create_provider, EmbeddingProvider};
use arcana::index::loader::{ensure_collection, upsert_all, verify_count};
use arcana::index::QdrantStore;
use arcana::query::{RetrievalService, SearchFilters};
use helpers::test_corpus;

const QDRANT_URL: &str = "http://localhost:6333";
const COLLECTION: &str = "tarot_ollama_nomic-embed-text_test";

fn ollama_provider() -> Box<dyn EmbeddingProvider> {
    let config = arcana::config::EmbeddingConfig::default();
    create_provider(&config).unwrap()
}

async fn seed_collection() -> QdrantStore {
    let records = test_corpus();
    let provider = ollama_provider();
    let dimension = provider.dimension().await.unwrap();

    let store = QdrantStore::new(QDRANT_URL);
    ensure_collection(&store, COLLECTION, dimension).await.unwrap();

    let texts: Vec<String> = records.iter().map(|r| r.embedding_text()).collect();
    let embeddings = provider.embed_batch(&texts).await.unwrap();
    upsert_all(&store, COLLECTION, &records, &embeddings, dimension)
        .await
        .unwrap();
    verify_count(&store, COLLECTION, 156).await.unwrap();
    store
}

#[tokio::test]
#[ignore]
async fn seeded_collection_answers_chinese_query() {
    let store = seed_collection().await;
    let service = RetrievalService::new(ollama_provider(), store, COLLECTION.to_string());

    // "death and endings"
    let results = service
        .query("死亡與結束", 3, &SearchFilters::default())
        .await
        .unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 3);
    let top = &results[0];
    let known_names: Vec<String> = arcana::corpus::deck::all_card_names().collect();
    assert!(known_names.contains(&top.card.name), "unknown card {:?}", top.card.name);
    assert!(top.score >= 0.5);
}

#[tokio::test]
#[ignore]
async fn reloading_leaves_point_count_unchanged() {
    let store = seed_collection().await;

    let records = build_corpus(&seed_facts()).unwrap();
    let provider = ollama_provider();
    let dimension = provider.dimension().await.unwrap();
    let texts: Vec<String> = records.iter().map(|r| r.embedding_text()).collect();
    let embeddings = provider.embed_batch(&texts).await.unwrap();

    upsert_all(&store, COLLECTION, &records, &embeddings, dimension)
        .await
        .unwrap();
    verify_count(&store, COLLECTION, 156).await.unwrap();
}
