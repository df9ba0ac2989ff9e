#![allow(dead_code)]

use arcana::corpus::{build_corpus, seed_facts, CardRecord};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Vector length used by the mocked embedding service.
pub const TEST_DIM: usize = 8;

/// Deterministic embedding with a spike at position `seed`.
pub fn test_vector(seed: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; TEST_DIM];
    v[seed % TEST_DIM] = 1.0;
    v
}

/// The full validated 156-record corpus built from placeholder facts.
pub fn test_corpus() -> Vec<CardRecord> {
    build_corpus(&seed_facts()).unwrap()
}

/// Mount an Ollama embeddings mock answering `prompt` with `vector`.
pub async fn mount_ollama_prompt(server: &MockServer, prompt: &str, vector: Vec<f32>) {
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .and(body_partial_json(json!({ "prompt": prompt })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "embedding": vector })))
        .mount(server)
        .await;
}

/// Mount a catch-all Ollama embeddings mock answering every prompt with
/// `vector`. Mount after any prompt-specific mocks.
pub async fn mount_ollama_any(server: &MockServer, vector: Vec<f32>) {
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "embedding": vector })))
        .mount(server)
        .await;
}

/// Build a Qdrant search response body from `(record, score)` pairs.
pub fn search_response(hits: &[(&CardRecord, f32)]) -> serde_json::Value {
    let result: Vec<_> = hits
        .iter()
        .map(|(record, score)| {
            json!({
                "id": record.id,
                "version": 0,
                "score": score,
                "payload": serde_json::to_value(record).unwrap(),
            })
        })
        .collect();
    json!({ "result": result, "status": "ok", "time": 0.001 })
}

/// Envelope a Qdrant result value.
pub fn qdrant_ok(result: serde_json::Value) -> serde_json::Value {
    json!({ "result": result, "status": "ok", "time": 0.001 })
}
