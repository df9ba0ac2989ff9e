use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::config::ArcanaConfig;
use crate::corpus::{Arcana, Orientation};
use crate::embedding;
use crate::index::QdrantStore;
use crate::query::{RetrievalService, SearchFilters};

/// Run an interactive retrieval query from the terminal.
pub async fn run(
    config: &ArcanaConfig,
    text: &str,
    limit: Option<usize>,
    arcana: Option<&str>,
    orientation: Option<&str>,
) -> Result<()> {
    let filters = SearchFilters {
        arcana: arcana.map(Arcana::from_str).transpose().map_err(|e| anyhow!(e))?,
        orientation: orientation
            .map(Orientation::from_str)
            .transpose()
            .map_err(|e| anyhow!(e))?,
    };
    let limit = limit.unwrap_or(config.retrieval.default_limit);

    let provider = embedding::create_provider(&config.embedding)?;
    let store = QdrantStore::new(&config.qdrant_url());
    let service = RetrievalService::new(provider, store, config.collection_name());

    let results = service.query(text, limit, &filters).await?;

    if results.is_empty() {
        println!("No cards matched the query.");
        return Ok(());
    }

    println!("Found {} matching card(s):\n", results.len());
    for (i, result) in results.iter().enumerate() {
        println!(
            "  {}. {} ({}) [{} Arcana] score {:.4}",
            i + 1,
            result.card.name,
            result.card.orientation,
            result.card.arcana,
            result.score,
        );
        println!("     {}", result.card.meaning);
        println!();
    }

    Ok(())
}
