use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{expand_tilde, ArcanaConfig};
use crate::corpus;
use crate::embedding;
use crate::index::{loader, QdrantStore};

/// Embed the corpus and bulk-load it into the configured collection.
pub async fn run(config: &ArcanaConfig, corpus_path: Option<&str>) -> Result<()> {
    let path: PathBuf = corpus_path
        .map(expand_tilde)
        .unwrap_or_else(|| config.resolved_corpus_path());
    let records = corpus::load_corpus(&path)?;

    let provider = embedding::create_provider(&config.embedding)?;
    let dimension = provider.dimension().await?;
    let collection = config.collection_name();
    println!(
        "Loading {} records into {:?} ({} dims, provider {})",
        records.len(),
        collection,
        dimension,
        config.embedding.provider
    );

    let store = QdrantStore::new(&config.qdrant_url());
    loader::ensure_collection(&store, &collection, dimension).await?;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:40.cyan/blue} {pos}/{len} embedded ({eta})")
            .expect("valid template")
            .progress_chars("##-"),
    );
    let embeddings = loader::embed_corpus(provider.as_ref(), &records, |done| {
        pb.inc(done as u64);
    })
    .await?;
    pb.finish_and_clear();

    loader::upsert_all(&store, &collection, &records, &embeddings, dimension).await?;
    loader::verify_count(&store, &collection, records.len() as u64).await?;

    println!("Load complete: {} points in {:?}", records.len(), collection);
    Ok(())
}
