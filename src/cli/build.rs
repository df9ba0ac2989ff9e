use std::path::PathBuf;

use anyhow::Result;

use crate::config::{expand_tilde, ArcanaConfig};
use crate::corpus;

/// Build and validate the corpus file from raw card facts.
pub fn run(config: &ArcanaConfig, seed: bool, raw: Option<&str>, out: Option<&str>) -> Result<()> {
    let raw_path: PathBuf = raw
        .map(expand_tilde)
        .unwrap_or_else(|| config.resolved_raw_path());
    let out_path: PathBuf = out
        .map(expand_tilde)
        .unwrap_or_else(|| config.resolved_corpus_path());

    let facts = if seed {
        let facts = corpus::seed_facts();
        corpus::save_facts(&raw_path, &facts)?;
        println!("Seeded {} placeholder facts at {}", facts.len(), raw_path.display());
        facts
    } else {
        corpus::load_facts(&raw_path)?
    };

    let records = corpus::build_corpus(&facts)?;
    corpus::save_corpus(&out_path, &records)?;

    println!(
        "Corpus built: {} records ({} cards × 2 orientations) at {}",
        records.len(),
        records.len() / 2,
        out_path.display()
    );
    Ok(())
}
