use anyhow::Result;

use crate::config::ArcanaConfig;
use crate::corpus;

/// Draw random cards from the corpus file — no vector search involved.
pub fn run(config: &ArcanaConfig, count: usize) -> Result<()> {
    let records = corpus::load_corpus(&config.resolved_corpus_path())?;
    let drawn = corpus::draw::draw(&records, count);

    for result in &drawn {
        println!("{} ({})", result.name, result.orientation);
        println!("  {}", result.meaning);
        println!();
    }

    Ok(())
}
