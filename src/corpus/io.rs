//! Corpus file I/O and raw-fact seeding.
//!
//! The corpus file is a flat, ordered JSON list of [`CardRecord`] objects —
//! readable both by the index loader (embed + upsert) and by the random-draw
//! fallback, which needs no vector search.

use std::path::Path;

use tracing::info;

use crate::corpus::builder::{validate, CardFact, CardRecord};
use crate::corpus::deck;
use crate::error::{ArcanaError, Result};

fn io_err(path: &Path, source: std::io::Error) -> ArcanaError {
    ArcanaError::CorpusIo {
        path: path.display().to_string(),
        source,
    }
}

/// Read raw card facts from a JSON file.
pub fn load_facts(path: &Path) -> Result<Vec<CardFact>> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write raw card facts as pretty-printed JSON.
pub fn save_facts(path: &Path, facts: &[CardFact]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
    }
    let json = serde_json::to_string_pretty(facts)?;
    std::fs::write(path, json).map_err(|e| io_err(path, e))?;
    info!(path = %path.display(), count = facts.len(), "raw facts written");
    Ok(())
}

/// Read a corpus file and re-run the integrity checks on its contents.
pub fn load_corpus(path: &Path) -> Result<Vec<CardRecord>> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let records: Vec<CardRecord> = serde_json::from_str(&contents)?;
    validate(&records)?;
    Ok(records)
}

/// Write a validated corpus as pretty-printed JSON.
pub fn save_corpus(path: &Path, records: &[CardRecord]) -> Result<()> {
    validate(records)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|e| io_err(path, e))?;
    info!(path = %path.display(), count = records.len(), "corpus written");
    Ok(())
}

/// Generate placeholder facts for the complete 78-card deck.
///
/// Stands in for the scraping step when no raw data file is available, so
/// the full pipeline can run offline end to end.
pub fn seed_facts() -> Vec<CardFact> {
    deck::all_card_names()
        .map(|name| CardFact {
            upright: format!("Upright meaning for {name}"),
            reversed: format!("Reversed meaning for {name}"),
            source: "https://www.tarot.com/tarot/decks/rider-waite/cards".into(),
            name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::builder::build_corpus;

    #[test]
    fn corpus_roundtrips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tarot_cards.json");
        let records = build_corpus(&seed_facts()).unwrap();

        save_corpus(&path, &records).unwrap();
        let loaded = load_corpus(&path).unwrap();
        assert_eq!(records, loaded);
    }

    #[test]
    fn corpus_json_uses_flat_field_names() {
        let records = build_corpus(&seed_facts()).unwrap();
        let value = serde_json::to_value(&records[0]).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["arcana", "id", "meaning", "name", "orientation", "source"]
        );
        assert_eq!(obj["arcana"], "Major");
        assert_eq!(obj["orientation"], "upright");
    }

    #[test]
    fn tampered_corpus_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tarot_cards.json");
        let mut records = build_corpus(&seed_facts()).unwrap();
        records.truncate(100);

        let json = serde_json::to_string_pretty(&records).unwrap();
        std::fs::write(&path, json).unwrap();
        assert!(matches!(
            load_corpus(&path),
            Err(ArcanaError::Validation(_))
        ));
    }

    #[test]
    fn facts_roundtrip_with_raw_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tarot_raw.json");
        let facts = seed_facts();

        save_facts(&path, &facts).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"name_en\""));
        let loaded = load_facts(&path).unwrap();
        assert_eq!(loaded.len(), 78);
        assert_eq!(loaded[0].name, "The Fool");
    }
}
