//! Corpus builder: raw card facts → validated, canonically ordered records.
//!
//! Expansion, sorting, ID assignment, and validation are pure functions of
//! the input — building twice from the same facts yields byte-identical
//! output. The builder never touches the network and never emits a partial
//! corpus: any integrity violation aborts with [`ArcanaError::Validation`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::corpus::deck::{self, Arcana, Orientation, DECK_RECORD_COUNT};
use crate::error::{ArcanaError, Result};

/// Raw semantic content for one named card, as fetched.
///
/// Field names match the raw data file (`tarot_raw.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFact {
    #[serde(rename = "name_en")]
    pub name: String,
    pub upright: String,
    pub reversed: String,
    #[serde(default)]
    pub source: String,
}

/// One orientation-specific, retrieval-ready record.
///
/// Serialized with exactly the fields stored in the corpus file and in each
/// Qdrant point payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Dense index in canonical deck order, unique across the corpus.
    pub id: u64,
    pub name: String,
    pub arcana: Arcana,
    pub orientation: Orientation,
    pub meaning: String,
    pub source: String,
}

impl CardRecord {
    /// The text embedded for this record: `"{name} ({orientation}): {meaning}"`.
    pub fn embedding_text(&self) -> String {
        format!("{} ({}): {}", self.name, self.orientation, self.meaning)
    }
}

/// Build the full corpus: expand each fact into upright + reversed records,
/// sort canonically, assign dense IDs, then validate the result.
pub fn build_corpus(facts: &[CardFact]) -> Result<Vec<CardRecord>> {
    let mut records = Vec::with_capacity(facts.len() * 2);
    for fact in facts {
        let arcana = deck::classify(&fact.name).ok_or_else(|| {
            ArcanaError::Validation(format!(
                "unknown card name: {:?} (not a Major Arcana name or \"Rank of Suit\")",
                fact.name
            ))
        })?;
        for orientation in [Orientation::Upright, Orientation::Reversed] {
            let meaning = match orientation {
                Orientation::Upright => fact.upright.clone(),
                Orientation::Reversed => fact.reversed.clone(),
            };
            records.push(CardRecord {
                id: 0, // assigned after sort
                name: fact.name.clone(),
                arcana,
                orientation,
                meaning,
                source: fact.source.clone(),
            });
        }
    }

    records.sort_by_key(sort_key);
    for (i, record) in records.iter_mut().enumerate() {
        record.id = i as u64;
    }

    validate(&records)?;
    Ok(records)
}

/// Canonical sort key: Major first (fixed sequence), then Minor by suit and
/// rank, upright before reversed within each card.
fn sort_key(record: &CardRecord) -> (u8, usize, usize, u8) {
    let orient = match record.orientation {
        Orientation::Upright => 0,
        Orientation::Reversed => 1,
    };
    match record.arcana {
        Arcana::Major => {
            // classify() already proved membership during expansion
            let index = deck::major_index(&record.name).unwrap_or(usize::MAX);
            (0, index, 0, orient)
        }
        Arcana::Minor => {
            let (suit, rank) =
                deck::minor_indices(&record.name).unwrap_or((usize::MAX, usize::MAX));
            (1, suit, rank, orient)
        }
    }
}

/// Integrity checks over a finished corpus. Also applied when reading the
/// corpus file back: exact count, contiguous unique IDs, unique
/// (name, orientation) pairs, no empty required fields.
pub fn validate(records: &[CardRecord]) -> Result<()> {
    if records.len() != DECK_RECORD_COUNT {
        return Err(ArcanaError::Validation(format!(
            "expected {DECK_RECORD_COUNT} records (78 upright + 78 reversed), got {}",
            records.len()
        )));
    }

    let mut seen_ids = HashSet::new();
    let mut seen_pairs = HashSet::new();
    for (i, record) in records.iter().enumerate() {
        if record.id != i as u64 {
            return Err(ArcanaError::Validation(format!(
                "non-contiguous id at position {i}: {}",
                record.id
            )));
        }
        if !seen_ids.insert(record.id) {
            return Err(ArcanaError::Validation(format!(
                "duplicate id: {}",
                record.id
            )));
        }
        if !seen_pairs.insert((record.name.clone(), record.orientation)) {
            return Err(ArcanaError::Validation(format!(
                "duplicate card: {} ({})",
                record.name, record.orientation
            )));
        }
        if record.name.is_empty() || record.meaning.is_empty() {
            return Err(ArcanaError::Validation(format!(
                "empty required field on record id {}",
                record.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::seed_facts;

    #[test]
    fn full_deck_builds_156_dense_records() {
        let records = build_corpus(&seed_facts()).unwrap();
        assert_eq!(records.len(), 156);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.id, i as u64);
        }
        // Canonical head and tail of the ordering.
        assert_eq!(records[0].name, "The Fool");
        assert_eq!(records[0].orientation, Orientation::Upright);
        assert_eq!(records[1].name, "The Fool");
        assert_eq!(records[1].orientation, Orientation::Reversed);
        assert_eq!(records[43].name, "The World");
        assert_eq!(records[44].name, "Ace of Wands");
        assert_eq!(records[155].name, "King of Pentacles");
        assert_eq!(records[155].orientation, Orientation::Reversed);
    }

    #[test]
    fn build_is_deterministic() {
        let facts = seed_facts();
        let a = serde_json::to_vec(&build_corpus(&facts).unwrap()).unwrap();
        let b = serde_json::to_vec(&build_corpus(&facts).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn build_is_input_order_insensitive() {
        let facts = seed_facts();
        let mut shuffled = facts.clone();
        shuffled.reverse();
        assert_eq!(
            build_corpus(&facts).unwrap(),
            build_corpus(&shuffled).unwrap()
        );
    }

    #[test]
    fn unknown_major_name_is_rejected() {
        let mut facts = seed_facts();
        facts[0].name = "The Trickster".into();
        let err = build_corpus(&facts).unwrap_err();
        assert!(matches!(err, ArcanaError::Validation(_)), "got {err}");
    }

    #[test]
    fn missing_card_fails_count_check() {
        let mut facts = seed_facts();
        facts.pop();
        let err = build_corpus(&facts).unwrap_err();
        assert!(matches!(err, ArcanaError::Validation(_)));
    }

    #[test]
    fn duplicate_card_is_rejected() {
        let mut facts = seed_facts();
        let dup = facts[5].clone();
        facts[6] = dup;
        let err = build_corpus(&facts).unwrap_err();
        assert!(matches!(err, ArcanaError::Validation(_)));
    }

    #[test]
    fn empty_meaning_is_rejected() {
        let mut facts = seed_facts();
        facts[10].upright = String::new();
        let err = build_corpus(&facts).unwrap_err();
        assert!(matches!(err, ArcanaError::Validation(_)));
    }

    #[test]
    fn embedding_text_format() {
        let record = CardRecord {
            id: 26,
            name: "Death".into(),
            arcana: Arcana::Major,
            orientation: Orientation::Upright,
            meaning: "endings, change, transformation".into(),
            source: String::new(),
        };
        assert_eq!(
            record.embedding_text(),
            "Death (upright): endings, change, transformation"
        );
    }
}
