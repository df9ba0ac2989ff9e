//! Random draw over the corpus file — the non-RAG fallback path.

use rand::seq::SliceRandom;

use crate::corpus::builder::CardRecord;

/// Draw `n` distinct records at random. `n` is clamped to `[1, records.len()]`.
pub fn draw(records: &[CardRecord], n: usize) -> Vec<CardRecord> {
    let n = n.clamp(1, records.len());
    let mut rng = rand::thread_rng();
    records.choose_multiple(&mut rng, n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{build_corpus, seed_facts};

    #[test]
    fn draw_returns_distinct_cards() {
        let records = build_corpus(&seed_facts()).unwrap();
        let drawn = draw(&records, 3);
        assert_eq!(drawn.len(), 3);
        let ids: std::collections::HashSet<_> = drawn.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn draw_clamps_n() {
        let records = build_corpus(&seed_facts()).unwrap();
        assert_eq!(draw(&records, 0).len(), 1);
        assert_eq!(draw(&records, 1000).len(), records.len());
    }
}
