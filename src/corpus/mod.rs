//! Card corpus: canonical deck data, the offline builder, file I/O, and the
//! random-draw fallback.

pub mod builder;
pub mod deck;
pub mod draw;
pub mod io;

pub use builder::{build_corpus, validate, CardFact, CardRecord};
pub use deck::{Arcana, Orientation, DECK_RECORD_COUNT};
pub use io::{load_corpus, load_facts, save_corpus, save_facts, seed_facts};
