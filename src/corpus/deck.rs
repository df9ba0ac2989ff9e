//! Canonical Rider-Waite deck structure.
//!
//! Defines the fixed Major Arcana sequence, Minor Arcana suits and ranks,
//! and the [`Arcana`]/[`Orientation`] enums used throughout the corpus and
//! the vector-store payloads. The orderings here are the single source of
//! truth for corpus sort order and therefore for record IDs.

use serde::{Deserialize, Serialize};

/// The 22 Major Arcana in canonical order (The Fool = 0 … The World = 21).
pub const MAJOR_ARCANA_ORDER: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

/// Minor Arcana suits in canonical order.
pub const MINOR_ARCANA_SUITS: [&str; 4] = ["Wands", "Cups", "Swords", "Pentacles"];

/// Minor Arcana ranks in canonical order within a suit.
pub const MINOR_ARCANA_RANKS: [&str; 14] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Page",
    "Knight", "Queen", "King",
];

/// Total records in a complete deck: 2 orientations × (22 Major + 56 Minor).
pub const DECK_RECORD_COUNT: usize =
    2 * (MAJOR_ARCANA_ORDER.len() + MINOR_ARCANA_SUITS.len() * MINOR_ARCANA_RANKS.len());

/// Major/Minor classification of a card.
///
/// Serialized capitalized (`"Major"`/`"Minor"`) to match the corpus file and
/// Qdrant payload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arcana {
    Major,
    Minor,
}

impl Arcana {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

impl std::fmt::Display for Arcana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Arcana {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Major" | "major" => Ok(Self::Major),
            "Minor" | "minor" => Ok(Self::Minor),
            _ => Err(format!("unknown arcana: {s}")),
        }
    }
}

/// Whether a card is read upright or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upright => "upright",
            Self::Reversed => "reversed",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upright" => Ok(Self::Upright),
            "reversed" => Ok(Self::Reversed),
            _ => Err(format!("unknown orientation: {s}")),
        }
    }
}

/// Position of a Major Arcana name in the canonical sequence, if it is one.
pub fn major_index(name: &str) -> Option<usize> {
    MAJOR_ARCANA_ORDER.iter().position(|m| *m == name)
}

/// Parse a Minor Arcana name of the form `"{Rank} of {Suit}"` into
/// `(suit_index, rank_index)`. Returns `None` for anything else.
pub fn minor_indices(name: &str) -> Option<(usize, usize)> {
    let (rank, suit) = name.split_once(" of ")?;
    let rank_index = MINOR_ARCANA_RANKS.iter().position(|r| *r == rank)?;
    let suit_index = MINOR_ARCANA_SUITS.iter().position(|s| *s == suit)?;
    Some((suit_index, rank_index))
}

/// Classify a card name, or `None` if it belongs to neither arcana.
pub fn classify(name: &str) -> Option<Arcana> {
    if major_index(name).is_some() {
        Some(Arcana::Major)
    } else if minor_indices(name).is_some() {
        Some(Arcana::Minor)
    } else {
        None
    }
}

/// Iterate every card name in the full deck in canonical order.
pub fn all_card_names() -> impl Iterator<Item = String> {
    let majors = MAJOR_ARCANA_ORDER.iter().map(|n| n.to_string());
    let minors = MINOR_ARCANA_SUITS.iter().flat_map(|suit| {
        MINOR_ARCANA_RANKS
            .iter()
            .map(move |rank| format!("{rank} of {suit}"))
    });
    majors.chain(minors)
}
