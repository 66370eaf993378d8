use meeple_common::NO_INFORMATION;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One board-game listing after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    /// Whole currency units. `None` when the card had no digits in its price.
    pub price: Option<u64>,
    pub players: String,
    pub duration: String,
    pub age: String,
}

/// Field text exactly as found on a card, before trimming.
///
/// Missing title/players/duration/age hold [`NO_INFORMATION`]; a missing
/// price is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCard {
    pub title: String,
    pub price: String,
    pub players: String,
    pub duration: String,
    pub age: String,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Title: {}, Price: ", self.title)?;
        match self.price {
            Some(p) => write!(f, "{p}")?,
            None => f.write_str(NO_INFORMATION)?,
        }
        write!(
            f,
            ", Players: {}, Duration: {}, Age: {}}}",
            self.players, self.duration, self.age
        )
    }
}
