use crate::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Cards kept for the show once the discards have gone to the crib.
pub const KEPT_CARDS: usize = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("expected exactly four cards, got {0}")]
    CardCount(usize),
    #[error("duplicate cards in hand")]
    DuplicateCards,
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A four-card hand (or crib) as counted at the show.
///
/// ```
/// use cribbage_rs::hand::Hand;
///
/// let hand: Hand = "5c 5d 5h Js".parse().unwrap();
/// assert_eq!(hand.as_array().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand([Card; KEPT_CARDS]);

impl Hand {
    pub fn try_new(cards: [Card; KEPT_CARDS]) -> Result<Self, HandError> {
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != KEPT_CARDS {
            return Err(HandError::DuplicateCards);
        }
        Ok(Self(cards))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        let cards: [Card; KEPT_CARDS] =
            slice.try_into().map_err(|_| HandError::CardCount(slice.len()))?;
        Self::try_new(cards)
    }

    pub fn as_array(&self) -> &[Card; KEPT_CARDS] {
        &self.0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}
