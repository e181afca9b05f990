use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("a deck needs exactly 52 cards, got {0}")]
    Size(usize),
    #[error("duplicate card in deck: {0}")]
    Duplicate(Card),
}

/// A standard 52-card deck, consumed from the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// ```
    /// use cribbage_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push_back(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// Build a deck in the given order. All 52 cards must be present exactly once.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::Size(cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for &c in &cards {
            if !seen.insert(c) {
                return Err(DeckError::Duplicate(c));
            }
        }
        Ok(Self { cards: cards.into() })
    }

    /// A deck whose top cards are `top` in order, followed by the remaining cards of a
    /// standard deck. Used to replay or script a deal.
    ///
    /// ```
    /// use cribbage_rs::cards::parse_cards;
    /// use cribbage_rs::deck::Deck;
    ///
    /// let top = parse_cards("5h 5d").unwrap();
    /// let mut deck = Deck::stacked(&top).unwrap();
    /// assert_eq!(deck.len(), 52);
    /// assert_eq!(deck.draw(), Some(top[0]));
    /// ```
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut cards = top.to_vec();
        let chosen: HashSet<Card> = top.iter().copied().collect();
        cards.extend(Deck::standard().cards.into_iter().filter(|c| !chosen.contains(c)));
        Self::from_cards(cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards remaining, top first.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.draw()).collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
