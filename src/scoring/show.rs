use super::subsets::{members, SubsetMasks};
use crate::cards::{Card, Rank};
use crate::hand::{Hand, KEPT_CARDS};
use serde::{Deserialize, Serialize};

/// Whether a group is counted as a player's hand or as the dealer's crib.
/// The only difference is the flush rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandKind {
    Hand,
    Crib,
}

/// Show points for one hand or crib, broken down by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandScore {
    pub fifteens: u8,
    pub pairs: u8,
    pub runs: u8,
    pub flush: u8,
    pub nobs: u8,
}

impl HandScore {
    pub const fn total(&self) -> u8 {
        self.fifteens + self.pairs + self.runs + self.flush + self.nobs
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("starter {0} is also in the hand")]
    StarterInHand(Card),
}

/// Count a validated hand plus starter.
///
/// ```
/// use cribbage_rs::hand::Hand;
/// use cribbage_rs::scoring::{score_hand, HandKind};
///
/// let hand: Hand = "5c 5d 5h Js".parse().unwrap();
/// let score = score_hand(&hand, "5s".parse().unwrap(), HandKind::Hand).unwrap();
/// assert_eq!(score.total(), 29);
/// ```
pub fn score_hand(hand: &Hand, starter: Card, kind: HandKind) -> Result<HandScore, ScoreError> {
    if hand.contains(starter) {
        return Err(ScoreError::StarterInHand(starter));
    }
    Ok(score_five(hand.as_array(), starter, kind))
}

/// Count four cards plus starter without validating them.
pub fn score_five(hand: &[Card; KEPT_CARDS], starter: Card, kind: HandKind) -> HandScore {
    let five = [hand[0], hand[1], hand[2], hand[3], starter];
    HandScore {
        fifteens: fifteens(&five),
        pairs: pairs(&five),
        runs: runs(&five),
        flush: flush(hand, starter, kind),
        nobs: nobs(hand, starter),
    }
}

fn fifteens(cards: &[Card]) -> u8 {
    let count = SubsetMasks::at_least(cards.len(), 2)
        .filter(|&m| members(m, cards).map(|c| c.value()).sum::<u8>() == 15)
        .count();
    2 * count as u8
}

fn pairs(cards: &[Card]) -> u8 {
    let count = SubsetMasks::exactly(cards.len(), 2)
        .filter(|&m| {
            let mut it = members(m, cards);
            matches!((it.next(), it.next()), (Some(a), Some(b)) if a.rank() == b.rank())
        })
        .count();
    2 * count as u8
}

/// Longest stretch of consecutive ranks, scored once per distinct card combination
/// (a double run of three scores 2 x 3).
fn runs(cards: &[Card]) -> u8 {
    let mut counts = [0u8; 14];
    for c in cards {
        counts[c.order() as usize] += 1;
    }
    let mut best_len = 0usize;
    let mut best_points = 0u8;
    let mut order = 1usize;
    while order <= 13 {
        if counts[order] == 0 {
            order += 1;
            continue;
        }
        let start = order;
        let mut combos = 1u8;
        while order <= 13 && counts[order] > 0 {
            combos *= counts[order];
            order += 1;
        }
        let len = order - start;
        if len < 3 {
            continue;
        }
        let points = len as u8 * combos;
        if len > best_len {
            best_len = len;
            best_points = points;
        } else if len == best_len {
            best_points += points;
        }
    }
    best_points
}

fn flush(hand: &[Card; KEPT_CARDS], starter: Card, kind: HandKind) -> u8 {
    let suit = hand[0].suit();
    if hand.iter().any(|c| c.suit() != suit) {
        return 0;
    }
    let starter_matches = starter.suit() == suit;
    match kind {
        HandKind::Hand if starter_matches => 5,
        HandKind::Hand => 4,
        HandKind::Crib if starter_matches => 5,
        HandKind::Crib => 0,
    }
}

fn nobs(hand: &[Card; KEPT_CARDS], starter: Card) -> u8 {
    let his_nob = Card::new(Rank::Jack, starter.suit());
    u8::from(hand.contains(&his_nob))
}
