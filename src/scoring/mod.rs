//! Pure scoring functions. Nothing here holds state: the engine feeds in cards and
//! applies the returned awards.
//!
//! Pegging and the show are scored by two separate algorithms. Pegging looks at the
//! order cards were played in (suffix runs, trailing same-rank streaks); the show counts
//! every combination in a fixed five-card group.

pub mod pegging;
pub mod show;
pub(crate) mod subsets;

pub use pegging::score_play;
pub use show::{score_five, score_hand, HandKind, HandScore, ScoreError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why points were awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScoreReason {
    /// Starter cut is a Jack; goes to the dealer.
    Heels,
    Fifteen,
    ThirtyOne,
    Pair,
    Triple,
    Quad,
    /// Run of the given length.
    Run(u8),
    Go,
    LastCard,
    Hand(HandScore),
    Crib(HandScore),
}

impl fmt::Display for ScoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreReason::Heels => write!(f, "Two for his heels"),
            ScoreReason::Fifteen => write!(f, "Fifteen"),
            ScoreReason::ThirtyOne => write!(f, "Thirty-One"),
            ScoreReason::Pair => write!(f, "Pair"),
            ScoreReason::Triple => write!(f, "Triple"),
            ScoreReason::Quad => write!(f, "Quad"),
            ScoreReason::Run(n) => write!(f, "Run of {n}"),
            ScoreReason::Go => write!(f, "Go"),
            ScoreReason::LastCard => write!(f, "Last Card"),
            ScoreReason::Hand(_) => write!(f, "Hand"),
            ScoreReason::Crib(_) => write!(f, "Crib"),
        }
    }
}

/// Points for one scoring category, not yet credited to anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub reason: ScoreReason,
    pub points: u8,
}

impl Award {
    pub const fn new(reason: ScoreReason, points: u8) -> Self {
        Self { reason, points }
    }
}
