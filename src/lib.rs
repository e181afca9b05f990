//! cribbage-rs: a two-player Cribbage rules engine
//!
//! Goals:
//! - One owner for all match state, driven by explicit synchronous calls
//! - Every refused call returns an [`game::ActionError`] and changes nothing
//! - Pure scoring functions for pegging and the show, usable on their own
//!
//! ## Quick start: count a hand
//! ```
//! use cribbage_rs::hand::Hand;
//! use cribbage_rs::scoring::{score_hand, HandKind};
//!
//! let hand: Hand = "3c 4d 5h 5s".parse().unwrap();
//! let score = score_hand(&hand, "Kc".parse().unwrap(), HandKind::Hand).unwrap();
//! assert_eq!(score.runs, 6);
//! assert_eq!(score.total(), 12);
//! ```
//!
//! ## Quick start: drive a match
//! ```
//! use cribbage_rs::game::{Game, Phase, Seat};
//!
//! let mut game = Game::with_seed(42);
//! game.deal().unwrap();
//! for seat in Seat::BOTH {
//!     let discards = game.state().hand(seat)[..2].to_vec();
//!     for card in discards {
//!         game.toggle_discard(seat, card).unwrap();
//!     }
//!     game.confirm_discard(seat).unwrap();
//! }
//! assert_eq!(game.state().phase(), Phase::Cut);
//! assert_eq!(game.state().crib().len(), 4);
//! ```
//!
//! ## Simulator
//! Play seeded matches from the command line with:
//! ```sh
//! cargo run --bin cribbage -- --seed 7
//! ```

pub mod autoplay;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod history;
pub mod scoring;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
