use crate::cards::{Card, Rank};
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::hand::KEPT_CARDS;
use crate::history::History;
use crate::scoring::pegging::THIRTY_ONE;
use crate::scoring::{score_five, score_play, Award, HandKind, HandScore, ScoreReason};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cards dealt to each player per hand.
pub const DEALT_CARDS: usize = 6;
/// Cards each player gives to the crib.
pub const DISCARDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Phase {
    Deal,
    Discard,
    Cut,
    Pegging,
    Show,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "P1"),
            Seat::Two => write!(f, "P2"),
        }
    }
}

/// Why an operation was refused. A refused operation leaves the match untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("not allowed during the {0:?} phase")]
    IllegalPhase(Phase),
    #[error("the match is over")]
    GameOver,
    #[error("it is {expected}'s turn, not {got}'s")]
    IllegalTurn { expected: Seat, got: Seat },
    #[error("{seat} does not hold {card}")]
    CardNotHeld { seat: Seat, card: Card },
    #[error("{card} would take the count past 31 (count is {total})")]
    ExceedsThirtyOne { card: Card, total: u8 },
    #[error("{seat} has {selected} of 2 discards selected")]
    SelectionIncomplete { seat: Seat, selected: usize },
    #[error("{0} has already confirmed discards")]
    AlreadyReady(Seat),
    #[error("{0} has a playable card and cannot say go")]
    MustPlay(Seat),
    #[error("not enough cards left in the deck")]
    DeckExhausted,
    #[error("inconsistent match state: {0}")]
    InvalidState(String),
}

/// Result of toggling a discard candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Toggle {
    Selected,
    Deselected,
    /// Two cards were already selected; nothing changed.
    Ignored,
}

/// Points credited to a seat by one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ScoreEvent {
    pub seat: Seat,
    pub points: u8,
    pub reason: ScoreReason,
}

/// A card on the pegging stack. The starter sits at the bottom with no owner: it seeds
/// the count but never takes part in pairs or runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PegEntry {
    pub card: Card,
    pub seat: Option<Seat>,
}

impl PegEntry {
    pub fn is_starter(&self) -> bool {
        self.seat.is_none()
    }
}

/// Breakdown of the last show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowReport {
    pub non_dealer: HandScore,
    pub dealer: HandScore,
    pub crib: HandScore,
}

/// Everything about a match in progress. Owned by [`Game`]; callers read it through
/// the accessors and change it only through `Game` operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MatchState {
    pub(crate) phase: Phase,
    pub(crate) dealer: Seat,
    pub(crate) active: Seat,
    pub(crate) scores: [u16; 2],
    pub(crate) winner: Option<Seat>,

    pub(crate) deck: Deck,
    /// Six cards after the deal, the four kept cards from the cut on.
    pub(crate) hands: [Vec<Card>; 2],
    pub(crate) selected: [Vec<Card>; 2],
    pub(crate) ready: [bool; 2],
    pub(crate) crib: Vec<Card>,
    pub(crate) starter: Option<Card>,

    pub(crate) pegging_hands: [Vec<Card>; 2],
    pub(crate) stack: Vec<PegEntry>,
    pub(crate) running_total: u8,
    pub(crate) said_go: [bool; 2],
    pub(crate) last_player: Option<Seat>,

    pub(crate) last_show: Option<ShowReport>,
    pub(crate) history: History,
    /// Shuffle source. Part of the snapshot so a restored match deals the same hands.
    pub(crate) rng: ChaCha8Rng,
}

impl MatchState {
    fn new(history_capacity: usize, rng: ChaCha8Rng) -> Self {
        Self {
            phase: Phase::Deal,
            dealer: Seat::One,
            active: Seat::Two,
            scores: [0, 0],
            winner: None,
            deck: Deck::standard(),
            hands: [Vec::new(), Vec::new()],
            selected: [Vec::new(), Vec::new()],
            ready: [false, false],
            crib: Vec::new(),
            starter: None,
            pegging_hands: [Vec::new(), Vec::new()],
            stack: Vec::new(),
            running_total: 0,
            said_go: [false, false],
            last_player: None,
            last_show: None,
            history: History::new(history_capacity),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    /// Seat whose turn it is to peg. Outside pegging this is the non-dealer.
    pub fn active(&self) -> Seat {
        self.active
    }

    pub fn score(&self, seat: Seat) -> u16 {
        self.scores[seat.index()]
    }

    pub fn scores(&self) -> [u16; 2] {
        self.scores
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Undealt cards, top first.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat.index()]
    }

    pub fn hand_len(&self, seat: Seat) -> usize {
        self.hands[seat.index()].len()
    }

    /// Discard candidates currently selected by `seat`.
    pub fn selected(&self, seat: Seat) -> &[Card] {
        &self.selected[seat.index()]
    }

    pub fn is_ready(&self, seat: Seat) -> bool {
        self.ready[seat.index()]
    }

    pub fn crib(&self) -> &[Card] {
        &self.crib
    }

    pub fn starter(&self) -> Option<Card> {
        self.starter
    }

    pub fn pegging_hand(&self, seat: Seat) -> &[Card] {
        &self.pegging_hands[seat.index()]
    }

    pub fn pegging_stack(&self) -> &[PegEntry] {
        &self.stack
    }

    pub fn running_total(&self) -> u8 {
        self.running_total
    }

    pub fn said_go(&self, seat: Seat) -> bool {
        self.said_go[seat.index()]
    }

    pub fn last_show(&self) -> Option<&ShowReport> {
        self.last_show.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Cards `seat` could lay on the current count. Others stay in hand, just unplayable.
    pub fn playable_cards(&self, seat: Seat) -> Vec<Card> {
        self.pegging_hands[seat.index()]
            .iter()
            .copied()
            .filter(|c| self.fits(*c))
            .collect()
    }

    pub fn can_play(&self, seat: Seat) -> bool {
        self.pegging_hands[seat.index()].iter().any(|c| self.fits(*c))
    }

    fn fits(&self, card: Card) -> bool {
        self.running_total + card.value() <= THIRTY_ONE
    }

    /// Cards played since the count was last cleared, oldest first, starter excluded.
    fn played_cards(&self) -> Vec<Card> {
        self.stack.iter().filter(|e| !e.is_starter()).map(|e| e.card).collect()
    }
}

/// The rules engine. Every operation either applies completely or returns an
/// [`ActionError`] without touching the state.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: MatchState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let seed: u64 = match config.seed {
            Some(seed) => seed,
            None => rand::rng().random(),
        };
        let mut state = MatchState::new(config.history_capacity, ChaCha8Rng::seed_from_u64(seed));
        state.history.push("Welcome to Cribbage. Waiting to deal.");
        Self { config, state }
    }

    /// Default rules with a fixed shuffle seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default().with_seed(seed))
    }

    /// Resume from a previously captured state, shuffle position included.
    pub fn restore(config: GameConfig, state: MatchState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn into_state(self) -> MatchState {
        self.state
    }

    fn name(&self, seat: Seat) -> &str {
        &self.config.player_names[seat.index()]
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!("phase {:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
    }

    fn ensure_phase(&self, phase: Phase) -> Result<(), ActionError> {
        let current = self.state.phase;
        if current == Phase::GameOver {
            trace!("rejected {phase:?} action: match is over");
            return Err(ActionError::GameOver);
        }
        if current != phase {
            trace!("rejected {phase:?} action during {current:?}");
            return Err(ActionError::IllegalPhase(current));
        }
        Ok(())
    }

    fn ensure_turn(&self, seat: Seat) -> Result<(), ActionError> {
        let expected = self.state.active;
        if seat != expected {
            trace!("rejected out-of-turn action by {seat}");
            return Err(ActionError::IllegalTurn { expected, got: seat });
        }
        Ok(())
    }

    fn ensure_can_deal(&self) -> Result<(), ActionError> {
        match self.state.phase {
            Phase::GameOver => Err(ActionError::GameOver),
            Phase::Pegging => Err(ActionError::IllegalPhase(Phase::Pegging)),
            _ => Ok(()),
        }
    }

    /// Shuffle a fresh deck and deal six cards to each player.
    pub fn deal(&mut self) -> Result<(), ActionError> {
        self.ensure_can_deal()?;
        let mut deck = Deck::standard();
        deck.shuffle_with(&mut self.state.rng);
        self.deal_cards(deck);
        Ok(())
    }

    /// Deal from `deck` as given, without shuffling. Seat One takes the first six
    /// cards, seat Two the next six; the starter is cut from what remains.
    pub fn deal_from(&mut self, deck: Deck) -> Result<(), ActionError> {
        self.ensure_can_deal()?;
        if deck.len() < 2 * DEALT_CARDS + 1 {
            return Err(ActionError::DeckExhausted);
        }
        self.deal_cards(deck);
        Ok(())
    }

    fn deal_cards(&mut self, mut deck: Deck) {
        let one = deck.draw_n(DEALT_CARDS);
        let two = deck.draw_n(DEALT_CARDS);
        let s = &mut self.state;
        s.hands = [one, two];
        s.deck = deck;
        s.selected = [Vec::new(), Vec::new()];
        s.ready = [false, false];
        s.crib.clear();
        s.starter = None;
        s.pegging_hands = [Vec::new(), Vec::new()];
        s.stack.clear();
        s.running_total = 0;
        s.said_go = [false, false];
        s.last_player = None;
        s.last_show = None;
        s.active = s.dealer.other();
        self.set_phase(Phase::Discard);
        self.state.history.push("Hands dealt. Select 2 cards for the crib.");
    }

    /// Select or deselect `card` as one of `seat`'s crib discards.
    pub fn toggle_discard(&mut self, seat: Seat, card: Card) -> Result<Toggle, ActionError> {
        self.ensure_phase(Phase::Discard)?;
        let i = seat.index();
        if self.state.ready[i] {
            return Err(ActionError::AlreadyReady(seat));
        }
        if !self.state.hands[i].contains(&card) {
            return Err(ActionError::CardNotHeld { seat, card });
        }
        let selected = &mut self.state.selected[i];
        if let Some(pos) = selected.iter().position(|&c| c == card) {
            selected.remove(pos);
            Ok(Toggle::Deselected)
        } else if selected.len() < DISCARDS {
            selected.push(card);
            Ok(Toggle::Selected)
        } else {
            Ok(Toggle::Ignored)
        }
    }

    /// Lock in `seat`'s two discards. Once both seats have confirmed the crib is
    /// formed and the phase moves to the cut.
    pub fn confirm_discard(&mut self, seat: Seat) -> Result<(), ActionError> {
        self.ensure_phase(Phase::Discard)?;
        let i = seat.index();
        if self.state.ready[i] {
            return Err(ActionError::AlreadyReady(seat));
        }
        let selected = self.state.selected[i].len();
        if selected != DISCARDS {
            return Err(ActionError::SelectionIncomplete { seat, selected });
        }
        self.state.ready[i] = true;
        debug!("{seat} confirmed discards");
        if self.state.ready.iter().all(|&r| r) {
            self.form_crib();
        }
        Ok(())
    }

    fn form_crib(&mut self) {
        let s = &mut self.state;
        for i in 0..2 {
            let discards = &s.selected[i];
            s.hands[i].retain(|c| !discards.contains(c));
        }
        s.crib = s.selected.concat();
        s.pegging_hands = s.hands.clone();
        self.set_phase(Phase::Cut);
        self.state.history.push("Crib formed. Tap deck to cut.");
    }

    /// Turn the starter. A Jack gives the dealer two for his heels.
    pub fn cut_deck(&mut self) -> Result<Vec<ScoreEvent>, ActionError> {
        self.ensure_phase(Phase::Cut)?;
        let starter = self.state.deck.draw().ok_or(ActionError::DeckExhausted)?;
        self.state.starter = Some(starter);
        self.state.history.push(format!("Starter card is {starter}"));

        let mut events = Vec::new();
        if starter.rank() == Rank::Jack {
            let dealer = self.state.dealer;
            if !self.award(dealer, Award::new(ScoreReason::Heels, 2), &mut events) {
                return Ok(events);
            }
        }

        let s = &mut self.state;
        s.running_total = starter.value();
        s.stack = vec![PegEntry { card: starter, seat: None }];
        s.said_go = [false, false];
        s.last_player = None;
        s.active = s.dealer.other();
        self.set_phase(Phase::Pegging);
        self.state.history.push("Pegging begins. Count includes starter card.");
        Ok(events)
    }

    /// Lay `card` on the pegging stack and score it.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<Vec<ScoreEvent>, ActionError> {
        self.ensure_phase(Phase::Pegging)?;
        self.ensure_turn(seat)?;
        let i = seat.index();
        let pos = self.state.pegging_hands[i]
            .iter()
            .position(|&c| c == card)
            .ok_or(ActionError::CardNotHeld { seat, card })?;
        if !self.state.fits(card) {
            return Err(ActionError::ExceedsThirtyOne { card, total: self.state.running_total });
        }

        let s = &mut self.state;
        s.pegging_hands[i].remove(pos);
        s.stack.push(PegEntry { card, seat: Some(seat) });
        s.running_total += card.value();
        s.said_go = [false, false];
        s.last_player = Some(seat);
        let total = s.running_total;
        debug!("{seat} played {card}, count {total}");

        let mut events = Vec::new();
        for award in score_play(&self.state.played_cards(), total) {
            if !self.award(seat, award, &mut events) {
                return Ok(events);
            }
        }

        if total == THIRTY_ONE {
            self.clear_count();
        }
        if self.state.pegging_hands.iter().all(Vec::is_empty) {
            if !self.award(seat, Award::new(ScoreReason::LastCard, 1), &mut events) {
                return Ok(events);
            }
            self.set_phase(Phase::Show);
            self.state.history.push("Pegging complete. Tap to score hands.");
        } else {
            self.state.active = self.next_holding(seat.other());
        }
        Ok(events)
    }

    /// Pass because no card fits. Two passes in a row clear the count and give the
    /// last player to lay a card one point.
    pub fn say_go(&mut self, seat: Seat) -> Result<Vec<ScoreEvent>, ActionError> {
        self.ensure_phase(Phase::Pegging)?;
        self.ensure_turn(seat)?;
        if self.state.can_play(seat) {
            return Err(ActionError::MustPlay(seat));
        }

        self.state.said_go[seat.index()] = true;
        debug!("{seat} says go at {}", self.state.running_total);
        let mut events = Vec::new();
        if !self.state.said_go.iter().all(|&g| g) {
            self.state.active = seat.other();
            return Ok(events);
        }

        let last = self.state.last_player;
        if let Some(last) = last {
            if !self.award(last, Award::new(ScoreReason::Go, 1), &mut events) {
                return Ok(events);
            }
        }
        self.clear_count();
        let lead = last.unwrap_or(seat).other();
        self.state.active = self.next_holding(lead);
        Ok(events)
    }

    /// Count the non-dealer's hand, then the dealer's hand, then the crib. Stops as soon
    /// as someone reaches the target.
    pub fn score_show(&mut self) -> Result<Vec<ScoreEvent>, ActionError> {
        self.ensure_phase(Phase::Show)?;
        let starter = self
            .state
            .starter
            .ok_or_else(|| ActionError::InvalidState("show without a starter".into()))?;
        let dealer = self.state.dealer;
        let non_dealer = dealer.other();
        let kept = |cards: &[Card], what: &str| -> Result<[Card; KEPT_CARDS], ActionError> {
            cards.try_into().map_err(|_| {
                ActionError::InvalidState(format!("{what} has {} cards", cards.len()))
            })
        };
        let non_dealer_hand = kept(&self.state.hands[non_dealer.index()], "non-dealer hand")?;
        let dealer_hand = kept(&self.state.hands[dealer.index()], "dealer hand")?;
        let crib = kept(&self.state.crib, "crib")?;

        let report = ShowReport {
            non_dealer: score_five(&non_dealer_hand, starter, HandKind::Hand),
            dealer: score_five(&dealer_hand, starter, HandKind::Hand),
            crib: score_five(&crib, starter, HandKind::Crib),
        };
        self.state.last_show = Some(report);

        let mut events = Vec::new();
        let counts = [
            (non_dealer, ScoreReason::Hand(report.non_dealer), report.non_dealer.total()),
            (dealer, ScoreReason::Hand(report.dealer), report.dealer.total()),
            (dealer, ScoreReason::Crib(report.crib), report.crib.total()),
        ];
        for (seat, reason, points) in counts {
            if !self.award(seat, Award::new(reason, points), &mut events) {
                return Ok(events);
            }
        }

        self.state.dealer = non_dealer;
        self.state.active = dealer;
        self.set_phase(Phase::Deal);
        self.state.history.push("Round complete. Ready to deal.");
        Ok(events)
    }

    /// Zero both scores and deal the first hand of a new match. Seat One deals first.
    pub fn reset_match(&mut self) {
        let rng = self.state.rng.clone();
        self.state = MatchState::new(self.config.history_capacity, rng);
        self.state.history.push("New match.");
        info!("match reset");
        let mut deck = Deck::standard();
        deck.shuffle_with(&mut self.state.rng);
        self.deal_cards(deck);
    }

    fn clear_count(&mut self) {
        let s = &mut self.state;
        s.stack.clear();
        s.running_total = 0;
        s.said_go = [false, false];
        s.last_player = None;
        debug!("count cleared");
    }

    /// `preferred` if they still hold cards, otherwise their opponent.
    fn next_holding(&self, preferred: Seat) -> Seat {
        if self.state.pegging_hands[preferred.index()].is_empty() {
            preferred.other()
        } else {
            preferred
        }
    }

    /// Credit points to `seat`. Returns false once the match is over, in which case
    /// nothing further may be awarded in the current operation.
    fn award(&mut self, seat: Seat, award: Award, events: &mut Vec<ScoreEvent>) -> bool {
        if self.state.phase == Phase::GameOver {
            return false;
        }
        if award.points == 0 {
            return true;
        }
        let i = seat.index();
        self.state.scores[i] = self.state.scores[i].saturating_add(u16::from(award.points));
        let score = self.state.scores[i];
        events.push(ScoreEvent { seat, points: award.points, reason: award.reason });
        let name = self.name(seat).to_string();
        info!("{name} +{} ({}) -> {score}", award.points, award.reason);
        self.state.history.push(format!("{name} +{} ({})", award.points, award.reason));

        if score >= self.config.target_score {
            self.state.winner = Some(seat);
            self.set_phase(Phase::GameOver);
            info!("{name} wins with {score}");
            self.state.history.push(format!("{name} wins!"));
            return false;
        }
        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).expect("valid cards")
    }

    fn card(s: &str) -> Card {
        s.parse().expect("valid card")
    }

    /// A game sitting in pegging with an empty stack, seat One dealing and Two to play.
    fn pegging_game(one: &str, two: &str, total: u8) -> Game {
        let mut g = Game::with_seed(1);
        g.state.phase = Phase::Pegging;
        g.state.dealer = Seat::One;
        g.state.active = Seat::Two;
        g.state.starter = Some(card("Ks"));
        g.state.pegging_hands = [cards(one), cards(two)];
        g.state.running_total = total;
        g
    }

    fn show_game() -> Game {
        let mut g = Game::with_seed(1);
        g.state.phase = Phase::Show;
        g.state.dealer = Seat::One;
        g.state.starter = Some(card("5s"));
        // non-dealer (Two): 5 5 5 J -> 29 with the 5s starter
        g.state.hands = [cards("2c 4d 6h 8c"), cards("5c 5d 5h Js")];
        g.state.crib = cards("3c 4h 9d Kh");
        g
    }

    #[test]
    fn new_game_waits_to_deal() {
        let g = Game::with_seed(3);
        assert_eq!(g.state().phase(), Phase::Deal);
        assert_eq!(g.state().dealer(), Seat::One);
        assert_eq!(g.state().scores(), [0, 0]);
        assert_eq!(g.state().history().latest(), Some("Welcome to Cribbage. Waiting to deal."));
    }

    #[test]
    fn seven_then_eight_makes_fifteen() {
        let mut g = pegging_game("8d 3s", "7c 2s", 0);
        assert!(g.play_card(Seat::Two, card("7c")).unwrap().is_empty());
        let events = g.play_card(Seat::One, card("8d")).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].seat, Seat::One);
        assert_eq!(events[0].reason, ScoreReason::Fifteen);
        assert_eq!(g.state.score(Seat::One), 2);
        assert!(g.state.history().latest().unwrap().contains("Fifteen"));
        assert_eq!(g.state.active(), Seat::Two);
    }

    #[test]
    fn go_then_final_card_scores_last_card() {
        let mut g = pegging_game("4d", "", 25);
        g.state.last_player = Some(Seat::One);
        assert!(g.say_go(Seat::Two).unwrap().is_empty());
        assert_eq!(g.state.active(), Seat::One);

        let events = g.play_card(Seat::One, card("4d")).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reason, ScoreReason::LastCard);
        assert_eq!(events[0].points, 1);
        assert_eq!(g.state.score(Seat::One), 1);
        assert_eq!(g.state.phase(), Phase::Show);
    }

    #[test]
    fn mutual_go_awards_last_player_and_clears_count() {
        let mut g = pegging_game("Qd 2h", "Kc", 25);
        g.state.stack = vec![PegEntry { card: card("4c"), seat: Some(Seat::One) }];
        g.state.last_player = Some(Seat::One);

        g.say_go(Seat::Two).unwrap();
        assert!(g.state.said_go(Seat::Two));
        assert_eq!(g.state.active(), Seat::One);
        // One still has the 2 to play
        assert_eq!(g.say_go(Seat::One), Err(ActionError::MustPlay(Seat::One)));
        g.play_card(Seat::One, card("2h")).unwrap();
        assert!(!g.state.said_go(Seat::Two));
        assert_eq!(g.state.active(), Seat::Two);

        g.say_go(Seat::Two).unwrap();
        let events = g.say_go(Seat::One).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].seat, Seat::One);
        assert_eq!(events[0].reason, ScoreReason::Go);
        assert_eq!(g.state.running_total(), 0);
        assert!(g.state.pegging_stack().is_empty());
        // opponent of the last player leads the new count
        assert_eq!(g.state.active(), Seat::Two);
    }

    #[test]
    fn after_go_reset_empty_hand_is_skipped() {
        let mut g = pegging_game("Qd", "", 25);
        g.state.active = Seat::One;
        g.state.last_player = Some(Seat::One);
        g.say_go(Seat::One).unwrap();
        assert_eq!(g.state.active(), Seat::Two);
        let events = g.say_go(Seat::Two).unwrap();
        assert_eq!(events[0].reason, ScoreReason::Go);
        assert_eq!(g.state.active(), Seat::One);
    }

    #[test]
    fn turn_stays_when_opponent_is_out_of_cards() {
        let mut g = pegging_game("", "2c 3d", 0);
        g.play_card(Seat::Two, card("2c")).unwrap();
        assert_eq!(g.state.active(), Seat::Two);
    }

    #[test]
    fn thirty_one_scores_and_clears() {
        let mut g = pegging_game("Kd 2s", "Ac 3s", 20);
        g.state.stack = vec![PegEntry { card: card("Ks"), seat: None }];
        let events = g.play_card(Seat::Two, card("Ac")).unwrap();
        assert!(events.is_empty());
        let events = g.play_card(Seat::One, card("Kd")).unwrap();
        assert_eq!(events[0].reason, ScoreReason::ThirtyOne);
        assert_eq!(g.state.running_total(), 0);
        assert!(g.state.pegging_stack().is_empty());
        assert_eq!(g.state.active(), Seat::Two);
    }

    #[test]
    fn final_card_on_thirty_one_also_takes_last_card() {
        let mut g = pegging_game("", "Kc", 21);
        let events = g.play_card(Seat::Two, card("Kc")).unwrap();
        let reasons: Vec<ScoreReason> = events.iter().map(|e| e.reason).collect();
        assert_eq!(reasons, [ScoreReason::ThirtyOne, ScoreReason::LastCard]);
        assert_eq!(g.state.score(Seat::Two), 3);
        assert_eq!(g.state.phase(), Phase::Show);
    }

    #[test]
    fn starter_sentinel_never_pairs() {
        let mut g = pegging_game("2d", "Kc 3d", 10);
        g.state.stack = vec![PegEntry { card: card("Ks"), seat: None }];
        let events = g.play_card(Seat::Two, card("Kc")).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn rejected_plays_leave_state_untouched() {
        let mut g = pegging_game("5d", "Kc 9h", 25);
        let before = g.state.clone();
        assert_eq!(
            g.play_card(Seat::Two, card("Kc")),
            Err(ActionError::ExceedsThirtyOne { card: card("Kc"), total: 25 })
        );
        assert_eq!(
            g.play_card(Seat::One, card("5d")),
            Err(ActionError::IllegalTurn { expected: Seat::Two, got: Seat::One })
        );
        assert_eq!(
            g.play_card(Seat::Two, card("5d")),
            Err(ActionError::CardNotHeld { seat: Seat::Two, card: card("5d") })
        );
        assert_eq!(g.say_go(Seat::One), Err(ActionError::IllegalTurn { expected: Seat::Two, got: Seat::One }));
        assert_eq!(g.state, before);
    }

    #[test]
    fn playable_cards_respect_the_count() {
        let g = pegging_game("", "Kc 5h 6d", 25);
        assert_eq!(g.state.playable_cards(Seat::Two), cards("5h 6d"));
        assert!(g.state.can_play(Seat::Two));
        assert!(!g.state.can_play(Seat::One));
    }

    #[test]
    fn show_counts_in_order_and_rotates_dealer() {
        let mut g = show_game();
        let events = g.score_show().unwrap();
        assert_eq!(events[0].seat, Seat::Two);
        assert_eq!(events[0].points, 29);
        assert!(matches!(events[0].reason, ScoreReason::Hand(_)));
        let report = g.state.last_show().copied().unwrap();
        assert_eq!(report.non_dealer.total(), 29);
        assert_eq!(g.state.score(Seat::Two), 29);
        assert_eq!(g.state.score(Seat::One), u16::from(report.dealer.total() + report.crib.total()));
        assert_eq!(g.state.dealer(), Seat::Two);
        assert_eq!(g.state.phase(), Phase::Deal);
    }

    #[test]
    fn reaching_target_mid_show_stops_counting() {
        let mut g = show_game();
        g.state.scores = [100, 119];
        let events = g.score_show().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(g.state.phase(), Phase::GameOver);
        assert_eq!(g.state.winner(), Some(Seat::Two));
        assert_eq!(g.state.score(Seat::One), 100);
        assert_eq!(g.state.dealer(), Seat::One);
        assert_eq!(g.state.history().latest(), Some("Player 2 wins!"));
    }

    #[test]
    fn game_over_rejects_everything_but_reset() {
        let mut g = show_game();
        g.state.scores = [0, 119];
        g.score_show().unwrap();
        assert_eq!(g.deal(), Err(ActionError::GameOver));
        assert_eq!(g.score_show(), Err(ActionError::GameOver));
        assert_eq!(g.cut_deck(), Err(ActionError::GameOver));

        g.reset_match();
        assert_eq!(g.state.scores(), [0, 0]);
        assert_eq!(g.state.winner(), None);
        assert_eq!(g.state.phase(), Phase::Discard);
        assert_eq!(g.state.hand_len(Seat::One), 6);
    }

    #[test]
    fn heels_can_end_the_match() {
        let mut g = Game::with_seed(9);
        g.deal_from(Deck::stacked(&cards("Ac 2c 3c 4c 5c 6c Ad 2d 3d 4d 5d 6d Jh")).unwrap())
            .unwrap();
        for seat in Seat::BOTH {
            let discards: Vec<Card> = g.state.hand(seat)[..2].to_vec();
            for c in discards {
                g.toggle_discard(seat, c).unwrap();
            }
            g.confirm_discard(seat).unwrap();
        }
        g.state.scores = [120, 0];
        let events = g.cut_deck().unwrap();
        assert_eq!(events[0].reason, ScoreReason::Heels);
        assert_eq!(g.state.phase(), Phase::GameOver);
        assert_eq!(g.state.winner(), Some(Seat::One));
        assert!(g.state.pegging_stack().is_empty());
    }

    #[test]
    fn deal_is_refused_mid_pegging() {
        let mut g = pegging_game("5d", "Kc", 0);
        assert_eq!(g.deal(), Err(ActionError::IllegalPhase(Phase::Pegging)));
    }

    #[test]
    fn short_target_ends_early() {
        let mut g = Game::new(GameConfig::default().with_seed(2).with_target_score(2));
        g.state.phase = Phase::Pegging;
        g.state.pegging_hands = [cards("8d 3s"), cards("7c 2s")];
        g.play_card(Seat::Two, card("7c")).unwrap();
        g.play_card(Seat::One, card("8d")).unwrap();
        assert_eq!(g.state.winner(), Some(Seat::One));
        assert_eq!(g.play_card(Seat::Two, card("2s")), Err(ActionError::GameOver));
    }
}
