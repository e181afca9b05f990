// Engine API boundary. Callers (the simulator, tests, any front end) drive a match
// through this trait and read back only what it exposes. Implemented for `Game`.

use crate::cards::Card;
use crate::game::{ActionError, PegEntry, Phase, ScoreEvent, Seat, ShowReport, Toggle};
use crate::history::History;

pub trait CribbageEngine {
    // Hand lifecycle
    fn deal(&mut self) -> Result<(), ActionError>;
    fn reset_match(&mut self);

    // Player actions
    fn toggle_discard(&mut self, seat: Seat, card: Card) -> Result<Toggle, ActionError>;
    fn confirm_discard(&mut self, seat: Seat) -> Result<(), ActionError>;
    fn cut_deck(&mut self) -> Result<Vec<ScoreEvent>, ActionError>;
    fn play_card(&mut self, seat: Seat, card: Card) -> Result<Vec<ScoreEvent>, ActionError>;
    fn say_go(&mut self, seat: Seat) -> Result<Vec<ScoreEvent>, ActionError>;
    fn score_show(&mut self) -> Result<Vec<ScoreEvent>, ActionError>;

    // Queries
    fn phase(&self) -> Phase;
    fn dealer(&self) -> Seat;
    fn active(&self) -> Seat;
    fn score(&self, seat: Seat) -> u16;
    fn winner(&self) -> Option<Seat>;
    fn hand(&self, seat: Seat) -> &[Card];
    fn selected(&self, seat: Seat) -> &[Card];
    fn is_ready(&self, seat: Seat) -> bool;
    fn crib(&self) -> &[Card];
    fn starter(&self) -> Option<Card>;
    fn pegging_hand(&self, seat: Seat) -> &[Card];
    fn running_total(&self) -> u8;
    fn pegging_stack(&self) -> &[PegEntry];
    fn said_go(&self, seat: Seat) -> bool;
    fn last_show(&self) -> Option<&ShowReport>;
    fn history(&self) -> &History;
}

impl CribbageEngine for crate::game::Game {
    fn deal(&mut self) -> Result<(), ActionError> {
        self.deal()
    }
    fn reset_match(&mut self) {
        self.reset_match()
    }

    fn toggle_discard(&mut self, seat: Seat, card: Card) -> Result<Toggle, ActionError> {
        self.toggle_discard(seat, card)
    }
    fn confirm_discard(&mut self, seat: Seat) -> Result<(), ActionError> {
        self.confirm_discard(seat)
    }
    fn cut_deck(&mut self) -> Result<Vec<ScoreEvent>, ActionError> {
        self.cut_deck()
    }
    fn play_card(&mut self, seat: Seat, card: Card) -> Result<Vec<ScoreEvent>, ActionError> {
        self.play_card(seat, card)
    }
    fn say_go(&mut self, seat: Seat) -> Result<Vec<ScoreEvent>, ActionError> {
        self.say_go(seat)
    }
    fn score_show(&mut self) -> Result<Vec<ScoreEvent>, ActionError> {
        self.score_show()
    }

    fn phase(&self) -> Phase {
        self.state().phase()
    }
    fn dealer(&self) -> Seat {
        self.state().dealer()
    }
    fn active(&self) -> Seat {
        self.state().active()
    }
    fn score(&self, seat: Seat) -> u16 {
        self.state().score(seat)
    }
    fn winner(&self) -> Option<Seat> {
        self.state().winner()
    }
    fn hand(&self, seat: Seat) -> &[Card] {
        self.state().hand(seat)
    }
    fn selected(&self, seat: Seat) -> &[Card] {
        self.state().selected(seat)
    }
    fn is_ready(&self, seat: Seat) -> bool {
        self.state().is_ready(seat)
    }
    fn crib(&self) -> &[Card] {
        self.state().crib()
    }
    fn starter(&self) -> Option<Card> {
        self.state().starter()
    }
    fn pegging_hand(&self, seat: Seat) -> &[Card] {
        self.state().pegging_hand(seat)
    }
    fn running_total(&self) -> u8 {
        self.state().running_total()
    }
    fn pegging_stack(&self) -> &[PegEntry] {
        self.state().pegging_stack()
    }
    fn said_go(&self, seat: Seat) -> bool {
        self.state().said_go(seat)
    }
    fn last_show(&self) -> Option<&ShowReport> {
        self.state().last_show()
    }
    fn history(&self) -> &History {
        self.state().history()
    }
}
