//! Drives a match forward with the first legal move at every step: the first two cards
//! of each hand go to the crib and the first card that fits is pegged. Used by the
//! simulator binary and by the full-match tests.

use crate::cards::Card;
use crate::engine::CribbageEngine;
use crate::game::{ActionError, Phase, ScoreEvent, Seat, DISCARDS};
use crate::scoring::pegging::THIRTY_ONE;
use log::debug;

/// Upper bound on steps for one match. A hand takes fewer than 30 steps and a match
/// needs well under 100 hands.
pub const MAX_MATCH_STEPS: usize = 20_000;

/// Take one action on behalf of whichever seat has to act.
pub fn step<E: CribbageEngine + ?Sized>(engine: &mut E) -> Result<Vec<ScoreEvent>, ActionError> {
    match engine.phase() {
        Phase::Deal => engine.deal().map(|()| Vec::new()),
        Phase::Discard => {
            let seat = Seat::BOTH
                .into_iter()
                .find(|&s| !engine.is_ready(s))
                .ok_or_else(|| ActionError::InvalidState("both seats ready in discard".into()))?;
            let picks: Vec<Card> = engine
                .hand(seat)
                .iter()
                .copied()
                .filter(|c| !engine.selected(seat).contains(c))
                .take(DISCARDS.saturating_sub(engine.selected(seat).len()))
                .collect();
            for card in picks {
                engine.toggle_discard(seat, card)?;
            }
            engine.confirm_discard(seat)?;
            Ok(Vec::new())
        }
        Phase::Cut => engine.cut_deck(),
        Phase::Pegging => {
            let seat = engine.active();
            let total = engine.running_total();
            let playable =
                engine.pegging_hand(seat).iter().copied().find(|c| total + c.value() <= THIRTY_ONE);
            match playable {
                Some(card) => engine.play_card(seat, card),
                None => engine.say_go(seat),
            }
        }
        Phase::Show => engine.score_show(),
        Phase::GameOver => Err(ActionError::GameOver),
    }
}

/// Play until someone wins or `max_steps` actions have been taken.
/// Returns the winner, if the match finished.
pub fn play_match<E: CribbageEngine + ?Sized>(
    engine: &mut E,
    max_steps: usize,
) -> Result<Option<Seat>, ActionError> {
    for _ in 0..max_steps {
        if engine.phase() == Phase::GameOver {
            break;
        }
        let events = step(engine)?;
        for e in &events {
            debug!("{} +{} ({})", e.seat, e.points, e.reason);
        }
    }
    Ok(engine.winner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn one_hand_cycles_back_to_deal() {
        let mut g = Game::with_seed(11);
        step(&mut g).unwrap();
        assert_eq!(g.state().phase(), Phase::Discard);
        step(&mut g).unwrap();
        step(&mut g).unwrap();
        assert_eq!(g.state().phase(), Phase::Cut);
        assert_eq!(g.state().crib().len(), 4);
        step(&mut g).unwrap();
        let mut guard = 0;
        while g.state().phase() == Phase::Pegging {
            step(&mut g).unwrap();
            guard += 1;
            assert!(guard < 40, "pegging did not finish");
        }
        if g.state().phase() == Phase::Show {
            step(&mut g).unwrap();
            assert_eq!(g.state().phase(), Phase::Deal);
            assert_eq!(g.state().dealer(), Seat::Two);
        }
    }

    #[test]
    fn seeded_matches_finish_with_a_winner() {
        let mut g = Game::with_seed(5);
        let winner = play_match(&mut g, MAX_MATCH_STEPS).unwrap();
        assert!(winner.is_some());
        let w = winner.unwrap();
        assert!(g.state().score(w) >= 121);
        assert!(g.state().score(w.other()) < 121);
        assert_eq!(step(&mut g), Err(ActionError::GameOver));
    }
}
