use super::{Award, ScoreReason};
use crate::cards::Card;

pub const FIFTEEN: u8 = 15;
pub const THIRTY_ONE: u8 = 31;

/// Score the card just played during pegging.
///
/// `cards` is the pegging stack since it was last cleared, most recent last, without
/// the starter. `running_total` is the count after the play. Awards come back in the
/// fixed order fifteen/thirty-one, pair tier, run.
///
/// ```
/// use cribbage_rs::cards::parse_cards;
/// use cribbage_rs::scoring::{score_play, ScoreReason};
///
/// let played = parse_cards("4c 6d 5h").unwrap();
/// let awards = score_play(&played, 15);
/// assert_eq!(awards[0].reason, ScoreReason::Fifteen);
/// assert_eq!(awards[1].reason, ScoreReason::Run(3));
/// ```
pub fn score_play(cards: &[Card], running_total: u8) -> Vec<Award> {
    let mut awards = Vec::new();
    if cards.is_empty() {
        return awards;
    }
    if running_total == FIFTEEN {
        awards.push(Award::new(ScoreReason::Fifteen, 2));
    } else if running_total == THIRTY_ONE {
        awards.push(Award::new(ScoreReason::ThirtyOne, 2));
    }
    match same_rank_streak(cards) {
        1 => awards.push(Award::new(ScoreReason::Pair, 2)),
        2 => awards.push(Award::new(ScoreReason::Triple, 6)),
        3 => awards.push(Award::new(ScoreReason::Quad, 12)),
        _ => {}
    }
    if let Some(len) = longest_suffix_run(cards) {
        awards.push(Award::new(ScoreReason::Run(len as u8), len as u8));
    }
    awards
}

/// How many cards directly before the last one share its rank.
pub(crate) fn same_rank_streak(cards: &[Card]) -> usize {
    let Some((last, earlier)) = cards.split_last() else {
        return 0;
    };
    earlier.iter().rev().take_while(|c| c.rank() == last.rank()).count()
}

/// Length of the longest suffix (at least three cards) whose ranks form a contiguous
/// set, regardless of play order.
pub(crate) fn longest_suffix_run(cards: &[Card]) -> Option<usize> {
    let n = cards.len();
    (3..=n).rev().find(|&len| {
        let mut orders: Vec<u8> = cards[n - len..].iter().map(|c| c.order()).collect();
        orders.sort_unstable();
        orders.windows(2).all(|w| w[1] == w[0] + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).expect("valid cards")
    }

    fn points(awards: &[Award]) -> u32 {
        awards.iter().map(|a| a.points as u32).sum()
    }

    #[test]
    fn fifteen_scores_two() {
        let a = score_play(&cards("7c 8d"), 15);
        assert_eq!(a, vec![Award::new(ScoreReason::Fifteen, 2)]);
    }

    #[test]
    fn thirty_one_scores_two() {
        let a = score_play(&cards("Kc Qd Jh Ac"), 31);
        assert_eq!(a, vec![Award::new(ScoreReason::ThirtyOne, 2)]);
    }

    #[test]
    fn pair_tiers() {
        assert_eq!(score_play(&cards("9c 9d"), 18), vec![Award::new(ScoreReason::Pair, 2)]);
        assert_eq!(score_play(&cards("3c 3d 3h"), 9), vec![Award::new(ScoreReason::Triple, 6)]);
        assert_eq!(score_play(&cards("2c 2d 2h 2s"), 8), vec![Award::new(ScoreReason::Quad, 12)]);
    }

    #[test]
    fn pair_streak_stops_at_first_mismatch() {
        // 4 . 5 . 5: only the trailing pair counts
        assert_eq!(same_rank_streak(&cards("5c 4d 5h 5s")), 1);
        assert_eq!(same_rank_streak(&cards("5c 4d 5h")), 0);
    }

    #[test]
    fn run_out_of_order_counts() {
        let a = score_play(&cards("4c 6d 5h"), 17);
        assert_eq!(a, vec![Award::new(ScoreReason::Run(3), 3)]);
    }

    #[test]
    fn only_longest_suffix_run_scores() {
        // 3 4 5 6 as a set: run of 4, not also a run of 3
        let a = score_play(&cards("3c 5d 4h 6s"), 18);
        assert_eq!(a, vec![Award::new(ScoreReason::Run(4), 4)]);
    }

    #[test]
    fn broken_suffix_has_no_run() {
        assert_eq!(longest_suffix_run(&cards("4c 5d 6h 6s")), None);
        assert_eq!(longest_suffix_run(&cards("Kc Ac 2d")), None);
        assert_eq!(longest_suffix_run(&cards("9c Ac 2d 3h")), Some(3));
    }

    #[test]
    fn fifteen_and_pair_and_run_stack_on_one_play() {
        let a = score_play(&cards("Kc 5d 5h"), 15);
        assert_eq!(a[0].reason, ScoreReason::Fifteen);
        assert_eq!(a[1].reason, ScoreReason::Pair);
        assert_eq!(points(&a), 4);
    }

    #[test]
    fn empty_stack_scores_nothing() {
        assert!(score_play(&[], 15).is_empty());
    }
}
