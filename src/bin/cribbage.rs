use clap::Parser;
use cribbage_rs::autoplay::{play_match, MAX_MATCH_STEPS};
use cribbage_rs::config::{GameConfig, DEFAULT_HISTORY_CAPACITY, WINNING_SCORE};
use cribbage_rs::game::{Game, Seat};
use std::error::Error;

/// Simulate cribbage matches with a first-legal-move driver and print the results.
#[derive(Debug, Parser)]
#[command(name = "cribbage", version, about)]
struct Args {
    /// Shuffle seed; match N uses seed + N. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of matches to play.
    #[arg(long, default_value_t = 1)]
    matches: u64,
    /// Score that wins a match.
    #[arg(long, default_value_t = WINNING_SCORE)]
    target: u16,
    /// Player names, seat one first.
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
    names: Option<Vec<String>>,
    /// History lines to keep and print per match.
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history: usize,
}

impl Args {
    fn config(&self, round: u64) -> GameConfig {
        let mut cfg = GameConfig::default()
            .with_target_score(self.target)
            .with_history_capacity(self.history);
        if let Some(seed) = self.seed {
            cfg = cfg.with_seed(seed.wrapping_add(round));
        }
        if let Some([first, second]) = self.names.as_deref() {
            cfg = cfg.with_names(first.clone(), second.clone());
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::info!("cribbage-rs {} simulating {} match(es)", cribbage_rs::VERSION, args.matches);

    let mut wins = [0u64; 2];
    for round in 0..args.matches {
        let config = args.config(round);
        let names = config.player_names.clone();
        let mut game = Game::new(config);
        let winner = play_match(&mut game, MAX_MATCH_STEPS)?;
        let state = game.state();

        println!("== match {} ==", round + 1);
        for line in state.history().entries().collect::<Vec<_>>().into_iter().rev() {
            println!("  {line}");
        }
        println!(
            "  final: {} {} - {} {}",
            names[0],
            state.score(Seat::One),
            state.score(Seat::Two),
            names[1]
        );
        match winner {
            Some(seat) => wins[seat.index()] += 1,
            None => log::warn!("match {} stopped after {MAX_MATCH_STEPS} steps", round + 1),
        }
    }
    if args.matches > 1 {
        println!("wins: {} / {}", wins[0], wins[1]);
    }
    Ok(())
}
