use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use log::info;
use royal_ur::{Driver, GameSettings, LutAgent, LutFile, PlayerType, RandomAgent, RuleEngine, StateEncoder};

/// Only the two Standard-board variants: the LUT agent this subcommand
/// drives needs `StateEncoder`, which only encodes the Standard board (see
/// `cli::generate::Variant`). Aseb is playable through the library but has
/// no LUT corpus to pit against a random opponent here.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Variant {
    Finkel,
    Masters,
}

impl Variant {
    fn settings(self) -> GameSettings {
        match self {
            Self::Finkel => GameSettings::finkel(),
            Self::Masters => GameSettings::masters(),
        }
    }
}

/// Plays a batch of complete games, a look-up-table agent as light against
/// a uniformly-random agent as dark, and reports the light win rate — a
/// smoke test that a LUT agent beats a random opponent in most games, not
/// a tool for producing the table itself.
#[derive(Args, Debug)]
pub struct Play {
    #[arg(short, long, value_enum, default_value_t = Variant::Finkel)]
    variant: Variant,
    #[arg(long)]
    lut: PathBuf,
    #[arg(short, long, default_value_t = 100)]
    games: u32,
}

impl Play {
    pub fn run(self) {
        let settings = self.variant.settings();
        let bytes = fs::read(&self.lut)
            .unwrap_or_else(|e| panic!("failed to read LUT file {}: {e}", self.lut.display()));
        let lut = LutFile::read(&bytes).expect("malformed LUT file");

        let engine = RuleEngine::new(settings.clone());
        let encoder = StateEncoder::new();
        let lut_agent = LutAgent::new(&engine, &encoder, &lut);
        let random_agent = RandomAgent::new();

        let mut light_wins = 0u32;
        for game in 0..self.games {
            let mut driver = Driver::new(settings.clone());
            while !driver.is_finished() {
                driver.roll_dice(None);
                if driver.is_waiting_for_move() {
                    let mv = match driver.current().turn() {
                        PlayerType::Light => lut_agent.play(driver.current()),
                        PlayerType::Dark => random_agent.play(driver.current()),
                    };
                    driver
                        .make_move(mv)
                        .expect("agent always chooses a move from find_available_moves");
                }
            }
            if driver.get_winner() == Some(PlayerType::Light) {
                light_wins += 1;
            }
            if (game + 1) % 10 == 0 {
                info!("played {}/{} games", game + 1, self.games);
            }
        }

        let win_rate = f64::from(light_wins) / f64::from(self.games) * 100.0;
        info!(
            "light (LUT agent) won {light_wins}/{} games ({win_rate:.1}%)",
            self.games
        );
    }
}
