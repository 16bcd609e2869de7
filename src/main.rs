//! Dodgefall headless runner
//!
//! Plays one round with a scripted dodge input per keyboard player and
//! prints the ranking. Window, sprites and audio live in the frontend.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use dodgefall::settings::{EndRule, RoundConfig};
use dodgefall::sim::tick::player_center;
use dodgefall::sim::{Direction, GameState, TickInput, run_round};

#[derive(Parser)]
#[command(name = "dodgefall")]
#[command(about = "Run a headless Dodgefall round and print the results")]
struct Args {
    /// JSON round configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of players (1-4)
    #[arg(short, long)]
    players: Option<u8>,

    /// How many of the players are bots
    #[arg(short, long)]
    bots: Option<u8>,

    #[arg(long)]
    width: Option<f32>,

    #[arg(long)]
    height: Option<f32>,

    #[arg(long)]
    tick_rate: Option<f32>,

    /// RNG seed for the round and the input script
    #[arg(short, long)]
    seed: Option<u64>,

    /// Round end rule: "all-dead" or "last-standing"
    #[arg(long)]
    end_rule: Option<String>,

    /// Stop after this many ticks even if the round is still running
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn round_config(&self) -> Result<RoundConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => RoundConfig::load(path)?,
            None => RoundConfig::default(),
        };
        if let Some(players) = self.players {
            config.player_count = players;
        }
        if let Some(bots) = self.bots {
            config.bot_count = bots;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rule) = &self.end_rule {
            config.end_rule = EndRule::from_str(rule)
                .ok_or_else(|| format!("unknown end rule '{rule}'"))?;
        }
        Ok(config)
    }
}

/// Sidestep the nearest obstacle falling into the player's column, otherwise
/// wander a little
fn dodge_input(state: &GameState, rng: &mut Pcg32) -> TickInput {
    let intents = (0..state.players.len())
        .map(|i| {
            let center = player_center(state, i)?;
            let threat = state
                .obstacles
                .iter()
                .filter(|o| !o.destroyed)
                .map(|o| o.body.anchor() + o.body.size / 2.0)
                .filter(|c| c.y < center.y && (c.x - center.x).abs() < 40.0)
                .max_by(|a, b| a.y.total_cmp(&b.y));
            match threat {
                Some(c) if c.x >= center.x && center.x > 60.0 => Some(Direction::West),
                Some(_) if center.x < state.config.width - 60.0 => Some(Direction::East),
                Some(_) => Some(Direction::West),
                None if rng.random_bool(0.1) => Direction::from_index(rng.random_range(0..4)),
                None => None,
            }
        })
        .collect();
    TickInput::new(intents)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = args.round_config()?;
    let mut script_rng = Pcg32::seed_from_u64(config.seed ^ 0x5eed);
    let mut state = GameState::new(config);

    let ticks = run_round(&mut state, args.max_ticks, |s| dodge_input(s, &mut script_rng));
    log::info!(
        "Stopped after {} ticks ({:?}), {} obstacles avoided",
        ticks,
        state.phase,
        state.avoided
    );

    let result = state.results();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Round finished after {} ticks", ticks);
        for (rank, entry) in result.entries.iter().enumerate() {
            println!(
                "{}. Player {} - {} avoided{}",
                rank + 1,
                entry.player_id,
                entry.score,
                if entry.survived { " (survived)" } else { "" }
            );
        }
        println!("{} player(s) survived", result.survivors().count());
    }
    Ok(())
}
