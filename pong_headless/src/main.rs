//! Headless Pong runner
//!
//! Plays a full match at a fixed 60 Hz with scripted human input and
//! prints every match event as a JSON line on stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pong_core::{Difficulty, Game, MatchConfig, MatchState, PaddleOwner, PlayerCount, Side};

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "pong-headless")]
#[command(about = "Run a Pong match without a display", long_about = None)]
struct Cli {
    /// Match config JSON file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// AI tier (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Human players (1 or 2)
    #[arg(long)]
    players: Option<u8>,

    /// Points needed to win (5, 10, 20 or 50)
    #[arg(long)]
    win: Option<u32>,

    /// Chance of a comment after a goal against the AI
    #[arg(long)]
    taunt: Option<f32>,

    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// How well the scripted humans track the ball, 0 to 1
    #[arg(long, default_value_t = 0.6)]
    skill: f32,

    /// Stop after this much simulated time
    #[arg(long, default_value_t = 900.0)]
    max_seconds: f32,
}

impl Cli {
    fn match_config(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => MatchConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(players) = self.players {
            config.players = PlayerCount::try_from(players)?;
        }
        if let Some(win) = self.win {
            config.win_threshold = win;
        }
        if let Some(taunt) = self.taunt {
            config.taunt_probability = taunt;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Steer a human paddle toward the ball, scaled by `skill`
fn follow_ball(game: &Game, side: Side, skill: f32) -> f32 {
    let (Some(ball), Some(paddle)) = (game.ball(), game.paddle(side)) else {
        return 0.0;
    };
    let incoming = ball.vel.x * side.direction() > 0.0;
    let target = if incoming { ball.pos.y } else { 0.0 };
    ((target - paddle.y) * 8.0).clamp(-1.0, 1.0) * skill
}

fn print_event(now: f32, event: &pong_core::GameEvent) -> Result<()> {
    let mut line = serde_json::to_value(event)?;
    if let Some(map) = line.as_object_mut() {
        map.insert("t".to_string(), serde_json::json!(now));
    }
    println!("{line}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.match_config()?;
    let two_players = !config.is_single_player();

    tracing::info!(seed = cli.seed, ?config, "starting headless match");

    let mut game = Game::new(config, cli.seed)?;
    game.start_match();

    let skill = cli.skill.clamp(0.0, 1.0);
    while game.state() != MatchState::Over && game.time.now < cli.max_seconds {
        let left = follow_ball(&game, Side::Left, skill);
        game.set_input(PaddleOwner::HumanOne, left);
        if two_players {
            let right = follow_ball(&game, Side::Right, skill);
            game.set_input(PaddleOwner::HumanTwo, right);
        }

        game.step(FRAME_DT);

        for event in game.drain_events() {
            print_event(game.time.now, &event)?;
        }
    }

    if game.state() != MatchState::Over {
        tracing::warn!(max_seconds = cli.max_seconds, "time limit reached before a winner");
    }

    println!(
        "{}",
        serde_json::json!({
            "event": "final",
            "left": game.score.left,
            "right": game.score.right,
            "winner": game.score.has_winner(game.config.win_threshold),
            "seconds": game.time.now,
        })
    );

    Ok(())
}
