use crate::Params;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Setup-time configuration failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unsupported win threshold {0} (expected one of 5, 10, 20, 50)")]
    UnsupportedWinThreshold(u32),
    #[error("unsupported player count {0} (expected 1 or 2)")]
    UnsupportedPlayerCount(u8),
    #[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("taunt probability {0} is outside [0, 1]")]
    InvalidTauntProbability(f32),
}

/// AI difficulty tier, fixed for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn params(self) -> TierParams {
        match self {
            Difficulty::Easy => TierParams {
                detection_radius: 5.0,
                acceleration: 1.0,
                serve_h_max: 10.0,
                serve_v_max: 5.0,
            },
            Difficulty::Medium => TierParams {
                detection_radius: 10.0,
                acceleration: 1.5,
                serve_h_max: 12.5,
                serve_v_max: 6.25,
            },
            Difficulty::Hard => TierParams {
                detection_radius: 15.0,
                acceleration: 2.0,
                serve_h_max: 15.0,
                serve_v_max: 7.5,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Per-tier tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierParams {
    pub detection_radius: f32,
    pub acceleration: f32,
    pub serve_h_max: f32,
    pub serve_v_max: f32,
}

/// Number of human players at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerCount {
    #[default]
    One,
    Two,
}

impl TryFrom<u8> for PlayerCount {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerCount::One),
            2 => Ok(PlayerCount::Two),
            n => Err(ConfigError::UnsupportedPlayerCount(n)),
        }
    }
}

impl From<PlayerCount> for u8 {
    fn from(value: PlayerCount) -> Self {
        match value {
            PlayerCount::One => 1,
            PlayerCount::Two => 2,
        }
    }
}

/// Match configuration, validated once before a match is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub difficulty: Difficulty,
    pub players: PlayerCount,
    pub win_threshold: u32,
    pub taunt_probability: f32,
    /// Show "Ready?" / "GO!" before every serve, not just the opening one
    pub announce_every_serve: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            players: PlayerCount::One,
            win_threshold: Params::WIN_THRESHOLDS[0],
            taunt_probability: Params::TAUNT_PROBABILITY,
            announce_every_serve: true,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Params::WIN_THRESHOLDS.contains(&self.win_threshold) {
            return Err(ConfigError::UnsupportedWinThreshold(self.win_threshold));
        }
        if !(0.0..=1.0).contains(&self.taunt_probability) {
            return Err(ConfigError::InvalidTauntProbability(self.taunt_probability));
        }
        Ok(())
    }

    pub fn is_single_player(&self) -> bool {
        self.players == PlayerCount::One
    }

    /// Serve speed bounds (H_max, V_max); two-player matches always use the easy bounds
    pub fn serve_bounds(&self) -> (f32, f32) {
        let tier = match self.players {
            PlayerCount::One => self.difficulty.params(),
            PlayerCount::Two => Difficulty::Easy.params(),
        };
        (tier.serve_h_max, tier.serve_v_max)
    }
}
