use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use woodpusher_core::Alliance;

/// Who plays which side.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    HumanVsHuman,
    HumanVsAi,
}

/// Engine strength, expressed as fixed search depth.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn search_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Which side the human takes against the engine.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SideChoice {
    White,
    Black,
    Random,
}

impl SideChoice {
    /// Resolves to a concrete alliance, flipping a coin for `Random`.
    pub fn resolve(self) -> Alliance {
        match self {
            SideChoice::White => Alliance::White,
            SideChoice::Black => Alliance::Black,
            SideChoice::Random => {
                if rand::random::<bool>() {
                    Alliance::White
                } else {
                    Alliance::Black
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub human_side: SideChoice,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: GameMode::HumanVsAi,
            difficulty: Difficulty::Medium,
            human_side: SideChoice::White,
        }
    }
}

impl GameConfig {
    /// Loads a TOML config file. A missing file is not an error; the
    /// defaults apply.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "cannot read config: {}", err),
            ConfigError::Parse(err) => write!(f, "cannot parse config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.search_depth(), 1);
        assert_eq!(Difficulty::Medium.search_depth(), 2);
        assert_eq!(Difficulty::Hard.search_depth(), 3);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.mode, GameMode::HumanVsAi);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.human_side, SideChoice::White);
    }

    #[test]
    fn test_parse_full_config() {
        let config: GameConfig = toml::from_str(
            r#"
            mode = "human_vs_human"
            difficulty = "hard"
            human_side = "random"
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, GameMode::HumanVsHuman);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.human_side, SideChoice::Random);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: GameConfig = toml::from_str("difficulty = \"easy\"").unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.mode, GameMode::HumanVsAi);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = GameConfig {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::Hard,
            human_side: SideChoice::Black,
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: GameConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.mode, config.mode);
        assert_eq!(parsed.difficulty, config.difficulty);
        assert_eq!(parsed.human_side, config.human_side);
    }

    #[test]
    fn test_fixed_sides_resolve_to_themselves() {
        assert_eq!(SideChoice::White.resolve(), Alliance::White);
        assert_eq!(SideChoice::Black.resolve(), Alliance::Black);
    }
}
