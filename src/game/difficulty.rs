//! Difficulty Presets
//!
//! Chosen once per session; the numbers never change afterwards.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// Errors from parsing a difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DifficultyError {
    /// Name is not a known preset.
    #[error("Unknown difficulty: {0:?} (expected EASY, MEDIUM or HARD)")]
    Unknown(String),
}

/// Numeric modifiers for one preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyModifiers {
    /// Multiplies every score award
    pub score_multiplier: f64,
    /// Multiplies player bullet damage
    pub bullet_damage_bonus: u32,
    /// Multiplies `dt` for enemy movement
    pub enemy_speed_multiplier: f64,
}

/// Difficulty preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Difficulty {
    /// Slow enemies, quadruple damage, half score
    Easy = 0,
    /// Baseline
    #[default]
    Medium = 1,
    /// Fast enemies, double score
    Hard = 2,
}

impl Difficulty {
    /// All presets.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Modifier table.
    pub const fn modifiers(self) -> DifficultyModifiers {
        match self {
            Difficulty::Easy => DifficultyModifiers {
                score_multiplier: 0.5,
                bullet_damage_bonus: 4,
                enemy_speed_multiplier: 0.75,
            },
            Difficulty::Medium => DifficultyModifiers {
                score_multiplier: 1.0,
                bullet_damage_bonus: 1,
                enemy_speed_multiplier: 1.0,
            },
            Difficulty::Hard => DifficultyModifiers {
                score_multiplier: 2.0,
                bullet_damage_bonus: 1,
                enemy_speed_multiplier: 1.5,
            },
        }
    }

    /// Score multiplier.
    #[inline]
    pub fn score_multiplier(self) -> f64 {
        self.modifiers().score_multiplier
    }

    /// Player bullet damage multiplier.
    #[inline]
    pub fn bullet_damage_bonus(self) -> u32 {
        self.modifiers().bullet_damage_bonus
    }

    /// Enemy time-scale.
    #[inline]
    pub fn enemy_speed_multiplier(self) -> f64 {
        self.modifiers().enemy_speed_multiplier
    }

    /// Wire literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            _ => Err(DifficultyError::Unknown(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_is_baseline() {
        let m = Difficulty::Medium.modifiers();
        assert_eq!(m.score_multiplier, 1.0);
        assert_eq!(m.bullet_damage_bonus, 1);
        assert_eq!(m.enemy_speed_multiplier, 1.0);
    }

    #[test]
    fn test_easy_and_hard_tables() {
        let easy = Difficulty::Easy.modifiers();
        assert_eq!(easy.score_multiplier, 0.5);
        assert_eq!(easy.bullet_damage_bonus, 4);
        assert_eq!(easy.enemy_speed_multiplier, 0.75);

        let hard = Difficulty::Hard.modifiers();
        assert_eq!(hard.score_multiplier, 2.0);
        assert_eq!(hard.bullet_damage_bonus, 1);
        assert_eq!(hard.enemy_speed_multiplier, 1.5);
    }

    #[test]
    fn test_parse() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "NIGHTMARE".parse::<Difficulty>(),
            Err(DifficultyError::Unknown("NIGHTMARE".to_string()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
    }
}
