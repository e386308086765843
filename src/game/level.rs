//! Level Composition
//!
//! How many asteroids, comets and aliens each level starts with. Levels
//! `1..=22` may come from an external table; anything else (or a missing
//! table) uses the formula `asteroids = n, comets = n/5, aliens = n/15`.
//! Table entries spawning more than `LEVEL_ENEMY_LIMIT` enemies are
//! rejected and fall back to the formula.
//!
//! ## File format
//!
//! ```json
//! {"levels": {"1": {"ASTEROID": 1, "COMET": 0, "ALIEN": 0}, ...}}
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::consts::{LEVEL_ENEMY_LIMIT, LEVEL_TABLE_MAX};

/// Errors from loading level data.
#[derive(Debug, thiserror::Error)]
pub enum LevelDataError {
    /// File could not be read.
    #[error("Failed to read level data: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a valid level document.
    #[error("Malformed level data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Enemy counts for one level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    /// LARGE asteroids
    #[serde(rename = "ASTEROID")]
    pub asteroids: u32,
    /// Comets
    #[serde(rename = "COMET")]
    pub comets: u32,
    /// Aliens
    #[serde(rename = "ALIEN")]
    pub aliens: u32,
}

impl LevelCounts {
    /// Counts from the built-in formula.
    pub fn fallback(level: u32) -> Self {
        Self {
            asteroids: level,
            comets: level / 5,
            aliens: level / 15,
        }
    }

    /// Total enemies.
    pub fn total(&self) -> u32 {
        self.asteroids
            .saturating_add(self.comets)
            .saturating_add(self.aliens)
    }

    /// Small enough for a table entry.
    pub fn within_limit(&self) -> bool {
        self.total() <= LEVEL_ENEMY_LIMIT
    }
}

#[derive(Deserialize)]
struct LevelDocument {
    levels: BTreeMap<String, LevelCounts>,
}

/// Per-level enemy counts loaded from configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: BTreeMap<u32, LevelCounts>,
}

impl LevelTable {
    /// Parse a level document.
    ///
    /// Keys that are not level numbers in `1..=22` are skipped, as are
    /// entries over `LEVEL_ENEMY_LIMIT` enemies.
    pub fn from_json_str(json: &str) -> Result<Self, LevelDataError> {
        let document: LevelDocument = serde_json::from_str(json)?;
        let mut levels = BTreeMap::new();

        for (key, counts) in document.levels {
            match key.trim().parse::<u32>() {
                Ok(level) if (1..=LEVEL_TABLE_MAX).contains(&level) => {
                    if counts.within_limit() {
                        levels.insert(level, counts);
                    } else {
                        debug!("Level {} spawns {} enemies, using formula", level, counts.total());
                    }
                }
                _ => debug!("Skipping level entry {:?}", key),
            }
        }

        Ok(Self { levels })
    }

    /// Read and parse a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelDataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Build a table directly from counts.
    pub fn from_counts(entries: impl IntoIterator<Item = (u32, LevelCounts)>) -> Self {
        let levels = entries
            .into_iter()
            .filter(|(level, counts)| (1..=LEVEL_TABLE_MAX).contains(level) && counts.within_limit())
            .collect();
        Self { levels }
    }

    /// Counts for `level`: the table entry if there is one, else the formula.
    ///
    /// Oversized entries (from a table deserialized directly) also fall back.
    pub fn counts_for(&self, level: u32) -> LevelCounts {
        self.levels
            .get(&level)
            .copied()
            .filter(LevelCounts::within_limit)
            .unwrap_or_else(|| LevelCounts::fallback(level))
    }

    /// Number of levels described.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Describes no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Counts for `level` from an optional table.
pub fn counts_for(table: Option<&LevelTable>, level: u32) -> LevelCounts {
    match table {
        Some(table) => table.counts_for(level),
        None => LevelCounts::fallback(level),
    }
}

// =============================================================================
// TESTS
// =============================================================================
