//! Session Registry
//!
//! Keeps one `GameManager` per `(username, profile)` pair. The map sits
//! behind an async `RwLock`; each session behind its own `Mutex`, so distinct
//! sessions step in parallel while a single session is stepped by one caller
//! at a time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::core::rng::derive_session_seed;
use crate::game::difficulty::{Difficulty, DifficultyError};
use crate::game::input::{parse_inputs, Input, InputError};
use crate::game::level::LevelTable;
use crate::game::snapshot::WorldSnapshot;
use crate::game::state::GameManager;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Raw input string contained an unknown command.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Difficulty name not recognized.
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
}

/// Identifies a session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey {
    /// Account name.
    pub username: String,
    /// Profile within the account.
    pub profile: String,
}

impl SessionKey {
    /// Build a key.
    pub fn new(username: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile: profile.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.username, self.profile)
    }
}

/// Registry configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Used when a caller gives no difficulty.
    pub default_difficulty: Difficulty,
    /// Shared by every new session; `None` uses the built-in fallback.
    pub level_table: Option<LevelTable>,
}

type SharedSession = Arc<Mutex<GameManager>>;

/// All live sessions.
pub struct SessionRegistry {
    config: SessionConfig,
    sessions: RwLock<BTreeMap<SessionKey, SharedSession>>,
    nonce: AtomicU64,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(BTreeMap::new()),
            nonce: AtomicU64::new(0),
        }
    }

    fn create_session(&self, key: &SessionKey, difficulty: Option<Difficulty>) -> GameManager {
        let difficulty = difficulty.unwrap_or(self.config.default_difficulty);
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let seed = derive_session_seed(&key.username, &key.profile, nonce);

        info!("New session {} ({}, seed {:#018x})", key, difficulty, seed);
        GameManager::with_levels(difficulty, seed, self.config.level_table.clone())
    }

    /// Start a new session, replacing any existing one for `key`.
    pub async fn new_game(&self, key: SessionKey, difficulty: Option<Difficulty>) -> WorldSnapshot {
        let state = self.create_session(&key, difficulty);
        let snapshot = state.snapshot();

        let mut sessions = self.sessions.write().await;
        if sessions.insert(key.clone(), Arc::new(Mutex::new(state))).is_some() {
            debug!("Session {} replaced", key);
        }
        snapshot
    }

    /// Step a session by one frame.
    ///
    /// A missing session is created and its initial snapshot returned
    /// without stepping. An ended session is returned unchanged.
    pub async fn update(
        &self,
        key: &SessionKey,
        dt: f64,
        inputs: &[Input],
        difficulty: Option<Difficulty>,
    ) -> WorldSnapshot {
        let existing = self.sessions.read().await.get(key).cloned();

        let session = match existing {
            Some(session) => session,
            None => {
                let mut sessions = self.sessions.write().await;
                // Another caller may have created it between the locks
                if let Some(session) = sessions.get(key) {
                    session.clone()
                } else {
                    let state = self.create_session(key, difficulty);
                    let snapshot = state.snapshot();
                    sessions.insert(key.clone(), Arc::new(Mutex::new(state)));
                    return snapshot;
                }
            }
        };

        let mut state = session.lock().await;
        if !state.is_running() {
            return state.snapshot();
        }

        let result = state.update(dt, inputs);
        if result.session_ended {
            info!("Session {} ended: score {}, level {}", key, state.score, state.level);
        }
        state.snapshot()
    }

    /// `update` from raw wire strings.
    pub async fn update_wire(
        &self,
        key: &SessionKey,
        dt: f64,
        raw_inputs: &str,
        difficulty: Option<&str>,
    ) -> Result<WorldSnapshot, SessionError> {
        let inputs = parse_inputs(raw_inputs)?;
        let difficulty = difficulty.map(str::parse::<Difficulty>).transpose()?;
        Ok(self.update(key, dt, &inputs, difficulty).await)
    }

    /// Current snapshot, if the session exists.
    pub async fn snapshot(&self, key: &SessionKey) -> Option<WorldSnapshot> {
        let session = self.sessions.read().await.get(key).cloned()?;
        let state = session.lock().await;
        Some(state.snapshot())
    }

    /// Drop a session. Returns its last snapshot.
    pub async fn end_session(&self, key: &SessionKey) -> Option<WorldSnapshot> {
        let session = self.sessions.write().await.remove(key)?;
        let state = session.lock().await;
        debug!("Session {} removed", key);
        Some(state.snapshot())
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> SessionKey {
        SessionKey::new(name, "main")
    }

    #[tokio::test]
    async fn test_first_update_creates_without_stepping() {
        let registry = SessionRegistry::default();
        let snapshot = registry.update(&key("ada"), 0.5, &[Input::Thrust], None).await;

        assert_eq!(snapshot.time, 0.0);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.player.lives, 3);
        assert_eq!(registry.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_second_update_steps() {
        let registry = SessionRegistry::default();
        registry.update(&key("ada"), 0.1, &[], None).await;
        let snapshot = registry.update(&key("ada"), 0.1, &[Input::Thrust], None).await;

        assert!((snapshot.time - 0.1).abs() < 1e-12);
        assert!(snapshot.player.position.y != 500.0 || snapshot.player.position.x != 500.0);
    }

    #[tokio::test]
    async fn test_new_game_replaces() {
        let registry = SessionRegistry::default();
        let k = key("bob");
        registry.update(&k, 0.1, &[], None).await;
        registry.update(&k, 0.1, &[], None).await;

        let fresh = registry.new_game(k.clone(), Some(Difficulty::Hard)).await;
        assert_eq!(fresh.time, 0.0);
        assert_eq!(registry.session_count().await, 1);
        assert_eq!(registry.snapshot(&k).await, Some(fresh));
    }

    #[tokio::test]
    async fn test_ended_session_frozen() {
        let registry = SessionRegistry::default();
        let k = key("cy");
        registry.new_game(k.clone(), None).await;

        {
            let sessions = registry.sessions.read().await;
            let mut state = sessions[&k].lock().await;
            state.running = false;
        }

        let before = registry.snapshot(&k).await;
        let after = registry.update(&k, 0.5, &[Input::Fire], None).await;
        assert_eq!(before, Some(after));
    }

    #[tokio::test]
    async fn test_update_wire_errors() {
        let registry = SessionRegistry::default();
        let k = key("dee");

        let bad_input = registry.update_wire(&k, 0.1, "UP,JUMP", None).await;
        assert!(matches!(bad_input, Err(SessionError::Input(_))));

        let bad_difficulty = registry.update_wire(&k, 0.1, "UP", Some("NIGHTMARE")).await;
        assert!(matches!(bad_difficulty, Err(SessionError::Difficulty(_))));

        assert_eq!(registry.session_count().await, 0);
        assert!(registry.update_wire(&k, 0.1, "UP,SHOOT", Some("EASY")).await.is_ok());
        assert_eq!(registry.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_end_session() {
        let registry = SessionRegistry::default();
        let k = key("eve");
        assert!(registry.end_session(&k).await.is_none());

        registry.new_game(k.clone(), None).await;
        assert!(registry.end_session(&k).await.is_some());
        assert_eq!(registry.session_count().await, 0);
        assert!(registry.snapshot(&k).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_independent() {
        let registry = Arc::new(SessionRegistry::default());
        let mut handles = Vec::new();

        for name in ["p1", "p2", "p3", "p4"] {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let k = key(name);
                for _ in 0..30 {
                    registry.update(&k, 1.0 / 60.0, &[Input::Fire], None).await;
                }
                registry.snapshot(&k).await
            }));
        }

        for handle in handles {
            let snapshot = handle.await.unwrap().unwrap();
            assert!((snapshot.time - 29.0 / 60.0).abs() < 1e-9 || !snapshot.is_running);
        }
        assert_eq!(registry.session_count().await, 4);
    }
}
