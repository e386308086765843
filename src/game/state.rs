//! Session State
//!
//! `GameManager` owns everything one session simulates: the ship, the
//! enemy pool (alien bullets included), the player bullet pool, score,
//! level, elapsed time and the session RNG. Stepping lives in `tick.rs`.

use serde::{Serialize, Deserialize};

use crate::core::consts::{
    COMET_SPEED_FACTOR, MAX_ASTEROID_SPEED, PROTECTED_DISTANCE, SCORE_PER_ALIEN,
    SCORE_PER_ASTEROID, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_ATTEMPTS,
};
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vector2D;
use crate::game::alien::Alien;
use crate::game::asteroid::{Asteroid, AsteroidSize};
use crate::game::bullet::Bullet;
use crate::game::difficulty::Difficulty;
use crate::game::enemy::{Enemy, EnemyType};
use crate::game::events::GameEvent;
use crate::game::level::{self, LevelCounts, LevelTable};
use crate::game::pool::{EntityPool, Handle};
use crate::game::snapshot::WorldSnapshot;
use crate::game::spaceship::Spaceship;

/// Parameters that fix a session's evolution together with its inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Difficulty preset
    pub difficulty: Difficulty,
    /// RNG seed
    pub seed: u64,
    /// External level table, if any
    pub level_table: Option<LevelTable>,
}

/// One player's in-progress game.
#[derive(Clone, Debug)]
pub struct GameManager {
    /// The player's ship
    pub player: Spaceship,

    /// Asteroids, comets, aliens and alien bullets
    pub enemies: EntityPool<Enemy>,

    /// Bullets fired by the player
    pub player_bullets: EntityPool<Bullet>,

    /// Accumulated score
    pub score: u64,

    /// Current level (1-based)
    pub level: u32,

    /// Seconds simulated while running
    pub elapsed_time: f64,

    /// False once the player runs out of lives; never set back
    pub running: bool,

    /// Difficulty preset, fixed for the session
    pub difficulty: Difficulty,

    /// External level counts (None = formula only)
    pub level_table: Option<LevelTable>,

    /// Session RNG (all randomness goes through this)
    pub rng: DeterministicRng,

    /// Steps taken (zero-dt calls excluded)
    pub frame: u64,

    seed: u64,
}

impl GameManager {
    /// Start a session at level 1 using the level formula.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_levels(difficulty, seed, None)
    }

    /// Start a session at level 1 with an optional external level table.
    pub fn with_levels(difficulty: Difficulty, seed: u64, level_table: Option<LevelTable>) -> Self {
        let mut state = Self {
            player: Spaceship::new(),
            enemies: EntityPool::new(),
            player_bullets: EntityPool::new(),
            score: 0,
            level: 1,
            elapsed_time: 0.0,
            running: true,
            difficulty,
            level_table,
            rng: DeterministicRng::new(seed),
            frame: 0,
            seed,
        };
        state.start_level();
        state
    }

    /// Start a session from recorded parameters.
    pub fn from_params(params: &SessionParams) -> Self {
        Self::with_levels(params.difficulty, params.seed, params.level_table.clone())
    }

    /// Parameters this session was created with.
    pub fn params(&self) -> SessionParams {
        SessionParams {
            difficulty: self.difficulty,
            seed: self.seed,
            level_table: self.level_table.clone(),
        }
    }

    /// Seed the session RNG started from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Still accepting steps.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Enemy counts the current level starts with.
    pub fn level_counts(&self) -> LevelCounts {
        level::counts_for(self.level_table.as_ref(), self.level)
    }

    // =========================================================================
    // SPAWNING
    // =========================================================================

    /// Populate the enemy pool for the current level.
    pub fn start_level(&mut self) -> LevelCounts {
        let counts = self.level_counts();

        let kinds = std::iter::repeat(EnemyType::Asteroid)
            .take(counts.asteroids as usize)
            .chain(std::iter::repeat(EnemyType::Comet).take(counts.comets as usize))
            .chain(std::iter::repeat(EnemyType::Alien).take(counts.aliens as usize));

        for kind in kinds {
            if let Some(enemy) = self.create_enemy(kind) {
                self.enemies.spawn(enemy);
            }
        }
        self.enemies.commit();

        counts
    }

    /// Random point farther than `PROTECTED_DISTANCE` from the player.
    ///
    /// After `SPAWN_ATTEMPTS` misses, the last sample is used anyway.
    pub fn spawn_position(&mut self) -> Vector2D {
        let player = self.player.body.position();
        let mut candidate = player;

        for _ in 0..SPAWN_ATTEMPTS {
            candidate = self.rng.random_position(SCREEN_WIDTH, SCREEN_HEIGHT);
            if candidate.distance(player) > PROTECTED_DISTANCE {
                break;
            }
        }

        candidate
    }

    /// Build a fresh level enemy. Bullets are never spawned this way.
    pub fn create_enemy(&mut self, kind: EnemyType) -> Option<Enemy> {
        let position = self.spawn_position();
        let orientation = self.rng.random_angle();
        let rotational_velocity = self.rng.next_f64();

        let enemy: Enemy = match kind {
            EnemyType::Asteroid => {
                let velocity = self.rng.random_jitter(MAX_ASTEROID_SPEED);
                Asteroid::new(position, velocity, orientation, AsteroidSize::Large, rotational_velocity).into()
            }
            EnemyType::Comet => {
                let velocity = self.rng.random_jitter(MAX_ASTEROID_SPEED * COMET_SPEED_FACTOR);
                Asteroid::new(position, velocity, orientation, AsteroidSize::Comet, rotational_velocity).into()
            }
            EnemyType::Alien => Alien::new(position, &mut self.rng).into(),
            EnemyType::Bullet => return None,
        };

        Some(enemy)
    }

    // =========================================================================
    // SCORING & DESTRUCTION
    // =========================================================================

    /// Add `base · level · score_multiplier` (truncated) to the score.
    pub fn award(&mut self, base: u64) -> u64 {
        let raw = base.saturating_mul(self.level as u64) as f64 * self.difficulty.score_multiplier();
        let points = raw as u64;
        self.score = self.score.saturating_add(points);
        points
    }

    /// Destroy the enemy at `handle`, applying its type's rules.
    ///
    /// Removals and child spawns are deferred until the pool commits;
    /// a comet is swapped for an alien in place.
    pub fn destroy_enemy(&mut self, handle: Handle, events: &mut Vec<GameEvent>) {
        let Some(enemy) = self.enemies.get(handle) else {
            return;
        };

        let enemy_type = enemy.enemy_type();
        let position = enemy.body().position();
        let velocity = enemy.body().velocity;
        let orientation = enemy.body().orientation();
        let size = enemy.asteroid_size();

        match enemy_type {
            EnemyType::Asteroid => {
                let points = self.award(SCORE_PER_ASTEROID);
                events.push(GameEvent::enemy_destroyed(self.frame, enemy_type, points));

                if let Some((from, child)) = size.and_then(|s| s.split().map(|c| (s, c))) {
                    for _ in 0..2 {
                        let child_velocity = velocity + self.rng.random_jitter(MAX_ASTEROID_SPEED);
                        let spin = self.rng.next_f64();
                        let piece = Asteroid::new(position, child_velocity, orientation, child, spin);
                        self.enemies.spawn(piece.into());
                    }
                    events.push(GameEvent::asteroid_split(self.frame, from, child));
                }
                self.enemies.remove(handle);
            }
            EnemyType::Comet => {
                let points = self.award(SCORE_PER_ASTEROID);
                events.push(GameEvent::enemy_destroyed(self.frame, enemy_type, points));

                let alien = Alien::new(position, &mut self.rng);
                self.enemies.replace(handle, alien.into());
                events.push(GameEvent::comet_transformed(self.frame));
            }
            EnemyType::Alien => {
                let points = self.award(SCORE_PER_ALIEN);
                events.push(GameEvent::enemy_destroyed(self.frame, enemy_type, points));
                self.enemies.remove(handle);
            }
            EnemyType::Bullet => {
                events.push(GameEvent::enemy_destroyed(self.frame, enemy_type, 0));
                self.enemies.remove(handle);
            }
        }
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Client-facing snapshot of the current state.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }

    /// Hash of the full simulation state.
    ///
    /// Equal hashes mean equal worlds, down to float bits and RNG state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.rng.state(), |hasher| {
            self.player.hash_into(hasher);

            hasher.update_u32(self.enemies.len() as u32);
            for enemy in self.enemies.iter() {
                enemy.hash_into(hasher);
            }

            hasher.update_u32(self.player_bullets.len() as u32);
            for bullet in self.player_bullets.iter() {
                bullet.hash_into(hasher);
            }

            hasher.update_u64(self.score);
            hasher.update_u32(self.level);
            hasher.update_f64(self.elapsed_time);
            hasher.update_bool(self.running);
            hasher.update_u8(self.difficulty as u8);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_session(difficulty: Difficulty) -> GameManager {
        let mut state = GameManager::new(difficulty, 1234);
        state.enemies.clear();
        state
    }

    fn destroy_first(state: &mut GameManager) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let handle = state.enemies.handles()[0];
        state.destroy_enemy(handle, &mut events);
        state.enemies.commit();
        events
    }

    #[test]
    fn test_new_session() {
        let state = GameManager::new(Difficulty::Medium, 42);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert!(state.running);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies.iter().next().unwrap().enemy_type(), EnemyType::Asteroid);
    }

    #[test]
    fn test_oversized_level_entry_spawns_formula_wave() {
        let table: LevelTable = serde_json::from_str(
            r#"{"levels": {"1": {"ASTEROID": 4000000000, "COMET": 0, "ALIEN": 0}}}"#,
        )
        .unwrap();
        let state = GameManager::with_levels(Difficulty::Medium, 42, Some(table));

        assert_eq!(state.level_counts(), LevelCounts::fallback(1));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_level_table_used() {
        let table = LevelTable::from_counts([(1, LevelCounts { asteroids: 2, comets: 1, aliens: 1 })]);
        let state = GameManager::with_levels(Difficulty::Easy, 42, Some(table));

        let types: Vec<EnemyType> = state.enemies.iter().map(|e| e.enemy_type()).collect();
        assert_eq!(types, vec![EnemyType::Asteroid, EnemyType::Asteroid, EnemyType::Comet, EnemyType::Alien]);
    }

    #[test]
    fn test_spawns_outside_protected_zone() {
        let mut state = GameManager::new(Difficulty::Medium, 5);
        let player = state.player.body.position();
        for _ in 0..200 {
            assert!(state.spawn_position().distance(player) > PROTECTED_DISTANCE);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameManager::new(Difficulty::Hard, 77);
        let b = GameManager::new(Difficulty::Hard, 77);
        let c = GameManager::new(Difficulty::Hard, 78);
        assert_eq!(a.compute_hash(), b.compute_hash());
        assert_ne!(a.compute_hash(), c.compute_hash());
    }

    #[test]
    fn test_split_conservation() {
        for (size, expected_children, child_size) in [
            (AsteroidSize::Large, 2, Some(AsteroidSize::Medium)),
            (AsteroidSize::Medium, 2, Some(AsteroidSize::Small)),
            (AsteroidSize::Small, 0, None),
        ] {
            let mut state = empty_session(Difficulty::Medium);
            state.level = 3;
            state.enemies.push(
                Asteroid::new(Vector2D::new(100.0, 100.0), Vector2D::new(5.0, 5.0), 1.0, size, 0.0).into(),
            );

            destroy_first(&mut state);

            assert_eq!(state.enemies.len(), expected_children);
            assert!(state.enemies.iter().all(|e| e.asteroid_size() == child_size));
            assert!(state.enemies.iter().all(|e| e.health() == child_size.map_or(0, |s| s.health())));
            assert!(state.enemies.iter().all(|e| (e.body().orientation() - 1.0).abs() < 1e-12));
            assert_eq!(state.score, SCORE_PER_ASTEROID * 3);
        }
    }

    #[test]
    fn test_comet_becomes_alien_in_place() {
        let mut state = empty_session(Difficulty::Hard);
        state.enemies.push(
            Asteroid::new(Vector2D::new(100.0, 100.0), Vector2D::ZERO, 0.0, AsteroidSize::Large, 0.0).into(),
        );
        state.enemies.push(
            Asteroid::new(Vector2D::new(800.0, 200.0), Vector2D::ZERO, 0.0, AsteroidSize::Comet, 0.0).into(),
        );

        let mut events = Vec::new();
        let comet = state.enemies.handles()[1];
        state.destroy_enemy(comet, &mut events);
        state.enemies.commit();

        let types: Vec<EnemyType> = state.enemies.iter().map(|e| e.enemy_type()).collect();
        assert_eq!(types, vec![EnemyType::Asteroid, EnemyType::Alien]);
        assert_eq!(state.enemies.iter().nth(1).unwrap().body().position(), Vector2D::new(800.0, 200.0));
        // HARD doubles the score
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_alien_and_bullet_scores() {
        let mut state = empty_session(Difficulty::Easy);
        state.level = 2;
        let mut rng = DeterministicRng::new(9);
        state.enemies.push(Alien::new(Vector2D::new(100.0, 100.0), &mut rng).into());
        state.enemies.push(Bullet::new(Vector2D::new(300.0, 300.0), 0.0, 1).into());

        destroy_first(&mut state);
        // 50 * 2 * 0.5
        assert_eq!(state.score, 50);

        destroy_first(&mut state);
        assert_eq!(state.score, 50);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_easy_score_truncates() {
        let mut state = empty_session(Difficulty::Easy);
        assert_eq!(state.award(5), 2);
        assert_eq!(state.score, 2);
    }
}
