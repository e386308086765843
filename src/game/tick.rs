//! Simulation Step
//!
//! One call = one frame. Given the same starting state and the same
//! `(dt, inputs)` sequence, the result is bit-for-bit identical.
//!
//! ## Order of a step
//!
//! 1. Move the player
//! 2. Move enemies (difficulty-scaled `dt`)
//! 3. Move player bullets
//! 4. Aliens fire (bullets join the enemy pool, unmoved this frame)
//! 5. Player fires once per `Fire` command, up to `MAX_BULLETS` alive
//! 6. Bullets vs enemies, then player vs enemies
//! 7. Despawn expired bullets
//! 8. Next level if the enemy pool is empty
//! 9. Advance the clock

#[cfg(feature = "debug-tracing")]
use tracing::trace;
use tracing::debug;

use crate::core::consts::{MAX_BULLETS, SCORE_PER_LEVEL};
use crate::game::collision::{enemies_touching_player, first_enemy_hit};
use crate::game::events::GameEvent;
use crate::game::input::{fire_count, FrameRecord, Input};
use crate::game::state::GameManager;

/// Result of one step.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this step
    pub events: Vec<GameEvent>,
    /// Session is over (the player has no lives left)
    pub session_ended: bool,
}

/// Run one simulation step.
///
/// `dt == 0` is a strict no-op, as is a step on a session that has ended.
/// Negative or non-finite `dt` is treated like zero.
pub fn update(state: &mut GameManager, dt: f64, inputs: &[Input]) -> TickResult {
    let mut result = TickResult::default();

    if !state.running {
        result.session_ended = true;
        return result;
    }

    if !(dt.is_finite() && dt > 0.0) {
        return result;
    }

    state.frame += 1;

    // 1. Player
    state.player.advance(dt, inputs);

    // 2. Enemies
    let enemy_dt = dt * state.difficulty.enemy_speed_multiplier();
    for enemy in state.enemies.iter_mut() {
        enemy.advance(enemy_dt);
    }

    // 3. Player bullets
    for bullet in state.player_bullets.iter_mut() {
        bullet.advance(dt);
    }

    // 4. Enemy fire
    enemy_fire(state);

    // 5. Player fire
    player_fire(state, fire_count(inputs));

    // 6. Collisions
    resolve_bullet_hits(state, &mut result);
    resolve_player_contacts(state, &mut result);

    // 7. Despawn
    despawn_expired(state);

    // 8. Level completion
    if state.enemies.is_empty() {
        complete_level(state, &mut result);
    }

    // 9. Clock
    if state.running {
        state.elapsed_time += dt;
    }

    #[cfg(feature = "debug-tracing")]
    trace!(
        frame = state.frame,
        hash = %hex::encode(&state.compute_hash()[..8]),
        enemies = state.enemies.len(),
        bullets = state.player_bullets.len(),
        "Step complete"
    );

    result.session_ended = !state.running;
    result
}

impl GameManager {
    /// Run one simulation step. See [`update`].
    pub fn update(&mut self, dt: f64, inputs: &[Input]) -> TickResult {
        update(self, dt, inputs)
    }
}

/// Let every shooter fire at the player's current position.
fn enemy_fire(state: &mut GameManager) {
    let target = state.player.body.position();

    for handle in state.enemies.handles() {
        let Some(enemy) = state.enemies.get_mut(handle) else {
            continue;
        };
        if !enemy.can_shoot() {
            continue;
        }

        for bullet in enemy.shoot(target, &mut state.rng) {
            state.enemies.spawn(bullet.into());
        }
    }

    state.enemies.commit();
}

/// Spawn up to `shots` player bullets, dropping any past the cap.
fn player_fire(state: &mut GameManager, shots: usize) {
    for _ in 0..shots {
        if state.player_bullets.len() >= MAX_BULLETS {
            break;
        }
        let bullet = state.player.shoot();
        state.player_bullets.push(bullet);
    }
}

/// Each player bullet hits at most the first enemy it overlaps.
fn resolve_bullet_hits(state: &mut GameManager, result: &mut TickResult) {
    let damage_bonus = i64::from(state.difficulty.bullet_damage_bonus());

    for bullet_handle in state.player_bullets.handles() {
        let Some(bullet) = state.player_bullets.get(bullet_handle) else {
            continue;
        };
        let Some(target) = first_enemy_hit(bullet, &state.enemies) else {
            continue;
        };

        let damage = i64::from(bullet.damage) * damage_bonus;
        state.player_bullets.remove(bullet_handle);

        let killed = match state.enemies.get_mut(target) {
            Some(enemy) => {
                enemy.take_damage(damage);
                enemy.is_dead()
            }
            None => false,
        };

        if killed {
            state.destroy_enemy(target, &mut result.events);
        }
    }

    state.player_bullets.commit();
    state.enemies.commit();
}

/// Every overlapping enemy is a hit; invincibility absorbs repeats.
fn resolve_player_contacts(state: &mut GameManager, result: &mut TickResult) {
    let contacts = enemies_touching_player(&state.player, &state.enemies).len();

    for _ in 0..contacts {
        if !state.player.hit() {
            continue;
        }
        result.events.push(GameEvent::player_hit(state.frame, state.player.lives));

        if state.player.is_destroyed() {
            end_session(state, result);
            break;
        }
    }
}

/// Drop bullets (player and alien) past their lifetime.
fn despawn_expired(state: &mut GameManager) {
    for handle in state.player_bullets.handles() {
        if state.player_bullets.get(handle).is_some_and(|b| b.is_expired()) {
            state.player_bullets.remove(handle);
        }
    }

    for handle in state.enemies.handles() {
        if state.enemies.get(handle).is_some_and(|e| e.is_expired_bullet()) {
            state.enemies.remove(handle);
        }
    }

    state.player_bullets.commit();
    state.enemies.commit();
}

/// Award the level bonus and spawn the next wave.
fn complete_level(state: &mut GameManager, result: &mut TickResult) {
    state.player_bullets.clear();

    let completed = state.level;
    let bonus = state.award(SCORE_PER_LEVEL);
    result.events.push(GameEvent::level_completed(state.frame, completed, bonus));

    state.level += 1;
    let counts = state.start_level();
    result.events.push(GameEvent::level_started(
        state.frame,
        state.level,
        counts.asteroids,
        counts.comets,
        counts.aliens,
    ));

    debug!(
        level = state.level,
        score = state.score,
        enemies = counts.total(),
        "Level {} complete",
        completed
    );
}

/// Mark the session terminal.
fn end_session(state: &mut GameManager, result: &mut TickResult) {
    state.running = false;
    result.session_ended = true;
    result
        .events
        .push(GameEvent::session_ended(state.frame, state.score, state.level));

    debug!(score = state.score, level = state.level, frame = state.frame, "Session ended");
}

/// Replay recorded frames onto a session.
///
/// Stops early once the session ends. Returns the final state and all
/// events.
pub fn replay_session(initial_state: GameManager, frames: &[FrameRecord]) -> (GameManager, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    for frame in frames {
        let result = update(&mut state, frame.dt, &frame.inputs);
        all_events.extend(result.events);

        if result.session_ended {
            break;
        }
    }

    (state, all_events)
}

// =============================================================================
// TESTS
// =============================================================================
