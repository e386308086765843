//! Asteroid Arena
//!
//! Runs a scripted session, verifies its transcript by replay, then drives
//! several sessions concurrently through the registry.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use asteroid_arena::{
    Difficulty, Input, FRAME_RATE, VERSION,
    game::{events::GameEventData, level::LevelTable},
    replay::{SessionTranscript, TranscriptRecorder},
    session::{SessionConfig, SessionKey, SessionRegistry},
};

/// Seconds of play in the scripted session.
const DEMO_SECONDS: u32 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Asteroid Arena v{}", VERSION);

    let level_table = load_levels();
    match &level_table {
        Some(table) => info!("Loaded {} level definitions", table.len()),
        None => info!("Using built-in level progression"),
    }

    demo_session(level_table.clone())?;
    demo_registry(level_table).await;

    Ok(())
}

fn levels_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ARENA_LEVELS").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/levels.json"))
}

fn load_levels() -> Option<LevelTable> {
    let path = levels_path();
    match LevelTable::load(&path) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!("Could not load levels from {}: {}", path.display(), e);
            None
        }
    }
}

/// Scripted inputs: circle while firing, with bursts of thrust.
fn scripted_inputs(frame: u32) -> Vec<Input> {
    let mut inputs = vec![Input::TurnRight];
    if frame % 6 == 0 {
        inputs.push(Input::Fire);
    }
    if (frame / 90) % 3 == 0 {
        inputs.push(Input::Thrust);
    }
    inputs
}

fn demo_session(level_table: Option<LevelTable>) -> anyhow::Result<()> {
    info!("=== Scripted Session ===");

    let seed = 0x5eed_u64;
    let mut recorder = TranscriptRecorder::start(Difficulty::Medium, seed, level_table);
    let dt = 1.0 / f64::from(FRAME_RATE);

    for frame in 0..DEMO_SECONDS * FRAME_RATE {
        let result = recorder.update(dt, &scripted_inputs(frame));

        for event in &result.events {
            match &event.data {
                GameEventData::LevelCompleted { level, bonus } => {
                    info!("Level {} completed (+{})", level, bonus);
                }
                GameEventData::PlayerHit { lives_remaining } => {
                    info!("Player hit, {} lives left", lives_remaining);
                }
                GameEventData::CometTransformed => {
                    info!("Comet transformed into an alien");
                }
                _ => {}
            }
        }

        if result.session_ended {
            info!("Session ended at frame {}", frame);
            break;
        }
    }

    let (state, transcript) = recorder.finish();
    info!("Score: {}, level: {}, time: {:.2}s", state.score, state.level, state.elapsed_time);
    info!("Final State Hash: {}", hex::encode(state.compute_hash()));

    let bytes = transcript.to_bytes()?;
    info!("Transcript: {} frames, {} checkpoints, {} bytes",
          transcript.frames.len(), transcript.checkpoints.len(), bytes.len());

    let decoded = SessionTranscript::from_bytes(&bytes)?;
    decoded.verify().context("replay verification failed")?;
    info!("DETERMINISM VERIFIED: replay matches");

    let snapshot = state.snapshot().to_json()?;
    info!("Final snapshot: {} bytes of JSON", snapshot.len());

    Ok(())
}

async fn demo_registry(level_table: Option<LevelTable>) {
    info!("=== Concurrent Sessions ===");

    let registry = Arc::new(SessionRegistry::new(SessionConfig {
        default_difficulty: Difficulty::Medium,
        level_table,
    }));

    let players = [("ada", Difficulty::Easy), ("bob", Difficulty::Medium), ("cy", Difficulty::Hard)];
    let mut handles = Vec::new();

    for (name, difficulty) in players {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            let key = SessionKey::new(name, "default");
            registry.new_game(key.clone(), Some(difficulty)).await;

            let dt = 1.0 / f64::from(FRAME_RATE);
            let mut snapshot = None;
            for frame in 0..10 * FRAME_RATE {
                snapshot = Some(registry.update(&key, dt, &scripted_inputs(frame), None).await);
            }
            (key, snapshot)
        }));
    }

    for handle in handles {
        match handle.await {
            Ok((key, Some(snapshot))) => {
                info!("{}: score {}, level {}, lives {}", key, snapshot.score, snapshot.level, snapshot.player.lives);
            }
            Ok((key, None)) => warn!("{}: no frames run", key),
            Err(e) => warn!("Session task failed: {}", e),
        }
    }

    info!("{} sessions live", registry.session_count().await);
}
