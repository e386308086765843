//! Session Transcript Recording
//!
//! Records everything needed to replay a session exactly: the session
//! parameters, every `(dt, inputs)` frame, periodic state-hash checkpoints
//! and the final state hash. Verification replays the frames and compares
//! hashes.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHash;
use crate::game::difficulty::Difficulty;
use crate::game::input::{FrameRecord, Input};
use crate::game::level::LevelTable;
use crate::game::state::{GameManager, SessionParams};
use crate::game::tick::TickResult;

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// Checkpoint interval in recorded frames (5 seconds at 60 fps).
pub const CHECKPOINT_INTERVAL: usize = 300;

/// Errors that can occur with transcripts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    /// Encoding or decoding failed.
    #[error("Transcript serialization failed: {0}")]
    Serialization(String),

    /// Recorded with an incompatible format.
    #[error("Version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Supported version.
        expected: u8,
        /// Version found.
        got: u8,
    },

    /// Replay diverged at a checkpoint.
    #[error("State hash mismatch at frame {frame}")]
    CheckpointMismatch {
        /// Recorded frame count of the checkpoint.
        frame: u64,
    },

    /// Replay reached a different final state.
    #[error("Final state hash mismatch")]
    FinalHashMismatch,

    /// No final hash recorded yet.
    #[error("Transcript is not finalized")]
    NotFinalized,
}

/// State checkpoint for partial verification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateCheckpoint {
    /// Number of recorded frames applied when the hash was taken.
    pub frame: u64,

    /// State hash at this point.
    pub state_hash: StateHash,
}

/// Complete session transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionTranscript {
    /// Version for forward compatibility.
    pub version: u8,

    /// Session RNG seed.
    pub seed: u64,

    /// Difficulty preset.
    pub difficulty: Difficulty,

    /// Level table the session used, if any.
    pub level_table: Option<LevelTable>,

    /// Every frame passed to `update`, zero-dt frames included.
    pub frames: Vec<FrameRecord>,

    /// Periodic state hashes.
    pub checkpoints: Vec<StateCheckpoint>,

    /// Hash after the last frame.
    pub final_state_hash: Option<StateHash>,
}

impl SessionTranscript {
    /// Create an empty transcript for a fresh session.
    pub fn new(params: &SessionParams) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            seed: params.seed,
            difficulty: params.difficulty,
            level_table: params.level_table.clone(),
            frames: Vec::new(),
            checkpoints: Vec::new(),
            final_state_hash: None,
        }
    }

    /// Parameters to recreate the session.
    pub fn params(&self) -> SessionParams {
        SessionParams {
            difficulty: self.difficulty,
            seed: self.seed,
            level_table: self.level_table.clone(),
        }
    }

    /// Append a frame.
    pub fn record_frame(&mut self, dt: f64, inputs: &[Input]) {
        self.frames.push(FrameRecord::new(dt, inputs));
    }

    /// Record a state checkpoint.
    pub fn add_checkpoint(&mut self, frame: u64, state_hash: StateHash) {
        self.checkpoints.push(StateCheckpoint { frame, state_hash });
    }

    /// Record the final state hash.
    pub fn finalize(&mut self, final_state_hash: StateHash) {
        self.final_state_hash = Some(final_state_hash);
    }

    /// Check if transcript is complete.
    pub fn is_complete(&self) -> bool {
        self.final_state_hash.is_some()
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TranscriptError> {
        bincode::serialize(self).map_err(|e| TranscriptError::Serialization(e.to_string()))
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TranscriptError> {
        bincode::deserialize(data).map_err(|e| TranscriptError::Serialization(e.to_string()))
    }

    /// Rebuild the session by replaying every frame.
    pub fn replay(&self) -> GameManager {
        let mut state = GameManager::from_params(&self.params());
        for frame in &self.frames {
            state.update(frame.dt, &frame.inputs);
        }
        state
    }

    /// Replay and check every checkpoint and the final hash.
    pub fn verify(&self) -> Result<(), TranscriptError> {
        if self.version != TRANSCRIPT_VERSION {
            return Err(TranscriptError::VersionMismatch {
                expected: TRANSCRIPT_VERSION,
                got: self.version,
            });
        }

        let expected_final = self.final_state_hash.ok_or(TranscriptError::NotFinalized)?;

        let mut state = GameManager::from_params(&self.params());
        let mut checkpoints = self.checkpoints.iter().peekable();

        // Checkpoints taken before any frame
        while let Some(cp) = checkpoints.next_if(|cp| cp.frame == 0) {
            if state.compute_hash() != cp.state_hash {
                return Err(TranscriptError::CheckpointMismatch { frame: cp.frame });
            }
        }

        for (index, frame) in self.frames.iter().enumerate() {
            state.update(frame.dt, &frame.inputs);
            let applied = index as u64 + 1;

            while let Some(cp) = checkpoints.next_if(|cp| cp.frame == applied) {
                if state.compute_hash() != cp.state_hash {
                    return Err(TranscriptError::CheckpointMismatch { frame: cp.frame });
                }
            }
        }

        // A checkpoint past the recorded frames can never be reached
        if let Some(cp) = checkpoints.next() {
            return Err(TranscriptError::CheckpointMismatch { frame: cp.frame });
        }

        if state.compute_hash() != expected_final {
            return Err(TranscriptError::FinalHashMismatch);
        }

        Ok(())
    }
}

// =============================================================================
// RECORDER
// =============================================================================

/// Drives a live session while recording it.
pub struct TranscriptRecorder {
    state: GameManager,
    transcript: SessionTranscript,
}

impl TranscriptRecorder {
    /// Start a fresh session and its transcript.
    pub fn start(difficulty: Difficulty, seed: u64, level_table: Option<LevelTable>) -> Self {
        let state = GameManager::with_levels(difficulty, seed, level_table);
        let transcript = SessionTranscript::new(&state.params());
        Self { state, transcript }
    }

    /// Step the session and record the frame.
    pub fn update(&mut self, dt: f64, inputs: &[Input]) -> TickResult {
        let result = self.state.update(dt, inputs);
        self.transcript.record_frame(dt, inputs);

        let recorded = self.transcript.frames.len();
        if recorded % CHECKPOINT_INTERVAL == 0 {
            self.transcript
                .add_checkpoint(recorded as u64, self.state.compute_hash());
        }

        result
    }

    /// The live session.
    pub fn state(&self) -> &GameManager {
        &self.state
    }

    /// Transcript recorded so far.
    pub fn transcript(&self) -> &SessionTranscript {
        &self.transcript
    }

    /// Finalize and hand back the session and its transcript.
    pub fn finish(self) -> (GameManager, SessionTranscript) {
        let Self { state, mut transcript } = self;
        transcript.finalize(state.compute_hash());
        (state, transcript)
    }
}

// =============================================================================
// TESTS
// =============================================================================
