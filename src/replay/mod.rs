//! Session Replay
//!
//! Transcripts of recorded sessions and their verification by replay.

pub mod transcript;

pub use transcript::{
    SessionTranscript, StateCheckpoint, TranscriptError, TranscriptRecorder,
    CHECKPOINT_INTERVAL, TRANSCRIPT_VERSION,
};
