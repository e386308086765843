//! Session Management
//!
//! Concurrent registry of per-user game sessions.

pub mod registry;

pub use registry::{SessionConfig, SessionError, SessionKey, SessionRegistry};
