//! Input Handling
//!
//! The four discrete player commands and their wire parsing.
//!
//! Clients send a comma-separated list such as `"UP,LEFT,SHOOT"`. Each
//! occurrence counts: `"SHOOT,SHOOT"` attempts two shots in one frame.
//! Unknown tokens are rejected here and never reach the simulation.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// Errors from parsing player input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Token is not a known command.
    #[error("Unknown input command: {0:?}")]
    UnknownCommand(String),
}

/// One player command for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Input {
    /// Accelerate along the current heading (`UP`)
    Thrust = 0,
    /// Turn counter-clockwise in screen space (`LEFT`)
    TurnLeft = 1,
    /// Turn clockwise in screen space (`RIGHT`)
    TurnRight = 2,
    /// Fire one bullet (`SHOOT`)
    Fire = 3,
}

impl Input {
    /// All commands.
    pub const ALL: [Input; 4] = [Input::Thrust, Input::TurnLeft, Input::TurnRight, Input::Fire];

    /// Wire literal.
    pub fn as_wire(self) -> &'static str {
        match self {
            Input::Thrust => "UP",
            Input::TurnLeft => "LEFT",
            Input::TurnRight => "RIGHT",
            Input::Fire => "SHOOT",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" | "THRUST" => Ok(Input::Thrust),
            "LEFT" | "TURN_LEFT" => Ok(Input::TurnLeft),
            "RIGHT" | "TURN_RIGHT" => Ok(Input::TurnRight),
            "SHOOT" | "FIRE" => Ok(Input::Fire),
            _ => Err(InputError::UnknownCommand(s.trim().to_string())),
        }
    }
}

/// Parse a comma-separated command list.
///
/// Empty input (or only whitespace) means no commands. Empty items between
/// commas are skipped.
pub fn parse_inputs(raw: &str) -> Result<Vec<Input>, InputError> {
    raw.split(',')
        .filter(|token| !token.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Render a command list back to its wire form.
pub fn format_inputs(inputs: &[Input]) -> String {
    inputs
        .iter()
        .map(|input| input.as_wire())
        .collect::<Vec<_>>()
        .join(",")
}

/// One recorded frame: elapsed seconds and the commands for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Elapsed seconds
    pub dt: f64,
    /// Commands, in order
    pub inputs: Vec<Input>,
}

impl FrameRecord {
    /// Create a frame record.
    pub fn new(dt: f64, inputs: impl Into<Vec<Input>>) -> Self {
        Self { dt, inputs: inputs.into() }
    }
}

/// Number of `Fire` commands in a frame.
#[inline]
pub fn fire_count(inputs: &[Input]) -> usize {
    inputs.iter().filter(|input| **input == Input::Fire).count()
}

// =============================================================================
// TESTS
// =============================================================================
