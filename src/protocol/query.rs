//! Query overlay
//!
//! Turns the optional `red`/`yellow`/`green` query parameters into a
//! partial update and applies it on top of a known state.

use crate::error::{Result, TrafficLightError};
use crate::state::State;

/// Query parameter names, in wire order
pub const FIELDS: [&str; 3] = ["red", "yellow", "green"];

/// Parse a single flag value
///
/// Only the literal strings `true` and `false` are accepted.
pub fn parse_flag(field: &'static str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(TrafficLightError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}

/// A partial state update parsed from a request
///
/// `None` means the field was absent and keeps its current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    pub red: Option<bool>,
    pub yellow: Option<bool>,
    pub green: Option<bool>,
}

impl Overlay {
    /// Parse an overlay from a parameter lookup
    ///
    /// All present fields are validated before anything is returned, so a
    /// single bad value rejects the whole overlay.
    pub fn parse<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let field = |name: &'static str| -> Result<Option<bool>> {
            lookup(name).map(|value| parse_flag(name, &value)).transpose()
        };
        let [red, yellow, green] = FIELDS;

        Ok(Self {
            red: field(red)?,
            yellow: field(yellow)?,
            green: field(green)?,
        })
    }

    /// Apply the present fields on top of `state`
    pub fn apply(&self, state: State) -> State {
        let mut state = state;
        if let Some(red) = self.red {
            state = state.with_red(red);
        }
        if let Some(yellow) = self.yellow {
            state = state.with_yellow(yellow);
        }
        if let Some(green) = self.green {
            state = state.with_green(green);
        }
        state
    }
}
