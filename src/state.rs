//! Traffic light state
//!
//! An immutable three-bit status register: red, yellow, green.
//! Every combination is valid; no traffic sequence is enforced.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable traffic light state
///
/// Reading a field never has side effects. The `with_*` methods return a
/// new state with exactly one field replaced and leave the receiver alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct State {
    red: bool,
    yellow: bool,
    green: bool,
}

impl State {
    /// All lights off (shutdown signal)
    pub const OFF: State = State::new(false, false, false);

    /// All lights on (readiness signal)
    pub const ALL_ON: State = State::new(true, true, true);

    pub const fn new(red: bool, yellow: bool, green: bool) -> Self {
        Self { red, yellow, green }
    }

    pub fn red(&self) -> bool {
        self.red
    }

    pub fn yellow(&self) -> bool {
        self.yellow
    }

    pub fn green(&self) -> bool {
        self.green
    }

    /// New state with red replaced by `red`
    #[must_use]
    pub fn with_red(self, red: bool) -> Self {
        Self { red, ..self }
    }

    /// New state with yellow replaced by `yellow`
    #[must_use]
    pub fn with_yellow(self, yellow: bool) -> Self {
        Self { yellow, ..self }
    }

    /// New state with green replaced by `green`
    #[must_use]
    pub fn with_green(self, green: bool) -> Self {
        Self { green, ..self }
    }
}

/// Single-letter codes in fixed order, uppercase when lit: `Ryg`
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = |on: bool, c: char| if on { c.to_ascii_uppercase() } else { c };
        write!(
            f,
            "{}{}{}",
            letter(self.red, 'r'),
            letter(self.yellow, 'y'),
            letter(self.green, 'g')
        )
    }
}
