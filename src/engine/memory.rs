//! In-memory engine
//!
//! Keeps the state in a mutex-guarded field. Useful for debugging,
//! demonstration and tests.

use parking_lot::Mutex;

use crate::error::Result;
use crate::state::State;

use super::Engine;

/// Engine holding its state in memory
///
/// Every instance is independent and starts with all lights off.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    state: Mutex<State>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::with_state(State::OFF)
    }

    pub fn with_state(state: State) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// The stored state (infallible read)
    pub fn current(&self) -> State {
        *self.state.lock()
    }
}

impl Engine for MemoryEngine {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self) -> Result<State> {
        Ok(self.current())
    }

    fn set(&self, state: State) -> Result<()> {
        let mut current = self.state.lock();
        tracing::debug!("memory: {} -> {}", *current, state);
        *current = state;
        Ok(())
    }
}
