//! Engine Module
//!
//! The collaborator that holds and applies the traffic light state.
//!
//! ## Responsibilities
//! - Own the single canonical `State`
//! - Apply new states (memory, GPIO pins, or a remote server)
//! - Report the current state back
//!
//! ## Concurrency
//! The server does not lock around its read-modify-write sequence.
//! Concurrent requests may interleave at this boundary and the last
//! write wins. Implementations only need each single call to be safe.

mod memory;
mod remote;
pub mod beaglebone;

pub use beaglebone::BeagleBoneEngine;
pub use memory::MemoryEngine;
pub use remote::RemoteEngine;

use crate::error::Result;
use crate::state::State;

/// Backing store for the traffic light state
///
/// Both operations may block (hardware writes, network round trips).
pub trait Engine: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Read the current state
    fn get(&self) -> Result<State>;

    /// Replace the current state
    fn set(&self, state: State) -> Result<()>;
}
