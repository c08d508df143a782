//! # traffic-light
//!
//! A three-signal traffic light (red, yellow, green) exposed over HTTP:
//! - Immutable `State` value with getters and `with_*` modifiers
//! - Pluggable engines: in-memory, BeagleBone Black pins, remote server
//! - Read-modify-write state transitions from partial query updates
//! - Blocking client mirroring the wire protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               HTTP Server (rouille worker pool)             │
//! │            GET /        GET /api/?red=true ...              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Router                               │
//! │        read → overlay → write → re-read → respond           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼───────────────┐
//!          │            │               │
//!          ▼            ▼               ▼
//!   ┌────────────┐ ┌────────────┐ ┌────────────┐
//!   │   Memory   │ │ BeagleBone │ │   Remote   │
//!   │  (Mutex)   │ │  (sysfs)   │ │  (Client)  │
//!   └────────────┘ └────────────┘ └────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod state;
pub mod protocol;
pub mod engine;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TrafficLightError, Result};
pub use config::{Config, EngineKind};
pub use engine::{Engine, MemoryEngine};
pub use network::{Client, Server, ShutdownHandle};
pub use state::State;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of traffic-light
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
