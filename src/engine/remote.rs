//! Remote engine
//!
//! Forwards reads and writes to another traffic light server, so one
//! server can front a device running elsewhere.

use crate::error::{Result, TrafficLightError};
use crate::network::Client;
use crate::state::State;

use super::Engine;

/// Engine backed by a remote traffic light API
pub struct RemoteEngine {
    client: Client,
}

impl RemoteEngine {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Base API URI of the upstream server
    pub fn upstream(&self) -> &str {
        self.client.api_uri()
    }
}

impl Engine for RemoteEngine {
    fn name(&self) -> &str {
        "remote"
    }

    /// A malformed upstream body surfaces here as an engine error
    fn get(&self) -> Result<State> {
        self.client.get().map_err(|e| {
            TrafficLightError::Engine(format!("Reading state from `{}' failed: {}", self.upstream(), e))
        })
    }

    fn set(&self, state: State) -> Result<()> {
        self.client.set(state).map(|_| ()).map_err(|e| {
            TrafficLightError::Engine(format!(
                "Writing state {} to `{}' failed: {}",
                state,
                self.upstream(),
                e
            ))
        })
    }
}
