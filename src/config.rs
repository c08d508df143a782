//! Configuration for the traffic light
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::beaglebone::PinMap;
use crate::engine::{BeagleBoneEngine, Engine, MemoryEngine, RemoteEngine};
use crate::error::{Result, TrafficLightError};
use crate::network::Client;

/// Which engine backs the traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EngineKind {
    /// In-memory store (debugging and demonstration)
    #[default]
    Memory,

    /// Digital pins of a BeagleBone Black
    BeagleBoneBlack,

    /// Another traffic light server
    Remote,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EngineKind::Memory => "memory",
            EngineKind::BeagleBoneBlack => "beagle-bone-black",
            EngineKind::Remote => "remote",
        })
    }
}

/// Main configuration for a traffic light instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Size of the request worker pool
    pub worker_threads: usize,

    /// Upper bound on the startup/shutdown engine writes (milliseconds)
    pub lifecycle_timeout_ms: u64,

    /// HTTP client timeout, used by the remote engine (milliseconds)
    pub client_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Engine Configuration
    // -------------------------------------------------------------------------
    /// Selected engine
    pub engine: EngineKind,

    /// Pin names per signal (beagle-bone-black only)
    pub pins: PinMap,

    /// Lit signals drive their pins LOW (beagle-bone-black only)
    pub active_low: bool,

    /// Root of the sysfs tree (beagle-bone-black only)
    pub sysfs_root: PathBuf,

    /// Base API URI of the upstream server (remote only)
    pub upstream: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            worker_threads: 8,
            lifecycle_timeout_ms: 5000,
            client_timeout_ms: 5000,
            engine: EngineKind::Memory,
            pins: PinMap::default(),
            active_low: true,
            sysfs_root: PathBuf::from("/sys"),
            upstream: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn lifecycle_timeout(&self) -> Duration {
        Duration::from_millis(self.lifecycle_timeout_ms)
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_millis(self.client_timeout_ms)
    }

    /// Construct the configured engine
    pub fn open_engine(&self) -> Result<Arc<dyn Engine>> {
        match self.engine {
            EngineKind::Memory => Ok(Arc::new(MemoryEngine::new())),
            EngineKind::BeagleBoneBlack => Ok(Arc::new(BeagleBoneEngine::sysfs(
                &self.pins,
                self.active_low,
                &self.sysfs_root,
            )?)),
            EngineKind::Remote => {
                let upstream = self.upstream.as_deref().ok_or_else(|| {
                    TrafficLightError::Config("remote engine requires an upstream API URI".to_string())
                })?;
                let client = Client::with_timeout(upstream, self.client_timeout())?;
                Ok(Arc::new(RemoteEngine::new(client)))
            }
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Listen on all interfaces at `port`
    pub fn port(mut self, port: u16) -> Self {
        self.config.listen_addr = format!("0.0.0.0:{}", port);
        self
    }

    /// Set the worker pool size
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.config.worker_threads = count;
        self
    }

    /// Set the lifecycle hook timeout (in milliseconds)
    pub fn lifecycle_timeout_ms(mut self, ms: u64) -> Self {
        self.config.lifecycle_timeout_ms = ms;
        self
    }

    /// Set the HTTP client timeout (in milliseconds)
    pub fn client_timeout_ms(mut self, ms: u64) -> Self {
        self.config.client_timeout_ms = ms;
        self
    }

    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.config.engine = engine;
        self
    }

    /// Override the red pins; an empty list keeps the default
    pub fn red_pins(mut self, pins: Vec<String>) -> Self {
        if !pins.is_empty() {
            self.config.pins.red = pins;
        }
        self
    }

    /// Override the yellow pins; an empty list keeps the default
    pub fn yellow_pins(mut self, pins: Vec<String>) -> Self {
        if !pins.is_empty() {
            self.config.pins.yellow = pins;
        }
        self
    }

    /// Override the green pins; an empty list keeps the default
    pub fn green_pins(mut self, pins: Vec<String>) -> Self {
        if !pins.is_empty() {
            self.config.pins.green = pins;
        }
        self
    }

    pub fn active_low(mut self, active_low: bool) -> Self {
        self.config.active_low = active_low;
        self
    }

    pub fn sysfs_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.sysfs_root = path.into();
        self
    }

    pub fn upstream(mut self, uri: impl Into<String>) -> Self {
        self.config.upstream = Some(uri.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
