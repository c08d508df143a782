//! HTTP Server
//!
//! Binds the listener, dispatches requests to the worker pool and drives
//! the startup/shutdown light signals.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError, Sender, TryRecvError};

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Result, TrafficLightError};
use crate::state::State;

use super::handler::Router;
use super::DEFAULT_GUI;

/// How long the listener blocks on accept before checking for a stop request
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// HTTP server for the traffic light
///
/// Binding turns all lights on. Closing (or dropping) the server stops the
/// listener, drains the requests already running, then turns all lights off.
pub struct Server {
    local_addr: SocketAddr,
    engine: Arc<dyn Engine>,
    lifecycle_timeout: Duration,
    shutdown: ShutdownHandle,
    listener: Option<JoinHandle<()>>,
}

/// Asks a running `Server` to stop; cheap to clone and send across threads
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    /// Request the listener to stop; later calls are no-ops
    pub fn shutdown(&self) {
        let _ = self.tx.try_send(());
    }
}

impl Server {
    /// Bind to `config.listen_addr` and start serving
    ///
    /// `gui` replaces the bundled GUI document when given.
    pub fn bind(config: &Config, engine: Arc<dyn Engine>, gui: Option<String>) -> Result<Self> {
        let router = Router::new(Arc::clone(&engine), gui.unwrap_or_else(|| DEFAULT_GUI.to_string()));

        let server = rouille::Server::new(config.listen_addr.as_str(), move |request| router.handle(request))
            .map_err(|e| TrafficLightError::Server(format!("Binding `{}' failed: {}", config.listen_addr, e)))?
            .pool_size(config.worker_threads.max(1));
        let local_addr = server.server_addr();

        let (tx, rx) = channel::bounded::<()>(1);
        let listener = thread::Builder::new()
            .name("traffic-light-listener".to_string())
            .spawn(move || {
                while let Err(TryRecvError::Empty) = rx.try_recv() {
                    server.poll_timeout(POLL_INTERVAL);
                }
                // Blocks until every request handed to the pool has finished
                server.join();
            })?;

        tracing::info!(
            "Started `{}' traffic light server on {} ({} workers)",
            engine.name(),
            local_addr,
            config.worker_threads.max(1)
        );

        let server = Self {
            local_addr,
            engine,
            lifecycle_timeout: config.lifecycle_timeout(),
            shutdown: ShutdownHandle { tx },
            listener: Some(listener),
        };
        server.signal("listening", State::ALL_ON);
        Ok(server)
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URL of the GUI
    pub fn url(&self) -> String {
        format!("http://{}/", self.local_addr)
    }

    /// URL of the state transition API
    pub fn api_url(&self) -> String {
        format!("http://{}/api/", self.local_addr)
    }

    /// Handle that stops this server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Block until a `ShutdownHandle` stops the server, then turn all lights off
    pub fn wait(mut self) {
        self.join_listener();
    }

    /// Stop the listener, then turn all lights off
    pub fn close(mut self) {
        self.shutdown.shutdown();
        self.join_listener();
    }

    fn join_listener(&mut self) {
        let Some(handle) = self.listener.take() else {
            return;
        };

        if handle.join().is_err() {
            tracing::error!("Listener thread for {} panicked", self.local_addr);
        }
        tracing::info!("Stopped traffic light server on {}", self.local_addr);

        self.signal("close", State::OFF);
    }

    /// Fire-and-forget engine write with a bounded wait
    ///
    /// Failures are logged only; there is no HTTP caller to report to.
    fn signal(&self, event: &str, state: State) {
        let (tx, rx) = channel::bounded(1);
        let engine = Arc::clone(&self.engine);

        let spawned = thread::Builder::new()
            .name(format!("traffic-light-{}", event))
            .spawn(move || {
                let _ = tx.send(engine.set(state));
            });
        if let Err(e) = spawned {
            tracing::error!("Cannot spawn {} hook thread: {}", event, e);
            return;
        }

        match rx.recv_timeout(self.lifecycle_timeout) {
            Ok(Ok(())) => tracing::debug!("{}: signalled {} on {}", self.engine.name(), state, event),
            Ok(Err(e)) => tracing::warn!("{}: setting {} on {} failed: {}", self.engine.name(), state, event, e),
            Err(RecvTimeoutError::Timeout) => tracing::warn!(
                "{}: setting {} on {} still pending after {:?}, detaching",
                self.engine.name(),
                state,
                event,
                self.lifecycle_timeout
            ),
            Err(RecvTimeoutError::Disconnected) => {
                tracing::error!("{}: {} hook thread panicked", self.engine.name(), event)
            }
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown.shutdown();
        self.join_listener();
    }
}
