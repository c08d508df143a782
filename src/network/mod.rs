//! Network Module
//!
//! HTTP server and client for the traffic light API.
//!
//! ## Architecture
//! - Listener thread owned by `Server`
//! - Worker thread pool running one request each
//! - Requests routed through `Router` to the `Engine`
//! - `Client` speaks the same protocol from the other side

mod client;
mod handler;
mod server;

pub use client::Client;
pub use handler::{transition, Router};
pub use server::{Server, ShutdownHandle};

/// GUI document served on `/` when none is supplied
pub const DEFAULT_GUI: &str = include_str!("gui.html");
