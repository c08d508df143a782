//! Request Router
//!
//! Routes HTTP requests and runs the state transition protocol.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rouille::{Request, Response};

use crate::engine::Engine;
use crate::error::Result;
use crate::protocol::{encode_state, Overlay, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use crate::state::State;

/// Run one state transition against `engine`
///
/// Strictly ordered:
/// 1. Read the current state
/// 2. Overlay the fields found through `lookup` (any invalid value aborts
///    before anything is written)
/// 3. Write the overlaid state
/// 4. Re-read, since the engine may not round-trip exactly
///
/// Not atomic across callers: concurrent transitions may interleave and
/// the last write wins.
pub fn transition<F>(engine: &dyn Engine, lookup: F) -> Result<State>
where
    F: Fn(&str) -> Option<String>,
{
    let current = engine.get()?;
    let desired = Overlay::parse(lookup)?.apply(current);
    engine.set(desired)?;
    engine.get()
}

/// Routes requests for `/` (GUI) and `/api/` (state transition)
pub struct Router {
    engine: Arc<dyn Engine>,
    gui: Arc<str>,
}

impl Router {
    pub fn new(engine: Arc<dyn Engine>, gui: impl Into<Arc<str>>) -> Self {
        Self {
            engine,
            gui: gui.into(),
        }
    }

    /// Handle one request
    ///
    /// A panic while routing is logged and resumed; the HTTP layer then
    /// ends the response with a 500 so the connection is never left open.
    pub fn handle(&self, request: &Request) -> Response {
        let response = match panic::catch_unwind(AssertUnwindSafe(|| self.route(request))) {
            Ok(response) => response,
            Err(payload) => {
                tracing::error!(
                    "Caught unexpected error while routing {} {}: {}",
                    request.method(),
                    request.raw_url(),
                    panic_message(payload.as_ref())
                );
                panic::resume_unwind(payload);
            }
        };

        tracing::debug!(
            "{} {} {} -> {}",
            request.remote_addr(),
            request.method(),
            request.raw_url(),
            response.status_code
        );
        response
    }

    fn route(&self, request: &Request) -> Response {
        match request.url().as_str() {
            "/" => self.gui(),
            "/api/" => self.api(request),
            _ => not_found(request),
        }
    }

    fn gui(&self) -> Response {
        Response::from_data(CONTENT_TYPE_HTML, self.gui.as_bytes().to_vec())
    }

    fn api(&self, request: &Request) -> Response {
        let result = transition(self.engine.as_ref(), |name| request.get_param(name))
            .and_then(|state| Ok((state, encode_state(&state)?)));

        match result {
            Ok((state, body)) => {
                tracing::info!("{}: state is now {}", self.engine.name(), state);
                Response::from_data(CONTENT_TYPE_JSON, body)
            }
            Err(e) => {
                tracing::warn!("{}: request `{}' failed: {}", self.engine.name(), request.raw_url(), e);
                Response::from_data(CONTENT_TYPE_TEXT, format!("Caught unexpected error\n\n{}", e))
                    .with_status_code(400)
            }
        }
    }
}

fn not_found(request: &Request) -> Response {
    Response::from_data(CONTENT_TYPE_TEXT, format!("Cannot find `{}'", request.raw_url()))
        .with_status_code(404)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
