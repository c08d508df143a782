//! Server Tests
//!
//! These tests verify:
//! - GUI, API and not-found routing with exact content types
//! - Partial overlays and plain reads over HTTP
//! - Invalid values are rejected without touching the engine
//! - Engine failures surface as 400 with the cause
//! - Startup/shutdown light signals and their bounded wait
//! - Shutdown drains requests in flight before the final all-off write
//! - A panicking engine does not leave the request hanging

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Response;
use traffic_light::engine::Engine;
use traffic_light::{Client, Config, MemoryEngine, Result, Server, State, TrafficLightError};

// =============================================================================
// Helper Functions
// =============================================================================

fn test_config() -> Config {
    Config::builder()
        .listen_addr("127.0.0.1:0")
        .worker_threads(4)
        .lifecycle_timeout_ms(2000)
        .build()
}

fn setup_memory_server() -> (Arc<MemoryEngine>, Server) {
    let engine = Arc::new(MemoryEngine::new());
    let server = Server::bind(&test_config(), engine.clone(), None).unwrap();
    (engine, server)
}

fn fetch(url: &str) -> Response {
    reqwest::blocking::get(url).unwrap()
}

fn content_type(response: &Response) -> String {
    response.headers()["content-type"].to_str().unwrap().to_string()
}

/// Engine that fails on demand
struct FailingEngine {
    fail_get: bool,
    fail_set: bool,
}

impl Engine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn get(&self) -> Result<State> {
        if self.fail_get {
            return Err(TrafficLightError::Engine("GPIO bank 2 unavailable".to_string()));
        }
        Ok(State::OFF)
    }

    fn set(&self, _state: State) -> Result<()> {
        if self.fail_set {
            return Err(TrafficLightError::Engine("relay driver timeout".to_string()));
        }
        Ok(())
    }
}

/// Engine whose writes never finish in time
struct StuckEngine;

impl Engine for StuckEngine {
    fn name(&self) -> &str {
        "stuck"
    }

    fn get(&self) -> Result<State> {
        Ok(State::OFF)
    }

    fn set(&self, _state: State) -> Result<()> {
        thread::sleep(Duration::from_secs(3));
        Ok(())
    }
}

/// Memory engine whose writes of one particular state are slow
struct SlowEngine {
    inner: MemoryEngine,
    slow: State,
    delay: Duration,
}

impl Engine for SlowEngine {
    fn name(&self) -> &str {
        "slow"
    }

    fn get(&self) -> Result<State> {
        self.inner.get()
    }

    fn set(&self, state: State) -> Result<()> {
        if state == self.slow {
            thread::sleep(self.delay);
        }
        self.inner.set(state)
    }
}

/// Engine that panics on read
struct PanickingEngine;

impl Engine for PanickingEngine {
    fn name(&self) -> &str {
        "panicking"
    }

    fn get(&self) -> Result<State> {
        panic!("engine invariant broken");
    }

    fn set(&self, _state: State) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Routing Tests
// =============================================================================

#[test]
fn test_gui_is_served() {
    let (_engine, server) = setup_memory_server();

    let response = fetch(&server.url());
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(content_type(&response), "text/html; charset=UTF-8");
    assert!(response.text().unwrap().contains("<html"));
}

#[test]
fn test_custom_gui_replaces_default() {
    let engine = Arc::new(MemoryEngine::new());
    let server = Server::bind(&test_config(), engine, Some("<p>custom</p>".to_string())).unwrap();

    let response = fetch(&server.url());
    assert_eq!(response.text().unwrap(), "<p>custom</p>");
}

#[test]
fn test_unknown_path_is_not_found() {
    let (_engine, server) = setup_memory_server();

    let response = fetch(&format!("http://{}/unknown", server.local_addr()));
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(content_type(&response), "text/plain; charset=UTF-8");
    assert!(response.text().unwrap().contains("/unknown"));
}

#[test]
fn test_api_without_trailing_slash_is_not_found() {
    let (_engine, server) = setup_memory_server();

    let response = fetch(&format!("http://{}/api", server.local_addr()));
    assert_eq!(response.status().as_u16(), 404);
}

// =============================================================================
// State Transition Tests
// =============================================================================

#[test]
fn test_partial_overlay() {
    let (engine, server) = setup_memory_server();
    engine.set(State::OFF).unwrap();

    let response = fetch(&format!("{}?red=true", server.api_url()));
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(content_type(&response), "application/json; charset=UTF-8");
    let json: serde_json::Value = serde_json::from_str(&response.text().unwrap()).unwrap();
    assert_eq!(json, serde_json::json!({"red": true, "yellow": false, "green": false}));

    let plain = Client::new(&server.api_url()).unwrap().get().unwrap();
    assert_eq!(plain, State::new(true, false, false));
}

#[test]
fn test_overlay_keeps_absent_fields() {
    let (engine, server) = setup_memory_server();
    engine.set(State::new(true, false, true)).unwrap();

    let response = fetch(&format!("{}?yellow=true&green=false", server.api_url()));
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(engine.current(), State::new(true, true, false));
}

#[test]
fn test_client_set_round_trip() {
    let (engine, server) = setup_memory_server();
    let client = Client::new(&server.api_url()).unwrap();

    let state = client.set(State::new(true, false, true)).unwrap();
    assert!(state.red());
    assert!(!state.yellow());
    assert!(state.green());
    assert_eq!(engine.current(), State::new(true, false, true));
}

#[test]
fn test_invalid_value_is_rejected() {
    let (engine, server) = setup_memory_server();
    engine.set(State::new(false, true, false)).unwrap();

    let response = fetch(&format!("{}?red=maybe", server.api_url()));
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(content_type(&response), "text/plain; charset=UTF-8");
    let body = response.text().unwrap();
    assert!(body.contains("red"), "{}", body);
    assert!(body.contains("maybe"), "{}", body);

    assert_eq!(engine.current(), State::new(false, true, false));
}

#[test]
fn test_invalid_value_after_valid_one_writes_nothing() {
    let (engine, server) = setup_memory_server();
    engine.set(State::OFF).unwrap();

    let response = fetch(&format!("{}?red=true&green=TRUE", server.api_url()));
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(engine.current(), State::OFF);
}

#[test]
fn test_engine_read_failure_is_bad_request() {
    let engine = Arc::new(FailingEngine {
        fail_get: true,
        fail_set: false,
    });
    let server = Server::bind(&test_config(), engine, None).unwrap();

    let response = fetch(&server.api_url());
    assert_eq!(response.status().as_u16(), 400);
    assert!(response.text().unwrap().contains("GPIO bank 2 unavailable"));
}

#[test]
fn test_engine_write_failure_is_bad_request() {
    let engine = Arc::new(FailingEngine {
        fail_get: false,
        fail_set: true,
    });
    let server = Server::bind(&test_config(), engine, None).unwrap();

    let response = fetch(&format!("{}?green=true", server.api_url()));
    assert_eq!(response.status().as_u16(), 400);
    assert!(response.text().unwrap().contains("relay driver timeout"));
}

#[test]
fn test_panicking_engine_still_answers() {
    let server = Server::bind(&test_config(), Arc::new(PanickingEngine), None).unwrap();

    let response = fetch(&server.api_url());
    assert_eq!(response.status().as_u16(), 500);

    // The worker pool keeps serving
    assert_eq!(fetch(&server.url()).status().as_u16(), 200);
}

#[test]
fn test_concurrent_clients_last_write_wins() {
    let (engine, server) = setup_memory_server();
    let api = server.api_url();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let api = api.clone();
            thread::spawn(move || {
                let client = Client::new(&api).unwrap();
                client.set(State::new(i % 2 == 0, true, false)).unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let state = engine.current();
    assert!(state.yellow());
    assert!(!state.green());
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_bind_turns_all_lights_on() {
    let (engine, _server) = setup_memory_server();
    assert_eq!(engine.current(), State::ALL_ON);
}

#[test]
fn test_close_turns_all_lights_off() {
    let (engine, server) = setup_memory_server();

    server.close();
    assert_eq!(engine.current(), State::OFF);
}

#[test]
fn test_drop_turns_all_lights_off() {
    let (engine, server) = setup_memory_server();
    drop(server);
    assert_eq!(engine.current(), State::OFF);
}

#[test]
fn test_close_waits_for_request_in_flight() {
    let engine = Arc::new(SlowEngine {
        inner: MemoryEngine::new(),
        slow: State::new(true, false, false),
        delay: Duration::from_millis(800),
    });
    let server = Server::bind(&test_config(), engine.clone(), None).unwrap();

    let url = format!("{}?red=true&yellow=false&green=false", server.api_url());
    let request = thread::spawn(move || reqwest::blocking::get(url).map(|r| r.status().as_u16()));

    // Let the request reach the slow write before closing
    thread::sleep(Duration::from_millis(200));
    server.close();

    assert_eq!(engine.inner.current(), State::OFF);
    let _ = request.join();
    assert_eq!(engine.inner.current(), State::OFF);
}

#[test]
fn test_wait_returns_after_shutdown() {
    let (engine, server) = setup_memory_server();
    let shutdown = server.shutdown_handle();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        shutdown.shutdown();
        shutdown.shutdown();
    });

    let started = Instant::now();
    server.wait();
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(engine.current(), State::OFF);
    stopper.join().unwrap();
}

#[test]
fn test_failing_lifecycle_signal_does_not_block_bind() {
    let engine = Arc::new(FailingEngine {
        fail_get: false,
        fail_set: true,
    });
    let server = Server::bind(&test_config(), engine, None).unwrap();
    server.close();
}

#[test]
fn test_stuck_lifecycle_signal_is_bounded() {
    let config = Config::builder()
        .listen_addr("127.0.0.1:0")
        .lifecycle_timeout_ms(100)
        .build();

    let started = Instant::now();
    let server = Server::bind(&config, Arc::new(StuckEngine), None).unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));

    // Serving is not held up by the pending write
    assert_eq!(fetch(&server.url()).status().as_u16(), 200);
}

#[test]
fn test_bind_conflict_is_server_error() {
    let (_engine, server) = setup_memory_server();
    let config = Config::builder().listen_addr(server.local_addr().to_string()).build();

    let result = Server::bind(&config, Arc::new(MemoryEngine::new()), None);
    assert!(matches!(result, Err(TrafficLightError::Server(_))));
}
