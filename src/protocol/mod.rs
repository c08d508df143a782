//! Protocol Module
//!
//! Defines the HTTP wire protocol shared by server and client.
//!
//! ## Request Format
//! ```text
//! GET /api/?red=true&yellow=false&green=true
//! ```
//! Every parameter is optional. Values are exactly `true` or `false`
//! (case-sensitive); anything else rejects the whole request.
//!
//! ## Response Format
//! ```text
//! 200 application/json; charset=UTF-8
//! {"red":true,"yellow":false,"green":true}
//!
//! 400 text/plain; charset=UTF-8
//! <error description>
//! ```

mod query;
mod wire;

pub use query::{parse_flag, Overlay, FIELDS};
pub use wire::{decode_state, encode_query, encode_state};

/// Content type of the GUI document
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=UTF-8";

/// Content type of successful API responses
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Content type of error and not-found responses
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=UTF-8";
