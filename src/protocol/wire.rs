//! JSON wire format
//!
//! Encoding of states into response bodies and query strings, and strict
//! decoding of response bodies back into states.

use serde_json::Value;

use crate::error::{Result, TrafficLightError};
use crate::state::State;

use super::FIELDS;

/// Encode a state as the JSON response body
///
/// Format: `{"red":bool,"yellow":bool,"green":bool}`
pub fn encode_state(state: &State) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Encode a state as a full set of query parameters
///
/// All three fields are always present; the server treats this as a full
/// overwrite.
pub fn encode_query(state: &State) -> [(&'static str, &'static str); 3] {
    let flag = |on: bool| if on { "true" } else { "false" };
    [
        (FIELDS[0], flag(state.red())),
        (FIELDS[1], flag(state.yellow())),
        (FIELDS[2], flag(state.green())),
    ]
}

/// Decode a response body into a state
///
/// The body must be a JSON object whose `red`, `yellow` and `green`
/// properties are all strictly boolean. Extra properties are ignored.
pub fn decode_state(body: &str) -> Result<State> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        TrafficLightError::MalformedResponse(format!("Response `{}' is not valid JSON: {}", body, e))
    })?;

    let object = json.as_object().ok_or_else(|| {
        TrafficLightError::MalformedResponse(format!("Response `{}' is not a JSON object", body))
    })?;

    let field = |name: &str| -> Result<bool> {
        match object.get(name) {
            None => Err(TrafficLightError::MalformedResponse(format!(
                "Missing `{}' property in response `{}'",
                name, body
            ))),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(TrafficLightError::MalformedResponse(format!(
                "Invalid value `{}' of `{}' property in response `{}'",
                other, name, body
            ))),
        }
    };

    Ok(State::new(field("red")?, field("yellow")?, field("green")?))
}
