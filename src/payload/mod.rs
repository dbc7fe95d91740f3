//! Payload parsing (request in, response out).
//!
//! parse_request -> Request { Greet | Disassemble }
//! The `mode` discriminator is decided once here; downstream code never
//! re-inspects strings. Defaults (`name`, `age`) are applied centrally
//! during parsing instead of at the use sites.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeError;

/// Display name substituted when the payload carries none.
pub const DEFAULT_NAME: &str = "Гость";

/// Fixed descriptive line included in every greeting response.
pub const GREETING_INFO: &str = "Это пример консольного Java-приложения.";

/// Handling path selected by the `mode` field.
///
/// Only the exact literal `"disassemble"` switches paths; every other
/// value, including absence, stays on the default (greeting) path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    Disassemble,
}

impl Mode {
    fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("disassemble") => Mode::Disassemble,
            _ => Mode::Default,
        }
    }
}

/// A parsed, defaulted, validated request. Constructed once per run and
/// discarded after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Greet(GreetRequest),
    Disassemble(DisassembleRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreetRequest {
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisassembleRequest {
    pub class_path: String,
    pub class_name: String,
    pub working_dir: String,
}

/// Wire shape of the incoming payload. Everything is optional at this
/// layer; requiredness depends on the mode and is enforced in
/// `parse_request`. Unrecognized keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    mode: Option<Value>,
    name: Option<Value>,
    age: Option<Value>,
    class_path: Option<Value>,
    class_name: Option<Value>,
    working_dir: Option<Value>,
}

/// Parse the raw argument into a `Request`, applying defaults and
/// enforcing the fields the selected mode requires.
pub fn parse_request(input: &str) -> Result<Request, BridgeError> {
    let raw: RawRequest = serde_json::from_str(input)
        .map_err(|e| BridgeError::InputMalformed(format!("Invalid input payload: {e}")))?;

    let mode = raw.mode.as_ref().and_then(lenient_string);
    match Mode::from_raw(mode.as_deref()) {
        Mode::Default => Ok(Request::Greet(GreetRequest {
            name: raw
                .name
                .as_ref()
                .and_then(lenient_string)
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            age: raw.age.as_ref().map(lenient_age).unwrap_or(0),
        })),
        Mode::Disassemble => Ok(Request::Disassemble(DisassembleRequest {
            class_path: required_string(raw.class_path.as_ref(), "classPath")?,
            class_name: required_string(raw.class_name.as_ref(), "className")?,
            working_dir: required_string(raw.working_dir.as_ref(), "workingDir")?,
        })),
    }
}

fn required_string(field: Option<&Value>, key: &str) -> Result<String, BridgeError> {
    match field {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(BridgeError::InputMalformed(format!(
            "Missing required field '{key}' for disassemble mode"
        ))),
        Some(_) => Err(BridgeError::InputMalformed(format!(
            "Field '{key}' must be a string"
        ))),
    }
}

/// String coercion for the free-form fields: strings pass through,
/// scalars stringify, null counts as absent.
fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Permissive age coercion: numbers as-is, numeric strings parsed,
/// everything else falls back to 0. Long-standing behavior the embedding
/// UI relies on.
fn lenient_age(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/* ------------------------------- Responses -------------------------------- */

/// The single result document emitted per invocation, serialized once to
/// exactly one stream (stdout). Error documents never pass through here;
/// see `error_body`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Greeting {
        status: &'static str,
        message: String,
        info: String,
        #[serde(rename = "processedAge")]
        processed_age: i64,
    },
    Disassembly {
        status: &'static str,
        #[serde(rename = "disassembledCode")]
        disassembled_code: String,
    },
}

const STATUS_SUCCESS: &str = "success";

impl Response {
    pub fn greeting(message: String, info: String, processed_age: i64) -> Self {
        Response::Greeting {
            status: STATUS_SUCCESS,
            message,
            info,
            processed_age,
        }
    }

    pub fn disassembly(disassembled_code: String) -> Self {
        Response::Disassembly {
            status: STATUS_SUCCESS,
            disassembled_code,
        }
    }
}

/// Render the error document for stderr. `message` is the `Display` of a
/// `BridgeError`.
pub fn error_body(message: &str) -> String {
    serde_json::json!({ "status": "error", "message": message }).to_string()
}

/* --------------------------------- Tests ---------------------------------- */
