/*!
Command dispatch.

One handler per mode (`greet.rs`, `disassemble.rs`); `dispatch` routes a
parsed `Request` to its handler and returns the single `Response`.

Conventions:
  - Each handler module exposes exactly one public `execute_*` function.
  - Handlers return `Result<Response, BridgeError>`; rendering (stream
    selection, exit code) stays in `main`.
*/

pub mod disassemble;
pub mod greet;

pub use disassemble::execute_disassemble;
pub use greet::execute_greet;

use crate::error::BridgeError;
use crate::payload::{Request, Response};

/// Route a parsed request to its handling path. `disassembler` is the
/// raw `--disassembler` override, resolved only when that path runs.
pub fn dispatch(request: Request, disassembler: Option<&str>) -> Result<Response, BridgeError> {
    match request {
        Request::Greet(req) => Ok(execute_greet(&req)),
        Request::Disassemble(req) => execute_disassemble(&req, disassembler),
    }
}
