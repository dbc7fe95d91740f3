/*!
`disassemble.rs`

Handler for the `disassemble` mode: resolves the effective disassembler
command (flag > JBRIDGE_DISASSEMBLER > javap), then drives one child
invocation through the `javap` layer.

JSON Success Output:
{
  "status": "success",
  "disassembledCode": "<tool stdout, \n line endings>"
}

Failures surface as `BridgeError` values; `main` renders them as the
single error document on stderr.
*/

use anyhow::Context;

use crate::error::BridgeError;
use crate::javap::{self, ToolSpec};
use crate::log_debug;
use crate::payload::{DisassembleRequest, Response};

/// Entry point for the disassemble path.
///
/// `main` is synchronous; the spawn + drain + wait sequence runs on a
/// runtime built here for the one invocation.
pub fn execute_disassemble(
    req: &DisassembleRequest,
    disassembler: Option<&str>,
) -> Result<Response, BridgeError> {
    let tool = ToolSpec::from_flag_or_env(disassembler)?;
    log_debug!("disassembling {} with '{}'", req.class_name, tool);

    let rt = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .map_err(BridgeError::from)?;
    rt.block_on(javap::run(&tool, req))
}

/* --------------------------------- Tests ---------------------------------- */
