//! Error taxonomy.
//!
//! Every failure the program can produce collapses into one of these
//! variants before `main` renders it; the `Display` text of a variant is
//! exactly the `message` field of the error document written to stderr.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The process was started without the JSON payload argument.
    #[error("No input data provided.")]
    InputMissing,

    /// The payload was not valid JSON, or a field the selected mode
    /// requires was absent or wrong-typed.
    #[error("{0}")]
    InputMalformed(String),

    /// The disassembler could not be started (tool not found, bad
    /// working directory).
    #[error("{0}")]
    ChildLaunchFailed(String),

    /// The disassembler ran but exited nonzero. Carries its stderr when
    /// non-empty, otherwise a synthesized note naming the exit code.
    #[error("{0}")]
    ChildNonZeroExit(String),

    /// Anything that slipped past the classified paths.
    #[error("Unhandled exception: {0}")]
    Unexpected(String),
}

impl From<anyhow::Error> for BridgeError {
    fn from(err: anyhow::Error) -> Self {
        BridgeError::Unexpected(format!("{err:#}"))
    }
}

/* --------------------------------- Tests ---------------------------------- */
