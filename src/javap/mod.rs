//! Disassembler tool layer (the `javap` CLI contract).
//!
//! ToolSpec: which executable to run, resolved flag > env > default.
//! run: spawn `<tool> -c -classpath <classPath> <className>` in a working
//! directory, drain both pipes concurrently, classify by exit code.
//!
use anyhow::{Context, Result, bail};
use shell_words::split as shell_split;
use std::fmt;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::error::BridgeError;
use crate::log_debug;
use crate::payload::{DisassembleRequest, Response};

/// Environment fallback for the `--disassembler` flag.
pub const TOOL_ENV: &str = "JBRIDGE_DISASSEMBLER";

/// Tool used when neither the flag nor the environment overrides it.
pub const DEFAULT_TOOL: &str = "javap";

/// A parsed disassembler command line: the program plus any leading
/// arguments carried by the override (e.g. `sh /path/to/wrapper.sh`).
/// The per-request arguments are appended after these at spawn time.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolSpec {
    /// Split an override value with shell-style rules.
    ///
    /// Examples:
    /// - "javap" -> program "javap"
    /// - "/opt/jdk/bin/javap" -> program "/opt/jdk/bin/javap"
    /// - "sh /tmp/fixture.sh" -> program "sh", args ["/tmp/fixture.sh"]
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("Disassembler command is empty");
        }
        let parts =
            shell_split(trimmed).context("Failed to parse disassembler command line")?;
        let Some((program, args)) = parts.split_first() else {
            bail!("No tokens produced when parsing disassembler command");
        };
        Ok(ToolSpec {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Resolve the effective tool: explicit flag first, then the
    /// `JBRIDGE_DISASSEMBLER` environment variable, then `javap`.
    pub fn from_flag_or_env(flag: Option<&str>) -> Result<Self> {
        let env = std::env::var(TOOL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self::resolve(flag, env.as_deref())
    }

    fn resolve(flag: Option<&str>, env: Option<&str>) -> Result<Self> {
        match flag.or(env) {
            Some(raw) => Self::parse(raw),
            None => Ok(ToolSpec {
                program: DEFAULT_TOOL.to_string(),
                args: Vec::new(),
            }),
        }
    }
}

impl fmt::Display for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Run the disassembler for one request.
///
/// Spawns the child with stdout and stderr piped, drains both streams to
/// EOF before waiting, then maps the exit status:
/// - 0 -> success, payload = captured stdout
/// - nonzero -> `ChildNonZeroExit`, message = captured stderr if
///   non-empty, otherwise a synthesized note naming the code
/// - failed spawn -> `ChildLaunchFailed`
///
/// The wait is unbounded; a hung tool hangs the invocation.
pub async fn run(spec: &ToolSpec, req: &DisassembleRequest) -> Result<Response, BridgeError> {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .arg("-c")
        .arg("-classpath")
        .arg(&req.class_path)
        .arg(&req.class_name)
        .current_dir(&req.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        BridgeError::ChildLaunchFailed(format!("Failed to launch {}: {e}", spec.program))
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| BridgeError::Unexpected("child stdout was not captured".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| BridgeError::Unexpected("child stderr was not captured".into()))?;

    // Both pipes must drain in parallel: reading either to EOF first can
    // deadlock once the child fills the other pipe's buffer.
    let (out_buf, err_buf) = tokio::try_join!(drain(stdout), drain(stderr)).map_err(|e| {
        BridgeError::Unexpected(format!("Failed to read {} output: {e}", spec.program))
    })?;

    let status = child.wait().await.map_err(|e| {
        BridgeError::Unexpected(format!("Failed to wait for {}: {e}", spec.program))
    })?;

    let out_text = normalize_lines(&String::from_utf8_lossy(&out_buf));
    let err_text = normalize_lines(&String::from_utf8_lossy(&err_buf));
    log_debug!(
        "{} finished: code={:?} stdout={}B stderr={}B",
        spec.program,
        status.code(),
        out_buf.len(),
        err_buf.len()
    );

    match status.code() {
        Some(0) => Ok(Response::disassembly(out_text)),
        Some(code) if err_text.is_empty() => Err(BridgeError::ChildNonZeroExit(format!(
            "{} exited with code {code}",
            spec.program
        ))),
        Some(_) => Err(BridgeError::ChildNonZeroExit(err_text)),
        None => Err(BridgeError::ChildNonZeroExit(format!(
            "{} terminated by a signal",
            spec.program
        ))),
    }
}

async fn drain(mut reader: impl AsyncRead + Unpin) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Normalize tool output to `\n` line endings with no trailing newline,
/// the form the embedding UI renders.
fn normalize_lines(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join("\n")
}

/* --------------------------------- Tests ---------------------------------- */
