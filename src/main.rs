use clap::Parser;

mod cmd;
mod error;
mod javap;
mod payload;
mod utils;

use error::BridgeError;

/// jbridge - JSON command bridge for javap bytecode disassembly
///
/// Accepts one JSON payload as the sole positional argument and emits
/// exactly one JSON document per run: the result on stdout (exit 0) or
/// {"status":"error","message":...} on stderr (exit 1).
///
/// Payload fields:
///   mode                  "disassemble" runs the disassembler;
///                         anything else takes the greeting path
///   name, age             greeting inputs (default "Гость" / 0)
///   classPath, className, workingDir
///                         required for disassemble mode
///
/// Examples:
///   jbridge '{"name":"Мир","age":21}'
///   jbridge '{"mode":"disassemble","classPath":"build/classes","className":"com.example.Main","workingDir":"/tmp/project"}'
///   jbridge -d /opt/jdk/bin/javap '{...}'     (or JBRIDGE_DISASSEMBLER)
#[derive(Parser, Debug)]
#[command(
    name = "jbridge",
    version,
    about = "JSON command bridge for javap bytecode disassembly",
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON request payload (exactly one object)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Disassembler command line (falls back to JBRIDGE_DISASSEMBLER, then javap)
    #[arg(short = 'd', long = "disassembler", value_name = "CMD")]
    disassembler: Option<String>,

    /// Increase diagnostic verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all diagnostics except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(doc) => println!("{doc}"),
        Err(e) => {
            eprintln!("{}", payload::error_body(&e.to_string()));
            std::process::exit(1);
        }
    }
}

/// Parse, dispatch, serialize. Every failure funnels into `BridgeError`
/// so `main` renders exactly one error document and nothing reaches
/// stdout on an error path.
fn run(cli: Cli) -> Result<String, BridgeError> {
    let input = cli.input.ok_or(BridgeError::InputMissing)?;
    crate::log_trace!("raw input: {input}");

    let request = payload::parse_request(&input)?;
    let response = cmd::dispatch(request, cli.disassembler.as_deref())?;

    serde_json::to_string(&response)
        .map_err(|e| BridgeError::Unexpected(format!("Failed to serialize response: {e}")))
}
