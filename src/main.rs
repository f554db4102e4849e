//! Purpose: `i3reply` CLI entry point for inspecting captured i3 IPC replies.
//! Role: Binary crate root; parses args, reads one JSON reply, runs a command.
//! Invariants: Reply documents are read from a file path or stdin (`-` or omitted).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use i3ipc_reply::api::{Error, ErrorKind, Reply, to_exit_code};
use serde_json::{Map, Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

/// Exit code for a well-formed reply that carries an `error` attribute.
const REPLY_FAILURE_EXIT: i32 = 10;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(usage_message(&err))
                        .with_hint("Try `i3reply --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

#[derive(Parser, Debug)]
#[command(
    name = "i3reply",
    version,
    about = "Inspect i3 IPC JSON replies",
    long_about = None,
    after_help = r#"EXAMPLES
  $ i3-msg -t get_version | i3reply show
  $ i3reply get human_readable version.json
  $ i3reply json --pretty tree.json
  $ i3-msg 'workspace 3' | i3reply check"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize text renderings and diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the indented text rendering of a reply.
    Show {
        #[arg(help = "Reply file, or `-` for stdin (default)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    /// Print the value at a dotted attribute path (e.g. `nodes.0.name`).
    Get {
        path: String,
        #[arg(help = "Reply file, or `-` for stdin (default)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    /// Exit non-zero when the reply carries an `error` attribute.
    Check {
        #[arg(help = "Reply file, or `-` for stdin (default)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    /// Re-emit the reply as JSON, preserving attribute order.
    Json {
        #[arg(help = "Reply file, or `-` for stdin (default)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        #[arg(long, help = "Indent the JSON output")]
        pretty: bool,
    },
    /// List top-level attribute names, one per line.
    Keys {
        #[arg(help = "Reply file, or `-` for stdin (default)", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    /// Generate shell completions.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn read_reply(input: Option<&PathBuf>) -> Result<Reply, Error> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => {
            debug!(path = %path.display(), "reading reply file");
            fs::read_to_string(path).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message(format!("failed to read {}", path.display()))
                    .with_source(err)
            })?
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            buf
        }
    };
    Reply::parse(&text)
}

fn emit_text(plain: String, colored: impl FnOnce() -> String, color_mode: ColorMode) {
    let use_color = color_mode.use_color(io::stdout().is_terminal());
    if use_color {
        println!("{}", colored());
    } else {
        println!("{plain}");
    }
}

const RED: &str = "31";
const YELLOW: &str = "33";

fn paint(label: &str, use_color: bool, color: &str) -> String {
    if use_color {
        format!("\u{1b}[{color}m{label}\u{1b}[0m")
    } else {
        label.to_string()
    }
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
    } else {
        eprintln!("{}", error_json(err));
    }
}

fn emit_reply_failure(reply: &Reply, color_mode: ColorMode) {
    let message = reply
        .error_message()
        .map(str::to_string)
        .or_else(|| reply.get("error").ok().map(|value| value.to_json().to_string()))
        .unwrap_or_default();
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = paint("reply error:", color_mode.use_color(is_tty), RED);
        eprintln!("{label} {message}");
    } else {
        eprintln!("{}", json!({ "reply_error": message }));
    }
}

/// Optional details of a reply error, in display order.
///
/// Sources are single serde or io errors, so only the first one is reported.
fn error_details(err: &Error) -> Vec<(&'static str, String)> {
    let mut details = Vec::new();
    if let Some(attribute) = err.attribute() {
        details.push(("attribute", attribute.to_string()));
    }
    if let Some(hint) = err.hint() {
        details.push(("hint", hint.to_string()));
    }
    if let Some(cause) = std::error::Error::source(err) {
        details.push(("cause", cause.to_string()));
    }
    details
}

fn error_message(err: &Error) -> String {
    err.message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:?}", err.kind()))
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    for (field, detail) in error_details(err) {
        inner.insert(field.to_string(), json!(detail));
    }
    json!({ "error": inner })
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut text = format!("{} {}", paint("error:", use_color, RED), error_message(err));
    for (field, detail) in error_details(err) {
        let label = paint(&format!("{field}:"), use_color, YELLOW);
        text.push_str(&format!("\n{label} {detail}"));
    }
    text
}

/// First line of a clap error without its `error:` prefix.
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error:").trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}
