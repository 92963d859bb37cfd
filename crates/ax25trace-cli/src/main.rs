use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use ax25trace_core::{
    FrameSource, InputEncoding, MAX_FRAME_LEN, RawFrame, ReaderSource, SourceError, Trace,
    trace_frame,
};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use tracing::{debug, warn};

const EXAMPLES: &str = "Examples:\n  ax25trace decode frame.bin\n  ax25trace decode --hex frame.hex --json\n  xxd -p frame.bin | ax25trace dump --hex";

#[derive(Parser, Debug)]
#[command(name = "ax25trace")]
#[command(version)]
#[command(
    about = "Single-frame diagnostic decoder for AX.25 and NetRom.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one captured frame and print a human-readable trace.
    #[command(alias = "dump")]
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Capture file holding exactly one frame; `-` or absent reads stdin
    input: Option<PathBuf>,

    /// Input is hexadecimal text (whitespace and `#` comments ignored)
    #[arg(long)]
    hex: bool,

    /// Emit the trace as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output (implies --json)
    #[arg(long)]
    pretty: bool,

    /// Write the trace to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode(args) => {
            init_tracing(args.verbose);
            cmd_decode(args)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

/// Log to stderr; stdout carries the trace.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<ExitCode, CliError> {
    let encoding = if args.hex {
        InputEncoding::Hex
    } else {
        InputEncoding::Binary
    };

    let input = match args.input.as_deref() {
        None => None,
        Some(path) if path == Path::new("-") => None,
        Some(path) => {
            let resolved = resolve_input_path(path)?;
            validate_input_file(&resolved)?;
            Some(resolved)
        }
    };

    let frame = match input.as_deref() {
        Some(path) => {
            let mut source = ReaderSource::open(path, encoding)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            read_capture(&mut source, &path.display().to_string(), args.hex)?
        }
        None => {
            let mut source = ReaderSource::new(io::stdin().lock(), encoding);
            read_capture(&mut source, "stdin", args.hex)?
        }
    };
    if frame.truncated {
        warn!(
            limit = MAX_FRAME_LEN,
            "input longer than one frame; trailing bytes ignored"
        );
    }

    let trace = trace_frame(&frame.data);
    debug!(status = ?trace.status, lines = trace.lines.len(), "frame traced");
    let rendered = render_trace(&trace, args.json || args.pretty, args.pretty)?;

    match args.output {
        Some(output) => {
            if let Some(input) = input.as_deref() {
                ensure_distinct_output(input, &output)?;
            }
            write_output(&output, &rendered)?;
            if !args.quiet {
                eprintln!("OK: trace written -> {}", output.display());
            }
        }
        None => print!("{}", rendered),
    }

    if trace.status.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn read_capture(
    source: &mut impl FrameSource,
    name: &str,
    hex: bool,
) -> Result<RawFrame, CliError> {
    source.read_frame().map_err(|err| match err {
        SourceError::Io(err) => CliError::new(format!("failed to read {}: {}", name, err), None),
        err => {
            let hint = if hex {
                "omit --hex to read raw frame bytes"
            } else {
                "pass --hex for hexadecimal text input"
            };
            CliError::new(
                format!("invalid input {}: {}", name, err),
                Some(hint.to_string()),
            )
        }
    })
}

fn render_trace(trace: &Trace, json: bool, pretty: bool) -> Result<String, CliError> {
    if !json {
        return Ok(trace.to_text());
    }
    let mut rendered = if pretty {
        serde_json::to_string_pretty(trace).context("JSON serialization failed")?
    } else {
        serde_json::to_string(trace).context("JSON serialization failed")?
    };
    rendered.push('\n');
    Ok(rendered)
}

fn write_output(output: &Path, rendered: &str) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, rendered)
        .with_context(|| format!("Failed to write trace: {}", output.display()))?;
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing output directory cannot hold the input.
    let Ok(output_dir) = output_dir else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a capture file, or `-` to read stdin".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file holding a single frame".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
