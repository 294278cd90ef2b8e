use anyhow::{Context, Result, anyhow};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Install the global tracing subscriber
///
/// Output goes to stderr unless `log_file` is given, in which case it is
/// appended to that file. ANSI colors are used only on a terminal.
/// `RUST_LOG` takes precedence over the `verbose` switch.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("heron=debug,heron_cli=debug,heron_core=debug")
        } else {
            EnvFilter::new("heron=info,heron_cli=info,heron_core=info")
        }
    });

    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(file_appender(path)?),
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_ansi(log_file.is_none() && io::stderr().is_terminal())
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
