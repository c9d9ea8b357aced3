use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;
use when::{describe_from_now, CalendarTime, Clock, FixedClock, SystemClock};

const EXAMPLES: &str = "\
Examples:
  $ when 1569054942 --now 1569110219
  2019-09-21T08:35:42Z (15 hours, 21 minutes, 17 seconds ago)

  $ when 15 --now 1569110219
  1970-01-01T00:00:15Z (49 years, 8 months, 20 days, 23 hours, 56 minutes, 44 seconds ago)

  $ when 2000000000 --now 1569110219
  2033-05-18T03:33:20Z (13 years, 8 months, 26 days, 3 hours, 36 minutes, 21 seconds in the future)";

#[derive(Parser)]
#[command(
    name = "when",
    version,
    about = "Print a Unix timestamp as an RFC 3339 (UTC) datetime and how long ago or ahead it is",
    after_help = EXAMPLES
)]
struct Cli {
    /// Unix timestamp in seconds; negative values are before 1970
    #[arg(value_name = "TIMESTAMP", allow_negative_numbers = true)]
    timestamp: i64,

    /// Measure against this Unix timestamp instead of the system clock
    #[arg(long, value_name = "TIMESTAMP", allow_negative_numbers = true)]
    now: Option<i64>,

    /// Enable verbose debug output on stderr
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Help and version go to stdout with success; every other parse failure is a usage error.
fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Usage error. Expecting a Unix Timestamp as an argument.");
            let _ = err.print();
            eprintln!();
            eprintln!("{}", EXAMPLES);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let then = from_epoch(cli.timestamp)?;
    debug!(timestamp = cli.timestamp, %then, "resolved timestamp");

    let clock: Box<dyn Clock> = match cli.now {
        Some(secs) => {
            let now = from_epoch(secs).context("invalid --now")?;
            debug!(timestamp = secs, %now, "using fixed clock");
            Box::new(FixedClock(now))
        }
        None => {
            debug!("using system clock");
            Box::new(SystemClock)
        }
    };

    Ok(format!("{} ({})", then, describe_from_now(&then, &clock)))
}

fn from_epoch(secs: i64) -> Result<CalendarTime> {
    CalendarTime::from_epoch(secs)
        .with_context(|| format!("timestamp {} is outside the supported calendar range", secs))
}
