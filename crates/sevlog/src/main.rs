use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use sevlog_core::prelude::*;
use sevlog_core::{
    log_debug, log_debug_once, log_debug_stream, log_debug_stream_once, log_error, log_error_debug,
    log_error_debug_stream, log_error_once, log_error_stream, log_error_stream_once, log_info, log_info_once,
    log_info_stream, log_info_stream_once, log_warning, log_warning_debug, log_warning_debug_stream, log_warning_once,
    log_warning_stream, log_warning_stream_once,
};
use sevlog_utils::{init_diagnostics, init_diagnostics_with_level, DiagnosticsFormat, DiagnosticsLevel};
use tracing::info;

/// Leveled console and file logging, demonstrated and measured.
#[derive(Parser, Debug)]
#[command(name = "sevlog")]
#[command(version)]
#[command(about = "Leveled console and file logging, demonstrated and measured", long_about = None)]
struct Cli
{
    /// Directory for warning_log.txt and error_log.txt (default: SEVLOG_LOG_DIR or .)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Label set for the informational level: standard (INFO) or normal (NORMAL)
    #[arg(long, global = true)]
    scheme: Option<SeverityScheme>,

    /// Verbosity of sevlog's own stderr diagnostics (overrides RUST_LOG)
    #[arg(long, global = true)]
    trace_level: Option<DiagnosticsLevel>,

    /// Format of the stderr diagnostics: pretty or json (default: SEVLOG_TRACE_FORMAT)
    #[arg(long, global = true)]
    trace_format: Option<DiagnosticsFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Exercise every logging operation once
    Demo
    {
        /// Enable DEBUG output and the debug-only WARNING/ERROR variants
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
    /// Measure per-call logging overhead
    Bench
    {
        /// Number of calls to time
        #[arg(short, long, default_value_t = 1000)]
        iterations: u32,
        /// Level to log at (info or warning; warning also writes the file)
        #[arg(short, long, default_value = "info")]
        level: Severity,
        /// Time a once-gated statement instead of a plain one
        #[arg(long, default_value_t = false)]
        once: bool,
    },
}

#[derive(Clone, Copy)]
#[repr(u8)]
enum Colors
{
    Red,
    #[allow(dead_code)]
    Green,
    #[allow(dead_code)]
    Blue,
}

impl Ordinal for Colors
{
    fn ordinal(&self) -> i64
    {
        i64::from(*self as u8)
    }
}

fn main()
{
    let cli = Cli::parse();

    // Diagnostics go to stderr; --trace-level debug shows swallowed sink failures
    let diagnostics = match (cli.trace_level, cli.trace_format) {
        (None, None) => init_diagnostics(),
        (level, format) => init_diagnostics_with_level(
            level.unwrap_or(DiagnosticsLevel::Warn),
            format.unwrap_or_else(DiagnosticsFormat::from_env),
        ),
    };
    let _diagnostics = match diagnostics {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize diagnostics: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>>
{
    let mut config = FacilityConfig::from_env();
    if let Some(dir) = cli.log_dir {
        config = config.with_log_dir(dir);
    }
    if let Some(scheme) = cli.scheme {
        config = config.with_scheme(scheme);
    }

    match cli.command {
        Commands::Demo { debug } => {
            if debug {
                config = config.with_debug(true);
            }
            let log = LoggingFacility::install(config)?;
            run_demo(log)?;
        }
        Commands::Bench { iterations, level, once } => {
            let log = LoggingFacility::install(config)?;
            info!(iterations, %level, once, "starting benchmark");
            run_bench(log, iterations, level, once)?;
        }
    }
    Ok(())
}

fn run_demo(log: &LoggingFacility) -> LogResult<()>
{
    log_info!(log, "This is a normal log message without variables.")?;
    log_warning!(log, "This is a warning log message with a variable: {}", 42)?;
    log_error!(log, "This is an error log message with two variables: {} and {}", "variable1", 1234)?;
    log_debug!(log, "This is a debug log message with a variable: {}", 2.5)?;

    let vec = vec![1, 2, 3, 4, 5];
    log_info_stream!(log, "Logging vector:", &vec);
    log_warning_stream!(log, "Logging vector warning:", &vec);
    log_debug_stream!(log, "Logging vector debug:", &vec);

    let map = BTreeMap::from([("one", 1), ("three", 3), ("two", 2)]);
    log_info_stream!(log, "Logging map:", &map);
    log_error_stream!(log, "Logging map error:", &map);

    let unordered_map = HashMap::from([(1, "one"), (2, "two"), (3, "three")]);
    log_info_stream!(log, "Logging unordered_map:", &unordered_map);

    let set = BTreeSet::from([10, 20, 30]);
    log_info_stream!(log, "Logging set:", &set);

    log_info_stream!(log, "Logging enum:", Container::enumerated(&Colors::Red));

    // Only visible with --debug
    log_warning_debug!(log, "This is a warning debug message with variable: {}", 99)?;
    log_error_debug!(log, "This is an error debug message with variable: {}", "debug_error")?;
    log_warning_debug_stream!(log, "Logging vector in debug warning:", &vec);
    log_error_debug_stream!(log, "Logging map in debug error:", &map);

    for _ in 0..5 {
        log_info_once!(log, "This INFO message should appear only once, even though it's inside a loop.")?;
        log_warning_once!(log, "This WARNING message should appear only once.")?;
        log_error_once!(log, "This ERROR message should appear only once.")?;
        log_debug_once!(log, "This DEBUG message should appear only once.")?;
    }

    for _ in 0..5 {
        log_info_stream_once!(log, "This INFO_STREAM message should appear only once:", &vec);
        log_warning_stream_once!(log, "This WARNING_STREAM message should appear only once:", &map);
        log_error_stream_once!(log, "This ERROR_STREAM message should appear only once:", &set);
        log_debug_stream_once!(log, "This DEBUG_STREAM message should appear only once:", &unordered_map);
    }

    Ok(())
}

fn run_bench(log: &LoggingFacility, iterations: u32, level: Severity, once: bool) -> LogResult<()>
{
    let key = GateKey::token("bench");
    let start = Instant::now();

    for i in 0..iterations {
        if once {
            log.log_once(key, level, "This once-gated message should appear only once: iteration {}", &[&i])?;
        } else {
            log.log(level, "Logging overhead test: iteration {}", &[&i])?;
        }
    }

    let micros = start.elapsed().as_secs_f64() * 1_000_000.0;
    let label = if once { format!("{level} once") } else { level.to_string() };
    println!("Total time taken for {iterations} {label} logging operations: {micros:.3} microseconds");
    println!(
        "Average time per {label} logging operation: {:.3} microseconds",
        micros / f64::from(iterations.max(1))
    );
    Ok(())
}
