//! delta: run a command at a fixed interval and print how its numbers change
//!
//! Each refresh captures the command's output, pairs it line-by-line with
//! the previous capture, and replaces every numeric field with its signed
//! delta while leaving the surrounding text in place.

mod feed;
mod printer;

use std::io::{self, IsTerminal};
use std::process::exit;
use std::thread;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use log::{debug, warn};
use snapshot_diff::{diff_snapshots, RenderOptions, Snapshot};

use crate::feed::CommandRunner;
use crate::printer::{Printer, PrinterOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Parser)]
#[command(name = "delta")]
#[command(version)]
#[command(about = "Run a command repeatedly and print numeric deltas between runs")]
struct Cli {
    /// Seconds to wait between runs
    #[arg(short = 'i', long, value_name = "SECONDS", default_value_t = 1.0)]
    interval: f64,

    /// Stop after this many runs
    #[arg(short = 'n', long, value_name = "RUNS")]
    count: Option<u64>,

    /// Prefix every output line with a timestamp
    #[arg(short = 't', long)]
    timestamps: bool,

    /// Do not print "--- <time>" separators between refreshes
    #[arg(short = 'S', long)]
    no_separators: bool,

    /// When to colorize deltas (positive green, negative red)
    #[arg(short = 'c', long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Show the original output interleaved with the deltas
    #[arg(short = 'o', long)]
    orig: bool,

    /// Hide lines whose deltas are all zero
    #[arg(short = 'z', long)]
    skip_zeros: bool,

    /// Diff against the first run instead of the previous one
    #[arg(short = 'a', long)]
    absolute: bool,

    /// Keep original column widths even when a delta does not fit
    #[arg(long)]
    no_flex: bool,

    /// Command to run, with its arguments; a single argument is passed to
    /// $SHELL -c
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

/// Owns the snapshot retained between ticks.
///
/// Relative mode keeps the latest snapshot, so each run diffs against the
/// one before it. Absolute mode keeps the first snapshot as a fixed
/// baseline.
struct Retention {
    absolute: bool,
    previous: Option<Snapshot>,
}

impl Retention {
    fn new(absolute: bool) -> Self {
        Self {
            absolute,
            previous: None,
        }
    }

    /// The snapshot to diff the next capture against, if any
    fn previous(&self) -> Option<&Snapshot> {
        self.previous.as_ref()
    }

    /// Record a completed tick
    fn retain(&mut self, current: Snapshot) {
        if !self.absolute || self.previous.is_none() {
            self.previous = Some(current);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    ensure!(
        cli.interval.is_finite() && cli.interval >= 0.0,
        "interval must be a non-negative number of seconds"
    );
    let interval = Duration::from_secs_f64(cli.interval);

    let colors = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    if colors {
        colored::control::set_override(true);
    }

    let render = RenderOptions {
        flex: !cli.no_flex,
        colors,
    };
    let mut printer = Printer::new(
        io::stdout().lock(),
        PrinterOptions {
            timestamps: cli.timestamps,
            separators: !cli.no_separators,
            orig: cli.orig,
            skip_zeros: cli.skip_zeros,
        },
    );

    let runner = CommandRunner::new(&cli.command);
    let mut retention = Retention::new(cli.absolute);
    let mut runs = 0u64;

    loop {
        let capture = runner.capture()?;
        if !capture.status.success() {
            // propagate the target command's failure
            let code = capture.status.code().unwrap_or(1);
            warn!("command exited with status {code}, stopping");
            return Ok(code);
        }

        let current = Snapshot::parse(&capture.stdout);
        debug!("captured {} lines", current.line_count());

        let printed = match retention.previous() {
            None => printer.print_first(&current),
            Some(prev) => {
                let diff = diff_snapshots(prev, &current, &render);
                if diff.line_count_changed() {
                    warn!(
                        "output went from {} to {} lines; unmatched lines pass through",
                        diff.prev_line_count, diff.cur_line_count
                    );
                }
                printer.print_diff(&diff)
            }
        };
        match printed {
            Ok(()) => {}
            // downstream closed (e.g. piped into head); not a failure
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(0),
            Err(err) => return Err(err.into()),
        }

        retention.retain(current);

        runs += 1;
        if cli.count.is_some_and(|n| runs >= n) {
            return Ok(0);
        }
        thread::sleep(interval);
    }
}


fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => exit(code),
        Err(err) => {
            eprintln!("delta: {err:#}");
            exit(1);
        }
    }
}
