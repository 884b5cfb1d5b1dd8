//! Reads a wire layout and reports the crossings between its horizontal and
//! vertical wires.
//!
//! ```text
//! wirecross [--mode count|list|jsonp] [--input <path>] < layout.txt
//! ```
//!
//! The mode can also be set through the `TRACE` environment variable.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::{debug, error};

use wirecross::{CrossingVerifier, Layout, TracePayload, TraceRecorder, write_count, write_jsonp};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print the number of crossings.
    Count,
    /// Print one line per crossing pair.
    List,
    /// Print the layout and a trace of the sweep for the visualizer.
    Jsonp,
}

impl Mode {
    /// Mode named by the `TRACE` environment variable. Unset, empty or
    /// unrecognized values select counting.
    fn from_trace(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("list") => Mode::List,
            Some("jsonp") => Mode::Jsonp,
            _ => Mode::Count,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Checks a wire layout for crossing wires")]
struct Cli {
    /// Output mode. Overrides `TRACE`, which accepts the same names and
    /// falls back to `count` for anything else.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Read the layout from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
}

/// Logs go to stderr with their source location; `RUST_LOG` overrides the
/// default `warn` level.
fn initialize_logger() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}:{}] {}",
            record.level(),
            record.module_path().unwrap_or(""),
            record.line().map(|l| l.to_string()).unwrap_or_default(),
            record.args()
        )
    });
    builder.init();
}

fn read_layout(input: Option<&PathBuf>) -> anyhow::Result<Layout> {
    let layout = match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Layout::from_reader(BufReader::new(file))
        }
        None => Layout::from_reader(io::stdin().lock()),
    };
    Ok(layout?)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mode = cli
        .mode
        .unwrap_or_else(|| Mode::from_trace(env::var("TRACE").ok().as_deref()));
    let layout = read_layout(cli.input.as_ref())?;
    debug!("running {mode:?} over {} wires", layout.len());

    let mut out = BufWriter::new(io::stdout().lock());
    match mode {
        Mode::Count => {
            let count = CrossingVerifier::new(&layout).count_crossings()?;
            write_count(&mut out, count)?;
        }
        Mode::List => {
            let crossings = CrossingVerifier::new(&layout).list_crossings()?;
            crossings.write_to(&mut out)?;
        }
        Mode::Jsonp => {
            let mut verifier = CrossingVerifier::with_observer(&layout, TraceRecorder::new(&layout));
            verifier.list_crossings()?;
            let recorder = verifier.into_observer();
            write_jsonp(&mut out, &TracePayload::new(&layout, recorder.events()))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    initialize_logger();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("wirecross: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_values_fall_back_to_count() {
        assert_eq!(Mode::from_trace(None), Mode::Count);
        assert_eq!(Mode::from_trace(Some("")), Mode::Count);
        assert_eq!(Mode::from_trace(Some("1")), Mode::Count);
        assert_eq!(Mode::from_trace(Some("list")), Mode::List);
        assert_eq!(Mode::from_trace(Some("jsonp")), Mode::Jsonp);
    }

    #[test]
    fn mode_flag_is_strict() {
        assert!(Cli::try_parse_from(["wirecross", "--mode", "1"]).is_err());
        let cli = Cli::try_parse_from(["wirecross", "--mode", "list"]).unwrap();
        assert_eq!(cli.mode, Some(Mode::List));
    }
}
