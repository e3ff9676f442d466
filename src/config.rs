use std::time::Duration;

use clap::Parser;

use crate::frame::OFFSET;

/// Redraws the last lines of a file or URL inside a box until Ctrl-C.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// File path, or a URL starting with `http`
    pub source: String,

    /// Refresh interval in seconds
    #[arg(
        short = 'r',
        long = "refresh",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub refresh: u64,

    /// Number of lines to show
    #[arg(
        short = 'l',
        long = "lines",
        default_value_t = 10,
        value_parser = clap::value_parser!(u16).range(1..=(u16::MAX - 3) as i64)
    )]
    pub lines: u16,
}

/// Settings fixed for the lifetime of the process.
///
/// `cols` is derived from the terminal width at startup and never
/// re-queried: resizing the terminal afterwards is not handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub locator: String,
    pub refresh: Duration,
    pub lines: u16,
    pub cols: u16,
    pub offset: u16,
}

impl ViewConfig {
    pub fn new(cli: Cli, terminal_width: u16) -> Self {
        Self {
            locator: cli.source,
            refresh: Duration::from_secs(cli.refresh),
            lines: cli.lines,
            cols: terminal_width.saturating_sub(2 * OFFSET),
            offset: OFFSET,
        }
    }
}
