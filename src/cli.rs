//! Command-line interface for the performance chart generator.
//!
//! Running with no arguments writes the chart to
//! `climatespark_interactive_performance.html` in the working directory.
//!
//! ## Output
//! - `--output`: Where to write the HTML chart
//! - `--plotlyjs`: Inline plotly.js (default) or load it from the CDN
//! - `--no-summary`: Skip the stdout summary table
//!
//! ## Data Export
//! - `--csv`: Print every curve sample as CSV
//! - `--json`: Print the dataset as JSON
//!
//! ## Logging
//! - `--verbose`: Debug-level logs (`RUST_LOG` still wins when set)

use std::path::PathBuf;

use clap::Parser;

use crate::chart::OUTPUT_FILE;
use crate::render::PlotlyJs;

#[derive(Parser, Debug)]
#[command(name = "climatespark-perf")]
#[command(author, version, about = "Interactive Spark vs SciSpark vs ClimateSpark performance chart")]
pub struct Cli {
    // =========================================================================
    // Output
    // =========================================================================

    /// HTML file to write (overwritten if it exists)
    #[arg(short, long, default_value = OUTPUT_FILE, help_heading = "Output")]
    pub output: PathBuf,

    /// How the page gets plotly.js: embedded (works offline) or cdn
    #[arg(long, value_enum, default_value_t = PlotlyJs::Embedded, help_heading = "Output")]
    pub plotlyjs: PlotlyJs,

    /// Do not print the summary table
    #[arg(long, default_value = "false", help_heading = "Output")]
    pub no_summary: bool,

    // =========================================================================
    // Data Export
    // =========================================================================

    /// Print all curve samples as CSV on stdout
    #[arg(long, default_value = "false", help_heading = "Data Export")]
    pub csv: bool,

    /// Print the dataset as pretty JSON on stdout
    #[arg(long, default_value = "false", help_heading = "Data Export")]
    pub json: bool,

    // =========================================================================
    // Logging
    // =========================================================================

    /// Enable debug logging
    #[arg(short, long, default_value = "false", help_heading = "Logging")]
    pub verbose: bool,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Format an execution time in model units.
pub fn format_time(t: f64) -> String {
    if t >= 100.0 {
        format!("{:.1}", t)
    } else {
        format!("{:.3}", t)
    }
}

/// Format a speedup ratio.
pub fn format_speedup(baseline: f64, candidate: f64) -> String {
    if candidate > 0.0 {
        format!("{:.2}x", baseline / candidate)
    } else {
        "n/a".to_string()
    }
}
