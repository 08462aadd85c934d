//! Spark / SciSpark / ClimateSpark Performance Chart
//!
//! Generates synthetic execution-time curves for three systems over 1-50
//! queried states, in Global and Regional query modes, and exports them as a
//! self-contained interactive HTML chart with a state slider and a mode
//! dropdown.

mod chart;
mod cli;
mod model;
mod render;


use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chart::assemble;
use cli::{format_speedup, format_time, Cli};
use model::{styles, Dataset, DatasetRow, QueryMode, System};
use render::write_html;

/// State counts shown in the summary table.
const SUMMARY_STATES: [u32; 4] = [1, 10, 25, 50];

fn main() -> Result<()> {
    let args = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let dataset = Dataset::generate();
    debug!(states = dataset.states().len(), "dataset generated");

    if !args.no_summary {
        print_summary(&dataset);
    }
    if args.csv {
        print_csv(&dataset);
    }
    if args.json {
        let json = serde_json::to_string_pretty(&dataset).context("serializing dataset")?;
        println!("{}", json);
    }

    let figure = assemble(&dataset, &styles());
    debug!(
        traces = figure.data.len(),
        slider_steps = figure.layout.sliders.iter().map(|s| s.steps.len()).sum::<usize>(),
        "figure assembled"
    );

    write_html(&figure, &args.output, args.plotlyjs)?;
    info!("open {} in a browser to explore the chart", args.output.display());

    Ok(())
}

fn print_summary(dataset: &Dataset) {
    println!("=== Simulated Execution Time ===\n");

    for mode in QueryMode::ALL {
        println!("--- {} Query ---", mode.name());
        print!("  {:<8}", "States");
        for system in System::ALL {
            print!("{:>14}", system.name());
        }
        println!();

        for n in SUMMARY_STATES {
            print!("  {:<8}", n);
            for system in System::ALL {
                let t = dataset.curve(mode, system).at(n).unwrap_or(f64::NAN);
                print!("{:>14}", format_time(t));
            }
            println!();
        }

        let last = *dataset.states().last().unwrap_or(&0);
        let spark = dataset.curve(mode, System::Spark).at(last).unwrap_or(f64::NAN);
        let climate = dataset.curve(mode, System::ClimateSpark).at(last).unwrap_or(f64::NAN);
        println!(
            "  ClimateSpark vs Spark @ {} states: {}",
            last,
            format_speedup(spark, climate)
        );
        println!();
    }
}

fn print_csv(dataset: &Dataset) {
    println!("{}", DatasetRow::csv_header());
    for row in dataset.rows() {
        println!("{}", row.to_csv());
    }
}
