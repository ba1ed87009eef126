#![deny(future_incompatible)]
#![deny(nonstandard_style)]
#![deny(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::wildcard_imports
)]

use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Write},
    ops::Range,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{anyhow, ensure, Context, Result};
use nalgebra as na;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[macro_use]
extern crate log;

mod cfg;
mod color;
mod plot;
mod sample;

use cfg::PlotConfig;
use color::{ColorRgb, Reds};
use sample::{Axis, AxisRange, RangeMode, SampleSet};

//
// Main
//

/// Plots x/y/z acceleration readings from text logs as 3D scatter charts.
#[derive(clap::Parser)]
#[command(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Parses every log and renders them side by side into one SVG figure.
    Plot(plot::Args),
    /// Parses every log and prints its sample count and axis ranges.
    Summary(sample::Args),
}

fn main() -> Result<()> {
    use clap::Parser;

    // Init logging.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Execute command.
    match Args::parse().command {
        Commands::Plot(args) => plot::run(args)?,
        Commands::Summary(args) => sample::run(args)?,
    }

    Ok(())
}
