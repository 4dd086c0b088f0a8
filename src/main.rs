mod animate;
mod chart;
mod chroma;
mod color;
mod data;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pipeline::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "chroma-spec", version, about = "Chromaticity charts for flashlight measurement databases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chart a single chromaticity measure
    Single {
        /// CIE 1931 x coordinate
        #[arg(long)]
        ciex: f64,

        /// CIE 1931 y coordinate
        #[arg(long)]
        ciey: f64,

        /// Measure description, used as chart title and file name
        #[arg(long)]
        model: String,

        /// Output directory
        #[arg(long, default_value = "data")]
        outdir: PathBuf,

        /// Centre the viewing window on the measure
        #[arg(short, long)]
        zoom: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Chart every measure of every flashlight in a database
    Batch {
        /// Input database file
        #[arg(long, default_value = "data/sotc.json")]
        indb: PathBuf,

        /// Output directory
        #[arg(long, default_value = "data/SOTC")]
        outdir: PathBuf,

        /// Clear each model directory before writing
        #[arg(long)]
        clear: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Overlay all measures of each flashlight on one evolution chart
    Evol {
        /// Input database file
        #[arg(long, default_value = "data/sotc.json")]
        indb: PathBuf,

        /// Output directory
        #[arg(long, default_value = "data/SOTC")]
        outdir: PathBuf,

        /// Clear each model directory before writing
        #[arg(long)]
        clear: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Build an animated chart per flashlight with two or more measures
    Gifs {
        /// Input database file
        #[arg(long, default_value = "data/sotc.json")]
        indb: PathBuf,

        /// Output directory
        #[arg(long, default_value = "data/SOTC")]
        outdir: PathBuf,

        /// Clear each model directory before writing
        #[arg(long)]
        clear: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Log CCT and Duv for every measure, optionally exporting CSV
    Stats {
        /// Input database file
        #[arg(long, default_value = "data/sotc.json")]
        indb: PathBuf,

        /// Write the metric table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Single {
            ciex,
            ciey,
            model,
            outdir,
            zoom,
            verbose,
        } => {
            init_logging(verbose);
            pipeline::chart_single(ciex, ciey, &model, &outdir, zoom)?;
        }
        Command::Batch {
            indb,
            outdir,
            clear,
            verbose,
        } => {
            init_logging(verbose);
            let db = data::loader::load_file(&indb)?;
            pipeline::run_batch(&db, &outdir, RunOptions { clear_existing: clear })?;
        }
        Command::Evol {
            indb,
            outdir,
            clear,
            verbose,
        } => {
            init_logging(verbose);
            let db = data::loader::load_file(&indb)?;
            pipeline::run_evolution(&db, &outdir, RunOptions { clear_existing: clear })?;
        }
        Command::Gifs {
            indb,
            outdir,
            clear,
            verbose,
        } => {
            init_logging(verbose);
            let db = data::loader::load_file(&indb)?;
            pipeline::run_animations(&db, &outdir, RunOptions { clear_existing: clear })?;
        }
        Command::Stats { indb, csv, verbose } => {
            init_logging(verbose);
            let db = data::loader::load_file(&indb)?;
            pipeline::run_stats(&db, csv.as_deref())?;
        }
    }
    Ok(())
}
