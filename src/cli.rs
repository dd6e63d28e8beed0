// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "raster-scale")]
#[command(about = "Scaled binary writer for numeric sample arrays")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output file path
    #[arg(short, long, default_value = "output.raw", global = true)]
    pub output: PathBuf,

    /// Byte order of input and output samples (little/big)
    #[arg(long, default_value = "little", global = true)]
    pub endian: String,

    /// Traversal order when writing: c (row-major) or f (column-major)
    #[arg(long, default_value = "c", global = true)]
    pub order: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a raw sample file to another element type, scaling if needed
    Convert {
        /// Input raw sample file
        #[arg(short, long)]
        input: PathBuf,

        /// Input element type (u8..u64, i8..i64, f32, f64, c64, c128)
        #[arg(long)]
        in_type: String,

        /// Output element type
        #[arg(long)]
        out_type: String,

        /// Array shape, e.g. 512x512 (defaults to flat)
        #[arg(long)]
        shape: Option<String>,

        /// Disable multiplicative scaling
        #[arg(long)]
        no_slope: bool,

        /// Disable the additive intercept
        #[arg(long)]
        no_intercept: bool,

        /// Intermediate precision for slope/intercept (f32/f64)
        #[arg(long, default_value = "f32")]
        scaler: String,

        /// Keep NaN/Inf instead of storing zero on integer output
        #[arg(long)]
        keep_nan: bool,
    },

    /// Run conversions listed in a JSON configuration file
    Batch {
        /// JSON config path
        #[arg(short, long)]
        config: PathBuf,
    },
}
