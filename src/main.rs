// src/main.rs
use anyhow::Result;
use clap::Parser;

use raster_scale::batch::{
    parse_endian, parse_order, parse_shape, process_batch, run_convert, ConvertJob,
};
use raster_scale::cli::{Cli, Commands};
use raster_scale::numeric::kind::{ElemType, ScalerKind};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert {
            input,
            in_type,
            out_type,
            shape,
            no_slope,
            no_intercept,
            scaler,
            keep_nan,
        } => {
            let job = ConvertJob {
                input: input.clone(),
                output: cli.output.clone(),
                in_type: ElemType::parse(in_type)?,
                out_type: ElemType::parse(out_type)?,
                shape: shape.as_deref().map(parse_shape).transpose()?,
                allow_slope: !no_slope,
                allow_intercept: !no_intercept,
                scaler: ScalerKind::parse(scaler)?,
                endian: parse_endian(&cli.endian)?,
                order: parse_order(&cli.order)?,
                nan2zero: !keep_nan,
            };
            let (slope, inter) = run_convert(&job)?;
            println!(
                "Wrote {} as {}: slope {}, intercept {}",
                cli.output.display(),
                job.out_type,
                slope,
                inter
            );
        }
        Commands::Batch { config } => {
            process_batch(config)?;
            println!("Batch complete");
        }
    }

    Ok(())
}
