// src/batch.rs
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::array::ArrayHandle;
use crate::io::reader::read_array_file;
use crate::io::writer::{Endian, MemoryOrder};
use crate::numeric::kind::{ElemType, ScalerKind};
use crate::writer::{get_slope_inter, make_array_writer};

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GlobalParams {
    #[serde(default = "default_scaler")]
    pub scaler: String,
    #[serde(default = "default_endian")]
    pub endian: String,
    #[serde(default = "default_order")]
    pub order: String,
    #[serde(default = "default_true")]
    pub nan2zero: bool,
    #[serde(default = "default_true")]
    pub allow_slope: bool,
    #[serde(default = "default_true")]
    pub allow_intercept: bool,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            scaler: default_scaler(),
            endian: default_endian(),
            order: default_order(),
            nan2zero: true,
            allow_slope: true,
            allow_intercept: true,
        }
    }
}

fn default_scaler() -> String {
    "f32".to_string()
}

fn default_endian() -> String {
    "little".to_string()
}

fn default_order() -> String {
    "c".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    pub input: String,
    pub output: String,
    pub in_type: String,
    pub out_type: String,
    pub shape: Option<Vec<usize>>,
    pub scaler: Option<String>,
    pub endian: Option<String>,
    pub order: Option<String>,
    pub nan2zero: Option<bool>,
    pub allow_slope: Option<bool>,
    pub allow_intercept: Option<bool>,
}

/// One fully resolved conversion.
pub struct ConvertJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub in_type: ElemType,
    pub out_type: ElemType,
    pub shape: Option<Vec<usize>>,
    pub allow_slope: bool,
    pub allow_intercept: bool,
    pub scaler: ScalerKind,
    pub endian: Endian,
    pub order: MemoryOrder,
    pub nan2zero: bool,
}

pub fn parse_endian(name: &str) -> Result<Endian> {
    match name {
        "little" | "le" => Ok(Endian::Little),
        "big" | "be" => Ok(Endian::Big),
        other => bail!("unknown byte order '{}'", other),
    }
}

pub fn parse_order(name: &str) -> Result<MemoryOrder> {
    match name {
        "c" | "row" => Ok(MemoryOrder::Row),
        "f" | "column" => Ok(MemoryOrder::Column),
        other => bail!("unknown memory order '{}'", other),
    }
}

/// Parse a shape string like "512x512".
pub fn parse_shape(spec: &str) -> Result<Vec<usize>> {
    spec.split('x')
        .map(|d| {
            d.parse::<usize>()
                .with_context(|| format!("bad dimension '{}' in shape '{}'", d, spec))
        })
        .collect()
}

/// Read, scale and write one file. Returns the applied (slope, intercept).
pub fn run_convert(job: &ConvertJob) -> Result<(f64, f64)> {
    let array = read_array_file(&job.input, job.in_type, job.endian)
        .with_context(|| format!("failed to read {}", job.input.display()))?;
    let handle = match &job.shape {
        Some(shape) => ArrayHandle::new(&array, shape)?,
        None => ArrayHandle::flat(&array),
    };

    let mut writer = make_array_writer(
        handle,
        job.out_type,
        job.allow_intercept,
        job.allow_slope,
        job.scaler,
    )?;
    writer.set_endian(job.endian);

    let file = fs::File::create(&job.output)
        .with_context(|| format!("failed to create {}", job.output.display()))?;
    let mut sink = std::io::BufWriter::new(file);
    writer.write(&mut sink, job.order, job.nan2zero)?;
    sink.flush()?;

    Ok(get_slope_inter(&writer))
}

fn resolve(op: &Operation, global: &GlobalParams) -> Result<ConvertJob> {
    Ok(ConvertJob {
        input: PathBuf::from(&op.input),
        output: PathBuf::from(&op.output),
        in_type: ElemType::parse(&op.in_type)?,
        out_type: ElemType::parse(&op.out_type)?,
        shape: op.shape.clone(),
        allow_slope: op.allow_slope.unwrap_or(global.allow_slope),
        allow_intercept: op.allow_intercept.unwrap_or(global.allow_intercept),
        scaler: ScalerKind::parse(op.scaler.as_deref().unwrap_or(&global.scaler))?,
        endian: parse_endian(op.endian.as_deref().unwrap_or(&global.endian))?,
        order: parse_order(op.order.as_deref().unwrap_or(&global.order))?,
        nan2zero: op.nan2zero.unwrap_or(global.nan2zero),
    })
}

pub fn process_batch(config_path: &Path) -> Result<()> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let config: BatchConfig = serde_json::from_str(&config_content)
        .with_context(|| format!("invalid config {}", config_path.display()))?;

    for op in &config.operations {
        let job = resolve(op, &config.global)?;
        let (slope, inter) = run_convert(&job)
            .with_context(|| format!("conversion {} -> {} failed", op.input, op.output))?;
        let shape = job
            .shape
            .as_ref()
            .map(|s| s.iter().join("x"))
            .unwrap_or_else(|| "flat".to_string());
        println!(
            "{} ({} {}) -> {} ({}): slope {}, intercept {}",
            op.input, job.in_type, shape, op.output, job.out_type, slope, inter
        );
    }

    Ok(())
}
