//! Constraint files.
//!
//! - `.csv` / `.parquet`: columns `gx`, `gy`, `h` (read through polars).
//! - `.json`: `{"constraints": [[gx, gy, h], ...]}`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Constraint columns `gx[i]·x + gy[i]·y >= h[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    pub gx: Vec<f64>,
    pub gy: Vec<f64>,
    pub h: Vec<f64>,
}

impl Columns {
    pub fn len(&self) -> usize {
        self.h.len()
    }
}

#[derive(Deserialize)]
struct JsonProblem {
    constraints: Vec<[f64; 3]>,
}

pub fn load(path: &Path) -> Result<Columns> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => load_json(path),
        Some("csv") => {
            let lf = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()
                .with_context(|| format!("reading {}", path.display()))?;
            from_frame(lf)
        }
        Some("parquet") => {
            let lf = LazyFrame::scan_parquet(path, ScanArgsParquet::default())
                .with_context(|| format!("reading {}", path.display()))?;
            from_frame(lf)
        }
        _ => bail!(
            "unsupported input {} (expected .csv, .parquet or .json)",
            path.display()
        ),
    }
}

fn load_json(path: &Path) -> Result<Columns> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed: JsonProblem =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    let mut cols = Columns::default();
    for [gx, gy, h] in parsed.constraints {
        cols.gx.push(gx);
        cols.gy.push(gy);
        cols.h.push(h);
    }
    Ok(cols)
}

fn from_frame(lf: LazyFrame) -> Result<Columns> {
    let df = lf
        .select([
            col("gx").cast(DataType::Float64),
            col("gy").cast(DataType::Float64),
            col("h").cast(DataType::Float64),
        ])
        .collect()
        .context("selecting columns gx, gy, h")?;
    Ok(Columns {
        gx: column_values(&df, "gx")?,
        gy: column_values(&df, "gy")?,
        h: column_values(&df, "h")?,
    })
}

fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    df.column(name)?
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("missing value in column {name}, row {row}")))
        .collect()
}
