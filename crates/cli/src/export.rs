//! Output documents and tables for the `tile` and `table` commands.

use anyhow::{bail, Context, Result};
use hyptile::klein::{klein_chords, klein_outline};
use hyptile::render::TilingTrace;
use hyptile::tessellate::{Pixel, ScreenMap};
use hyptile::tiling::Tiling;
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PolygonDoc {
    pub index: usize,
    pub rule: u8,
    pub color: String,
    pub points: Vec<[i32; 2]>,
}

/// JSON written by `tile`. Klein output adds the unique edge chords.
#[derive(Debug, Serialize)]
pub struct TileDoc {
    pub params: Value,
    pub total: usize,
    pub inner: usize,
    pub polygons: Vec<PolygonDoc>,
    pub skipped: Vec<usize>,
    pub insignificant: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chords: Option<Vec<[i32; 4]>>,
}

fn pixels(points: &[Pixel]) -> Vec<[i32; 2]> {
    points.iter().map(|&(x, y)| [x, y]).collect()
}

/// Poincaré-model document from a traced tiling.
pub fn poincare_doc(params: Value, tiling: &Tiling, trace: TilingTrace) -> TileDoc {
    let polygons = trace
        .polygons
        .into_iter()
        .map(|p| PolygonDoc {
            index: p.index,
            rule: p.rule.code(),
            color: p.color.to_string(),
            points: pixels(&p.points),
        })
        .collect();
    TileDoc {
        params,
        total: tiling.total(),
        inner: tiling.inner(),
        polygons,
        skipped: trace.skipped,
        insignificant: trace.insignificant,
        chords: None,
    }
}

/// Klein-model document: straight outlines plus unique edges, shortest first.
pub fn klein_doc(params: Value, tiling: &Tiling, screen: &ScreenMap) -> TileDoc {
    let mut polygons = Vec::with_capacity(tiling.total());
    let mut skipped = Vec::new();
    let mut insignificant = 0;
    for (index, polygon) in tiling.polygons().iter().enumerate() {
        if !polygon.is_finite() {
            skipped.push(index);
            continue;
        }
        let outline = klein_outline(polygon, screen);
        if outline.len() < 2 {
            insignificant += 1;
        }
        polygons.push(PolygonDoc {
            index,
            rule: tiling.rules()[index].code(),
            color: tiling.colors()[index].to_string(),
            points: pixels(&outline),
        });
    }
    let chords = klein_chords(tiling, screen)
        .into_iter()
        .map(|(a, b)| [a.0, a.1, b.0, b.1])
        .collect();
    TileDoc {
        params,
        total: tiling.total(),
        inner: tiling.inner(),
        polygons,
        skipped,
        insignificant,
        chords: Some(chords),
    }
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), doc)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// One row per polygon: index, rule, color, inner, centroid, max vertex norm.
pub fn polygon_table(tiling: &Tiling) -> Result<DataFrame> {
    let len = tiling.total();
    let mut index = Vec::with_capacity(len);
    let mut rule = Vec::with_capacity(len);
    let mut color = Vec::with_capacity(len);
    let mut inner = Vec::with_capacity(len);
    let mut cx = Vec::with_capacity(len);
    let mut cy = Vec::with_capacity(len);
    let mut max_norm = Vec::with_capacity(len);
    for (i, polygon) in tiling.polygons().iter().enumerate() {
        let c = polygon.centroid().to_f64();
        index.push(i as u64);
        rule.push(tiling.rules()[i].code() as u32);
        color.push(tiling.colors()[i].to_string());
        inner.push(tiling.is_inner(i));
        cx.push(c.x);
        cy.push(c.y);
        max_norm.push(polygon.max_norm().to_f64());
    }
    let df = df!(
        "index" => index,
        "rule" => rule,
        "color" => color,
        "inner" => inner,
        "centroid_x" => cx,
        "centroid_y" => cy,
        "max_norm" => max_norm
    )?;
    Ok(df)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            other => bail!(
                "unsupported table extension {:?} for {}: use .csv or .parquet",
                other.unwrap_or(""),
                path.display()
            ),
        }
    }
}

/// Write `df` as CSV or Parquet depending on the extension of `path`.
pub fn write_table(path: &Path, df: &mut DataFrame) -> Result<TableFormat> {
    let format = TableFormat::from_path(path)?;
    ensure_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        TableFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing csv {}", path.display()))?;
        }
        TableFormat::Parquet => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("writing parquet {}", path.display()))?;
        }
    }
    Ok(format)
}
