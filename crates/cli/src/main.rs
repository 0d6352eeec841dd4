use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hyptile::render::trace_tiling;
use hyptile::tessellate::{RngProbes, ScreenMap, TessellateCfg};
use hyptile::tiling::{layer_sizes, Color, Palette, Tiling, TilingParams, DEFAULT_MAX_POLYGONS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;

use export::{klein_doc, poincare_doc, polygon_table, write_json, write_table};
use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "hyptile")]
#[command(about = "Hyperbolic {n,k} tilings of the Poincaré disk")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone, Debug)]
struct TilingArgs {
    /// Polygon side count
    #[arg(short = 'n')]
    n: usize,
    /// Polygons meeting at each vertex
    #[arg(short = 'k')]
    k: usize,
    #[arg(long, default_value_t = 4)]
    layers: usize,
    /// Refuse tilings with more polygons than this
    #[arg(long, default_value_t = DEFAULT_MAX_POLYGONS)]
    max_polygons: usize,
}

impl TilingArgs {
    fn params(&self) -> TilingParams {
        TilingParams {
            n: self.n,
            k: self.k,
            layers: self.layers,
            max_polygons: self.max_polygons,
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "n": self.n,
            "k": self.k,
            "layers": self.layers,
            "max_polygons": self.max_polygons,
        })
    }
}

#[derive(Args, Clone, Debug)]
struct ColorArgs {
    /// Seed for palette start and arc probes; entropy when absent
    #[arg(long)]
    seed: Option<u64>,
    /// Color ids in rotation order; the flat palette when absent
    #[arg(long = "palette")]
    palette: Vec<String>,
}

impl ColorArgs {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn palette(&self, rng: &mut StdRng) -> Result<Palette> {
        if self.palette.is_empty() {
            return Ok(Palette::flat(rng));
        }
        let colors = self.palette.iter().map(|c| Color::new(c.as_str())).collect();
        Ok(Palette::with_random_start(colors, rng)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Model {
    Poincare,
    Klein,
}

#[derive(Subcommand)]
enum Action {
    /// Build a tiling and write its pixel outlines as JSON
    Tile {
        #[command(flatten)]
        tiling: TilingArgs,
        #[command(flatten)]
        colors: ColorArgs,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 800)]
        height: u32,
        #[arg(long, value_enum, default_value_t = Model::Poincare)]
        model: Model,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build a tiling and write one row per polygon (.csv or .parquet)
    Table {
        #[command(flatten)]
        tiling: TilingArgs,
        #[command(flatten)]
        colors: ColorArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print predicted polygon counts per layer without building
    Count {
        #[command(flatten)]
        tiling: TilingArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    dispatch(cmd.action)
}

fn dispatch(action: Action) -> Result<()> {
    match action {
        Action::Tile {
            tiling,
            colors,
            width,
            height,
            model,
            out,
        } => tile(&tiling, &colors, width, height, model, &out),
        Action::Table {
            tiling,
            colors,
            out,
        } => table(&tiling, &colors, &out),
        Action::Count { tiling } => {
            println!("{}", serde_json::to_string_pretty(&count(&tiling)?)?);
            Ok(())
        }
        Action::Report => {
            println!("{}", serde_json::to_string_pretty(&report())?);
            Ok(())
        }
    }
}

fn build(args: &TilingArgs, palette: &mut Palette) -> Result<Tiling> {
    let tiling = Tiling::build(args.params(), palette)
        .with_context(|| format!("building {{{},{}}} tiling", args.n, args.k))?;
    tracing::info!(
        n = args.n,
        k = args.k,
        layers = args.layers,
        inner = tiling.inner(),
        total = tiling.total(),
        "built tiling"
    );
    Ok(tiling)
}

fn tile(
    args: &TilingArgs,
    colors: &ColorArgs,
    width: u32,
    height: u32,
    model: Model,
    out: &Path,
) -> Result<()> {
    tracing::info!(out = %out.display(), width, height, ?model, seed = ?colors.seed, "tile");
    let screen = ScreenMap::new(width, height).context("canvas size")?;
    let mut rng = colors.rng();
    let mut palette = colors.palette(&mut rng)?;
    let tiling = build(args, &mut palette)?;

    let mut params = args.to_json();
    params["width"] = json!(width);
    params["height"] = json!(height);
    params["model"] = json!(model);
    params["seed"] = json!(colors.seed);

    let doc = match model {
        Model::Poincare => {
            let mut probes = RngProbes::new(&mut rng);
            let trace = trace_tiling(&tiling, &screen, &mut probes, &TessellateCfg::default());
            poincare_doc(params.clone(), &tiling, trace)
        }
        Model::Klein => klein_doc(params.clone(), &tiling, &screen),
    };
    write_json(out, &doc)?;

    let stats = json!({
        "total": doc.total,
        "inner": doc.inner,
        "skipped": doc.skipped.len(),
        "insignificant": doc.insignificant,
        "chords": doc.chords.as_ref().map(Vec::len),
    });
    tracing::info!(
        polygons = doc.polygons.len(),
        skipped = doc.skipped.len(),
        insignificant = doc.insignificant,
        "wrote tiling"
    );
    write_sidecar(out, Payload::new("tile", params).with_stats(stats))?;
    Ok(())
}

fn table(args: &TilingArgs, colors: &ColorArgs, out: &Path) -> Result<()> {
    tracing::info!(out = %out.display(), seed = ?colors.seed, "table");
    let mut rng = colors.rng();
    let mut palette = colors.palette(&mut rng)?;
    let tiling = build(args, &mut palette)?;
    let mut df = polygon_table(&tiling)?;
    let format = write_table(out, &mut df)?;
    tracing::info!(rows = df.height(), cols = df.width(), ?format, "wrote table");

    let mut params = args.to_json();
    params["seed"] = json!(colors.seed);
    let stats = json!({"rows": df.height(), "inner": tiling.inner()});
    write_sidecar(out, Payload::new("table", params).with_stats(stats))?;
    Ok(())
}

fn count(args: &TilingArgs) -> Result<Value> {
    tracing::info!(n = args.n, k = args.k, layers = args.layers, "count");
    let sizes = layer_sizes(&args.params())?;
    let layers: Vec<Value> = sizes
        .iter()
        .enumerate()
        .map(|(layer, s)| json!({"layer": layer, "inner": s.inner, "total": s.total}))
        .collect();
    Ok(json!({"params": args.to_json(), "layers": layers}))
}

fn report() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "version": hyptile::VERSION,
    })
}
