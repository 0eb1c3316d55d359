use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tinmesh::geom2::rand::{draw_points, flatten, PointCloudCfg, ReplayToken};
use tinmesh::{MeshCfg, Triangulation};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod format;
mod provenance;

use format::{Format, Input};
use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "tinmesh")]
#[command(about = "Build constrained Delaunay TINs from point files")]
struct Cmd {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Free-form label copied into logs and provenance sidecars
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Triangulate a JSON point/ring document
    Build {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        out: OutArgs,
        #[command(flatten)]
        tol: TolArgs,
    },
    /// Triangulate a reproducible random cloud
    Random {
        #[arg(long, default_value_t = 3000)]
        count: usize,
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        #[command(flatten)]
        out: OutArgs,
        #[command(flatten)]
        tol: TolArgs,
    },
    /// Print version and code revision as JSON
    Report,
}

#[derive(Args, Clone)]
struct OutArgs {
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Skip the `<stem>.provenance.json` sidecar
    #[arg(long)]
    no_provenance: bool,
}

/// Overrides for [`MeshCfg`]; unset fields keep the library defaults.
#[derive(Args, Clone, Default)]
struct TolArgs {
    #[arg(long)]
    on_edge_cos: Option<f64>,
    #[arg(long)]
    max_subdivision_depth: Option<usize>,
    #[arg(long)]
    bootstrap_scale: Option<f64>,
    #[arg(long)]
    eps_det: Option<f64>,
    #[arg(long)]
    collinear_eps: Option<f64>,
    #[arg(long)]
    initial_capacity: Option<usize>,
}

impl TolArgs {
    fn cfg(&self) -> MeshCfg {
        let mut cfg = MeshCfg::default();
        if let Some(c) = self.on_edge_cos {
            cfg.on_edge_cos = c;
        }
        if let Some(d) = self.max_subdivision_depth {
            cfg.max_subdivision_depth = d;
        }
        if let Some(s) = self.bootstrap_scale {
            cfg.bootstrap_scale = s;
        }
        if let Some(e) = self.eps_det {
            cfg.eps_det = e;
        }
        if let Some(e) = self.collinear_eps {
            cfg.collinear_eps = e;
        }
        if let Some(n) = self.initial_capacity {
            cfg.initial_capacity = n;
        }
        cfg
    }

    fn to_json(&self) -> Value {
        let cfg = self.cfg();
        json!({
            "on_edge_cos": cfg.on_edge_cos,
            "max_subdivision_depth": cfg.max_subdivision_depth,
            "bootstrap_scale": cfg.bootstrap_scale,
            "eps_det": cfg.eps_det,
            "collinear_eps": cfg.collinear_eps,
            "initial_capacity": cfg.initial_capacity,
        })
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Build { input, out, tol } => build(&input, &out, &tol, cmd.tag).map(|_| ()),
        Action::Random {
            count,
            seed,
            out,
            tol,
        } => random(count, seed, &out, &tol, cmd.tag).map(|_| ()),
        Action::Report => report(cmd.tag),
    }
}

fn build(input: &Path, out: &OutArgs, tol: &TolArgs, tag: Option<String>) -> Result<Triangulation> {
    tracing::info!(input = %input.display(), out = %out.out.display(), tag = ?tag, "build");
    let doc = Input::read(input)?;
    let cfg = tol.cfg();
    let tin = if doc.is_bounded() {
        Triangulation::build_bounded_with_cfg(&doc.rings, &doc.points, cfg)
    } else {
        Triangulation::build_with_cfg(&doc.points, cfg)
    }
    .with_context(|| format!("triangulating {}", input.display()))?;

    let params = json!({
        "command": "build",
        "input": input.to_string_lossy(),
        "rings": doc.rings.len(),
        "points": doc.points.len() / 2,
        "cfg": tol.to_json(),
    });
    emit(&tin, out, |x, y| doc.height(x, y), params, tag)?;
    Ok(tin)
}

fn random(
    count: usize,
    seed: u64,
    out: &OutArgs,
    tol: &TolArgs,
    tag: Option<String>,
) -> Result<Triangulation> {
    tracing::info!(count, seed, out = %out.out.display(), tag = ?tag, "random");
    let cloud = PointCloudCfg {
        count,
        ..PointCloudCfg::default()
    };
    let pts = draw_points(cloud, ReplayToken::new(seed));
    let tin = Triangulation::build_with_cfg(&flatten(&pts), tol.cfg())?;
    let params = json!({
        "command": "random",
        "count": count,
        "seed": seed,
        "cfg": tol.to_json(),
    });
    emit(&tin, out, |_, _| 0.0, params, tag)?;
    Ok(tin)
}

/// Write the mesh in the requested format, then its sidecar.
fn emit(
    tin: &Triangulation,
    out: &OutArgs,
    height: impl Fn(f64, f64) -> f64,
    params: Value,
    tag: Option<String>,
) -> Result<()> {
    if cfg!(debug_assertions) {
        tin.validate()?;
    }
    let bytes = match out.format {
        Format::Json => format::to_json(tin)?,
        Format::Obj => format::to_obj(tin, height).into_bytes(),
    };
    if let Some(parent) = out.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&out.out, bytes).with_context(|| format!("writing {}", out.out.display()))?;

    let stats = tin.stats();
    tracing::info!(
        points = tin.num_points(),
        faces = tin.num_faces(),
        flips = stats.flips,
        coincident = stats.coincident,
        midpoints = stats.midpoints,
        "wrote mesh"
    );
    if !out.no_provenance {
        let payload = Payload::new(params)
            .with_stats(json!({
                "points": tin.num_points(),
                "faces": tin.num_faces(),
                "segments": tin.segments().len(),
                "inserted": stats.inserted,
                "coincident": stats.coincident,
                "edge_splits": stats.edge_splits,
                "flips": stats.flips,
                "midpoints": stats.midpoints,
                "removed_faces": stats.removed_faces,
            }))
            .with_tag(tag);
        let path = write_sidecar(&out.out, payload)?;
        tracing::debug!(path = %path.display(), "provenance");
    }
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "tool": "tinmesh",
        "version": tinmesh::VERSION,
        "code_rev": current_git_rev(),
        "tag": tag,
        "defaults": TolArgs::default().to_json(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
