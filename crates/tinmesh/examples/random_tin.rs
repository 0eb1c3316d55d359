//! Triangulate random points in a Gauss–Krüger sized box and write an OBJ.
//!
//! Usage:
//!   cargo run -p tinmesh --example random_tin -- [count] [out.obj]
//!
//! Defaults: 3000 points, `randomtin.obj` in the working directory.

use std::fmt::Write as _;

use tinmesh::geom2::rand::{draw_points, flatten, PointCloudCfg, ReplayToken};
use tinmesh::Triangulation;

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000usize);
    let out = args.next().unwrap_or_else(|| "randomtin.obj".to_string());

    let cfg = PointCloudCfg {
        count,
        ..PointCloudCfg::default()
    };
    let pts = draw_points(cfg, ReplayToken::new(2025));
    let tin = match Triangulation::build(&flatten(&pts)) {
        Ok(tin) => tin,
        Err(e) => {
            eprintln!("triangulation failed: {e}");
            std::process::exit(1);
        }
    };

    let mut obj = String::new();
    for p in tin.vertices() {
        let _ = writeln!(obj, "v {} {} 0", p.x, p.y);
    }
    for [a, b, c] in tin.triangles() {
        let _ = writeln!(obj, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    if let Err(e) = std::fs::write(&out, obj) {
        eprintln!("writing {out}: {e}");
        std::process::exit(1);
    }
    println!(
        "Wrote {out}: {} points, {} triangles.",
        tin.num_points(),
        tin.num_faces()
    );
}
