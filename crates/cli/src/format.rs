//! JSON input documents and JSON/OBJ output for triangulations.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tinmesh::Triangulation;

/// Output encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Obj,
}

/// `{"points": [[x, y(, z)], ...], "rings": [[[x, y(, z)], ...], ...]}`; both optional.
#[derive(Debug, Default, Deserialize)]
pub struct InputDoc {
    #[serde(default)]
    pub points: Vec<Vec<f64>>,
    #[serde(default)]
    pub rings: Vec<Vec<Vec<f64>>>,
}

/// Planar input plus the heights that came with it.
#[derive(Debug, Default)]
pub struct Input {
    pub points: Vec<f64>,
    pub rings: Vec<Vec<f64>>,
    heights: HashMap<(u64, u64), f64>,
}

impl Input {
    pub fn from_doc(doc: InputDoc) -> Result<Self> {
        if doc.points.is_empty() && doc.rings.is_empty() {
            bail!("input has neither points nor rings");
        }
        let mut input = Input::default();
        input.points = input.flatten(&doc.points, "points")?;
        for (r, ring) in doc.rings.iter().enumerate() {
            let flat = input.flatten(ring, &format!("rings[{r}]"))?;
            input.rings.push(flat);
        }
        Ok(input)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let doc: InputDoc = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        Self::from_doc(doc)
    }

    fn flatten(&mut self, pts: &[Vec<f64>], what: &str) -> Result<Vec<f64>> {
        let mut flat = Vec::with_capacity(2 * pts.len());
        for (i, p) in pts.iter().enumerate() {
            match p.as_slice() {
                [x, y] => flat.extend([*x, *y]),
                [x, y, z] => {
                    flat.extend([*x, *y]);
                    self.heights.insert(key(*x, *y), *z);
                }
                _ => bail!("{what}[{i}] has {} coordinates, expected 2 or 3", p.len()),
            }
        }
        Ok(flat)
    }

    /// Height supplied for the vertex at `(x, y)`, or 0 (e.g. segment midpoints).
    pub fn height(&self, x: f64, y: f64) -> f64 {
        self.heights.get(&key(x, y)).copied().unwrap_or(0.0)
    }

    pub fn is_bounded(&self) -> bool {
        !self.rings.is_empty()
    }
}

fn key(x: f64, y: f64) -> (u64, u64) {
    (x.to_bits(), y.to_bits())
}

#[derive(Debug, Serialize)]
struct TinDoc {
    points: Vec<[f64; 2]>,
    triangles: Vec<[usize; 3]>,
    segments: Vec<[usize; 2]>,
}

pub fn to_json(tin: &Triangulation) -> Result<Vec<u8>> {
    let doc = TinDoc {
        points: tin.vertices().iter().map(|p| [p.x, p.y]).collect(),
        triangles: tin.triangles().collect(),
        segments: tin.segments(),
    };
    Ok(serde_json::to_vec_pretty(&doc)?)
}

/// Wavefront OBJ with 1-based face indices; `z` supplies vertex heights.
pub fn to_obj(tin: &Triangulation, z: impl Fn(f64, f64) -> f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# tinmesh {}", tinmesh::VERSION);
    for p in tin.vertices() {
        let _ = writeln!(out, "v {} {} {}", p.x, p.y, z(p.x, p.y));
    }
    for [a, b, c] in tin.triangles() {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    out
}
