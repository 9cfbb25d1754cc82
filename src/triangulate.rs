//! Triangulation adapter: classify ring orientation, attach holes to their
//! enclosing outer boundaries, and run ear-clipping.
//!
//! The triangulator (`earcutr`) takes one outer ring plus its holes per
//! call, so holes are paired with outers here by containment before the
//! hand-off. Triangles come back as 3-point paths in one collection.

use earcutr::earcut;
use thiserror::Error;

use crate::geom::{signed_area, PathD, PathsD, PointD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriangulateError {
    #[error("ear clipping failed")]
    EarcutFailed,
}

/// The orientation-sign convention of this layer, in one place.
///
/// A ring with strictly positive shoelace area is an outer boundary;
/// everything else (including degenerate sub-3-vertex rings, whose area is
/// zero) is treated as a hole. The caller's coordinate system and the
/// triangulator's expected winding both bake into this sign; do not flip it
/// without confirming what the consumer assumes.
pub fn is_outer_boundary(signed_area: f64) -> bool {
    signed_area > 0.0
}

/// Triangulate a polygon-with-holes set into 3-point triangle paths.
///
/// Rings that classify as holes but sit inside no outer boundary have no
/// filled region to contribute and drop out; what remains is delegated to
/// the ear-clipping collaborator as-is.
pub fn triangulate(paths: &PathsD) -> Result<PathsD, TriangulateError> {
    let mut outers: Vec<usize> = Vec::new();
    let mut holes: Vec<usize> = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        if is_outer_boundary(signed_area(path)) {
            outers.push(i);
        } else {
            holes.push(i);
        }
    }

    // Pair each hole with the smallest outer boundary containing it.
    let mut hole_rings: Vec<Vec<usize>> = vec![Vec::new(); outers.len()];
    for &h in &holes {
        let Some(probe) = rightmost_vertex(&paths[h]) else {
            continue;
        };
        let mut best: Option<(usize, f64)> = None;
        for (slot, &o) in outers.iter().enumerate() {
            if !point_in_ring(probe, &paths[o]) {
                continue;
            }
            let area = signed_area(&paths[o]);
            if best.map_or(true, |(_, a)| area < a) {
                best = Some((slot, area));
            }
        }
        if let Some((slot, _)) = best {
            hole_rings[slot].push(h);
        }
    }

    let mut triangles: PathsD = Vec::new();
    for (slot, &o) in outers.iter().enumerate() {
        let mut coords: Vec<f64> = Vec::new();
        let mut verts: Vec<PointD> = Vec::new();
        let mut hole_starts: Vec<usize> = Vec::new();

        append_ring(&mut coords, &mut verts, &paths[o]);
        if verts.len() < 3 {
            continue;
        }
        for &h in &hole_rings[slot] {
            hole_starts.push(verts.len());
            append_ring(&mut coords, &mut verts, &paths[h]);
        }

        let indices =
            earcut(&coords, &hole_starts, 2).map_err(|_| TriangulateError::EarcutFailed)?;
        for tri in indices.chunks_exact(3) {
            triangles.push(vec![verts[tri[0]], verts[tri[1]], verts[tri[2]]]);
        }
    }
    Ok(triangles)
}

/// Append one ring to the flat coordinate buffer, dropping a duplicated
/// closing vertex if present (earcut expects open rings).
fn append_ring(coords: &mut Vec<f64>, verts: &mut Vec<PointD>, ring: &PathD) {
    let mut n = ring.len();
    if n >= 2 {
        let first = ring[0];
        let last = ring[n - 1];
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            n -= 1;
        }
    }
    for &p in ring.iter().take(n) {
        coords.push(p.x);
        coords.push(p.y);
        verts.push(p);
    }
}

/// The vertex with the largest x, used as the containment probe when pairing
/// a hole with its outer boundary.
fn rightmost_vertex(ring: &PathD) -> Option<PointD> {
    ring.iter()
        .copied()
        .max_by(|a, b| a.x.total_cmp(&b.x))
}

fn point_in_ring(p: PointD, ring: &PathD) -> bool {
    // Ray casting.
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        let intersect =
            ((a.y > p.y) != (b.y > p.y)) && (p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y + 1e-12) + a.x);
        if intersect {
            inside = !inside;
        }
        j = i;
    }
    inside
}
