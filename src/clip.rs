//! Boolean-operation adapter: hands decoded path collections to the Clipper
//! library and converts its solution back.
//!
//! Clipper works in integer coordinates only. The integer domain passes
//! coordinates through untouched; the floating-point domain scales by
//! `10^precision` into integer space and back, which is how `precision` is
//! defined (decimal digits preserved through the operation).

use clipper_sys::{
    execute, free_polygons, ClipType, ClipType_ctDifference, ClipType_ctIntersection,
    ClipType_ctUnion, ClipType_ctXor, Path as ClipPath, PolyFillType, PolyFillType_pftEvenOdd,
    PolyFillType_pftNegative, PolyFillType_pftNonZero, PolyFillType_pftPositive, PolyType,
    PolyType_ptClip, PolyType_ptSubject, Polygon as ClipPolygon, Polygons, Vertice,
};

use crate::geom::{Paths64, PathsD, Point};

/// The boolean operations this layer forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    Intersect,
    Union,
    Difference,
    Xor,
}

impl BoolOp {
    fn to_sys(self) -> ClipType {
        match self {
            BoolOp::Intersect => ClipType_ctIntersection,
            BoolOp::Union => ClipType_ctUnion,
            BoolOp::Difference => ClipType_ctDifference,
            BoolOp::Xor => ClipType_ctXor,
        }
    }
}

/// Fill rule tag, forwarded opaquely. The discriminants are the wire values
/// the managed caller passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    EvenOdd = 0,
    NonZero = 1,
    Positive = 2,
    Negative = 3,
}

impl FillRule {
    /// Out-of-range wire values fall back to `EvenOdd`, the rule's zero value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => FillRule::NonZero,
            2 => FillRule::Positive,
            3 => FillRule::Negative,
            _ => FillRule::EvenOdd,
        }
    }

    fn to_sys(self) -> PolyFillType {
        match self {
            FillRule::EvenOdd => PolyFillType_pftEvenOdd,
            FillRule::NonZero => PolyFillType_pftNonZero,
            FillRule::Positive => PolyFillType_pftPositive,
            FillRule::Negative => PolyFillType_pftNegative,
        }
    }
}

/// One operand's rings in Clipper's layout, with the backing buffers owned
/// here so the raw pointers stay valid across the `execute` call.
struct Operand {
    rings: Vec<Vec<Vertice>>,
    paths: Vec<ClipPath>,
}

impl Operand {
    fn from_paths64(paths: &Paths64) -> Self {
        let rings = paths
            .iter()
            .map(|path| path.iter().map(|p| [p.x, p.y]).collect())
            .collect();
        Self {
            rings,
            paths: Vec::new(),
        }
    }

    fn from_paths_d(paths: &PathsD, factor: f64) -> Self {
        let rings = paths
            .iter()
            .map(|path| {
                path.iter()
                    .map(|p| [(p.x * factor).round() as i64, (p.y * factor).round() as i64])
                    .collect()
            })
            .collect();
        Self {
            rings,
            paths: Vec::new(),
        }
    }

    fn as_polygon(&mut self, poly_type: PolyType) -> ClipPolygon {
        self.paths = self
            .rings
            .iter_mut()
            .map(|ring| ClipPath {
                vertices: ring.as_mut_ptr(),
                vertices_count: ring.len().try_into().unwrap(),
                closed: 1,
            })
            .collect();
        ClipPolygon {
            paths: self.paths.as_mut_ptr(),
            paths_count: self.paths.len().try_into().unwrap(),
            type_: poly_type,
        }
    }
}

/// Run one boolean operation in Clipper's integer space. `clip` is absent for
/// the single-operand union.
fn run(
    op: BoolOp,
    mut subject: Operand,
    mut clip: Option<Operand>,
    fill: FillRule,
) -> Vec<Vec<Vertice>> {
    let mut polygons = Vec::with_capacity(2);
    polygons.push(subject.as_polygon(PolyType_ptSubject));
    if let Some(ref mut clip) = clip {
        polygons.push(clip.as_polygon(PolyType_ptClip));
    }
    let input = Polygons {
        polygons: polygons.as_mut_ptr(),
        polygons_count: polygons.len().try_into().unwrap(),
    };

    let fill = fill.to_sys();
    // Safety: every ring buffer reachable from `input` is owned by `subject`
    // or `clip`, both alive until after the call returns.
    let solution = unsafe { execute(op.to_sys(), input, fill, fill) };

    let mut rings = Vec::new();
    for polygon in solution.polygons() {
        for path in polygon.paths() {
            rings.push(path.vertices().to_vec());
        }
    }
    // Safety: `solution` was allocated by Clipper and is read out above.
    unsafe { free_polygons(solution) };
    rings
}

/// Integer-domain boolean operation.
pub fn execute64(op: BoolOp, subject: &Paths64, clip: Option<&Paths64>, fill: FillRule) -> Paths64 {
    let rings = run(
        op,
        Operand::from_paths64(subject),
        clip.map(Operand::from_paths64),
        fill,
    );
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|v| Point::new(v[0], v[1])).collect())
        .collect()
}

/// Floating-domain boolean operation; `precision` is the number of decimal
/// digits carried through Clipper's integer space (callers usually pass 2).
pub fn execute_d(
    op: BoolOp,
    subject: &PathsD,
    clip: Option<&PathsD>,
    fill: FillRule,
    precision: i32,
) -> PathsD {
    let factor = 10f64.powi(precision);
    let rings = run(
        op,
        Operand::from_paths_d(subject, factor),
        clip.map(|paths| Operand::from_paths_d(paths, factor)),
        fill,
    );
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|v| Point::new(v[0] as f64 / factor, v[1] as f64 / factor))
                .collect()
        })
        .collect()
}
