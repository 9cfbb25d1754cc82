//! clipbridge (cdylib)
//!
//! This crate exposes a small C ABI over polygon boolean operations and
//! ear-clipping triangulation, for managed hosts that marshal flat arrays.
//!
//! Design rule: keep this file thin.

mod clip;
mod ffi;
mod geom;
mod triangulate;
mod util;

// Export C ABI symbols.
pub use ffi::exports::*;

// The codec and adapters are also usable in-process (and from tests).
pub use clip::{execute64, execute_d, BoolOp, FillRule};
pub use ffi::paths::{decode, encode, release, CPaths, CPaths64, CPathsD, DecodeError};
pub use geom::{signed_area, Path64, PathD, Paths, Paths64, PathsD, Point, Point64, PointD};
pub use triangulate::{is_outer_boundary, triangulate, TriangulateError};
