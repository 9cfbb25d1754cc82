//! Plain geometry types shared by the codec and the adapters.
//!
//! A `Point` is `repr(C)` because it is stored directly inside the flat
//! boundary encoding (`ffi::paths`): two 8-byte scalars, `x` then `y`.

/// A 2-D point; `T` is `i64` for the integer domain and `f64` for the
/// floating-point domain. The two are never mixed within one collection.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// One polygon ring. Order is significant: it defines the winding.
pub type Path<T> = Vec<Point<T>>;

/// An ordered collection of rings, the native in-memory representation of
/// one boolean-op operand or one polygon-with-holes set.
pub type Paths<T> = Vec<Path<T>>;

pub type Point64 = Point<i64>;
pub type PointD = Point<f64>;
pub type Path64 = Path<i64>;
pub type PathD = Path<f64>;
pub type Paths64 = Paths<i64>;
pub type PathsD = Paths<f64>;

/// Shoelace signed area of a ring, wrapping the last vertex to the first.
///
/// Rings with fewer than 3 vertices come out as zero area; they are not
/// rejected here.
pub fn signed_area(path: &[PointD]) -> f64 {
    let Some(&last) = path.last() else {
        return 0.0;
    };
    let mut sum = 0.0;
    let mut prev = last;
    for &cur in path {
        sum += prev.x * cur.y - cur.x * prev.y;
        prev = cur;
    }
    0.5 * sum
}
