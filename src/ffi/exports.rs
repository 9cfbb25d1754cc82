//! The exported C ABI.
//!
//! Every operation that returns an encoding transfers its ownership to the
//! caller, who must pass it to the matching release export exactly once.
//! The ABI defines no error codes: a malformed input is logged and answered
//! with the empty encoding, which the release exports accept harmlessly.

use crate::clip::{self, BoolOp, FillRule};
use crate::ffi::paths::{self, CPaths, CPaths64, CPathsD};
use crate::geom::Paths;
use crate::triangulate;
use crate::util::logging;

fn decode_input<T: Copy>(encoding: *const CPaths<T>) -> Option<Paths<T>> {
    if encoding.is_null() {
        log::error!("null encoding pointer");
        return None;
    }
    // Safety: non-null; the caller promises the header describes real
    // allocations (the boundary contract).
    match unsafe { paths::decode(&*encoding) } {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            log::error!("rejecting input encoding: {err}");
            None
        }
    }
}

fn boolean_op64(
    op: BoolOp,
    subjects: *const CPaths64,
    clips: Option<*const CPaths64>,
    fill_rule: i32,
) -> CPaths64 {
    logging::init();
    let Some(subject) = decode_input(subjects) else {
        return CPaths::empty();
    };
    let clip_paths = match clips {
        Some(clips) => match decode_input(clips) {
            Some(decoded) => Some(decoded),
            None => return CPaths::empty(),
        },
        None => None,
    };
    let result = clip::execute64(
        op,
        &subject,
        clip_paths.as_ref(),
        FillRule::from_raw(fill_rule),
    );
    paths::encode(&result)
}

fn boolean_op_d(
    op: BoolOp,
    subjects: *const CPathsD,
    clips: Option<*const CPathsD>,
    fill_rule: i32,
    precision: i32,
) -> CPathsD {
    logging::init();
    let Some(subject) = decode_input(subjects) else {
        return CPaths::empty();
    };
    let clip_paths = match clips {
        Some(clips) => match decode_input(clips) {
            Some(decoded) => Some(decoded),
            None => return CPaths::empty(),
        },
        None => None,
    };
    let result = clip::execute_d(
        op,
        &subject,
        clip_paths.as_ref(),
        FillRule::from_raw(fill_rule),
        precision,
    );
    paths::encode(&result)
}

#[no_mangle]
pub extern "C" fn clipbridge_intersect64(
    subjects: *const CPaths64,
    clips: *const CPaths64,
    fill_rule: i32,
) -> CPaths64 {
    boolean_op64(BoolOp::Intersect, subjects, Some(clips), fill_rule)
}

/// Single-operand union: merges the subject set with itself.
#[no_mangle]
pub extern "C" fn clipbridge_union64(subjects: *const CPaths64, fill_rule: i32) -> CPaths64 {
    boolean_op64(BoolOp::Union, subjects, None, fill_rule)
}

#[no_mangle]
pub extern "C" fn clipbridge_union2_64(
    subjects: *const CPaths64,
    clips: *const CPaths64,
    fill_rule: i32,
) -> CPaths64 {
    boolean_op64(BoolOp::Union, subjects, Some(clips), fill_rule)
}

#[no_mangle]
pub extern "C" fn clipbridge_difference64(
    subjects: *const CPaths64,
    clips: *const CPaths64,
    fill_rule: i32,
) -> CPaths64 {
    boolean_op64(BoolOp::Difference, subjects, Some(clips), fill_rule)
}

#[no_mangle]
pub extern "C" fn clipbridge_xor64(
    subjects: *const CPaths64,
    clips: *const CPaths64,
    fill_rule: i32,
) -> CPaths64 {
    boolean_op64(BoolOp::Xor, subjects, Some(clips), fill_rule)
}

/// Release an integer-domain encoding previously returned by this library.
/// Calling it twice on the same encoding, or on memory this library did not
/// allocate, is undefined behavior.
#[no_mangle]
pub extern "C" fn clipbridge_release_paths64(encoding: *mut CPaths64) {
    if encoding.is_null() {
        return;
    }
    // Safety: caller promises this came from one of our exports, unreleased.
    unsafe { paths::release(&mut *encoding) };
}

#[no_mangle]
pub extern "C" fn clipbridge_intersect_d(
    subjects: *const CPathsD,
    clips: *const CPathsD,
    fill_rule: i32,
    precision: i32,
) -> CPathsD {
    boolean_op_d(BoolOp::Intersect, subjects, Some(clips), fill_rule, precision)
}

/// Single-operand union; `precision` is in decimal digits (typically 2).
#[no_mangle]
pub extern "C" fn clipbridge_union_d(
    subjects: *const CPathsD,
    fill_rule: i32,
    precision: i32,
) -> CPathsD {
    boolean_op_d(BoolOp::Union, subjects, None, fill_rule, precision)
}

#[no_mangle]
pub extern "C" fn clipbridge_union2_d(
    subjects: *const CPathsD,
    clips: *const CPathsD,
    fill_rule: i32,
    precision: i32,
) -> CPathsD {
    boolean_op_d(BoolOp::Union, subjects, Some(clips), fill_rule, precision)
}

#[no_mangle]
pub extern "C" fn clipbridge_difference_d(
    subjects: *const CPathsD,
    clips: *const CPathsD,
    fill_rule: i32,
    precision: i32,
) -> CPathsD {
    boolean_op_d(BoolOp::Difference, subjects, Some(clips), fill_rule, precision)
}

#[no_mangle]
pub extern "C" fn clipbridge_xor_d(
    subjects: *const CPathsD,
    clips: *const CPathsD,
    fill_rule: i32,
    precision: i32,
) -> CPathsD {
    boolean_op_d(BoolOp::Xor, subjects, Some(clips), fill_rule, precision)
}

#[no_mangle]
pub extern "C" fn clipbridge_release_paths_d(encoding: *mut CPathsD) {
    if encoding.is_null() {
        return;
    }
    // Safety: caller promises this came from one of our exports, unreleased.
    unsafe { paths::release(&mut *encoding) };
}

/// Triangulate a floating-domain polygon-with-holes set into 3-point
/// triangle paths. Ring orientation decides outer vs. hole; see
/// [`crate::triangulate::is_outer_boundary`].
#[no_mangle]
pub extern "C" fn clipbridge_triangulate_d(polygons: *const CPathsD) -> CPathsD {
    logging::init();
    let Some(input) = decode_input(polygons) else {
        return CPaths::empty();
    };
    match triangulate::triangulate(&input) {
        Ok(triangles) => paths::encode(&triangles),
        Err(err) => {
            log::error!("triangulation failed: {err}");
            CPaths::empty()
        }
    }
}
