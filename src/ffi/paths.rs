//! The flat boundary encoding of a path collection, and its codec.
//!
//! Layout (field order is part of the ABI and must not change):
//! `path_num` ring count, `size_ptr` array of `path_num` ring lengths,
//! `data_ptr` all ring points concatenated in ring order. Invariant:
//! `sum(sizes) == len(points)`; ring `i` starts at the sum of the lengths
//! before it.
//!
//! One generic codec serves both coordinate domains; the scalar type is the
//! only thing that differs between `CPaths64` and `CPathsD`.

use std::ptr;

use thiserror::Error;

use crate::geom::{Paths, Point};

/// Flat encoding of a `Paths<T>` as seen by the managed caller.
///
/// An instance returned by an exported operation owns its two allocations;
/// the caller must hand it to the matching release export exactly once and
/// never touch it afterward. An instance passed *in* stays owned by the
/// caller and is never mutated or freed here.
#[repr(C)]
#[derive(Debug)]
pub struct CPaths<T> {
    pub path_num: i64,
    pub size_ptr: *mut i64,
    pub data_ptr: *mut Point<T>,
}

pub type CPaths64 = CPaths<i64>;
pub type CPathsD = CPaths<f64>;

impl<T> CPaths<T> {
    /// The empty encoding. Safe to release.
    pub const fn empty() -> Self {
        Self {
            path_num: 0,
            size_ptr: ptr::null_mut(),
            data_ptr: ptr::null_mut(),
        }
    }
}

/// A malformed encoding header, caught before any point is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("negative path count {0}")]
    NegativeCount(i64),
    #[error("path {index} has negative length {len}")]
    NegativeLength { index: usize, len: i64 },
    #[error("total point count overflows")]
    TotalOverflow,
    #[error("null buffer with nonzero path count")]
    NullBuffer,
}

/// Decode a flat encoding into an owning path collection.
///
/// The header is validated (count and lengths non-negative, total within
/// range, buffers non-null when the count is positive); what cannot be
/// validated from the struct alone is the caller's contract below.
///
/// # Safety
///
/// `size_ptr` must point to `path_num` readable `i64`s and `data_ptr` to at
/// least `sum(sizes)` readable points. A lying header is undefined behavior.
pub unsafe fn decode<T: Copy>(encoding: &CPaths<T>) -> Result<Paths<T>, DecodeError> {
    if encoding.path_num < 0 {
        return Err(DecodeError::NegativeCount(encoding.path_num));
    }
    let count = encoding.path_num as usize;
    if count == 0 {
        return Ok(Vec::new());
    }
    if encoding.size_ptr.is_null() || encoding.data_ptr.is_null() {
        return Err(DecodeError::NullBuffer);
    }

    let sizes = std::slice::from_raw_parts(encoding.size_ptr, count);
    let mut total: usize = 0;
    for (index, &len) in sizes.iter().enumerate() {
        if len < 0 {
            return Err(DecodeError::NegativeLength { index, len });
        }
        total = total
            .checked_add(len as usize)
            .ok_or(DecodeError::TotalOverflow)?;
    }

    let data = std::slice::from_raw_parts(encoding.data_ptr, total);
    let mut paths = Vec::with_capacity(count);
    let mut offset = 0;
    for &len in sizes {
        let len = len as usize;
        paths.push(data[offset..offset + len].to_vec());
        offset += len;
    }
    Ok(paths)
}

/// Encode a path collection into a freshly allocated flat encoding.
///
/// Both allocations transfer to the caller as described on [`CPaths`].
pub fn encode<T: Copy>(paths: &Paths<T>) -> CPaths<T> {
    let sizes: Box<[i64]> = paths.iter().map(|path| path.len() as i64).collect();

    let total: usize = paths.iter().map(Vec::len).sum();
    let mut data = Vec::with_capacity(total);
    for path in paths {
        data.extend_from_slice(path);
    }
    let data: Box<[Point<T>]> = data.into_boxed_slice();

    CPaths {
        path_num: paths.len() as i64,
        size_ptr: Box::into_raw(sizes) as *mut i64,
        data_ptr: Box::into_raw(data) as *mut Point<T>,
    }
}

/// Free both allocations of an encoding produced by [`encode`] and reset it
/// to the empty state. Null fields are skipped, so releasing [`CPaths::empty`]
/// or an already-released encoding produced *here* is a no-op.
///
/// # Safety
///
/// The encoding must have come from [`encode`] with its header unmodified,
/// and must not have been released before (its fields would have been reset
/// by that release). Points are read through `size_ptr` to recover the data
/// length, so it is freed second.
pub unsafe fn release<T>(encoding: &mut CPaths<T>) {
    let count = encoding.path_num.max(0) as usize;
    if !encoding.data_ptr.is_null() && !encoding.size_ptr.is_null() {
        let sizes = std::slice::from_raw_parts(encoding.size_ptr, count);
        let total: i64 = sizes.iter().sum();
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
            encoding.data_ptr,
            total.max(0) as usize,
        )));
    }
    if !encoding.size_ptr.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
            encoding.size_ptr,
            count,
        )));
    }
    encoding.path_num = 0;
    encoding.size_ptr = ptr::null_mut();
    encoding.data_ptr = ptr::null_mut();
}
