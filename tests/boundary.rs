//! End-to-end tests through the exported C ABI: encode on the caller side,
//! cross the boundary, decode the result, release everything exactly once.

use clipbridge::{
    clipbridge_intersect64, clipbridge_release_paths64, clipbridge_release_paths_d,
    clipbridge_triangulate_d, clipbridge_union2_64, clipbridge_union2_d, clipbridge_union64,
    clipbridge_union_d, decode, encode, release, signed_area, CPaths, CPaths64, CPathsD, Path64,
    Paths64, PathsD, Point, PointD,
};

fn rect64(x0: i64, y0: i64, x1: i64, y1: i64) -> Path64 {
    vec![
        Point::new(x0, y0),
        Point::new(x0, y1),
        Point::new(x1, y1),
        Point::new(x1, y0),
    ]
}

fn abs_area64(paths: &Paths64) -> f64 {
    paths
        .iter()
        .map(|path| {
            let ring: Vec<PointD> = path
                .iter()
                .map(|p| PointD::new(p.x as f64, p.y as f64))
                .collect();
            signed_area(&ring).abs()
        })
        .sum()
}

#[test]
fn union_of_overlapping_rectangles_across_the_boundary() {
    let subject = encode(&vec![rect64(0, 0, 2, 2)]);
    let clip = encode(&vec![rect64(1, 0, 3, 2)]);

    let mut result = clipbridge_union2_64(&subject, &clip, 0);
    let merged = unsafe { decode(&result) }.unwrap();
    assert_eq!(merged.len(), 1);
    assert!(merged[0].len() <= 6);
    assert_eq!(abs_area64(&merged), 6.0);

    clipbridge_release_paths64(&mut result);
    assert_eq!(result.path_num, 0);
    assert!(result.size_ptr.is_null());
    assert!(result.data_ptr.is_null());

    // Inputs stayed caller-owned and untouched; free them ourselves.
    for mut input in [subject, clip] {
        assert_eq!(input.path_num, 1);
        unsafe { release(&mut input) };
    }
}

#[test]
fn intersect_with_self_preserves_area() {
    let a = encode(&vec![rect64(0, 0, 5, 5)]);
    let mut result = clipbridge_intersect64(&a, &a, 0);
    let out = unsafe { decode(&result) }.unwrap();
    assert_eq!(abs_area64(&out), 25.0);
    clipbridge_release_paths64(&mut result);
    let mut a = a;
    unsafe { release(&mut a) };
}

#[test]
fn single_operand_union_flattens_self_overlap() {
    let subject = encode(&vec![rect64(0, 0, 4, 4), rect64(2, 0, 6, 4)]);
    let mut result = clipbridge_union64(&subject, 1);
    let out = unsafe { decode(&result) }.unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(abs_area64(&out), 24.0);
    clipbridge_release_paths64(&mut result);
    let mut subject = subject;
    unsafe { release(&mut subject) };
}

#[test]
fn floating_domain_union_with_default_precision() {
    let square = |x0: f64, y0: f64, x1: f64, y1: f64| -> Vec<PointD> {
        vec![
            PointD::new(x0, y0),
            PointD::new(x0, y1),
            PointD::new(x1, y1),
            PointD::new(x1, y0),
        ]
    };
    let subject = encode(&vec![square(0.0, 0.0, 1.0, 1.0)]);
    let clip = encode(&vec![square(0.5, 0.0, 1.5, 1.0)]);

    let mut result = clipbridge_union2_d(&subject, &clip, 0, 2);
    let out: PathsD = unsafe { decode(&result) }.unwrap();
    let area: f64 = out.iter().map(|p| signed_area(p).abs()).sum();
    assert!((area - 1.5).abs() < 1e-6, "area was {area}");

    clipbridge_release_paths_d(&mut result);
    for mut input in [subject, clip] {
        unsafe { release(&mut input) };
    }
}

#[test]
fn triangulation_conserves_area_minus_holes() {
    // Outer square, positive shoelace area; hole wound the other way.
    let paths: PathsD = vec![
        vec![
            PointD::new(0.0, 0.0),
            PointD::new(4.0, 0.0),
            PointD::new(4.0, 4.0),
            PointD::new(0.0, 4.0),
        ],
        vec![
            PointD::new(1.0, 1.0),
            PointD::new(1.0, 3.0),
            PointD::new(3.0, 3.0),
            PointD::new(3.0, 1.0),
        ],
    ];
    let input = encode(&paths);
    let mut result = clipbridge_triangulate_d(&input);
    let triangles: PathsD = unsafe { decode(&result) }.unwrap();

    assert!(triangles.iter().all(|t| t.len() == 3));
    let area: f64 = triangles.iter().map(|t| signed_area(t).abs()).sum();
    assert!((area - 12.0).abs() < 1e-9, "area was {area}");

    clipbridge_release_paths_d(&mut result);
    let mut input = input;
    unsafe { release(&mut input) };
}

#[test]
fn malformed_and_null_inputs_yield_the_empty_encoding() {
    let ok = encode(&vec![rect64(0, 0, 1, 1)]);

    let mut from_null = clipbridge_intersect64(std::ptr::null(), &ok, 0);
    assert_eq!(from_null.path_num, 0);
    assert!(from_null.data_ptr.is_null());
    // The empty result is still releasable.
    clipbridge_release_paths64(&mut from_null);

    let bad = CPaths64 {
        path_num: -7,
        ..CPaths::empty()
    };
    let mut from_bad = clipbridge_union2_64(&bad, &ok, 0);
    assert_eq!(from_bad.path_num, 0);
    clipbridge_release_paths64(&mut from_bad);

    let mut ok = ok;
    unsafe { release(&mut ok) };
}

#[test]
fn empty_collections_cross_the_boundary() {
    let empty: CPathsD = encode(&PathsD::new());
    let mut result = clipbridge_union_d(&empty, 0, 2);
    assert_eq!(unsafe { decode(&result) }.unwrap(), PathsD::new());
    clipbridge_release_paths_d(&mut result);
    let mut empty = empty;
    unsafe { release(&mut empty) };
}

#[test]
fn release_is_idempotent_only_through_the_reset_state() {
    // After release resets the struct to empty, a second call is a no-op by
    // construction (not a detected double free).
    let mut enc = encode(&vec![rect64(0, 0, 2, 2)]);
    clipbridge_release_paths64(&mut enc);
    clipbridge_release_paths64(&mut enc);
    clipbridge_release_paths64(std::ptr::null_mut());
}
