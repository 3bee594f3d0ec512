use voxpatch::{voxel_patch, ProjectionMatrix};

fn rotated(alpha: f64, beta: f64, scale: f64) -> ProjectionMatrix {
    let (ca, sa) = (alpha.cos(), alpha.sin());
    let (cb, sb) = (beta.cos(), beta.sin());
    ProjectionMatrix([
        [scale * ca, scale * -sa * cb, scale * sa * sb],
        [scale * sa, scale * ca * cb, scale * -ca * sb],
        [0.0, scale * sb, scale * cb],
    ])
}

#[test]
fn half_scale_is_a_single_pixel() {
    let patch = voxel_patch(&ProjectionMatrix::scaled(0.5));
    assert_eq!(patch.top, 0);
    assert_eq!(patch.bottom(), 1);
    assert_eq!(patch.span(0), Some((0, 1)));
}

#[test]
fn identity_covers_two_by_two() {
    let patch = voxel_patch(&ProjectionMatrix::identity());
    assert_eq!(patch.top, -1);
    assert_eq!(patch.bottom(), 1);
    assert_eq!(patch.span(-1), Some((-1, 1)));
    assert_eq!(patch.span(0), Some((-1, 1)));
}

#[test]
fn spans_are_ordered_for_any_view() {
    for i in 0..12 {
        for j in 0..6 {
            let m = rotated(i as f64 * 0.53, j as f64 * 0.71, 7.3);
            let patch = voxel_patch(&m);
            assert!(patch.bottom() > patch.top);
            for line in &patch.lines {
                assert!(line.left <= line.right, "{:?} at {:?}", line, m);
            }
        }
    }
}

#[test]
fn corners_are_point_symmetric() {
    let m = rotated(0.9, 1.7, 4.1);
    let corner = m.voxel_corners(0.0);
    for k in 0..8 {
        assert_eq!(corner[k][0], -corner[7 - k][0]);
        assert_eq!(corner[k][1], -corner[7 - k][1]);
    }
}

#[test]
fn patch_height_tracks_projected_extent() {
    let m = rotated(0.3, 0.2, 20.0);
    let corner = m.voxel_corners(0.25);
    let min_y = corner.iter().map(|c| c[1]).fold(std::f64::INFINITY, f64::min);
    let max_y = corner.iter().map(|c| c[1]).fold(std::f64::NEG_INFINITY, f64::max);
    let patch = voxel_patch(&m);
    assert_eq!(patch.top, min_y.floor() as i64);
    assert!(patch.bottom() as f64 >= max_y);
    assert!((patch.bottom() as f64) < max_y + 2.0);
}
