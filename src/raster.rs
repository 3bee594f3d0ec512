//! Scan conversion of a projected voxel silhouette

use crate::matrix::ProjectionMatrix;
use crate::patch::{Patch, PatchLine};

/// Recentering applied to projected corners before scan conversion
pub(crate) const RECENTER: f64 = 0.25;

/// Flat-edge guard for the chain sweep
pub(crate) const EDGE_EPSILON: f64 = 0.00001;

/// Corner indices of the left and right silhouette chains, top to bottom.
///
/// The top corner is the strict minimum-y corner (first wins).  Its three
/// cube-edge neighbors (one index bit flipped) are classified onto the
/// chains by the sign of the cross product against the best candidate so
/// far.  By point symmetry, `7 - k` of a chain corner is the matching
/// corner of the opposite chain.
pub(crate) fn silhouette_chains(corner: &[[f64; 2]; 8]) -> ([usize; 4], [usize; 4]) {
    let mut top = 0;
    for j in 1..8 {
        if corner[j][1] < corner[top][1] {
            top = j;
        }
    }
    let mut second_left = top ^ 1;
    let mut second_right = top ^ 1;
    let mut j = 2;
    while j <= 4 {
        let c = top ^ j;
        if (corner[c][0] - corner[top][0]) * (corner[second_left][1] - corner[top][1])
            < (corner[second_left][0] - corner[top][0]) * (corner[c][1] - corner[top][1])
        {
            second_left = c;
        }
        if (corner[c][0] - corner[top][0]) * (corner[second_right][1] - corner[top][1])
            > (corner[second_right][0] - corner[top][0]) * (corner[c][1] - corner[top][1])
        {
            second_right = c;
        }
        j <<= 1;
    }
    (
        [top, second_left, 7 - second_right, 7 - top],
        [top, second_right, 7 - second_left, 7 - top],
    )
}

/// Scan convert the silhouette of a unit voxel projected by `m`.
///
/// The patch is conservative: spans never under-cover the silhouette, so
/// the patches of face-adjacent voxels always overlap by at least one
/// pixel.  Each row commits the widest boundary seen so far including the
/// edge intercepts computed for the previous row; that one-row lag keeps
/// the cover conservative where a chain switches corners.
pub fn voxel_patch(m: &ProjectionMatrix) -> Patch {
    let corner = m.voxel_corners(RECENTER);
    let (lc, rc) = silhouette_chains(&corner);
    let left = [corner[lc[0]], corner[lc[1]], corner[lc[2]], corner[lc[3]]];
    let right = [corner[rc[0]], corner[rc[1]], corner[rc[2]], corner[rc[3]]];

    let mut lines = Vec::with_capacity((left[3][1] - left[0][1]) as usize + 10);
    let mut lcn = 0usize;
    let mut rcn = 0usize;
    let mut new_left = 0i64;
    let mut new_right = 0i64;
    let mut last_left = left[0][0].floor() as i64;
    let mut last_right = right[0][0].ceil() as i64;
    let top = left[0][1].floor() as i64;
    let mut y = top;
    while lcn < 3 {
        while lcn < 3 && left[lcn + 1][1] < (y + 1) as f64 {
            lcn += 1;
            new_left = left[lcn][0].floor() as i64;
            if new_left < last_left {
                last_left = new_left;
            }
        }
        while rcn < 3 && right[rcn + 1][1] < (y + 1) as f64 {
            rcn += 1;
            new_right = right[rcn][0].ceil() as i64;
            if new_right > last_right {
                last_right = new_right;
            }
        }
        let j = if lcn < 3 { lcn } else { 2 };
        if left[j + 1][1] > left[j][1] + EDGE_EPSILON {
            new_left = (left[j][0]
                + ((y + 1) as f64 - left[j][1]) * (left[j + 1][0] - left[j][0])
                    / (left[j + 1][1] - left[j][1]))
                .floor() as i64;
            if new_left < last_left {
                last_left = new_left;
            }
        }
        let k = if rcn < 3 { rcn } else { 2 };
        if right[k + 1][1] > right[k][1] + EDGE_EPSILON {
            new_right = (right[k][0]
                + ((y + 1) as f64 - right[k][1]) * (right[k + 1][0] - right[k][0])
                    / (right[k + 1][1] - right[k][1]))
                .ceil() as i64;
            if new_right > last_right {
                last_right = new_right;
            }
        }
        lines.push(PatchLine::new(last_left, last_right));
        last_left = new_left;
        last_right = new_right;
        y += 1;
    }
    Patch::new(top, lines)
}
