//! Dilated voxel patch with depth-coverage weights
//!
//! The margin patch covers the voxel silhouette dilated by one pixel in
//! every direction.  Each pixel carries a weight in `[0,255]` giving the
//! fraction of a depth window intersected by the voxel's three pairs of
//! parallel faces along that pixel's view ray, for anti-aliased blending
//! at voxel boundaries.

use log::debug;

use crate::matrix::ProjectionMatrix;
use crate::patch::{Patch, PatchLine};
use crate::raster::{silhouette_chains, EDGE_EPSILON, RECENTER};

/// Average overhang of a margin patch beyond the exact projection of the
/// voxel, in pixels or fractions of a pixel, per side.  Callers use these
/// to fade voxel edges.
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Scan convert the silhouette of a unit voxel projected by `m`, dilated
/// by one pixel, with per-pixel depth-coverage weights.
///
/// `max_depth` is the diameter of the voxel in depth units; the depth
/// window is centered on the voxel.  Every row span is a superset of the
/// plain [voxel_patch](crate::raster::voxel_patch) span at the same row,
/// and the patch starts one row above it.
pub fn margin_patch(m: &ProjectionMatrix, max_depth: f64) -> (Patch, Margins) {
    let corner = m.voxel_corners(RECENTER);
    let (lc, rc) = silhouette_chains(&corner);
    let left = [corner[lc[0]], corner[lc[1]], corner[lc[2]], corner[lc[3]]];
    let right = [corner[rc[0]], corner[rc[1]], corner[rc[2]], corner[rc[3]]];

    let mut lines = Vec::with_capacity((left[3][1] - left[0][1]) as usize + 15);
    let mut lcn = 0usize;
    let mut rcn = 0usize;
    let mut new_left = 0i64;
    let mut new_right = 0i64;
    let mut last_left = left[0][0].floor() as i64;
    let mut last_right = right[0][0].ceil() as i64;
    let mut leftmost = last_left;
    let mut rightmost = last_right;
    // one extra row above the silhouette
    lines.push(PatchLine::new(last_left, last_right));
    let mut y = left[0][1].floor() as i64;
    let top = y - 1;
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
        if last_left < leftmost {
            leftmost = last_left;
        }
        if last_right > rightmost {
            rightmost = last_right;
        }
        last_left = new_left;
        last_right = new_right;
        y += 1;
    }
    // one extra row below, from the deferred boundary values
    lines.push(PatchLine::new(last_left, last_right));

    // Dilate.  A row is never left narrower than the row below it; the
    // propagation works on the pre-dilation value of the previous row, so
    // the rule is slightly asymmetric between the downward and upward
    // directions.
    let rows = lines.len();
    last_left = lines[0].left;
    last_right = lines[0].right;
    let mut total = 0usize;
    for n in 0..rows {
        lines[n].left -= 1;
        let nl = lines[n].left;
        if last_left < nl {
            lines[n].left = last_left;
        }
        if n + 1 < rows && lines[n + 1].left - 1 < lines[n].left {
            lines[n].left = lines[n + 1].left - 1;
        }
        last_left = nl;
        lines[n].right += 1;
        let nr = lines[n].right;
        if last_right > nr {
            lines[n].right = last_right;
        }
        if n + 1 < rows && lines[n + 1].right + 1 > lines[n].right {
            lines[n].right = lines[n + 1].right + 1;
        }
        last_right = nr;
        total += lines[n].len();
    }
    leftmost -= 1;
    rightmost += 1;

    let mut off = 0usize;
    for line in lines.iter_mut() {
        line.weight_offset = off;
        off += line.len();
    }
    let mut weights = vec![0u8; total];

    // Face planes: q[j] is the normal of the voxel face pair perpendicular
    // to object axis j, scaled so that |q[j]|^2 = qm[j] is the plane offset
    // at the face.  qp is the smallest per-face slack, capped at a quarter
    // pixel; sampling at (x+qp, y+qp) keeps the ray inside the cube for
    // pixels on the silhouette boundary.
    let mut q = [[0.0f64; 3]; 3];
    let mut qm = [0.0f64; 3];
    let mut qp = 0.25;
    for j in 0..3 {
        let xp = m.face_normal(j);
        let col = m.column(j);
        let mut s = xp[0] * col[0] + xp[1] * col[1] + xp[2] * col[2];
        s /= 2.0 * (xp[0] * xp[0] + xp[1] * xp[1] + xp[2] * xp[2]);
        for k in 0..3 {
            q[j][k] = s * xp[k];
            qm[j] += q[j][k] * q[j][k];
        }
        if qm[j] * 0.25 < qp * qp {
            qp = (qm[j] * 0.25).sqrt();
        }
    }

    for n in 0..rows {
        let y = (top + n as i64) as f64;
        let line = lines[n];
        for i in 0..line.len() {
            let x = (line.left + i as i64) as f64;
            let mut front = 0.5 * max_depth;
            let mut back = -front;
            for j in 0..3 {
                let d = qm[j] - ((x + qp) * q[j][0] + (y + qp) * q[j][1]);
                let e = qm[j] + ((x + qp) * q[j][0] + (y + qp) * q[j][1]);
                if q[j][2] != 0.0 {
                    if front * q[j][2] > d {
                        front = d / q[j][2];
                    }
                    if front * -q[j][2] > e {
                        front = e / -q[j][2];
                    }
                    if back * q[j][2] > d {
                        back = d / q[j][2];
                    }
                    if back * -q[j][2] > e {
                        back = e / -q[j][2];
                    }
                } else if d < 0.0 || e < 0.0 {
                    // ray parallel to the face pair and outside it
                    front = back;
                }
            }
            let w = (255.0 / max_depth * (front - back) + 0.5).floor();
            weights[line.weight_offset + i] =
                if w < 0.0 { 0 } else if w > 255.0 { 255 } else { w as u8 };
        }
    }

    let mut leftmost_corner = left[0];
    let mut rightmost_corner = right[0];
    for j in 1..3 {
        if left[j][0] < leftmost_corner[0] {
            leftmost_corner = left[j];
        }
        if right[j][0] > rightmost_corner[0] {
            rightmost_corner = right[j];
        }
    }
    let margins = Margins {
        top: left[0][1] - top as f64,
        bottom: (top + rows as i64) as f64 - right[3][1],
        left: leftmost_corner[0] - leftmost as f64,
        right: rightmost as f64 - rightmost_corner[0],
    };
    debug!("margin patch: {} rows, {} weight bytes", rows, total);

    (Patch { top, lines, weights }, margins)
}
