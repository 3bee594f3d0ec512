//! Scan conversion of projected triangular facets
//!
//! A facet is one triangle of an isosurface crossing a voxel.  Its three
//! vertices lie on voxel edges, at one of seven discretized positions
//! along each edge.  Patches for all topology/position combinations are
//! precomputed per view direction so the render loop can paint facets by
//! table lookup.

use log::debug;

use crate::matrix::ProjectionMatrix;
use crate::patch::{Patch, PatchLine};
use crate::raster::RECENTER;
use crate::tables;

/// Number of triangle topologies
pub const TRIANGLE_TOPOLOGIES: usize = 189;
/// Discretized sample positions per voxel edge
pub const EDGE_SAMPLES: usize = 7;
/// Entries in a full patch cache: 189 * 7^3
pub const TRIANGLE_PATCHES: usize =
    TRIANGLE_TOPOLOGIES * EDGE_SAMPLES * EDGE_SAMPLES * EDGE_SAMPLES;

/// Pixel epsilon on floor/ceil keeping triangles that share an edge free
/// of seams
const SEAM_EPSILON: f64 = 0.01;

/// Facet topology tables
///
/// `edge_vertices` maps an edge id (1 to 12) to its two cube vertex ids
/// (1 to 8); `triangle_edges` maps a topology id to the three edge ids the
/// triangle's vertices lie on; the `corner_*` tables give each vertex's
/// position along the coordinate axes.  [canonical](FacetTables::canonical)
/// supplies the stock tables (see [tables](crate::tables)).
#[derive(Debug,Clone)]
pub struct FacetTables {
    pub edge_vertices: [[usize; 2]; 13],
    pub triangle_edges: [[usize; 3]; 189],
    pub corner_x: [i64; 9],
    pub corner_y: [i64; 9],
    pub corner_z: [i64; 9],
}

impl FacetTables {
    pub fn canonical() -> Self {
        FacetTables {
            edge_vertices: tables::EDGE_VERTICES,
            triangle_edges: tables::TRIANGLE_EDGES,
            corner_x: tables::CORNER_X,
            corner_y: tables::CORNER_Y,
            corner_z: tables::CORNER_Z,
        }
    }
}

impl Default for FacetTables {
    fn default() -> Self {
        FacetTables::canonical()
    }
}

/// Screen-space edge samples for one view direction
///
/// Seven samples per voxel edge, at fractional positions `(2m+1)/14`
/// along the edge; with `tweak`, samples 1 and 5 are pulled halfway
/// toward the edge ends to suit 3-level interpolation modes.  The cache
/// is valid for a single projection matrix: call
/// [rebuild](ViewCache::rebuild) whenever the view changes, before any
/// patch is rasterized from it.
#[derive(Debug,Clone)]
pub struct ViewCache {
    points: [[[f64; 2]; EDGE_SAMPLES]; 13],
}

impl ViewCache {
    pub fn new(mat: &ProjectionMatrix, t: &FacetTables, tweak: bool) -> Self {
        let mut view = ViewCache { points: [[[0.0; 2]; EDGE_SAMPLES]; 13] };
        view.rebuild(mat, t, tweak);
        view
    }

    pub fn rebuild(&mut self, mat: &ProjectionMatrix, t: &FacetTables, tweak: bool) {
        for j in 1..=12 {
            let v0 = t.edge_vertices[j][0];
            let v1 = t.edge_vertices[j][1];
            for k in 0..2 {
                for m in 0..EDGE_SAMPLES {
                    let a = (13 - 2 * m) as f64;
                    let b = (2 * m + 1) as f64;
                    self.points[j][m][k] = (mat[k][0]
                        * (a * t.corner_x[v0] as f64 + b * t.corner_x[v1] as f64)
                        + mat[k][1] * (a * t.corner_y[v0] as f64 + b * t.corner_y[v1] as f64)
                        + mat[k][2] * (a * t.corner_z[v0] as f64 + b * t.corner_z[v1] as f64))
                        / 28.0;
                }
                if tweak {
                    self.points[j][1][k] = 0.5 * (self.points[j][1][k] + self.points[j][0][k]);
                    self.points[j][5][k] = 0.5 * (self.points[j][5][k] + self.points[j][6][k]);
                }
            }
        }
        for edge in self.points[1..].iter_mut() {
            for sample in edge.iter_mut() {
                sample[0] += RECENTER;
                sample[1] += RECENTER;
            }
        }
        debug!("view cache rebuilt (tweak: {})", tweak);
    }

    /// Projected position of `sample` on `edge` (edge ids 1 to 12)
    pub fn point(&self, edge: usize, sample: usize) -> [f64; 2] {
        self.points[edge][sample]
    }
}

/// Scan convert one projected facet.
///
/// `v` is the mixed-radix patch index
/// `topology + 189*(s2 + 7*(s1 + 7*s0))` where `s0..s2` select the sample
/// position on each of the topology's three edges.  Vertex classification
/// uses strict comparisons in vertex order, so ties between equal-y
/// vertices resolve to the first strict winner; neighboring facet patches
/// tile seamlessly only under this exact tie-break.
pub fn triangle_patch(view: &ViewCache, t: &FacetTables, v: usize) -> Patch {
    let tn = v % TRIANGLE_TOPOLOGIES;
    let env = [
        v / (TRIANGLE_TOPOLOGIES * EDGE_SAMPLES * EDGE_SAMPLES),
        v / (TRIANGLE_TOPOLOGIES * EDGE_SAMPLES) % EDGE_SAMPLES,
        v / TRIANGLE_TOPOLOGIES % EDGE_SAMPLES,
    ];
    let p = |j: usize| view.point(t.triangle_edges[tn][j], env[j]);

    let mut top = 0usize;
    let mut bottom = 0usize;
    let mut left = 0usize;
    let mut right = 0usize;
    for j in 1..3 {
        if p(j)[1] < p(top)[1] {
            top = j;
        }
        if p(j)[1] > p(bottom)[1] {
            bottom = j;
        }
    }
    let dy = p(bottom)[1] - p(top)[1];
    if dy > 0.0 {
        // x offset of vertex j from the top-bottom line at its own y
        let offset = |j: usize| {
            p(j)[0] - (p(j)[1] - p(top)[1]) * (p(bottom)[0] - p(top)[0]) / dy
        };
        for j in 1..3 {
            if offset(j) < offset(left) {
                left = j;
            }
            if offset(j) > offset(right) {
                right = j;
            }
        }
        if (left == top && right == bottom) || (left == bottom && right == top) {
            // the middle vertex sits on the top-bottom line; force it onto
            // a chain so one chain gets two segments
            for j in 0..3 {
                if j != top && j != bottom {
                    if offset(j) > offset(right) {
                        right = j;
                    } else {
                        left = j;
                    }
                    break;
                }
            }
        }
    }

    // Boundary x values at the middle vertex's level, one per chain
    let mut second_left = [0.0f64; 2];
    let second_right;
    if left == top || left == bottom {
        second_right = p(right)[0];
        second_left[1] = p(right)[1];
        second_left[0] = p(top)[0]
            + if dy > 0.0 {
                (second_left[1] - p(top)[1]) / dy * (p(bottom)[0] - p(top)[0])
            } else {
                0.0
            };
    } else {
        second_left[0] = p(left)[0];
        second_left[1] = p(left)[1];
        second_right = p(top)[0]
            + if dy > 0.0 {
                (second_left[1] - p(top)[1]) / dy * (p(bottom)[0] - p(top)[0])
            } else {
                0.0
            };
    }

    let mut lines = Vec::with_capacity((p(bottom)[1] - p(top)[1] + 3.0) as usize);
    let mut new_left;
    let mut new_right;
    let mut last_left = (p(top)[0] - SEAM_EPSILON).floor() as i64;
    let mut last_right = (p(top)[0] + SEAM_EPSILON).ceil() as i64;
    let top_row = (p(top)[1] - SEAM_EPSILON).floor() as i64;
    let mut y = top_row;
    if second_left[1] - p(top)[1] > 0.0 {
        while (y as f64) + 1.02 < second_left[1] {
            new_left = (p(top)[0]
                + ((y as f64) + 1.02 - p(top)[1]) * (second_left[0] - p(top)[0])
                    / (second_left[1] - p(top)[1])
                - SEAM_EPSILON)
                .floor() as i64;
            if new_left < last_left {
                last_left = new_left;
            }
            new_right = (p(top)[0]
                + ((y as f64) + 1.02 - p(top)[1]) * (second_right - p(top)[0])
                    / (second_left[1] - p(top)[1])
                + SEAM_EPSILON)
                .ceil() as i64;
            if new_right > last_right {
                last_right = new_right;
            }
            lines.push(PatchLine::new(last_left, last_right));
            last_left = new_left;
            last_right = new_right;
            y += 1;
        }
    }
    if (y as f64) < second_left[1] {
        new_left = (second_left[0] - SEAM_EPSILON).floor() as i64;
        if new_left < last_left {
            last_left = new_left;
        }
        new_right = (second_right + SEAM_EPSILON).ceil() as i64;
        if new_right > last_right {
            last_right = new_right;
        }
        lines.push(PatchLine::new(last_left, last_right));
        last_left = new_left;
        last_right = new_right;
        y += 1;
    }
    if p(bottom)[1] - second_left[1] > 0.0 {
        while (y as f64) + 0.98 < p(bottom)[1] {
            new_left = (second_left[0]
                + ((y as f64) + 0.98 - second_left[1]) * (p(bottom)[0] - second_left[0])
                    / (p(bottom)[1] - second_left[1])
                - SEAM_EPSILON)
                .floor() as i64;
            if new_left < last_left {
                last_left = new_left;
            }
            new_right = (second_right
                + ((y as f64) + 0.98 - second_left[1]) * (p(bottom)[0] - second_right)
                    / (p(bottom)[1] - second_left[1])
                + SEAM_EPSILON)
                .ceil() as i64;
            if new_right > last_right {
                last_right = new_right;
            }
            lines.push(PatchLine::new(last_left, last_right));
            last_left = new_left;
            last_right = new_right;
            y += 1;
        }
    }
    new_left = (p(bottom)[0] - SEAM_EPSILON).floor() as i64;
    if new_left < last_left {
        last_left = new_left;
    }
    new_right = (p(bottom)[0] + SEAM_EPSILON).ceil() as i64;
    if new_right > last_right {
        last_right = new_right;
    }
    lines.push(PatchLine::new(last_left, last_right));

    Patch::new(top_row, lines)
}

/// Precomputed facet patches for every topology and edge-sample
/// combination of one view direction
pub struct TrianglePatchCache {
    patches: Vec<Patch>,
}

impl TrianglePatchCache {
    /// Rasterize all [TRIANGLE_PATCHES] facet patches from `view`
    pub fn build(view: &ViewCache, t: &FacetTables) -> Self {
        let mut patches = Vec::with_capacity(TRIANGLE_PATCHES);
        for v in 0..TRIANGLE_PATCHES {
            patches.push(triangle_patch(view, t, v));
        }
        debug!("triangle patch cache built: {} entries", patches.len());
        TrianglePatchCache { patches }
    }
    pub fn get(&self, v: usize) -> &Patch {
        &self.patches[v]
    }
    pub fn len(&self) -> usize {
        self.patches.len()
    }
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}
