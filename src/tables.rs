//! Canonical voxel facet tables
//!
//! Numbered voxel vertices (1 to 8), the twelve numbered edges joining
//! them, and the 189 edge triples on which the vertices of an isosurface
//! triangle can lie.  Index 0 of the vertex-numbered tables is unused.

/// Edge id (1 to 12) to its two cube vertex ids (1 to 8); entry 0 unused
pub const EDGE_VERTICES: [[usize; 2]; 13] = [
    [0, 0],
    [1, 2], [3, 2], [4, 3], [4, 1],
    [5, 6], [7, 6], [8, 7], [8, 5],
    [1, 5], [2, 6], [4, 8], [3, 7],
];

/// Vertex id (1 to 8) to its position along each axis; entry 0 unused
pub const CORNER_X: [i64; 9] = [0, 0, 1, 1, 0, 0, 1, 1, 0];
pub const CORNER_Y: [i64; 9] = [0, 1, 1, 0, 0, 1, 1, 0, 0];
pub const CORNER_Z: [i64; 9] = [0, 0, 0, 0, 0, 1, 1, 1, 1];

/// Triangle topology id to the three edge ids its vertices lie on
pub const TRIANGLE_EDGES: [[usize; 3]; 189] = [
    [1, 2, 6], [1, 2, 7], [1, 2, 8], [1, 2, 9], [1, 2, 10], [1, 2, 11], [1, 2, 12],
    [1, 3, 5], [1, 3, 6], [1, 3, 7], [1, 3, 8], [1, 3, 9], [1, 3, 10], [1, 3, 11],
    [1, 3, 12], [1, 4, 5], [1, 4, 6], [1, 4, 7], [1, 4, 8], [1, 4, 9], [1, 4, 10],
    [1, 4, 11], [1, 4, 12], [1, 5, 6], [1, 5, 7], [1, 5, 8], [1, 5, 11], [1, 5, 12],
    [1, 6, 7], [1, 6, 8], [1, 6, 9], [1, 6, 10], [1, 6, 11], [1, 6, 12], [1, 7, 8],
    [1, 7, 9], [1, 7, 10], [1, 7, 11], [1, 7, 12], [1, 8, 9], [1, 8, 10], [1, 8, 11],
    [1, 8, 12], [1, 9, 11], [1, 9, 12], [1, 10, 11], [1, 10, 12], [1, 11, 12], [2, 3, 5],
    [2, 3, 7], [2, 3, 8], [2, 3, 9], [2, 3, 10], [2, 3, 11], [2, 3, 12], [2, 4, 5],
    [2, 4, 6], [2, 4, 7], [2, 4, 8], [2, 4, 9], [2, 4, 10], [2, 4, 11], [2, 4, 12],
    [2, 5, 6], [2, 5, 7], [2, 5, 8], [2, 5, 9], [2, 5, 10], [2, 5, 11], [2, 5, 12],
    [2, 6, 7], [2, 6, 8], [2, 6, 9], [2, 6, 11], [2, 7, 8], [2, 7, 10], [2, 7, 11],
    [2, 7, 12], [2, 8, 9], [2, 8, 10], [2, 8, 11], [2, 8, 12], [2, 9, 10], [2, 9, 11],
    [2, 9, 12], [2, 10, 11], [2, 11, 12], [3, 4, 5], [3, 4, 6], [3, 4, 7], [3, 4, 8],
    [3, 4, 9], [3, 4, 10], [3, 4, 11], [3, 4, 12], [3, 5, 6], [3, 5, 7], [3, 5, 8],
    [3, 5, 9], [3, 5, 10], [3, 5, 11], [3, 5, 12], [3, 6, 7], [3, 6, 8], [3, 6, 9],
    [3, 6, 10], [3, 6, 11], [3, 6, 12], [3, 7, 8], [3, 7, 9], [3, 7, 10], [3, 8, 9],
    [3, 8, 10], [3, 8, 11], [3, 8, 12], [3, 9, 10], [3, 9, 11], [3, 9, 12], [3, 10, 11],
    [3, 10, 12], [4, 5, 6], [4, 5, 7], [4, 5, 8], [4, 5, 9], [4, 5, 10], [4, 5, 11],
    [4, 5, 12], [4, 6, 7], [4, 6, 8], [4, 6, 9], [4, 6, 10], [4, 6, 11], [4, 6, 12],
    [4, 7, 8], [4, 7, 9], [4, 7, 10], [4, 7, 11], [4, 7, 12], [4, 8, 10], [4, 8, 12],
    [4, 9, 12], [4, 10, 11], [4, 10, 12], [4, 11, 12], [5, 6, 9], [5, 6, 10], [5, 6, 11],
    [5, 6, 12], [5, 7, 9], [5, 7, 10], [5, 7, 12], [5, 8, 9], [5, 8, 10], [5, 8, 11],
    [5, 8, 12], [5, 9, 11], [5, 9, 12], [5, 10, 11], [5, 10, 12], [5, 11, 12], [6, 7, 9],
    [6, 7, 10], [6, 7, 11], [6, 7, 12], [6, 8, 10], [6, 8, 11], [6, 8, 12], [6, 9, 10],
    [6, 9, 11], [6, 9, 12], [6, 10, 11], [6, 11, 12], [7, 8, 9], [7, 8, 10], [7, 8, 11],
    [7, 8, 12], [7, 9, 10], [7, 9, 11], [7, 9, 12], [7, 10, 11], [8, 9, 10], [8, 9, 12],
    [8, 10, 11], [8, 10, 12], [8, 11, 12], [9, 10, 11], [9, 10, 12], [9, 11, 12], [10, 11, 12],
];
