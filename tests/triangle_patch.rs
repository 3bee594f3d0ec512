use voxpatch::{
    triangle_patch, FacetTables, ProjectionMatrix, TrianglePatchCache, ViewCache,
    EDGE_SAMPLES, TRIANGLE_PATCHES, TRIANGLE_TOPOLOGIES,
};

fn rotated(alpha: f64, beta: f64, scale: f64) -> ProjectionMatrix {
    let (ca, sa) = (alpha.cos(), alpha.sin());
    let (cb, sb) = (beta.cos(), beta.sin());
    ProjectionMatrix([
        [scale * ca, scale * -sa * cb, scale * sa * sb],
        [scale * sa, scale * ca * cb, scale * -ca * sb],
        [0.0, scale * sb, scale * cb],
    ])
}

fn vertices(view: &ViewCache, tables: &FacetTables, v: usize) -> [[f64; 2]; 3] {
    let tn = v % TRIANGLE_TOPOLOGIES;
    let env = [
        v / (TRIANGLE_TOPOLOGIES * EDGE_SAMPLES * EDGE_SAMPLES),
        v / (TRIANGLE_TOPOLOGIES * EDGE_SAMPLES) % EDGE_SAMPLES,
        v / TRIANGLE_TOPOLOGIES % EDGE_SAMPLES,
    ];
    [
        view.point(tables.triangle_edges[tn][0], env[0]),
        view.point(tables.triangle_edges[tn][1], env[1]),
        view.point(tables.triangle_edges[tn][2], env[2]),
    ]
}

#[test]
fn facet_patches_cover_their_vertices() {
    let tables = FacetTables::canonical();
    let view = ViewCache::new(&rotated(0.6, 0.4, 9.0), &tables, false);
    for v in (0..TRIANGLE_PATCHES).step_by(101) {
        let patch = triangle_patch(&view, &tables, v);
        let verts = vertices(&view, &tables, v);
        let min_y = verts.iter().map(|p| p[1]).fold(std::f64::INFINITY, f64::min);
        let max_y = verts
            .iter()
            .map(|p| p[1])
            .fold(std::f64::NEG_INFINITY, f64::max);
        assert_eq!(patch.top, (min_y - 0.01).floor() as i64, "v = {}", v);
        assert!(patch.bottom() >= (max_y - 0.01).floor() as i64 + 1);
        assert!(patch.bottom() <= max_y.floor() as i64 + 2);
        for line in &patch.lines {
            assert!(line.left <= line.right, "v = {}", v);
        }
        // The top and bottom vertices land inside their rows.
        let top_v = verts
            .iter()
            .fold(verts[0], |a, &p| if p[1] < a[1] { p } else { a });
        let bot_v = verts
            .iter()
            .fold(verts[0], |a, &p| if p[1] > a[1] { p } else { a });
        let first = patch.lines[0];
        assert!(first.left <= (top_v[0] - 0.01).floor() as i64);
        assert!(first.right >= (top_v[0] + 0.01).ceil() as i64);
        let last = patch.lines[patch.height() - 1];
        assert!(last.left <= (bot_v[0] - 0.01).floor() as i64);
        assert!(last.right >= (bot_v[0] + 0.01).ceil() as i64);
    }
}

#[test]
fn every_topology_rasterizes() {
    let tables = FacetTables::canonical();
    let view = ViewCache::new(&rotated(1.2, 0.9, 5.0), &tables, false);
    for tn in 0..TRIANGLE_TOPOLOGIES {
        let patch = triangle_patch(&view, &tables, tn);
        assert!(patch.height() >= 1, "topology {}", tn);
        for line in &patch.lines {
            assert!(line.left <= line.right, "topology {}", tn);
        }
    }
}

#[test]
fn rasterization_is_deterministic() {
    let tables = FacetTables::canonical();
    let m = rotated(0.2, 1.5, 6.0);
    let a = ViewCache::new(&m, &tables, false);
    let b = ViewCache::new(&m, &tables, false);
    for v in (0..TRIANGLE_PATCHES).step_by(977) {
        assert_eq!(
            triangle_patch(&a, &tables, v),
            triangle_patch(&b, &tables, v)
        );
    }
}

#[test]
fn cache_matches_direct_rasterization() {
    let tables = FacetTables::canonical();
    let view = ViewCache::new(&rotated(0.8, 0.3, 3.0), &tables, false);
    let cache = TrianglePatchCache::build(&view, &tables);
    assert_eq!(cache.len(), TRIANGLE_PATCHES);
    for v in (0..TRIANGLE_PATCHES).step_by(643) {
        assert_eq!(cache.get(v), &triangle_patch(&view, &tables, v));
    }
}

#[test]
fn tweak_pulls_outer_samples_toward_the_ends() {
    let tables = FacetTables::canonical();
    let m = rotated(0.5, 0.5, 10.0);
    let plain = ViewCache::new(&m, &tables, false);
    let tweaked = ViewCache::new(&m, &tables, true);
    for edge in 1..=12 {
        for k in 0..2 {
            let expect1 = 0.5 * (plain.point(edge, 1)[k] + plain.point(edge, 0)[k]);
            let expect5 = 0.5 * (plain.point(edge, 5)[k] + plain.point(edge, 6)[k]);
            assert!((tweaked.point(edge, 1)[k] - expect1).abs() < 1e-9);
            assert!((tweaked.point(edge, 5)[k] - expect5).abs() < 1e-9);
            // untouched samples match exactly
            for m_ in &[0usize, 2, 3, 4, 6] {
                assert_eq!(tweaked.point(edge, *m_)[k], plain.point(edge, *m_)[k]);
            }
        }
    }
}

#[test]
fn view_cache_rebuild_replaces_the_view() {
    let tables = FacetTables::canonical();
    let m1 = rotated(0.1, 0.1, 16.0);
    let m2 = rotated(1.3, 0.7, 16.0);
    let mut view = ViewCache::new(&m1, &tables, false);
    let before = triangle_patch(&view, &tables, 42);
    view.rebuild(&m2, &tables, false);
    let after = triangle_patch(&view, &tables, 42);
    assert_ne!(before, after);
    view.rebuild(&m1, &tables, false);
    assert_eq!(triangle_patch(&view, &tables, 42), before);
}
