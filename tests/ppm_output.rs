use voxpatch::ppm;
use voxpatch::{margin_patch, voxel_patch, ProjectionMatrix};

#[test]
fn margin_patch_writes_and_reads_back() {
    let (patch, _) = margin_patch(&ProjectionMatrix::scaled(24.0), 24.0);
    let (buf, w, h) = ppm::patch_image(&patch);
    assert_eq!(buf.len(), w * h);
    assert!(buf.iter().any(|&v| v == 255));
    ppm::write_gray(&buf, w, h, "tests/tmp/margin_patch.png").unwrap();
    let (back, w2, h2) = ppm::read_file("tests/tmp/margin_patch.png").unwrap();
    assert_eq!((w2, h2), (w, h));
    assert_eq!(back.len(), w * h * 3);
    assert!(ppm::img_diff("tests/tmp/margin_patch.png", "tests/tmp/margin_patch.png").unwrap());
}

#[test]
fn plain_patch_paints_solid_spans() {
    let patch = voxel_patch(&ProjectionMatrix::scaled(8.0));
    let (buf, w, h) = ppm::patch_image(&patch);
    assert_eq!(h, patch.height());
    // every row is a solid run of 255 between its span ends
    for (n, line) in patch.lines.iter().enumerate() {
        let row = &buf[n * w..(n + 1) * w];
        assert_eq!(row.iter().filter(|&&v| v == 255).count(), line.len());
    }
}
