//! Writing of image files for patch and raster inspection
//!
//! Debug output only; the render loop itself never touches files.

use std::path::Path;

use crate::patch::Patch;

/// Read an image file back as RGB bytes
pub fn read_file<P: AsRef<Path>>(
    filename: P,
) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(filename)?.to_rgb();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

/// Write RGB bytes as an image file, creating parent directories
pub fn write_file<P: AsRef<Path>>(
    buf: &[u8],
    width: usize,
    height: usize,
    filename: P,
) -> Result<(), std::io::Error> {
    if let Some(dir) = filename.as_ref().parent() {
        std::fs::create_dir_all(dir)?;
    }
    image::save_buffer(filename, buf, width as u32, height as u32, image::RGB(8))
}

/// Write one gray byte per pixel as an image file
pub fn write_gray<P: AsRef<Path>>(
    buf: &[u8],
    width: usize,
    height: usize,
    filename: P,
) -> Result<(), std::io::Error> {
    if let Some(dir) = filename.as_ref().parent() {
        std::fs::create_dir_all(dir)?;
    }
    image::save_buffer(filename, buf, width as u32, height as u32, image::Gray(8))
}

/// Compare two image files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, image::ImageError> {
    let (d1, w1, h1) = read_file(f1)?;
    let (d2, w2, h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        return Ok(false);
    }
    if d1.len() != d2.len() {
        println!("files not equal length");
        return Ok(false);
    }
    let mut flag = true;
    for (i, (v1, v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            println!("{} [{},{},{}]: {} {}", i, (i / 3) % w1, (i / 3) / w1, i % 3, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}

/// Render a patch into a tight grayscale buffer
///
/// Weighted patches paint their weights; unweighted spans paint 255.
/// Returns the buffer with its width and height; the patch's top-left
/// covered pixel lands at the buffer origin.
pub fn patch_image(patch: &Patch) -> (Vec<u8>, usize, usize) {
    let left = patch.lines.iter().map(|l| l.left).min().unwrap_or(0);
    let right = patch.lines.iter().map(|l| l.right).max().unwrap_or(0);
    let width = (right - left).max(0) as usize;
    let height = patch.height();
    let mut buf = vec![0u8; width * height];
    for n in 0..height {
        let line = patch.lines[n];
        for i in 0..line.len() {
            let x = (line.left - left) as usize + i;
            buf[n * width + x] = match patch.weights(n) {
                Some(w) => w[i],
                None => 255,
            };
        }
    }
    (buf, width, height)
}
