//! Shaded colormap tables
//!
//! For every object color and shade level the colormap holds one packed
//! device-color word, plus reserved rows for the image background, the
//! background seen through a semi-transparent cut plane, grayscale
//! pass-through, and the highlight mark.  The per-voxel compositing loop
//! reads these tables; they are rebuilt whenever objects are added,
//! removed or recolored, or a shading parameter changes.

use std::fmt;

use log::debug;

use crate::color::{PackedColor, Rgb16};
use crate::registry::{color_of_number, Shell};

/// Start of the grayscale pass-through columns
pub const GRAY_INDEX_OFFSET: usize = 128;
/// Shade column of the image background; object shades are below it
pub const OBJECT_IMAGE_BACKGROUND: usize = GRAY_INDEX_OFFSET - 2;
/// Shade column of the highlight mark
pub const MARK_SHADE: usize = GRAY_INDEX_OFFSET - 1;
/// Offset of the through-plane variant of a column
pub const PLANE_INDEX_OFFSET: usize = 2 * GRAY_INDEX_OFFSET;
/// Total columns per color table row
pub const COLOR_TABLE_COLUMNS: usize = 2 * PLANE_INDEX_OFFSET;

/// One color's row of packed device colors, indexed by shade
/// `[+ GRAY_INDEX_OFFSET] [+ PLANE_INDEX_OFFSET]`
pub type ColorTableRow = [PackedColor; COLOR_TABLE_COLUMNS];

/// Global shading parameters of the scene
#[derive(Debug,Clone)]
pub struct Shading {
    /// Ambient light, 0 to 65535 per channel
    pub ambient: Rgb16,
    pub background: Rgb16,
    /// Transparency of a cut plane to each color component, 0 to 65535
    pub plane_transparency: Rgb16,
    /// Color of highlight marks
    pub mark_color: Rgb16,
    /// Intensity window center for binary objects, percent
    pub global_level: f64,
    /// Intensity window width for binary objects, percent
    pub global_width: f64,
    /// Initialize the grayscale pass-through columns
    pub gray_scale: bool,
    /// Shared-ramp true-color mode instead of per-color device tables
    pub true_color: bool,
}

impl Default for Shading {
    fn default() -> Self {
        Shading {
            ambient: Rgb16::black(),
            background: Rgb16::black(),
            plane_transparency: Rgb16::white(),
            mark_color: Rgb16::new(65535, 0, 0),
            global_level: 50.0,
            global_width: 100.0,
            gray_scale: false,
            true_color: false,
        }
    }
}

/// Recoverable colormap failure
///
/// The caller may retry with a smaller palette; table allocation failure,
/// in contrast, follows the renderer's abort-on-out-of-memory policy.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ColormapError {
    /// The device could not supply enough color cells
    NoColorcells,
}

impl fmt::Display for ColormapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColormapError::NoColorcells => write!(f, "device color cells unavailable"),
        }
    }
}

impl std::error::Error for ColormapError {}

/// Sharing status of a device color cell
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CellStatus {
    Shared,
    Private,
    Reserved,
}

/// Device color-cell source
///
/// Supplies the pixel values of the allocatable color cells and reports a
/// cell's status.  [GrayRampCells] is the stock byte-per-channel device.
pub trait ColorcellSource {
    /// Pixel values of the free color cells
    fn free_colorcells(&mut self) -> Result<Vec<u32>, ColormapError>;
    /// Status of one cell
    fn colorcell_status(&self, cell: u32) -> CellStatus {
        if (cell & 255) >= 244 {
            CellStatus::Reserved
        } else if cell & 1 != 0 {
            CellStatus::Private
        } else {
            CellStatus::Shared
        }
    }
}

/// 244 free cells at `0x010101 * j`: every channel byte indexes the same
/// gray ramp, so packed words can mix channels from different cells
#[derive(Debug,Default,Copy,Clone)]
pub struct GrayRampCells;

impl ColorcellSource for GrayRampCells {
    fn free_colorcells(&mut self) -> Result<Vec<u32>, ColormapError> {
        Ok((0..244u32).map(|j| 0x010101 * j).collect())
    }
}

/// One allocated device color cell: its pixel value and the color loaded
/// into it
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct ColorCell {
    pub pixel: u32,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// The object and slice color lookup tables
///
/// Both tables hold one [ColorTableRow] per object color.  Any change to
/// the number of colors requires [resize](Colormap::resize) (a full
/// reallocation; the tables are never patched incrementally), after which
/// [rebuild](Colormap::rebuild) must run before the next frame reads them.
pub struct Colormap {
    pub object_color_table: Vec<ColorTableRow>,
    pub slice_color_table: Vec<ColorTableRow>,
    cells: Option<Vec<ColorCell>>,
    /// Device shade levels per object color, at most
    /// [OBJECT_IMAGE_BACKGROUND]
    pub shades_per_color: usize,
    /// Cleared whenever the tables go stale; set by a successful rebuild
    pub valid: bool,
}

impl Colormap {
    pub fn new(ncolors: usize) -> Self {
        Colormap {
            object_color_table: vec![[PackedColor(0); COLOR_TABLE_COLUMNS]; ncolors],
            slice_color_table: vec![[PackedColor(0); COLOR_TABLE_COLUMNS]; ncolors],
            cells: None,
            shades_per_color: 0,
            valid: false,
        }
    }

    /// Number of object colors the tables cover
    pub fn ncolors(&self) -> usize {
        self.object_color_table.len()
    }

    /// The loaded device cells, once direct-color mode has allocated them
    ///
    /// The display device programs its colormap from these; pixel values
    /// in the packed tables refer to these cells.
    pub fn device_colors(&self) -> Option<&[ColorCell]> {
        self.cells.as_ref().map(|c| c.as_slice())
    }

    /// Reallocate both tables for a new color count and invalidate
    pub fn resize(&mut self, ncolors: usize) {
        self.object_color_table =
            vec![[PackedColor(0); COLOR_TABLE_COLUMNS]; ncolors];
        self.slice_color_table =
            vec![[PackedColor(0); COLOR_TABLE_COLUMNS]; ncolors];
        self.valid = false;
    }

    /// Rebuild the tables for the current object list and shading
    ///
    /// Selects true-color or direct-color mode from
    /// [Shading::true_color].  Sets [valid](Colormap::valid) on success.
    /// `Err` means the device ran out of color cells; the caller may
    /// retry with fewer colors.
    pub fn rebuild(
        &mut self,
        objects: &[Shell],
        shading: &Shading,
        source: &mut dyn ColorcellSource,
    ) -> Result<(), ColormapError> {
        if shading.true_color {
            return self.rebuild_truecolor(shading);
        }
        self.valid = false;
        self.rebuild_direct(objects, shading, source)
    }

    /// True color: one shared gray ramp in row 0, channels written
    /// directly
    fn rebuild_truecolor(&mut self, shading: &Shading) -> Result<(), ColormapError> {
        if self.valid {
            return Ok(());
        }
        for oshade in 0..OBJECT_IMAGE_BACKGROUND {
            let v = (oshade * 255 / (OBJECT_IMAGE_BACKGROUND - 1)) as u8;
            self.object_color_table[0][oshade] = PackedColor::from_channels(v, v, v);
        }
        self.object_color_table[0][OBJECT_IMAGE_BACKGROUND] = PackedColor::from_channels(
            (shading.background.red / 256) as u8,
            (shading.background.green / 256) as u8,
            (shading.background.blue / 256) as u8,
        );
        self.valid = true;
        debug!("colormap rebuilt: true color");
        Ok(())
    }

    /// Direct color: per-color shaded rows through the device cell table
    fn rebuild_direct(
        &mut self,
        objects: &[Shell],
        shading: &Shading,
        source: &mut dyn ColorcellSource,
    ) -> Result<(), ColormapError> {
        if self.cells.is_none() {
            let avail = source.free_colorcells()?;
            if avail.len() < 3 {
                return Err(ColormapError::NoColorcells);
            }
            let mut spc = avail.len() - 2;
            if spc > OBJECT_IMAGE_BACKGROUND {
                spc = OBJECT_IMAGE_BACKGROUND;
            }
            let cells = avail[..spc + 2]
                .iter()
                .map(|&pixel| ColorCell { pixel, ..ColorCell::default() })
                .collect();
            self.shades_per_color = spc;
            self.cells = Some(cells);
        }
        let spc = self.shades_per_color;

        // Binary objects get their shade windowed through (base, slope)
        // before the table lookup; the head object decides whether the
        // window applies.
        let (base, slope) = match objects.first() {
            Some(shell) if shell.binary => (
                655.35 * (shading.global_level - 0.5 * shading.global_width),
                100.0 / shading.global_width,
            ),
            _ => (0.0, 1.0),
        };

        {
            let cells = self.cells.as_mut().unwrap();
            for shaden in 0..spc {
                let mut windowed =
                    ((shaden * 65535 / (spc - 1)) as f64 - base) * slope;
                if windowed < 0.0 {
                    windowed = 0.0;
                }
                if windowed > 65535.0 {
                    windowed = 65535.0;
                }
                cells[shaden].red = windowed as u16;
                cells[shaden].green = windowed as u16;
                cells[shaden].blue = windowed as u16;
            }
            cells[spc].red = shading.background.red;
            cells[spc].green = shading.background.green;
            cells[spc].blue = shading.background.blue;
            cells[spc + 1].red = (shading.plane_transparency.red as f64 / 65535.0
                * shading.background.red as f64) as u16;
            cells[spc + 1].green = (shading.plane_transparency.green as f64 / 65535.0
                * shading.background.green as f64) as u16;
            cells[spc + 1].blue = (shading.plane_transparency.blue as f64 / 65535.0
                * shading.background.blue as f64) as u16;
        }

        let Colormap {
            object_color_table,
            slice_color_table,
            cells,
            ..
        } = self;
        let cells = cells.as_ref().unwrap();
        let hi = (spc - 1) as f64;
        let ambient = [
            shading.ambient.red as f64 / 65535.0,
            shading.ambient.green as f64 / 65535.0,
            shading.ambient.blue as f64 / 65535.0,
        ];
        let plane = [
            shading.plane_transparency.red as f64,
            shading.plane_transparency.green as f64,
            shading.plane_transparency.blue as f64,
        ];
        let mark = [
            shading.mark_color.red as f64,
            shading.mark_color.green as f64,
            shading.mark_color.blue as f64,
        ];
        let ncolors = object_color_table.len();
        for colorn in 0..ncolors {
            let rgb = color_of_number(objects, colorn);
            let refl = [rgb.red as f64, rgb.green as f64, rgb.blue as f64];
            for oshade in 0..OBJECT_IMAGE_BACKGROUND {
                let shaden = oshade * spc / OBJECT_IMAGE_BACKGROUND;
                let sh = shaden as f64;
                let shaded =
                    |k: usize| sh * (1.0 - ambient[k]) + hi * ambient[k];
                object_color_table[colorn][oshade] = PackedColor::pack(
                    cells[(refl[0] / 65535.0 * shaded(0)) as usize].pixel,
                    cells[(refl[1] / 65535.0 * shaded(1)) as usize].pixel,
                    cells[(refl[2] / 65535.0 * shaded(2)) as usize].pixel,
                );
                object_color_table[colorn][oshade + PLANE_INDEX_OFFSET] =
                    PackedColor::pack(
                        cells[(refl[0] / (65535.0 * 65535.0) * shaded(0) * plane[0])
                            as usize]
                            .pixel,
                        cells[(refl[1] / (65535.0 * 65535.0) * shaded(1) * plane[1])
                            as usize]
                            .pixel,
                        cells[(refl[2] / (65535.0 * 65535.0) * shaded(2) * plane[2])
                            as usize]
                            .pixel,
                    );
                slice_color_table[colorn][oshade] = PackedColor::pack(
                    cells[(refl[0] / 65535.0 * sh) as usize].pixel,
                    cells[(refl[1] / 65535.0 * sh) as usize].pixel,
                    cells[(refl[2] / 65535.0 * sh) as usize].pixel,
                );
                if shading.gray_scale {
                    object_color_table[colorn][oshade + GRAY_INDEX_OFFSET] =
                        PackedColor(cells[shaden].pixel);
                    object_color_table[colorn]
                        [oshade + GRAY_INDEX_OFFSET + PLANE_INDEX_OFFSET] =
                        PackedColor::pack(
                            cells[(sh * plane[0] / 65535.0) as usize].pixel,
                            cells[(sh * plane[1] / 65535.0) as usize].pixel,
                            cells[(sh * plane[2] / 65535.0) as usize].pixel,
                        );
                }
            }
            object_color_table[colorn][OBJECT_IMAGE_BACKGROUND] =
                PackedColor(cells[spc].pixel);
            object_color_table[colorn][OBJECT_IMAGE_BACKGROUND + PLANE_INDEX_OFFSET] =
                PackedColor(cells[spc + 1].pixel);
            object_color_table[colorn][MARK_SHADE] = PackedColor::pack(
                cells[(mark[0] / 65535.0 * hi) as usize].pixel,
                cells[(mark[1] / 65535.0 * hi) as usize].pixel,
                cells[(mark[2] / 65535.0 * hi) as usize].pixel,
            );
            object_color_table[colorn][MARK_SHADE + PLANE_INDEX_OFFSET] =
                PackedColor::pack(
                    cells[(mark[0] / (65535.0 * 65535.0) * plane[0] * hi) as usize]
                        .pixel,
                    cells[(mark[1] / (65535.0 * 65535.0) * plane[1] * hi) as usize]
                        .pixel,
                    cells[(mark[2] / (65535.0 * 65535.0) * plane[2] * hi) as usize]
                        .pixel,
                );
        }
        self.valid = true;
        debug!(
            "colormap rebuilt: direct color, {} colors, {} shades per color",
            ncolors, spc
        );
        Ok(())
    }
}
