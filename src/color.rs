//! Colors
//!
//! Object reflectances and shading parameters use 16-bit channels, the
//! range of display-server color specifications.  Packed
//! device-color words carry one 8-bit channel per byte.

/// Color as 16-bit Red, Green, Blue
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgb16 {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Rgb16 {
    pub fn new(red: u16, green: u16, blue: u16) -> Self {
        Rgb16 { red, green, blue }
    }
    /// White (65535,65535,65535)
    pub fn white() -> Self {
        Self::new(65535, 65535, 65535)
    }
    /// Black (0,0,0)
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }
    pub fn gray(v: u16) -> Self {
        Self::new(v, v, v)
    }
}

/// Packed device-color word: one pixel value for an object image buffer
///
/// Channels occupy one byte each, red in the low byte.
///
///     use voxpatch::PackedColor;
///
///     let c = PackedColor::from_channels(1, 2, 3);
///     assert_eq!(c.channel(0), 1);
///     assert_eq!(c.channel(1), 2);
///     assert_eq!(c.channel(2), 3);
///
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        PackedColor(u32::from(red) | u32::from(green) << 8 | u32::from(blue) << 16)
    }
    /// Combine the red byte of `r`, green byte of `g`, blue byte of `b`
    ///
    /// Device cells carry all three channel bytes of their own pixel
    /// value; a shaded word takes each channel from the cell selected for
    /// that channel.
    pub fn pack(r: u32, g: u32, b: u32) -> Self {
        PackedColor((r & 255) | (g & (255 << 8)) | (b & (255 << 16)))
    }
    pub fn channel(&self, k: usize) -> u8 {
        (self.0 >> (8 * k)) as u8
    }
}
