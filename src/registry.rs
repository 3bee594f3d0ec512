//! Object list and color index registry
//!
//! Every renderable object owns a color index into the colormap tables
//! and an RGB reflectance.  An object may own a second, reflection
//! sub-object with its own index.  The registry keeps the index space
//! dense: indices are only ever appended, and unused ones are compacted
//! away by relabeling the top index.

use log::trace;

use crate::color::Rgb16;
use crate::color_table::Colormap;

/// A renderable object's color assignment
#[derive(Debug,Clone,PartialEq)]
pub struct VirtualObject {
    /// Index into the colormap tables
    pub color: usize,
    /// Reflectance, 0 to 65535 per channel
    pub rgb: Rgb16,
}

/// A renderable surface, with an optional reflection sub-object
#[derive(Debug,Clone,PartialEq)]
pub struct Shell {
    pub o: VirtualObject,
    pub reflection: Option<VirtualObject>,
    /// Binary classification: shades pass through the global intensity
    /// window before the colormap lookup
    pub binary: bool,
}

impl Shell {
    pub fn new(color: usize, rgb: Rgb16) -> Self {
        Shell {
            o: VirtualObject { color, rgb },
            reflection: None,
            binary: false,
        }
    }
}

/// Brightest color of the object holding color number `n`; black if no
/// object holds it
pub fn color_of_number(objects: &[Shell], n: usize) -> Rgb16 {
    for shell in objects {
        if shell.o.color == n {
            return shell.o.rgb;
        }
        if let Some(r) = &shell.reflection {
            if r.color == n {
                return r.rgb;
            }
        }
    }
    Rgb16::black()
}

/// Tracks the color indices referenced by the live object list
#[derive(Debug,Clone,PartialEq)]
pub struct ColorRegistry {
    ncolors: usize,
}

impl ColorRegistry {
    pub fn new(ncolors: usize) -> Self {
        ColorRegistry { ncolors }
    }
    pub fn ncolors(&self) -> usize {
        self.ncolors
    }

    /// Append a new color index
    ///
    /// Freed indices are never reused.  The colormap tables are fully
    /// reallocated for the new count and invalidated.
    pub fn new_color(&mut self, map: &mut Colormap) -> usize {
        self.ncolors += 1;
        map.resize(self.ncolors);
        self.ncolors - 1
    }

    fn used(&self, objects: &[Shell]) -> Vec<bool> {
        let mut used = vec![false; self.ncolors];
        for shell in objects {
            if shell.o.color < self.ncolors {
                used[shell.o.color] = true;
            }
            if let Some(r) = &shell.reflection {
                if r.color < self.ncolors {
                    used[r.color] = true;
                }
            }
        }
        used
    }

    /// First color index below the count that no object references
    pub fn unused_color_number(&self, objects: &[Shell]) -> Option<usize> {
        self.used(objects).iter().position(|&u| !u)
    }

    /// Retire `unused_color` from the registry
    ///
    /// `unused_color` must be below the count and not referenced by any
    /// object.  The count drops by one; any object holding the old top
    /// index is relabeled to `unused_color` with its reflectance
    /// unchanged.  The colormap tables are reallocated and invalidated.
    pub fn eliminate_color(
        &mut self,
        objects: &mut [Shell],
        map: &mut Colormap,
        unused_color: usize,
    ) {
        self.ncolors -= 1;
        for shell in objects.iter_mut() {
            if shell.o.color == self.ncolors {
                trace!("object color {} -> {}", shell.o.color, unused_color);
                shell.o.color = unused_color;
            }
            if let Some(r) = shell.reflection.as_mut() {
                if r.color == self.ncolors {
                    trace!("reflection color {} -> {}", r.color, unused_color);
                    r.color = unused_color;
                }
            }
        }
        map.resize(self.ncolors);
    }

    /// Compact the index space to a dense `[0, ncolors)` assignment
    ///
    /// Gives the lowest unused index the current top index's objects
    /// until every index below the count is referenced, never going below
    /// one color.  A single scan of the object list feeds the whole
    /// compaction; the relabeled object keeps its reflectance.
    pub fn eliminate_unused_colors(&mut self, objects: &mut [Shell], map: &mut Colormap) {
        let mut used = self.used(objects);
        while self.ncolors > 1 {
            let unused = match used[..self.ncolors].iter().position(|&u| !u) {
                Some(n) => n,
                None => break,
            };
            let top = self.ncolors - 1;
            self.eliminate_color(objects, map, unused);
            used[unused] = used[top];
            used[top] = false;
        }
    }
}
