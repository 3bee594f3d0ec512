//! Patch rasterization and shaded colormaps for voxel surface rendering
//!
//! How does this work
//!    m = ProjectionMatrix  -- object space, voxel units -> screen pixels
//!    patch = voxel_patch(&m)                    -- cube silhouette spans
//!    (patch, margins) = margin_patch(&m, depth) -- dilated spans + weights
//!    view  = ViewCache::new(&m, &tables, tweak)
//!    cache = TrianglePatchCache::build(&view, &tables)
//!                                               -- 189 * 7^3 facet patches
//!  Colors
//!    registry.new_color(&mut colormap)  -- extend the object palette
//!    colormap.rebuild(&shells, &shading, &mut cells)
//!                                       -- packed word per (color, shade)
//!
//! The per-voxel compositing loop lives in the surrounding renderer; it
//! paints each Patch into an object image buffer using shades looked up
//! through the colormap tables.

pub mod matrix;
pub mod patch;
pub mod raster;
pub mod margin;
pub mod facet;
pub mod tables;
pub mod color;
pub mod color_table;
pub mod registry;
pub mod ppm;

pub use crate::matrix::*;
pub use crate::patch::*;
pub use crate::raster::*;
pub use crate::margin::*;
pub use crate::facet::*;
pub use crate::color::*;
pub use crate::color_table::*;
pub use crate::registry::*;
