//! moji composes layered SVG facial features into a single avatar.
//!
//! One asset is chosen per [`Category`] (head, eyebrow, eye, mouth, detail). The choices are
//! drawn in that fixed z-order onto a square raster surface, which can be exported as PNG.
//! Independently, the chosen SVG sources can be merged into one SVG document.
//!
//! # Pipeline overview
//!
//! 1. **Load**: an [`AssetSource`] is scanned into an [`AssetCatalog`] (parallel, all-or-nothing)
//! 2. **Select**: a [`Selection`] holds one index per category, picked or randomized
//! 3. **Compose**: the resolved [`Composite`] is rasterized layer by layer onto a [`RasterSurface`]
//! 4. **Export**: [`export_png`] encodes the surface; [`export_svg`] merges the vector sources
//!
//! [`Session`] ties the steps together and recomposes after every selection change.
#![forbid(unsafe_code)]

mod assets;
mod export;
mod foundation;
mod render;
mod selection;
mod session;
mod settings;

pub use assets::catalog::{Asset, AssetCatalog, load_catalog};
pub use assets::decode::{parse_svg, rasterize_svg_to_premul_rgba8, unpremultiply_in_place};
pub use assets::source::{AssetRef, AssetSource, DirAssetSource, MemoryAssetSource};
pub use export::raster::{PNG_CONTENT_TYPE, encode_png, export_png};
pub use export::vector::{SVG_CONTENT_TYPE, export_svg, fetch_markup, merge_svg_documents};
pub use export::{Download, export_file_name, unix_millis};
pub use foundation::core::{Canvas, Category, CategoryMap, normalize_rel_path};
pub use foundation::error::{MojiError, MojiResult};
pub use render::compositor::{Compositor, TRANSITION};
pub use render::surface::{FrameRGBA, RasterSurface};
pub use selection::{Composite, Selection};
pub use session::{RecomposeEvent, Session, SessionObserver};
pub use settings::{Settings, VectorCanvas};
