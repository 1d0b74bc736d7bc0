use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::decode::unpremultiply_in_place,
    export::{Download, export_file_name},
    foundation::error::{MojiError, MojiResult},
    render::surface::RasterSurface,
};

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Encode the surface's current pixels as PNG.
///
/// Fails with [`MojiError::NotReady`] if nothing has been composed onto the surface yet.
pub fn encode_png(surface: &RasterSurface) -> MojiResult<Vec<u8>> {
    if surface.composed_revision().is_none() {
        return Err(MojiError::not_ready("no composite has been drawn yet"));
    }

    let canvas = surface.canvas();
    let mut straight = surface.data().to_vec();
    unpremultiply_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(canvas.width, canvas.height, straight)
        .ok_or_else(|| MojiError::export("invalid rgba buffer size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[tracing::instrument(skip(surface))]
pub fn export_png(surface: &RasterSurface, prefix: &str, unix_ms: u128) -> MojiResult<Download> {
    let bytes = encode_png(surface)?;
    Ok(Download {
        file_name: export_file_name(prefix, unix_ms, "png"),
        content_type: PNG_CONTENT_TYPE,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
