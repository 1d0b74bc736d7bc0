use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{MojiError, MojiResult},
};

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> MojiResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize `tree` into a premultiplied RGBA8 buffer of `canvas` size.
///
/// The SVG is stretched non-uniformly to fill the whole canvas.
pub fn rasterize_svg_to_premul_rgba8(tree: &usvg::Tree, canvas: Canvas) -> MojiResult<Vec<u8>> {
    let size = tree.size();
    if !size.width().is_finite() || !size.height().is_finite() {
        return Err(MojiError::render("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| MojiError::render("failed to allocate svg pixmap"))?;

    let sx = (canvas.width as f32) / size.width();
    let sy = (canvas.height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}

/// Convert premultiplied RGBA8 to straight alpha in place.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Convert straight RGBA to premultiplied alpha.
pub fn premultiply(rgba: [u8; 4]) -> [u8; 4] {
    let a = rgba[3] as u16;
    let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
    [mul(rgba[0]), mul(rgba[1]), mul(rgba[2]), rgba[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
