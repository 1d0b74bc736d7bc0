use std::time::Duration;

use rayon::prelude::*;

use crate::{
    assets::decode::{premultiply, rasterize_svg_to_premul_rgba8},
    foundation::{
        core::Canvas,
        error::{MojiError, MojiResult},
    },
    render::{
        blend::PremulRgba8,
        surface::{FrameRGBA, RasterSurface},
    },
    selection::Composite,
    settings::Settings,
};

/// How long a UI should show its redraw transition. Has no effect on pixels.
pub const TRANSITION: Duration = Duration::from_millis(500);

/// Draws a [`Composite`] onto a [`RasterSurface`] in category z-order.
#[derive(Clone, Debug)]
pub struct Compositor {
    canvas: Canvas,
    clear: PremulRgba8,
}

impl Compositor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            canvas: settings.canvas(),
            clear: premultiply(settings.clear_rgba),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Rasterize every present layer, in parallel, returning them in z-order.
    ///
    /// All layers are joined before returning; a failure in any layer fails the batch.
    pub fn resolve_layers(&self, composite: &Composite<'_>) -> MojiResult<Vec<Vec<u8>>> {
        let present: Vec<_> = composite.present().collect();
        present
            .par_iter()
            .map(|(category, asset)| {
                rasterize_svg_to_premul_rgba8(&asset.tree, self.canvas).map_err(|e| {
                    MojiError::render(format!("{category} layer '{}': {e}", asset.reference))
                })
            })
            .collect()
    }

    /// Clear `surface` and draw `composite` onto it.
    ///
    /// The surface is untouched if any layer fails to rasterize.
    #[tracing::instrument(skip_all, fields(layers))]
    pub fn compose(&self, composite: &Composite<'_>, surface: &mut RasterSurface) -> MojiResult<()> {
        if surface.canvas() != self.canvas {
            return Err(MojiError::render(format!(
                "surface is {}x{}, compositor expects {}x{}",
                surface.canvas().width,
                surface.canvas().height,
                self.canvas.width,
                self.canvas.height
            )));
        }

        let layers = self.resolve_layers(composite)?;
        tracing::Span::current().record("layers", layers.len());

        surface.clear(self.clear);
        for layer in &layers {
            surface.draw_layer(layer)?;
        }
        Ok(())
    }

    /// Compose onto a fresh surface and return its pixels.
    pub fn render(&self, composite: &Composite<'_>) -> MojiResult<FrameRGBA> {
        let mut surface = RasterSurface::new(self.canvas);
        self.compose(composite, &mut surface)?;
        Ok(surface.snapshot())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
