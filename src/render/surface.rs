use crate::{
    foundation::{
        core::Canvas,
        error::{MojiError, MojiResult},
    },
    render::blend::{PremulRgba8, over_in_place},
};

/// Snapshot of raster pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Fixed-size premultiplied RGBA8 surface used for preview and PNG export.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    canvas: Canvas,
    data: Vec<u8>,
    composed_revision: Option<u64>,
}

impl RasterSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.byte_len()],
            composed_revision: None,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite every pixel with `premul`.
    pub fn clear(&mut self, premul: PremulRgba8) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Blend a full-surface premultiplied layer on top.
    pub fn draw_layer(&mut self, layer: &[u8]) -> MojiResult<()> {
        if layer.len() != self.data.len() {
            return Err(MojiError::render(format!(
                "layer is {} bytes, surface expects {}",
                layer.len(),
                self.data.len()
            )));
        }
        over_in_place(&mut self.data, layer)
    }

    /// Record which selection revision the current pixels show.
    pub fn mark_composed(&mut self, revision: u64) {
        self.composed_revision = Some(revision);
    }

    /// Selection revision of the last finished composite, if any.
    pub fn composed_revision(&self) -> Option<u64> {
        self.composed_revision
    }

    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }
}
