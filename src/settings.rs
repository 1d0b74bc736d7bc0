use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{MojiError, MojiResult},
};

const MAX_CANVAS_SIZE: u32 = 8192;

/// Declared canvas of the merged SVG document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VectorCanvas {
    pub width: u32,
    pub height: u32,
    pub view_box: String,
}

impl Default for VectorCanvas {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            view_box: "0 0 32 32".to_string(),
        }
    }
}

/// Session configuration. Every field has a default, so `{}` is a valid settings file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side length of the square raster surface.
    pub canvas_size: u32,
    /// Straight-alpha RGBA the surface is cleared to before each composite.
    pub clear_rgba: [u8; 4],
    /// Export file name prefix, as in `<prefix>_<unix-ms>.png`.
    pub file_prefix: String,
    /// Seed for the randomizer. `None` draws from entropy.
    pub seed: Option<u64>,
    pub vector_canvas: VectorCanvas,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_size: 640,
            clear_rgba: [0, 0, 0, 0],
            file_prefix: "emoji".to_string(),
            seed: None,
            vector_canvas: VectorCanvas::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file and validate them.
    pub fn from_path(path: &Path) -> MojiResult<Self> {
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Settings = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse settings JSON '{}'", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> MojiResult<()> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_SIZE {
            return Err(MojiError::validation(format!(
                "canvas_size must be in 1..={MAX_CANVAS_SIZE}, got {}",
                self.canvas_size
            )));
        }
        if self.file_prefix.trim().is_empty() {
            return Err(MojiError::validation("file_prefix must be non-empty"));
        }
        if self.file_prefix.contains(['/', '\\']) || self.file_prefix.contains("..") {
            return Err(MojiError::validation(format!(
                "file_prefix must be a plain file name stem, got '{}'",
                self.file_prefix
            )));
        }
        if self.vector_canvas.width == 0 || self.vector_canvas.height == 0 {
            return Err(MojiError::validation("vector canvas must be non-empty"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::square(self.canvas_size)
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
