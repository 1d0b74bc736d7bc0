use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{MojiError, MojiResult};

pub mod raster;
pub mod vector;

/// An exported file, ready for the caller to save or hand to a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Write the file into `dir`, creating the directory if needed.
    pub fn write_into(&self, dir: &Path) -> MojiResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "wrote export");
        Ok(path)
    }
}

/// `<prefix>_<unix_ms>.<ext>`
pub fn export_file_name(prefix: &str, unix_ms: u128, ext: &str) -> String {
    format!("{prefix}_{unix_ms}.{ext}")
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> MojiResult<u128> {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .map_err(|e| MojiError::export(format!("system clock before unix epoch: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/export/download.rs"]
mod tests;
