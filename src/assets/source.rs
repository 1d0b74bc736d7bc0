use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::{
    core::{Category, CategoryMap, normalize_rel_path},
    error::{MojiError, MojiResult},
};

/// Identity of a selectable asset: its normalized relative path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct AssetRef(String);

impl AssetRef {
    /// Build a reference from a relative path, normalizing separators.
    pub fn new(path: &str) -> MojiResult<Self> {
        normalize_rel_path(path).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, used as a display label.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage backend the loader and the vector exporter read from.
///
/// Implementations must be shareable across rayon workers.
pub trait AssetSource: Send + Sync {
    /// List the assets of `category` in a stable order.
    fn discover(&self, category: Category) -> MojiResult<Vec<AssetRef>>;

    /// Fetch the raw bytes behind `asset`.
    fn fetch(&self, asset: &AssetRef) -> MojiResult<Vec<u8>>;
}

/// Filesystem source: `root/<category dir>/*.svg`.
#[derive(Clone, Debug)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory that relative asset paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssetSource {
    fn discover(&self, category: Category) -> MojiResult<Vec<AssetRef>> {
        let dir = self.root.join(category.dir_name());
        if !dir.is_dir() {
            tracing::debug!(%category, dir = %dir.display(), "category directory missing");
            return Ok(Vec::new());
        }

        let dir_str = dir
            .to_str()
            .ok_or_else(|| MojiError::load(format!("non-utf8 asset dir '{}'", dir.display())))?;
        let pattern = format!("{}/*.svg", glob::Pattern::escape(dir_str));
        let entries = glob::glob(&pattern)
            .map_err(|e| MojiError::load(format!("bad glob pattern '{pattern}': {e}")))?;

        let mut out = Vec::new();
        for entry in entries {
            let path = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            out.push(AssetRef::new(&format!("{}/{name}", category.dir_name()))?);
        }
        out.sort();
        Ok(out)
    }

    fn fetch(&self, asset: &AssetRef) -> MojiResult<Vec<u8>> {
        let path = self.root.join(Path::new(asset.as_str()));
        let bytes =
            std::fs::read(&path).with_context(|| format!("read asset '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// In-memory source; discovery order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    listing: CategoryMap<Vec<AssetRef>>,
    bytes: HashMap<AssetRef, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset under `category`, returning its reference.
    pub fn insert(
        &mut self,
        category: Category,
        name: &str,
        bytes: impl Into<Vec<u8>>,
    ) -> MojiResult<AssetRef> {
        let asset = AssetRef::new(&format!("{}/{name}", category.dir_name()))?;
        if self.bytes.insert(asset.clone(), bytes.into()).is_none() {
            self.listing[category].push(asset.clone());
        }
        Ok(asset)
    }

    /// Register a listing entry with no backing bytes; fetching it fails.
    pub fn insert_missing(&mut self, category: Category, name: &str) -> MojiResult<AssetRef> {
        let asset = AssetRef::new(&format!("{}/{name}", category.dir_name()))?;
        self.listing[category].push(asset.clone());
        Ok(asset)
    }
}

impl AssetSource for MemoryAssetSource {
    fn discover(&self, category: Category) -> MojiResult<Vec<AssetRef>> {
        Ok(self.listing[category].clone())
    }

    fn fetch(&self, asset: &AssetRef) -> MojiResult<Vec<u8>> {
        self.bytes
            .get(asset)
            .cloned()
            .ok_or_else(|| MojiError::load(format!("asset '{asset}' not found")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
