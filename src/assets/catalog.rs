use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::{
        decode::parse_svg,
        source::{AssetRef, AssetSource},
    },
    foundation::{
        core::{Category, CategoryMap},
        error::{MojiError, MojiResult},
    },
};

/// A loaded, immutable vector asset.
#[derive(Clone, Debug)]
pub struct Asset {
    /// Identity of the asset.
    pub reference: AssetRef,
    /// Parsed SVG tree, shared between composites.
    pub tree: Arc<usvg::Tree>,
}

/// Per-category ordered asset lists. Built once, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    assets: CategoryMap<Vec<Asset>>,
}

impl AssetCatalog {
    pub fn from_assets(assets: CategoryMap<Vec<Asset>>) -> Self {
        Self { assets }
    }

    /// Assets of `category` in discovery order.
    pub fn assets(&self, category: Category) -> &[Asset] {
        &self.assets[category]
    }

    pub fn len(&self, category: Category) -> usize {
        self.assets[category].len()
    }

    pub fn get(&self, category: Category, index: usize) -> Option<&Asset> {
        self.assets[category].get(index)
    }

    /// Total asset count across all categories.
    pub fn total(&self) -> usize {
        self.assets.values().iter().map(Vec::len).sum()
    }

    /// Per-category counts in z-order.
    pub fn counts(&self) -> CategoryMap<usize> {
        self.assets.map(|_, v| v.len())
    }
}

/// Discover and parse every asset of every category.
///
/// Categories load in parallel and so do the assets inside a category; each category's list
/// is joined before the catalog is assembled. Any single failure fails the whole load.
#[tracing::instrument(skip(source))]
pub fn load_catalog(source: &dyn AssetSource) -> MojiResult<AssetCatalog> {
    let lists = Category::ALL
        .par_iter()
        .map(|&category| load_category(source, category))
        .collect::<MojiResult<Vec<_>>>()?;

    let mut assets = CategoryMap::<Vec<Asset>>::default();
    for (category, list) in Category::ALL.into_iter().zip(lists) {
        assets[category] = list;
    }

    let catalog = AssetCatalog::from_assets(assets);
    tracing::info!(total = catalog.total(), counts = ?catalog.counts(), "asset catalog loaded");
    Ok(catalog)
}

fn load_category(source: &dyn AssetSource, category: Category) -> MojiResult<Vec<Asset>> {
    let refs = source.discover(category)?;
    tracing::debug!(%category, count = refs.len(), "discovered assets");

    refs.into_par_iter()
        .map(|reference| {
            let bytes = source.fetch(&reference)?;
            let tree = parse_svg(&bytes)
                .map_err(|e| MojiError::load(format!("asset '{reference}': {e}")))?;
            Ok(Asset {
                reference,
                tree: Arc::new(tree),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
