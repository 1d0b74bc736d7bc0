use rand::Rng;

use crate::{
    assets::catalog::{Asset, AssetCatalog},
    foundation::{
        core::{Category, CategoryMap},
        error::{MojiError, MojiResult},
    },
};

/// Chosen index per category.
///
/// Before a catalog is loaded every index is the placeholder `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Selection {
    indices: CategoryMap<usize>,
}

impl Selection {
    pub fn new(indices: CategoryMap<usize>) -> Self {
        Self { indices }
    }

    pub fn get(&self, category: Category) -> usize {
        self.indices[category]
    }

    pub fn indices(&self) -> &CategoryMap<usize> {
        &self.indices
    }

    /// Replace the whole mapping.
    pub fn set(&mut self, indices: CategoryMap<usize>) {
        self.indices = indices;
    }

    /// Set one category's index, leaving the others untouched.
    ///
    /// Fails without mutating anything if `index` is outside the category's asset list.
    pub fn pick_category_index(
        &mut self,
        catalog: &AssetCatalog,
        category: Category,
        index: usize,
    ) -> MojiResult<()> {
        let len = catalog.len(category);
        if index >= len {
            return Err(MojiError::validation(format!(
                "{category} index {index} out of range (have {len})"
            )));
        }
        self.indices[category] = index;
        Ok(())
    }

    /// Draw an independent uniform index in `0..len` for every category.
    ///
    /// Empty categories keep the placeholder `0`.
    pub fn randomize<R: Rng>(&mut self, catalog: &AssetCatalog, rng: &mut R) {
        self.indices = CategoryMap::from_fn(|category| random_index(rng, catalog.len(category)));
    }

    /// Resolve against `catalog`: one optional asset per category.
    pub fn resolve<'a>(&self, catalog: &'a AssetCatalog) -> Composite<'a> {
        Composite {
            layers: self
                .indices
                .map(|category, &index| catalog.get(category, index)),
        }
    }
}

fn random_index<R: Rng>(rng: &mut R, len: usize) -> usize {
    if len == 0 { 0 } else { rng.gen_range(0..len) }
}

/// Derived per-category asset choice. Never stored; recomputed from the selection.
#[derive(Clone, Debug)]
pub struct Composite<'a> {
    layers: CategoryMap<Option<&'a Asset>>,
}

impl<'a> Composite<'a> {
    pub fn get(&self, category: Category) -> Option<&'a Asset> {
        self.layers[category]
    }

    /// Present layers in z-order, absent categories skipped.
    pub fn present(&self) -> impl Iterator<Item = (Category, &'a Asset)> + '_ {
        self.layers.iter().filter_map(|(c, a)| (*a).map(|a| (c, a)))
    }

    pub fn layers(&self) -> &CategoryMap<Option<&'a Asset>> {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

#[cfg(test)]
#[path = "../tests/unit/selection.rs"]
mod tests;
