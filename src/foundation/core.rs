use std::ops::{Index, IndexMut};

use crate::foundation::error::{MojiError, MojiResult};

/// One facial-feature slice. Declaration order is both tab order and draw (z-)order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Base face shape, drawn first.
    Head,
    /// Eyebrows.
    #[serde(alias = "eyebow")]
    Eyebrow,
    /// Eyes.
    Eye,
    /// Mouth.
    Mouth,
    /// Decorative detail, drawn last.
    Detail,
}

impl Category {
    /// All categories in z-order.
    pub const ALL: [Category; 5] = [
        Category::Head,
        Category::Eyebrow,
        Category::Eye,
        Category::Mouth,
        Category::Detail,
    ];

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Head => "head",
            Category::Eyebrow => "eyebrow",
            Category::Eye => "eye",
            Category::Mouth => "mouth",
            Category::Detail => "detail",
        }
    }

    /// Storage directory holding this category's assets.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Head => "head",
            Category::Eyebrow => "eyebrows",
            Category::Eye => "eyes",
            Category::Mouth => "mouth",
            Category::Detail => "details",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = MojiError;

    fn from_str(s: &str) -> MojiResult<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle || c.dir_name() == needle)
            .or_else(|| (needle == "eyebow").then_some(Category::Eyebrow))
            .ok_or_else(|| MojiError::validation(format!("unknown category '{s}'")))
    }
}

/// Fixed five-slot map keyed by [`Category`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryMap<T>([T; 5]);

impl<T> CategoryMap<T> {
    /// Build a map by evaluating `f` once per category, in z-order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self(Category::ALL.map(&mut f))
    }

    /// Iterate `(category, value)` pairs in z-order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }

    /// Map every value, keeping category positions.
    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|c| f(c, &self[c]))
    }

    /// Values in z-order.
    pub fn values(&self) -> &[T; 5] {
        &self.0
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.0[category.index()]
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.index()]
    }
}

/// Square raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Normalize and validate an asset-relative path.
///
/// The result uses `/` separators and drops `.` segments. Absolute paths and parent
/// traversals (`..`) are rejected.
pub fn normalize_rel_path(source: &str) -> MojiResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(MojiError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(MojiError::validation("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MojiError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MojiError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
