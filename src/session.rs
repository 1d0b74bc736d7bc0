//! Session state: the loaded catalog, the selection, and the raster surface it drives.
//!
//! Every selection mutation goes through [`Session`], which recomposes the surface and then
//! notifies subscribed [`SessionObserver`]s. Recomposition is synchronous, so the surface always
//! reflects the latest successful mutation.

use std::{sync::Arc, time::Duration};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    assets::{
        catalog::{AssetCatalog, load_catalog},
        source::{AssetRef, AssetSource},
    },
    export::{Download, raster, unix_millis, vector},
    foundation::{
        core::{Category, CategoryMap},
        error::{MojiError, MojiResult},
    },
    render::{
        compositor::{Compositor, TRANSITION},
        surface::RasterSurface,
    },
    selection::{Composite, Selection},
    settings::Settings,
};

/// Emitted after the surface has been redrawn for a new selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecomposeEvent {
    /// Monotonic selection revision the surface now shows.
    pub revision: u64,
    pub indices: CategoryMap<usize>,
    /// Drawn asset per category, `None` where the category is empty.
    pub layers: CategoryMap<Option<AssetRef>>,
    /// How long a UI should show its redraw transition.
    pub transition: Duration,
}

/// Receives recomposition notifications.
pub trait SessionObserver: Send {
    fn recomposed(&mut self, event: &RecomposeEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&RecomposeEvent) + Send,
{
    fn recomposed(&mut self, event: &RecomposeEvent) {
        self(event)
    }
}

pub struct Session {
    settings: Settings,
    source: Arc<dyn AssetSource>,
    catalog: Option<AssetCatalog>,
    selection: Selection,
    compositor: Compositor,
    surface: RasterSurface,
    rng: StdRng,
    revision: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .field("loaded", &self.catalog.is_some())
            .field("selection", &self.selection)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Create an unloaded session. Call [`Session::load`] before anything else.
    pub fn new(settings: Settings, source: Arc<dyn AssetSource>) -> MojiResult<Self> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let compositor = Compositor::new(&settings);
        let surface = RasterSurface::new(compositor.canvas());
        Ok(Self {
            settings,
            source,
            catalog: None,
            selection: Selection::default(),
            compositor,
            surface,
            rng,
            revision: 0,
            observers: Vec::new(),
        })
    }

    /// Load the catalog, then draw an initial random selection.
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self) -> MojiResult<()> {
        let catalog = load_catalog(self.source.as_ref())?;
        self.catalog = Some(catalog);
        self.randomize()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> Option<&AssetCatalog> {
        self.catalog.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The current composite, derived from the selection.
    pub fn composite(&self) -> MojiResult<Composite<'_>> {
        Ok(self.selection.resolve(self.loaded_catalog()?))
    }

    /// Select `index` for `category` and recompose.
    pub fn pick_category_index(&mut self, category: Category, index: usize) -> MojiResult<()> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| MojiError::not_ready("asset catalog not loaded"))?;
        self.selection
            .pick_category_index(catalog, category, index)?;
        tracing::debug!(%category, index, "picked");
        self.selection_changed()
    }

    /// Draw a fresh random index for every category and recompose.
    pub fn randomize(&mut self) -> MojiResult<()> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| MojiError::not_ready("asset catalog not loaded"))?;
        self.selection.randomize(catalog, &mut self.rng);
        tracing::debug!(indices = ?self.selection.indices(), "randomized");
        self.selection_changed()
    }

    /// Export the surface as PNG, named with the current time.
    pub fn export_png(&self) -> MojiResult<Download> {
        self.export_png_at(unix_millis()?)
    }

    pub fn export_png_at(&self, unix_ms: u128) -> MojiResult<Download> {
        self.loaded_catalog()?;
        if self.surface.composed_revision() != Some(self.revision) {
            return Err(MojiError::not_ready(
                "surface does not show the current selection",
            ));
        }
        raster::export_png(&self.surface, &self.settings.file_prefix, unix_ms)
    }

    /// Merge the selected layers' SVG sources, named with the current time.
    pub fn export_svg(&self) -> MojiResult<Download> {
        self.export_svg_at(unix_millis()?)
    }

    pub fn export_svg_at(&self, unix_ms: u128) -> MojiResult<Download> {
        let composite = self.composite()?;
        vector::export_svg(
            self.source.as_ref(),
            &composite,
            &self.settings.vector_canvas,
            &self.settings.file_prefix,
            unix_ms,
        )
    }

    fn loaded_catalog(&self) -> MojiResult<&AssetCatalog> {
        self.catalog
            .as_ref()
            .ok_or_else(|| MojiError::not_ready("asset catalog not loaded"))
    }

    fn selection_changed(&mut self) -> MojiResult<()> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| MojiError::not_ready("asset catalog not loaded"))?;
        self.revision += 1;
        let composite = self.selection.resolve(catalog);
        let layers = composite
            .layers()
            .map(|_, asset| (*asset).map(|a| a.reference.clone()));
        self.compositor.compose(&composite, &mut self.surface)?;
        self.surface.mark_composed(self.revision);

        let event = RecomposeEvent {
            revision: self.revision,
            indices: self.selection.indices().clone(),
            layers,
            transition: TRANSITION,
        };
        tracing::debug!(revision = event.revision, "recomposed");
        for observer in &mut self.observers {
            observer.recomposed(&event);
        }
        Ok(())
    }
}
