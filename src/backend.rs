//! Backend interface and the registry the host server opens images through.

use std::fmt;
use std::path::Path;

use crate::config::BackendConfig;
use crate::error::TileError;
use crate::pixel::{ColourSpace, SampleType};
use crate::tile::{TileBuffer, TileRequest};

/// Metadata a tile server needs about an open image.
///
/// The per-resolution vectors follow the multi-resolution contract of the
/// host even when a backend only has one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Nominal tile size. Edge tiles may be smaller.
    pub tile_width: u32,
    pub tile_height: u32,
    pub channels: u32,
    pub bits_per_channel: u32,
    pub sample_type: SampleType,
    pub colour_space: ColourSpace,
    pub num_resolutions: u32,
    pub image_widths: Vec<u32>,
    pub image_heights: Vec<u32>,
    pub tile_widths: Vec<u32>,
    pub tile_heights: Vec<u32>,
}

/// One way of opening images and cutting tiles from them.
///
/// A value is created per image path, opened once, asked for any number of
/// tiles, then closed. Tile requests take `&mut self`: a backend may update
/// its own state while serving them, so one handle serves one request at a
/// time.
pub trait ImageBackend: Send {
    /// Backend name, as registered.
    fn name(&self) -> &'static str;

    fn path(&self) -> &Path;

    fn open(&mut self) -> Result<(), TileError>;

    /// Release the decoded image. Idempotent.
    fn close(&mut self);

    fn metadata(&self) -> Result<&ImageMetadata, TileError>;

    fn get_tile(&mut self, request: TileRequest) -> Result<TileBuffer, TileError>;
}

type Construct = fn(&Path, &BackendConfig) -> Box<dyn ImageBackend>;

struct Entry {
    name: &'static str,
    accepts: fn(&Path) -> bool,
    construct: Construct,
}

/// Picks a backend for each image path.
///
/// Backends are tried in registration order; the first whose `accepts`
/// returns true is constructed and opened.
pub struct BackendRegistry {
    config: BackendConfig,
    entries: Vec<Entry>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    /// A registry with the backends this crate ships.
    pub fn with_defaults(config: BackendConfig) -> Self {
        let mut registry = Self::new(config);
        registry.register(
            crate::fallback::BACKEND_NAME,
            crate::SourceFormat::accepts,
            crate::fallback::construct,
        );
        registry
    }

    pub fn register(
        &mut self,
        name: &'static str,
        accepts: fn(&Path) -> bool,
        construct: Construct,
    ) -> &mut Self {
        self.entries.push(Entry {
            name,
            accepts,
            construct,
        });
        self
    }

    /// Registered backend names, in lookup order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Open `path` with the first backend that accepts it.
    pub fn open(&self, path: &Path) -> Result<Box<dyn ImageBackend>, TileError> {
        let entry = self
            .entries
            .iter()
            .find(|e| (e.accepts)(path))
            .ok_or_else(|| {
                TileError::UnsupportedFormat(format!("no backend for {}", path.display()))
            })?;
        let mut backend = (entry.construct)(path, &self.config);
        backend.open()?;
        Ok(backend)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults(BackendConfig::default())
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("config", &self.config)
            .field("backends", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
