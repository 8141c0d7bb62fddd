//! Asset loading with deterministic fallbacks and cancellable load tasks
//!
//! Loading is the only asynchronous boundary: each request runs on its own
//! loader thread and hands back a [`LoadTask`]. Requests carry the generation
//! current when they were issued; after [`AssetRequests::supersede`] any older
//! task resolves to [`LoadOutcome::Stale`] and its result is discarded instead
//! of feeding a build.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::io::error::{MosaicError, Result};
use crate::io::image::open_rgba;
use crate::spatial::sprites::SpriteSet;

/// Width of the synthetic fallback raster
pub const FALLBACK_WIDTH: u32 = 240;
/// Height of the synthetic fallback raster
pub const FALLBACK_HEIGHT: u32 = 320;

/// Decodes images for the pipeline
pub trait AssetLoader: Send + Sync + 'static {
    /// Load an image as RGBA
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or decoded
    fn load_image(&self, path: &Path) -> Result<RgbaImage>;
}

/// Loads images from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl AssetLoader for FileLoader {
    fn load_image(&self, path: &Path) -> Result<RgbaImage> {
        open_rgba(path)
    }
}

/// Deterministic stand-in for a source that failed to load
///
/// A diagonal warm-to-cool gradient over an opaque canvas.
pub fn synthetic_fallback(width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    let span_x = f64::from((width - 1).max(1));
    let span_y = f64::from((height - 1).max(1));
    RgbaImage::from_fn(width, height, |x, y| {
        let u = f64::from(x) / span_x;
        let v = f64::from(y) / span_y;
        Rgba([
            (255.0 * (1.0 - v)).round() as u8,
            (255.0 * 0.5 * (u + v)).round() as u8,
            (255.0 * u).round() as u8,
            255,
        ])
    })
}

/// Load a source image, substituting the synthetic fallback on failure
pub fn load_or_fallback(loader: &impl AssetLoader, path: Option<&Path>) -> RgbaImage {
    let Some(path) = path else {
        return synthetic_fallback(FALLBACK_WIDTH, FALLBACK_HEIGHT);
    };
    match loader.load_image(path) {
        Ok(image) => image,
        Err(error) => {
            warn!(%error, "source image unavailable, using synthetic fallback");
            synthetic_fallback(FALLBACK_WIDTH, FALLBACK_HEIGHT)
        }
    }
}

/// Load every sprite that can be loaded; failures are omitted
pub fn load_sprites(loader: &impl AssetLoader, paths: &[PathBuf]) -> SpriteSet {
    let sprites = paths
        .iter()
        .filter_map(|path| match loader.load_image(path) {
            Ok(image) => Some(image),
            Err(error) => {
                warn!(%error, "sprite omitted");
                None
            }
        })
        .collect();
    SpriteSet::new(sprites)
}

/// How a load task ended
#[derive(Debug)]
pub enum LoadOutcome {
    /// The image decoded and the request is still current
    Ready(RgbaImage),
    /// The request is still current but loading failed
    Failed(MosaicError),
    /// A newer request superseded this one; its result was discarded
    Stale,
}

/// Handle to one in-flight image load
#[derive(Debug)]
pub struct LoadTask {
    path: PathBuf,
    generation: u64,
    handle: JoinHandle<Result<RgbaImage>>,
}

impl LoadTask {
    /// Path being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Generation the request was issued in
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the loader has finished (successfully or not)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Issues load tasks and tracks which generation is current
#[derive(Debug)]
pub struct AssetRequests<L: AssetLoader> {
    loader: Arc<L>,
    generation: Arc<AtomicU64>,
}

impl<L: AssetLoader> Clone for AssetRequests<L> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<L: AssetLoader> AssetRequests<L> {
    /// Wrap a loader
    pub fn new(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generation new requests are tagged with
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Invalidate every outstanding request; returns the new generation
    pub fn supersede(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Start loading `path` in the current generation
    pub fn request(&self, path: &Path) -> LoadTask {
        let loader = Arc::clone(&self.loader);
        let owned = path.to_path_buf();
        let task_path = owned.clone();
        let handle = std::thread::spawn(move || loader.load_image(&owned));
        LoadTask {
            path: task_path,
            generation: self.current_generation(),
            handle,
        }
    }

    /// Wait for `task` and report its outcome
    ///
    /// Stale tasks are still joined so their threads never leak, but their
    /// results are dropped.
    pub fn resolve(&self, task: LoadTask) -> LoadOutcome {
        let LoadTask {
            path,
            generation,
            handle,
        } = task;
        let joined = handle.join();
        if generation != self.current_generation() {
            return LoadOutcome::Stale;
        }
        match joined {
            Ok(Ok(image)) => LoadOutcome::Ready(image),
            Ok(Err(error)) => LoadOutcome::Failed(error),
            Err(_) => LoadOutcome::Failed(MosaicError::AssetTask {
                path,
                reason: "loader thread panicked".to_string(),
            }),
        }
    }

    /// Resolve a source task, falling back to the synthetic raster unless stale
    pub fn resolve_source(&self, task: LoadTask) -> Option<RgbaImage> {
        match self.resolve(task) {
            LoadOutcome::Ready(image) => Some(image),
            LoadOutcome::Failed(error) => {
                warn!(%error, "source image unavailable, using synthetic fallback");
                Some(synthetic_fallback(FALLBACK_WIDTH, FALLBACK_HEIGHT))
            }
            LoadOutcome::Stale => None,
        }
    }

    /// Resolve sprite tasks; failed ones are omitted, stale ones yield `None`
    pub fn resolve_sprites(&self, tasks: Vec<LoadTask>) -> Option<SpriteSet> {
        let mut sprites = Vec::with_capacity(tasks.len());
        let mut stale = false;
        for task in tasks {
            match self.resolve(task) {
                LoadOutcome::Ready(image) => sprites.push(image),
                LoadOutcome::Failed(error) => warn!(%error, "sprite omitted"),
                LoadOutcome::Stale => stale = true,
            }
        }
        (!stale).then(|| SpriteSet::new(sprites))
    }
}
