//! Configuration types for glue emission.

use crate::locator::LibraryLocator;

/// Loader module the emitted code imports `prepare` and `CachePolicy` from.
pub const DEFAULT_LOADER_URL: &str = "https://deno.land/x/plug@0.5.2/plug.ts";

/// First line of every emitted module.
pub const DEFAULT_BANNER: &str = "// Auto-generated with ffiglue";

/// Configuration for glue emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether to export types and wrappers
    pub(crate) export: bool,
    /// Load the library from an exported `load()` instead of at import time
    pub(crate) lazy_init: bool,
    pub(crate) loader_url: String,
    pub(crate) banner: String,
    pub(crate) locator: LibraryLocator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: true,
            lazy_init: false,
            loader_url: DEFAULT_LOADER_URL.to_string(),
            banner: DEFAULT_BANNER.to_string(),
            locator: LibraryLocator::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to export types and wrappers.
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    /// Set whether loading is deferred to an exported `load()`.
    pub fn lazy_init(mut self, value: bool) -> Self {
        self.lazy_init = value;
        self
    }

    /// Set the loader module URL.
    pub fn loader_url(mut self, value: impl Into<String>) -> Self {
        self.loader_url = value.into();
        self
    }

    /// Set the banner comment.
    pub fn banner(mut self, value: impl Into<String>) -> Self {
        self.banner = value.into();
        self
    }

    /// Set the platform naming table.
    pub fn locator(mut self, value: LibraryLocator) -> Self {
        self.locator = value;
        self
    }
}
