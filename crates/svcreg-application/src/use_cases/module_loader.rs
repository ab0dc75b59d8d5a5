//! Module Loader
//!
//! Memoized loading of compiled-in dynamic-import modules. The first load of a
//! path runs the module's `init`; every later load, including concurrent ones,
//! reuses the result. A failed initialization is remembered too and is not
//! re-run.

use std::fmt;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use svcreg_domain::error::{Error, Result};
use tracing::{debug, info, warn};

use crate::ports::registry::{ModuleEntry, ModuleExports, SERVICE_MODULES};

type LoadOutcome = std::result::Result<Arc<ModuleExports>, String>;

/// Catalog of importable modules plus the cache of loaded ones
pub struct ModuleLoader {
    catalog: Vec<&'static ModuleEntry>,
    loaded: DashMap<String, Arc<OnceLock<LoadOutcome>>>,
}

impl ModuleLoader {
    /// Loader over every module submitted to `SERVICE_MODULES`
    pub fn new() -> Self {
        Self::with_modules(SERVICE_MODULES.iter())
    }

    /// Loader over an explicit set of modules
    pub fn with_modules(modules: impl IntoIterator<Item = &'static ModuleEntry>) -> Self {
        let mut catalog: Vec<&'static ModuleEntry> = Vec::new();
        for entry in modules {
            if catalog.iter().any(|known| known.path == entry.path) {
                warn!(module = entry.path, "Duplicate module path ignored");
                continue;
            }
            catalog.push(entry);
        }
        Self {
            catalog,
            loaded: DashMap::new(),
        }
    }

    /// Load a module, running its initialization on first use only
    ///
    /// # Errors
    /// `ImportFailure` when no module has this path or its initialization
    /// failed.
    pub fn load(&self, path: &str) -> Result<Arc<ModuleExports>> {
        let Some(entry) = self.find(path) else {
            return Err(Error::import_failure(path, format!("no module named '{path}'")));
        };

        let cell = self.loaded.entry(path.to_string()).or_default().value().clone();
        let outcome = cell.get_or_init(|| Self::initialize(entry));
        outcome
            .clone()
            .map_err(|reason| Error::import_failure(path, reason))
    }

    fn initialize(entry: &'static ModuleEntry) -> LoadOutcome {
        let mut exports = ModuleExports::new(entry.path);
        match (entry.init)(&mut exports) {
            Ok(()) => {
                info!(
                    module = entry.path,
                    attributes = exports.attribute_names().len(),
                    schemes = exports.scheme_declarations().len(),
                    "Loaded module"
                );
                Ok(Arc::new(exports))
            }
            Err(e) => {
                warn!(module = entry.path, error = %e, "Module initialization failed");
                Err(e.to_string())
            }
        }
    }

    fn find(&self, path: &str) -> Option<&'static ModuleEntry> {
        self.catalog.iter().copied().find(|entry| entry.path == path)
    }

    /// Whether a module with this path exists
    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Whether a module has already been initialized
    pub fn is_loaded(&self, path: &str) -> bool {
        self.loaded
            .get(path)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// Paths of initialized modules, sorted
    pub fn loaded_modules(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .loaded
            .iter()
            .filter(|item| item.value().get().is_some())
            .map(|item| item.key().clone())
            .collect();
        paths.sort_unstable();
        debug!(count = paths.len(), "Listed loaded modules");
        paths
    }

    /// `(path, description)` of every importable module, sorted by path
    pub fn available_modules(&self) -> Vec<(&'static str, &'static str)> {
        let mut modules: Vec<_> = self
            .catalog
            .iter()
            .map(|entry| (entry.path, entry.description))
            .collect();
        modules.sort_unstable();
        modules
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("modules", &self.catalog.len())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}
