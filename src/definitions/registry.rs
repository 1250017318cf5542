//! Pattern registry: loads and caches language definitions
//!
//! Each language id is parsed at most once per registry. The map lock is held
//! only long enough to find or insert the per-id cell; the cell itself runs
//! the load exactly once while concurrent callers for the same id wait on it.
//! After that every read is a clone of an `Arc`.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use crate::definitions::{
    CompositeDefinitions, DefinitionSource, EmbeddedDefinitions, FileSystemDefinitions,
    LanguageDefinition,
};
use crate::error::{GenerationError, Result};

type DefinitionCell = Arc<OnceCell<Arc<LanguageDefinition>>>;

/// Registry of immutable language definitions shared across requests
pub struct PatternRegistry {
    source: Box<dyn DefinitionSource>,
    cache: RwLock<HashMap<String, DefinitionCell>>,
}

impl PatternRegistry {
    /// Create a registry over an arbitrary definition source
    pub fn new(source: impl DefinitionSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Registry over the built-in definitions only
    pub fn embedded() -> Self {
        Self::new(EmbeddedDefinitions::new())
    }

    /// Registry where files in `dir` override the built-in definitions
    pub fn with_overrides(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(
            CompositeDefinitions::new(Vec::new())
                .with(FileSystemDefinitions::new(dir))
                .with(EmbeddedDefinitions::new()),
        )
    }

    /// Load (or fetch from cache) the definition for `language_id`.
    ///
    /// Failures are not cached; the next call asks the source again.
    pub fn load(&self, language_id: &str) -> Result<Arc<LanguageDefinition>> {
        let cell = self.cell(language_id);

        if let Some(definition) = cell.get() {
            debug!("Definition cache hit for '{language_id}'");
            return Ok(Arc::clone(definition));
        }

        match cell.get_or_try_init(|| self.load_uncached(language_id)) {
            Ok(definition) => Ok(Arc::clone(definition)),
            Err(e) => {
                self.evict_if_empty(language_id, &cell);
                Err(e)
            }
        }
    }

    /// Language ids the underlying source can supply
    pub fn languages(&self) -> Vec<String> {
        self.source.languages()
    }

    /// Language ids already loaded into the cache, sorted
    pub fn cached_languages(&self) -> Vec<String> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = cache
            .iter()
            .filter(|(_, cell)| cell.get().is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn cell(&self, language_id: &str) -> DefinitionCell {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cell) = cache.get(language_id) {
                return Arc::clone(cell);
            }
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(language_id.to_string()).or_default())
    }

    /// Drop the cell a failed load left behind so unknown ids do not pile up
    fn evict_if_empty(&self, language_id: &str, cell: &DefinitionCell) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let stale = cache
            .get(language_id)
            .is_some_and(|cached| Arc::ptr_eq(cached, cell) && cached.get().is_none());
        if stale {
            cache.remove(language_id);
        }
    }

    fn load_uncached(&self, language_id: &str) -> Result<Arc<LanguageDefinition>> {
        debug!("Definition cache miss for '{language_id}'");

        let content = self
            .source
            .fetch(language_id)?
            .ok_or_else(|| GenerationError::not_found(language_id))?;

        let definition = LanguageDefinition::from_yaml(language_id, &content)?;
        info!(
            "Loaded definition '{}' with {} construct kinds",
            language_id,
            definition.constructs.len()
        );
        Ok(Arc::new(definition))
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::embedded()
    }
}
