//! Composite definition source that tries multiple sources in order

use std::collections::BTreeSet;
use tracing::debug;

use crate::definitions::DefinitionSource;
use crate::error::Result;

/// The first source that knows a language id wins
pub struct CompositeDefinitions {
    sources: Vec<Box<dyn DefinitionSource>>,
}

impl CompositeDefinitions {
    pub fn new(sources: Vec<Box<dyn DefinitionSource>>) -> Self {
        Self { sources }
    }

    /// Append a lower-priority source
    pub fn with(mut self, source: impl DefinitionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl DefinitionSource for CompositeDefinitions {
    fn fetch(&self, language_id: &str) -> Result<Option<String>> {
        for (index, source) in self.sources.iter().enumerate() {
            if let Some(content) = source.fetch(language_id)? {
                debug!("CompositeDefinitions: source #{index} supplied '{language_id}'");
                return Ok(Some(content));
            }
        }
        Ok(None)
    }

    fn languages(&self) -> Vec<String> {
        self.sources
            .iter()
            .flat_map(|source| source.languages())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
