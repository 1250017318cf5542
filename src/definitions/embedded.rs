//! Built-in definitions compiled into the binary
//!
//! Every `definitions/<id>.yml` file in the crate root is embedded at compile
//! time, so the generator works without any files on disk.

use rust_embed::RustEmbed;
use std::collections::BTreeSet;
use tracing::debug;

use crate::definitions::DefinitionSource;
use crate::error::{GenerationError, Result};

/// Container for the definition files embedded at compile time
#[derive(RustEmbed)]
#[folder = "definitions/"]
struct EmbeddedDefinitionFiles;

const EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Definition source backed by the embedded files
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDefinitions;

impl EmbeddedDefinitions {
    pub fn new() -> Self {
        Self
    }
}

impl DefinitionSource for EmbeddedDefinitions {
    fn fetch(&self, language_id: &str) -> Result<Option<String>> {
        for ext in EXTENSIONS {
            let path = format!("{language_id}.{ext}");
            if let Some(file) = EmbeddedDefinitionFiles::get(&path) {
                debug!("Found embedded definition {path}");
                let content = String::from_utf8(file.data.into_owned()).map_err(|e| {
                    GenerationError::malformed(language_id, format!("not valid UTF-8: {e}"))
                })?;
                return Ok(Some(content));
            }
        }
        Ok(None)
    }

    fn languages(&self) -> Vec<String> {
        EmbeddedDefinitionFiles::iter()
            .filter_map(|path| {
                let (stem, ext) = path.rsplit_once('.')?;
                EXTENSIONS.contains(&ext).then(|| stem.to_string())
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
