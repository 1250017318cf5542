//! Filesystem-based definition source
//!
//! Reads `<dir>/<id>.yml` or `<dir>/<id>.yaml`, typically from the directory
//! given via `--definitions-dir` or the config file.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::definitions::DefinitionSource;
use crate::error::Result;

const EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Definition source that reads one file per language from a directory
#[derive(Debug, Clone)]
pub struct FileSystemDefinitions {
    dir: PathBuf,
}

impl FileSystemDefinitions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Ids map straight onto file names, so keep them to a single path component
fn is_safe_id(language_id: &str) -> bool {
    !language_id.is_empty()
        && language_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl DefinitionSource for FileSystemDefinitions {
    fn fetch(&self, language_id: &str) -> Result<Option<String>> {
        if !is_safe_id(language_id) {
            debug!("Rejecting language id {language_id:?} for filesystem lookup");
            return Ok(None);
        }

        for ext in EXTENSIONS {
            let path = self.dir.join(format!("{language_id}.{ext}"));
            if path.is_file() {
                debug!("Reading definition from {}", path.display());
                return Ok(Some(fs::read_to_string(&path)?));
            }
        }
        Ok(None)
    }

    fn languages(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list definitions in {}: {e}", self.dir.display());
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let ext = path.extension()?.to_str()?;
                if !EXTENSIONS.contains(&ext) {
                    return None;
                }
                path.file_stem()?.to_str().map(str::to_string)
            })
            .filter(|id| is_safe_id(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
