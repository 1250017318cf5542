//! Definition source trait

use crate::error::Result;

/// Supplies raw definition documents by target language id
///
/// Sources do no parsing. `Ok(None)` means the source does not know the id;
/// errors are reserved for a source that knows the id but cannot read it.
pub trait DefinitionSource: Send + Sync {
    /// Fetch the definition document for `language_id`
    fn fetch(&self, language_id: &str) -> Result<Option<String>>;

    /// Language ids this source can supply, sorted
    fn languages(&self) -> Vec<String>;
}
