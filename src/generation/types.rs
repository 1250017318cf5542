//! Generation output types

use std::fmt;

/// Final text of one generation request plus what went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub text: String,
    /// Deduplicated imports, first-seen order
    pub imports: Vec<String>,
    /// Construct-level decorators, request order
    pub decorators: Vec<String>,
    /// Some applied pattern expects attribute declarations in the body
    pub attributes_enabled: bool,
    /// Some applied pattern expects a generator body
    pub yield_enabled: bool,
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RenderedOutput {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
