//! Render context - the field values a template is filled from

use std::collections::{BTreeMap, BTreeSet};

/// Field values for one template substitution
///
/// Values added with [`RenderContext::add_rendered`] were produced by the
/// engine itself (e.g. the joined method bodies) and are exempt from the
/// recursive-placeholder check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
    rendered: BTreeSet<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a caller-supplied variable
    pub fn add_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.rendered.remove(&key);
        self.variables.insert(key, value.into());
    }

    /// Add a variable holding text the engine already rendered
    pub fn add_rendered(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.rendered.insert(key.clone());
        self.variables.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn is_rendered(&self, key: &str) -> bool {
        self.rendered.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut context = RenderContext::new();
        context.add_variable("name", "fetch");
        context.add_rendered("methods", "def a(): pass");

        assert_eq!(context.get("name"), Some("fetch"));
        assert!(context.has_variable("methods"));
        assert!(!context.has_variable("body"));
        assert!(context.is_rendered("methods"));
        assert!(!context.is_rendered("name"));
    }

    #[test]
    fn test_caller_value_replaces_rendered_marker() {
        let mut context = RenderContext::new();
        context.add_rendered("methods", "x");
        context.add_variable("methods", "y");
        assert!(!context.is_rendered("methods"));
        assert_eq!(context.get("methods"), Some("y"));
    }
}
