//! Import deduplication
//!
//! Statements are compared by exact string equality and kept in first-seen
//! order. Sorting and grouping are left to whatever formatter runs next.

use std::collections::HashSet;

/// Ordered, duplicate-free collection of import statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement; returns `false` if it was blank or already present
    pub fn insert(&mut self, statement: &str) -> bool {
        if statement.trim().is_empty() || self.seen.contains(statement) {
            return false;
        }
        self.seen.insert(statement.to_string());
        self.order.push(statement.to_string());
        true
    }

    pub fn extend<I, S>(&mut self, statements: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for statement in statements {
            self.insert(statement.as_ref());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// One statement per line, no trailing newline
    pub fn render_block(&self) -> String {
        self.order.join("\n")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_without_duplicates() {
        let mut imports = ImportSet::new();
        assert!(imports.insert("import os"));
        assert!(imports.insert("import asyncio"));
        assert!(!imports.insert("import os"));
        imports.extend(["import sys", "import asyncio"]);

        assert_eq!(imports.len(), 3);
        assert_eq!(imports.render_block(), "import os\nimport asyncio\nimport sys");
    }

    #[test]
    fn test_no_reordering() {
        let mut imports = ImportSet::new();
        imports.extend(["import zlib", "import abc"]);
        assert_eq!(imports.into_vec(), vec!["import zlib", "import abc"]);
    }

    #[test]
    fn test_exact_string_equality() {
        let mut imports = ImportSet::new();
        imports.extend(["import os", "import os ", "from os import path"]);
        assert_eq!(imports.len(), 3);
    }

    #[test]
    fn test_empty_block() {
        let imports = ImportSet::new();
        assert!(imports.is_empty());
        assert_eq!(imports.render_block(), "");
    }

    #[test]
    fn test_blank_statements_are_ignored() {
        let mut imports = ImportSet::new();
        assert!(!imports.insert(""));
        assert!(!imports.insert("   "));
        imports.insert("import os");
        assert_eq!(imports.render_block(), "import os");
    }
}
