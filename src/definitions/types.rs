//! Core definition types
//!
//! These types are source-agnostic: a `LanguageDefinition` looks the same
//! whether it came from the embedded set, a directory on disk, or a string
//! handed in by a caller.

use std::collections::BTreeMap;

use crate::error::{GenerationError, Result};

/// Pattern name -> modifier, per construct kind
pub type PatternSet = BTreeMap<String, PatternModifier>;

/// Kind name used for the method scope of class bodies
pub const METHOD_KIND: &str = "method";

/// Everything one target language knows how to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefinition {
    /// Target language identifier (e.g. "python")
    pub id: String,
    /// Construct kind -> template
    pub constructs: BTreeMap<String, ConstructTemplate>,
    /// Named import bundles. Never applied unless a caller asks for one.
    pub common_imports: BTreeMap<String, Vec<String>>,
}

/// Base template for one construct kind plus the patterns it accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructTemplate {
    pub template: String,
    /// Template used for each method of a class body
    pub method_template: Option<String>,
    /// Leading keyword a pattern prefix is inserted before. When absent the
    /// prefix goes before the first non-whitespace token of the template.
    pub keyword: Option<String>,
    pub patterns: PatternSet,
}

/// What a single pattern contributes to a construct
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternModifier {
    pub imports: Vec<String>,
    pub decorators: Vec<String>,
    pub prefix: Option<String>,
    /// Replaces the declared return type; a `{}` marker wraps it instead
    pub return_annotation: Option<String>,
    pub attributes_enabled: bool,
    pub yield_enabled: bool,
}

/// Borrowed view of the template, keyword and pattern set a method renders with
#[derive(Debug, Clone, Copy)]
pub struct MethodScope<'a> {
    pub template: &'a str,
    pub keyword: Option<&'a str>,
    pub patterns: &'a PatternSet,
}

impl LanguageDefinition {
    /// Look up the template for a construct kind
    pub fn construct(&self, kind: &str) -> Result<&ConstructTemplate> {
        self.constructs
            .get(kind)
            .ok_or_else(|| GenerationError::UnknownConstructKind {
                language: self.id.clone(),
                kind: kind.to_string(),
            })
    }

    /// Resolve how methods nested in `owner` are rendered.
    ///
    /// The owner's own `method_template` wins over a standalone `method`
    /// kind. Patterns come from the `method` kind when one is defined,
    /// otherwise from the owner's pattern set.
    pub fn method_scope<'a>(&'a self, owner: &'a ConstructTemplate) -> Option<MethodScope<'a>> {
        let method_kind = self.constructs.get(METHOD_KIND);

        let template = match (&owner.method_template, method_kind) {
            (Some(template), _) => template.as_str(),
            (None, Some(method)) => method.template.as_str(),
            (None, None) => return None,
        };
        let keyword = method_kind.and_then(|m| m.keyword.as_deref());
        let patterns = method_kind.map_or(&owner.patterns, |m| &m.patterns);

        Some(MethodScope {
            template,
            keyword,
            patterns,
        })
    }

    /// Fetch a `common_imports` group by name
    pub fn import_group(&self, group: &str) -> Result<&[String]> {
        self.common_imports
            .get(group)
            .map(Vec::as_slice)
            .ok_or_else(|| GenerationError::UnknownImportGroup {
                language: self.id.clone(),
                group: group.to_string(),
            })
    }

    /// Construct kinds in stable order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.constructs.keys().map(String::as_str)
    }
}

impl ConstructTemplate {
    /// Look up a pattern, naming the construct kind in the error
    pub fn pattern(&self, kind: &str, name: &str) -> Result<&PatternModifier> {
        lookup_pattern(&self.patterns, kind, name)
    }
}

/// Resolve every name in `names` against `patterns`, failing on the first unknown one
pub fn resolve_patterns<'a>(
    patterns: &'a PatternSet,
    kind: &str,
    names: &[String],
) -> Result<Vec<&'a PatternModifier>> {
    names
        .iter()
        .map(|name| lookup_pattern(patterns, kind, name))
        .collect()
}

fn lookup_pattern<'a>(patterns: &'a PatternSet, kind: &str, name: &str) -> Result<&'a PatternModifier> {
    patterns
        .get(name)
        .ok_or_else(|| GenerationError::UnknownPattern {
            kind: kind.to_string(),
            pattern: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> LanguageDefinition {
        let mut patterns = PatternSet::new();
        patterns.insert(
            "dataclass".to_string(),
            PatternModifier {
                decorators: vec!["@dataclass".to_string()],
                attributes_enabled: true,
                ..Default::default()
            },
        );

        let mut constructs = BTreeMap::new();
        constructs.insert(
            "class".to_string(),
            ConstructTemplate {
                template: "class {name}:\n{methods}".to_string(),
                method_template: None,
                keyword: Some("class".to_string()),
                patterns,
            },
        );

        let mut common_imports = BTreeMap::new();
        common_imports.insert(
            "typing".to_string(),
            vec!["from typing import Any".to_string()],
        );

        LanguageDefinition {
            id: "python".to_string(),
            constructs,
            common_imports,
        }
    }

    #[test]
    fn test_unknown_construct_kind() {
        let definition = definition();
        let err = definition.construct("enum").unwrap_err();
        assert!(matches!(
            err,
            GenerationError::UnknownConstructKind { ref language, ref kind }
                if language == "python" && kind == "enum"
        ));
    }

    #[test]
    fn test_pattern_lookup() {
        let definition = definition();
        let class = definition.construct("class").unwrap();
        assert!(class.pattern("class", "dataclass").unwrap().attributes_enabled);

        let err = class.pattern("class", "nonexistent").unwrap_err();
        assert!(matches!(
            err,
            GenerationError::UnknownPattern { ref pattern, .. } if pattern == "nonexistent"
        ));
    }

    #[test]
    fn test_resolve_patterns_preserves_order_and_duplicates() {
        let definition = definition();
        let class = definition.construct("class").unwrap();
        let names = vec!["dataclass".to_string(), "dataclass".to_string()];
        let resolved = resolve_patterns(&class.patterns, "class", &names).unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_method_scope_requires_template() {
        let definition = definition();
        let class = definition.construct("class").unwrap();
        assert!(definition.method_scope(class).is_none());
    }

    #[test]
    fn test_method_scope_falls_back_to_method_kind() {
        let mut definition = definition();
        let mut method_patterns = PatternSet::new();
        method_patterns.insert("property".to_string(), PatternModifier::default());
        definition.constructs.insert(
            METHOD_KIND.to_string(),
            ConstructTemplate {
                template: "    def {name}(self):\n        {body}".to_string(),
                keyword: Some("def".to_string()),
                patterns: method_patterns,
                ..Default::default()
            },
        );

        let class = definition.construct("class").unwrap();
        let scope = definition.method_scope(class).unwrap();
        assert_eq!(scope.keyword, Some("def"));
        assert!(scope.patterns.contains_key("property"));
        assert!(!scope.patterns.contains_key("dataclass"));
    }

    #[test]
    fn test_method_scope_uses_owner_patterns_without_method_kind() {
        let mut definition = definition();
        if let Some(class) = definition.constructs.get_mut("class") {
            class.method_template = Some("    def {name}(self): ...".to_string());
        }
        let class = definition.construct("class").unwrap();
        let scope = definition.method_scope(class).unwrap();
        assert_eq!(scope.template, "    def {name}(self): ...");
        assert_eq!(scope.keyword, None);
        assert!(scope.patterns.contains_key("dataclass"));
    }

    #[test]
    fn test_import_group() {
        let definition = definition();
        assert_eq!(
            definition.import_group("typing").unwrap(),
            &["from typing import Any".to_string()]
        );
        assert!(matches!(
            definition.import_group("missing").unwrap_err(),
            GenerationError::UnknownImportGroup { .. }
        ));
    }
}
