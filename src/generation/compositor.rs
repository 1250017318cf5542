//! Pattern composition
//!
//! Folds the modifiers of an ordered pattern list into one `CompositeEffect`:
//!
//! - imports: append, deduplicated, first seen wins
//! - decorators: append, never deduplicated
//! - prefix: space-joined in pattern order
//! - return annotation: overwritten, so the last pattern that sets one wins
//! - structural flags: logical OR

use tracing::debug;

use crate::definitions::PatternModifier;
use crate::generation::imports::ImportSet;

/// Merged effect of all patterns applied to one construct or method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeEffect {
    pub imports: ImportSet,
    pub decorators: Vec<String>,
    pub prefix: Option<String>,
    pub return_annotation: Option<String>,
    pub attributes_enabled: bool,
    pub yield_enabled: bool,
}

impl CompositeEffect {
    /// Fold one more modifier into the effect
    pub fn apply(&mut self, modifier: &PatternModifier) {
        self.imports.extend(&modifier.imports);
        self.decorators.extend(
            modifier
                .decorators
                .iter()
                .filter(|decorator| !decorator.trim().is_empty())
                .cloned(),
        );

        if let Some(fragment) = modifier.prefix.as_deref().map(str::trim) {
            if !fragment.is_empty() {
                self.prefix = Some(match self.prefix.take() {
                    Some(existing) => format!("{existing} {fragment}"),
                    None => fragment.to_string(),
                });
            }
        }

        if let Some(annotation) = &modifier.return_annotation {
            self.return_annotation = Some(annotation.clone());
        }

        self.attributes_enabled |= modifier.attributes_enabled;
        self.yield_enabled |= modifier.yield_enabled;
    }

    /// Pull another effect's imports into this one's scope
    pub fn merge_imports(&mut self, other: &ImportSet) {
        self.imports.extend(other.iter());
    }

    /// Both structural modes requested at once. The engine does not pick a
    /// body shape for this; callers decide.
    pub fn has_conflicting_flags(&self) -> bool {
        self.attributes_enabled && self.yield_enabled
    }
}

/// Compose `patterns` in order. `extra_imports` lead the import list and go
/// through the same dedup rule.
pub fn compose<'a, I>(patterns: I, extra_imports: &[String]) -> CompositeEffect
where
    I: IntoIterator<Item = &'a PatternModifier>,
{
    let mut effect = CompositeEffect::default();
    effect.imports.extend(extra_imports);

    let mut count = 0usize;
    for modifier in patterns {
        effect.apply(modifier);
        count += 1;
    }

    debug!(
        "Composed {} patterns: {} imports, {} decorators",
        count,
        effect.imports.len(),
        effect.decorators.len()
    );
    effect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier() -> PatternModifier {
        PatternModifier::default()
    }

    #[test]
    fn test_empty_composition() {
        let effect = compose(std::iter::empty(), &[]);
        assert_eq!(effect, CompositeEffect::default());
    }

    #[test]
    fn test_blank_extra_imports_are_skipped() {
        let extra = vec![String::new(), "  ".to_string(), "import os".to_string()];
        let effect = compose(std::iter::empty(), &extra);
        assert_eq!(effect.imports.iter().collect::<Vec<_>>(), vec!["import os"]);
    }

    #[test]
    fn test_blank_decorators_are_skipped() {
        let traced = PatternModifier {
            decorators: vec![String::new(), "@a".to_string()],
            ..modifier()
        };
        let effect = compose([&traced], &[]);
        assert_eq!(effect.decorators, vec!["@a"]);
    }

    #[test]
    fn test_decorators_keep_order_and_duplicates() {
        let a = PatternModifier {
            decorators: vec!["@a".to_string()],
            ..modifier()
        };
        let b = PatternModifier {
            decorators: vec!["@b".to_string()],
            ..modifier()
        };

        let effect = compose([&a, &b], &[]);
        assert_eq!(effect.decorators, vec!["@a", "@b"]);

        let effect = compose([&a, &b, &a], &[]);
        assert_eq!(effect.decorators, vec!["@a", "@b", "@a"]);
    }

    #[test]
    fn test_imports_dedup_across_repeated_patterns() {
        let async_fn = PatternModifier {
            imports: vec!["import asyncio".to_string(), "import typing".to_string()],
            ..modifier()
        };
        let other = PatternModifier {
            imports: vec!["import typing".to_string(), "import os".to_string()],
            ..modifier()
        };

        let effect = compose([&async_fn, &other, &async_fn], &[]);
        assert_eq!(
            effect.imports.into_vec(),
            vec!["import asyncio", "import typing", "import os"]
        );
    }

    #[test]
    fn test_extra_imports_lead() {
        let async_fn = PatternModifier {
            imports: vec!["import asyncio".to_string()],
            ..modifier()
        };
        let extra = vec!["from typing import Any".to_string(), "import asyncio".to_string()];

        let effect = compose([&async_fn], &extra);
        assert_eq!(
            effect.imports.into_vec(),
            vec!["from typing import Any", "import asyncio"]
        );
    }

    #[test]
    fn test_return_annotation_last_wins() {
        let foo = PatternModifier {
            return_annotation: Some("Foo".to_string()),
            ..modifier()
        };
        let bar = PatternModifier {
            return_annotation: Some("Bar".to_string()),
            ..modifier()
        };
        let silent = modifier();

        assert_eq!(
            compose([&foo, &bar], &[]).return_annotation.as_deref(),
            Some("Bar")
        );
        assert_eq!(
            compose([&bar, &foo], &[]).return_annotation.as_deref(),
            Some("Foo")
        );
        assert_eq!(
            compose([&foo, &silent], &[]).return_annotation.as_deref(),
            Some("Foo")
        );
    }

    #[test]
    fn test_prefix_concatenates_in_order() {
        let export = PatternModifier {
            prefix: Some("export".to_string()),
            ..modifier()
        };
        let asynchronous = PatternModifier {
            prefix: Some("async".to_string()),
            ..modifier()
        };

        assert_eq!(
            compose([&export, &modifier(), &asynchronous], &[])
                .prefix
                .as_deref(),
            Some("export async")
        );
        assert_eq!(compose([&modifier()], &[]).prefix, None);
    }

    #[test]
    fn test_flags_are_ored_regardless_of_order() {
        let attrs = PatternModifier {
            attributes_enabled: true,
            ..modifier()
        };
        let gen_ = PatternModifier {
            yield_enabled: true,
            ..modifier()
        };

        let forward = compose([&attrs, &gen_], &[]);
        let backward = compose([&gen_, &attrs], &[]);
        assert!(forward.attributes_enabled && forward.yield_enabled);
        assert_eq!(forward.attributes_enabled, backward.attributes_enabled);
        assert_eq!(forward.yield_enabled, backward.yield_enabled);
        assert!(forward.has_conflicting_flags());
    }

    #[test]
    fn test_merge_imports() {
        let mut effect = compose(std::iter::empty(), &["import os".to_string()]);
        let mut other = ImportSet::new();
        other.extend(["import os", "import sys"]);
        effect.merge_imports(&other);
        assert_eq!(effect.imports.into_vec(), vec!["import os", "import sys"]);
    }
}
