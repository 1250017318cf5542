//! Placeholder tokenization for construct templates
//!
//! A placeholder is `{identifier}` or `{identifier|filter}`. Any other brace
//! (a TypeScript block, a Python dict literal, `{ Injectable }`) is plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{GenerationError, Result};
use crate::generation::utils::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(?:\|([A-Za-z0-9_]*))?\}")
        .expect("placeholder pattern is a valid regex")
});

/// Case conversion applied to a placeholder value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFilter {
    Snake,
    Camel,
    Pascal,
    Kebab,
}

impl CaseFilter {
    pub fn apply(&self, value: &str) -> String {
        match self {
            CaseFilter::Snake => to_snake_case(value),
            CaseFilter::Camel => to_camel_case(value),
            CaseFilter::Pascal => to_pascal_case(value),
            CaseFilter::Kebab => to_kebab_case(value),
        }
    }
}

impl FromStr for CaseFilter {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "snakecase" => Ok(CaseFilter::Snake),
            "camelcase" => Ok(CaseFilter::Camel),
            "pascalcase" => Ok(CaseFilter::Pascal),
            "kebabcase" => Ok(CaseFilter::Kebab),
            other => Err(GenerationError::UnknownFilter {
                filter: other.to_string(),
            }),
        }
    }
}

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(Cow<'a, str>),
    Placeholder {
        name: &'a str,
        filter: Option<CaseFilter>,
    },
}

/// A template split into literal text and placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate<'a> {
    pub segments: Vec<Segment<'a>>,
}

impl<'a> ParsedTemplate<'a> {
    /// Split `source` into segments, validating every filter
    pub fn parse(source: &'a str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for captures in PLACEHOLDER_RE.captures_iter(source) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                segments.push(Segment::Text(Cow::Borrowed(&source[cursor..whole.start()])));
            }
            let filter = captures
                .get(2)
                .map(|m| m.as_str().parse::<CaseFilter>())
                .transpose()?;
            segments.push(Segment::Placeholder {
                name: name.as_str(),
                filter,
            });
            cursor = whole.end();
        }

        if cursor < source.len() {
            segments.push(Segment::Text(Cow::Borrowed(&source[cursor..])));
        }

        Ok(Self { segments })
    }

    /// Distinct placeholder names referenced by the template
    pub fn placeholder_names(&self) -> BTreeSet<&'a str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder { name, .. } => Some(*name),
                Segment::Text(_) => None,
            })
            .collect()
    }

    pub fn references(&self, placeholder: &str) -> bool {
        self.segments.iter().any(
            |segment| matches!(segment, Segment::Placeholder { name, .. } if *name == placeholder),
        )
    }

    /// Whether `keyword` occurs as a whole word in the literal text
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.segments.iter().any(|segment| match segment {
            Segment::Text(text) => find_word(text, keyword).is_some(),
            Segment::Placeholder { .. } => false,
        })
    }

    /// Insert `prefix` and a space before the leading keyword.
    ///
    /// With a keyword, the first whole-word occurrence in literal text is used.
    /// Without one (or when it never occurs), the prefix goes before the first
    /// non-whitespace token, which may be a placeholder.
    pub fn insert_prefix(&mut self, keyword: Option<&str>, prefix: &str) {
        if prefix.is_empty() {
            return;
        }

        if let Some(keyword) = keyword {
            for segment in self.segments.iter_mut() {
                if let Segment::Text(text) = segment {
                    if let Some(offset) = find_word(text, keyword) {
                        *text = Cow::Owned(splice(text, offset, prefix));
                        return;
                    }
                }
            }
        }

        let first_token = self.segments.iter().position(|segment| match segment {
            Segment::Text(text) => !text.trim().is_empty(),
            Segment::Placeholder { .. } => true,
        });
        let Some(index) = first_token else {
            // Whitespace-only template
            self.segments
                .push(Segment::Text(Cow::Owned(format!("{prefix} "))));
            return;
        };

        if let Segment::Text(text) = &mut self.segments[index] {
            let offset = text.find(|c: char| !c.is_whitespace()).unwrap_or(0);
            *text = Cow::Owned(splice(text, offset, prefix));
            return;
        }
        self.segments
            .insert(index, Segment::Text(Cow::Owned(format!("{prefix} "))));
    }
}

/// Whether `value` contains a raw placeholder token for one of `names`
pub fn contains_placeholder_token(value: &str, names: &BTreeSet<&str>) -> bool {
    PLACEHOLDER_RE
        .captures_iter(value)
        .filter_map(|captures| captures.get(1))
        .any(|name| names.contains(name.as_str()))
}

fn splice(text: &str, offset: usize, prefix: &str) -> String {
    let mut spliced = String::with_capacity(text.len() + prefix.len() + 1);
    spliced.push_str(&text[..offset]);
    spliced.push_str(prefix);
    spliced.push(' ');
    spliced.push_str(&text[offset..]);
    spliced
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    text.match_indices(word).map(|(i, _)| i).find(|&i| {
        let before_ok = text[..i].chars().next_back().is_none_or(|c| !is_ident_char(c));
        let after_ok = text[i + word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_char(c));
        before_ok && after_ok
    })
}
