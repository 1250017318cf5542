//! Definition file parsing and validation
//!
//! One YAML document per target language. Top-level keys are construct kinds,
//! except for the reserved `language` and `common_imports` keys:
//!
//! ```yaml
//! language: python
//! function:
//!   template: "def {name}({params}) -> {return_type}:\n    {body}"
//!   keyword: def
//!   patterns:
//!     async_function:
//!       prefix: async
//!       imports: ["import asyncio"]
//! common_imports:
//!   typing: ["from typing import Any"]
//! ```

use serde::{Deserialize, Deserializer};
use serde_value::Value as SerdeValue;
use std::collections::BTreeMap;

use crate::definitions::{
    ConstructTemplate, LanguageDefinition, METHOD_KIND, PatternModifier, PatternSet,
};
use crate::error::{GenerationError, Result};
use crate::generation::template::ParsedTemplate;

/// Kinds with a fixed placeholder vocabulary that must name the construct
const NAMED_KINDS: &[&str] = &["class", "function", METHOD_KIND];

/// Internal representation matching the definition YAML structure
#[derive(Debug, Clone, Deserialize)]
struct DefinitionData {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    common_imports: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    constructs: BTreeMap<String, ConstructData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstructData {
    template: String,
    #[serde(default)]
    method_template: Option<String>,
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    patterns: BTreeMap<String, PatternData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternData {
    #[serde(default, deserialize_with = "deserialize_string_list")]
    imports: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    decorators: Vec<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default, alias = "returnAnnotation")]
    return_annotation: Option<String>,
    #[serde(default, alias = "attributesEnabled")]
    attributes_enabled: bool,
    #[serde(default, alias = "yieldEnabled")]
    yield_enabled: bool,
}

impl From<PatternData> for PatternModifier {
    fn from(data: PatternData) -> Self {
        Self {
            imports: data.imports,
            decorators: data.decorators,
            prefix: data.prefix.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            return_annotation: data.return_annotation,
            attributes_enabled: data.attributes_enabled,
            yield_enabled: data.yield_enabled,
        }
    }
}

impl DefinitionData {
    /// Convert the raw data into the domain model
    fn into_domain_model(self, id: &str) -> LanguageDefinition {
        let constructs = self
            .constructs
            .into_iter()
            .map(|(kind, data)| {
                let patterns: PatternSet = data
                    .patterns
                    .into_iter()
                    .map(|(name, pattern)| (name, pattern.into()))
                    .collect();
                let template = ConstructTemplate {
                    template: data.template,
                    method_template: data.method_template,
                    keyword: data.keyword.filter(|k| !k.trim().is_empty()),
                    patterns,
                };
                (kind, template)
            })
            .collect();

        LanguageDefinition {
            id: id.to_string(),
            constructs,
            common_imports: self.common_imports,
        }
    }
}

impl LanguageDefinition {
    /// Parse and validate a definition document for `id`.
    ///
    /// Any shape or placeholder problem is reported as `MalformedDefinition`.
    pub fn from_yaml(id: &str, content: &str) -> Result<Self> {
        let data: DefinitionData = serde_yaml::from_str(content)
            .map_err(|e| GenerationError::malformed(id, format!("failed to parse YAML: {e}")))?;

        if let Some(declared) = &data.language {
            if declared.as_str() != id {
                return Err(GenerationError::malformed(
                    id,
                    format!("document declares language '{declared}'"),
                ));
            }
        }

        let definition = data.into_domain_model(id);
        validate(&definition)?;
        Ok(definition)
    }
}

/// Check templates against the placeholder vocabulary
fn validate(definition: &LanguageDefinition) -> Result<()> {
    let malformed = |reason: String| GenerationError::malformed(&definition.id, reason);

    if definition.constructs.is_empty() {
        return Err(malformed("no construct kinds defined".to_string()));
    }

    for (kind, construct) in &definition.constructs {
        if construct.template.trim().is_empty() {
            return Err(malformed(format!("construct '{kind}' has an empty template")));
        }

        let parsed = ParsedTemplate::parse(&construct.template)
            .map_err(|e| malformed(format!("construct '{kind}': {e}")))?;

        if NAMED_KINDS.contains(&kind.as_str()) && !parsed.references("name") {
            return Err(malformed(format!(
                "construct '{kind}' template must reference {{name}}"
            )));
        }

        if let Some(keyword) = &construct.keyword {
            if !parsed.has_keyword(keyword) {
                return Err(malformed(format!(
                    "construct '{kind}' keyword '{keyword}' does not occur in its template"
                )));
            }
        }

        if let Some(method_template) = &construct.method_template {
            let method = ParsedTemplate::parse(method_template)
                .map_err(|e| malformed(format!("construct '{kind}' method_template: {e}")))?;
            if !method.references("name") {
                return Err(malformed(format!(
                    "construct '{kind}' method_template must reference {{name}}"
                )));
            }
        }

        for (name, pattern) in &construct.patterns {
            if pattern.imports.iter().any(|i| i.trim().is_empty()) {
                return Err(malformed(format!(
                    "pattern '{name}' of construct '{kind}' has a blank import"
                )));
            }
            if pattern.decorators.iter().any(|d| d.trim().is_empty()) {
                return Err(malformed(format!(
                    "pattern '{name}' of construct '{kind}' has a blank decorator"
                )));
            }
        }

        if parsed.references("methods") && definition.method_scope(construct).is_none() {
            return Err(malformed(format!(
                "construct '{kind}' references {{methods}} but has no method_template and no '{METHOD_KIND}' kind"
            )));
        }
    }

    for (group, imports) in &definition.common_imports {
        if imports.iter().any(|i| i.trim().is_empty()) {
            return Err(malformed(format!("import group '{group}' has a blank import")));
        }
    }

    Ok(())
}

/// Deserialize either a single string or a list of strings
fn deserialize_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => seq
            .into_iter()
            .map(|item| match item {
                SerdeValue::String(s) => Ok(s),
                _ => Err(serde::de::Error::custom(
                    "expected string or array of strings",
                )),
            })
            .collect(),
        _ => Err(serde::de::Error::custom(
            "expected string or array of strings",
        )),
    }
}
