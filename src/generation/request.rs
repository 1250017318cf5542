//! Construct requests - what a caller asks the generator to render

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GenerationError, Result};
use crate::generation::RenderContext;

/// Placeholder names the request supplies through dedicated fields
pub const RESERVED_FIELDS: &[&str] = &[
    "name",
    "params",
    "docstring",
    "body",
    "return_type",
    "init_body",
    "methods",
];

/// One generation call: a construct, its fields and the patterns applied to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructRequest {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_body: Option<String>,
    /// Values for template tokens outside the fixed vocabulary
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    /// Applied pattern names, in precedence order
    #[serde(default, alias = "applied_patterns")]
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodRequest>,
}

/// A method nested in a class request. Class patterns never apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    #[serde(default, alias = "applied_patterns")]
    pub patterns: Vec<String>,
}

impl ConstructRequest {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_init_body(mut self, init_body: impl Into<String>) -> Self {
        self.init_body = Some(init_body.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn with_method(mut self, method: MethodRequest) -> Self {
        self.methods.push(method);
        self
    }

    /// Shape checks that need no definition
    pub fn validate(&self) -> Result<()> {
        if self.kind.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "construct kind is required".to_string(),
            ));
        }
        validate_name_and_fields(&self.name, &self.fields)?;
        for method in &self.methods {
            validate_name_and_fields(&method.name, &method.fields)?;
        }
        Ok(())
    }

    /// Field values for the construct template (without `{methods}`)
    pub fn render_context(&self) -> RenderContext {
        let mut context = RenderContext::new();
        context.add_variable("name", self.name.as_str());
        let optional = [
            ("params", &self.params),
            ("docstring", &self.docstring),
            ("body", &self.body),
            ("return_type", &self.return_type),
            ("init_body", &self.init_body),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                context.add_variable(key, value.as_str());
            }
        }
        for (key, value) in &self.fields {
            context.add_variable(key.as_str(), value.as_str());
        }
        context
    }
}

impl MethodRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn render_context(&self) -> RenderContext {
        let mut context = RenderContext::new();
        context.add_variable("name", self.name.as_str());
        let optional = [
            ("params", &self.params),
            ("docstring", &self.docstring),
            ("body", &self.body),
            ("return_type", &self.return_type),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                context.add_variable(key, value.as_str());
            }
        }
        for (key, value) in &self.fields {
            context.add_variable(key.as_str(), value.as_str());
        }
        context
    }
}

fn validate_name_and_fields(name: &str, fields: &BTreeMap<String, String>) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GenerationError::InvalidRequest(
            "construct name is required".to_string(),
        ));
    }
    if let Some(reserved) = fields
        .keys()
        .find(|key| RESERVED_FIELDS.contains(&key.as_str()))
    {
        return Err(GenerationError::InvalidRequest(format!(
            "'{reserved}' must be set through its dedicated field, not `fields`"
        )));
    }
    Ok(())
}
