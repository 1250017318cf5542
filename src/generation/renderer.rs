//! Template rendering
//!
//! Single-pass substitution: each placeholder is replaced once and the
//! substituted text is never scanned again. A caller value that contains a
//! raw token for one of the template's own placeholders is rejected instead
//! of being expanded, which keeps rendering linear.

use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::generation::template::{ParsedTemplate, Segment, contains_placeholder_token};
use crate::generation::{CompositeEffect, RenderContext};

/// Marker in a return annotation that is replaced by the declared return type
pub const RETURN_TYPE_MARKER: &str = "{}";

const RETURN_TYPE: &str = "return_type";

/// Render `template` with the request fields in `context` and the composed `effect`.
///
/// `keyword` names the token the effect's prefix is inserted before.
pub fn render(
    template: &str,
    keyword: Option<&str>,
    context: &RenderContext,
    effect: &CompositeEffect,
) -> Result<String> {
    let mut parsed = ParsedTemplate::parse(template)?;
    let names = parsed.placeholder_names();

    // Resolve every referenced value up front so a failure leaves nothing behind
    let mut values: Vec<(&str, Cow<'_, str>)> = Vec::with_capacity(names.len());
    for &name in &names {
        let value = resolve(name, context, effect)?;
        if !context.is_rendered(name) && contains_placeholder_token(&value, &names) {
            return Err(GenerationError::RecursiveTemplateError {
                field: name.to_string(),
            });
        }
        values.push((name, value));
    }

    if let Some(prefix) = effect.prefix.as_deref() {
        parsed.insert_prefix(keyword, prefix);
    }

    let mut output = String::with_capacity(template.len() * 2);
    for segment in &parsed.segments {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Placeholder { name, filter } => {
                let value = values
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.as_ref())
                    .ok_or_else(|| GenerationError::missing_field(*name))?;
                match filter {
                    Some(filter) => output.push_str(&filter.apply(value)),
                    None => output.push_str(value),
                }
            }
        }
    }

    debug!(
        "Rendered template with {} placeholders into {} bytes",
        names.len(),
        output.len()
    );
    Ok(output)
}

/// Names of all placeholders in `template`
pub fn placeholders(template: &str) -> Result<BTreeSet<String>> {
    Ok(ParsedTemplate::parse(template)?
        .placeholder_names()
        .into_iter()
        .map(str::to_string)
        .collect())
}

fn resolve<'a>(
    name: &str,
    context: &'a RenderContext,
    effect: &'a CompositeEffect,
) -> Result<Cow<'a, str>> {
    if name == RETURN_TYPE {
        if let Some(annotation) = effect.return_annotation.as_deref() {
            return resolve_annotation(annotation, context.get(RETURN_TYPE));
        }
    }

    context
        .get(name)
        .map(Cow::Borrowed)
        .ok_or_else(|| GenerationError::missing_field(name))
}

/// Replace the declared return type, or wrap it when the annotation has a marker
fn resolve_annotation<'a>(annotation: &'a str, declared: Option<&str>) -> Result<Cow<'a, str>> {
    if !annotation.contains(RETURN_TYPE_MARKER) {
        return Ok(Cow::Borrowed(annotation));
    }
    let declared = declared.ok_or_else(|| GenerationError::missing_field(RETURN_TYPE))?;
    Ok(Cow::Owned(annotation.replace(RETURN_TYPE_MARKER, declared)))
}
