//! Generation orchestration - runs one request through the pipeline
//!
//! Validate -> Compose -> Render(construct) -> Render(methods)* -> Assemble.
//! Every pattern name (construct and method) is resolved before anything is
//! rendered, and nothing is returned unless every stage succeeds.

use std::sync::Arc;
use tracing::debug;

use crate::definitions::{
    LanguageDefinition, METHOD_KIND, MethodScope, PatternModifier, PatternRegistry,
    resolve_patterns,
};
use crate::error::{GenerationError, Result};
use crate::generation::template::ParsedTemplate;
use crate::generation::{ConstructRequest, RenderedOutput, assemble, compose, render};

/// Placeholder that receives the joined method bodies of a class
const METHODS_FIELD: &str = "methods";

/// Generates code for requests against definitions held by a registry
#[derive(Clone)]
pub struct GenerationOrchestrator {
    registry: Arc<PatternRegistry>,
}

impl GenerationOrchestrator {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Render `request` for `language_id`
    pub fn generate(&self, language_id: &str, request: &ConstructRequest) -> Result<RenderedOutput> {
        self.generate_with_imports(language_id, request, &[])
    }

    /// Render `request`, placing `extra_imports` ahead of pattern imports
    pub fn generate_with_imports(
        &self,
        language_id: &str,
        request: &ConstructRequest,
        extra_imports: &[String],
    ) -> Result<RenderedOutput> {
        let definition = self.registry.load(language_id)?;
        generate_from_definition(&definition, request, extra_imports)
    }

    /// Imports of a `common_imports` group, for callers that opt in to one
    pub fn common_imports(&self, language_id: &str, group: &str) -> Result<Vec<String>> {
        let definition = self.registry.load(language_id)?;
        Ok(definition.import_group(group)?.to_vec())
    }
}

impl Default for GenerationOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(PatternRegistry::default()))
    }
}

/// Run the pipeline against a definition without any registry
pub fn generate_from_definition(
    definition: &LanguageDefinition,
    request: &ConstructRequest,
    extra_imports: &[String],
) -> Result<RenderedOutput> {
    // 1. Validate
    request.validate()?;
    let construct = definition.construct(&request.kind)?;
    let patterns = resolve_patterns(&construct.patterns, &request.kind, &request.patterns)?;

    let methods = resolve_methods(definition, request)?;

    debug!(
        "Generating {} '{}' for '{}' with {} patterns and {} methods",
        request.kind,
        request.name,
        definition.id,
        patterns.len(),
        request.methods.len()
    );

    // 2. Compose
    let mut effect = compose(patterns, extra_imports);

    // 3. Render methods, each with its own effect
    let mut rendered_methods = Vec::with_capacity(request.methods.len());
    if let Some((scope, resolved)) = &methods {
        for (method, method_patterns) in request.methods.iter().zip(resolved) {
            let method_effect = compose(method_patterns.iter().copied(), &[]);
            let body = render(
                scope.template,
                scope.keyword,
                &method.render_context(),
                &method_effect,
            )?;
            effect.merge_imports(&method_effect.imports);
            rendered_methods.push(decorate_method(&body, &method_effect.decorators));
        }
    }

    // 4. Render the construct
    let mut context = request.render_context();
    context.add_rendered(METHODS_FIELD, rendered_methods.join("\n\n"));
    let body = render(
        &construct.template,
        construct.keyword.as_deref(),
        &context,
        &effect,
    )?;

    if effect.has_conflicting_flags() {
        debug!(
            "'{}' enables both attribute and generator modes; body shape is left to the caller",
            request.name
        );
    }

    // 5. Assemble. An empty trailing slot such as `{methods}` leaves no blank tail.
    let text = assemble(
        &effect.imports.render_block(),
        &effect.decorators.join("\n"),
        body.trim_end(),
    );

    Ok(RenderedOutput {
        text,
        imports: effect.imports.into_vec(),
        decorators: effect.decorators,
        attributes_enabled: effect.attributes_enabled,
        yield_enabled: effect.yield_enabled,
    })
}

type ResolvedMethods<'a> = (MethodScope<'a>, Vec<Vec<&'a PatternModifier>>);

/// Resolve the method scope and every method's patterns up front
fn resolve_methods<'a>(
    definition: &'a LanguageDefinition,
    request: &ConstructRequest,
) -> Result<Option<ResolvedMethods<'a>>> {
    if request.methods.is_empty() {
        return Ok(None);
    }

    let rejected = || {
        GenerationError::InvalidRequest(format!(
            "construct kind '{}' of '{}' does not accept methods",
            request.kind, definition.id
        ))
    };

    let construct = definition.construct(&request.kind)?;
    if !ParsedTemplate::parse(&construct.template)?.references(METHODS_FIELD) {
        return Err(rejected());
    }
    let scope = definition.method_scope(construct).ok_or_else(rejected)?;

    let resolved = request
        .methods
        .iter()
        .map(|method| resolve_patterns(scope.patterns, METHOD_KIND, &method.patterns))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some((scope, resolved)))
}

/// Put method decorators directly above the first non-blank line of the
/// method, at that line's indentation
fn decorate_method(body: &str, decorators: &[String]) -> String {
    if decorators.is_empty() {
        return body.to_string();
    }

    let mut line_start = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        line_start += line.len();
    }
    let (leading, rest) = body.split_at(line_start);
    let indent: String = rest
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let mut decorated = String::with_capacity(body.len() + decorators.len() * 16);
    decorated.push_str(leading);
    for decorator in decorators {
        decorated.push_str(&indent);
        decorated.push_str(decorator);
        decorated.push('\n');
    }
    decorated.push_str(rest);
    decorated
}
