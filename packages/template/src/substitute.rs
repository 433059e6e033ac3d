//! Two-pass template substitution.
//!
//! Substitution is total: it always returns a string and never raises.
//! Expressions that cannot be resolved are left in place as their literal
//! `{{…}}` text so a template author can spot them in the rendered output.

use crate::error::TemplateError;
use crate::eval::evaluate;
use crate::images::{is_image_param, resolve_image};
use crate::parser::parse_expression;
use sitewright_model::{ParamValue, ParameterMap};
use tracing::debug;

/// Render a template against resolved parameters.
pub fn render(template: &str, parameters: &ParameterMap) -> String {
    let pass1 = substitute_literal_tokens(template, parameters);
    substitute_expressions(&pass1, parameters)
}

/// Pass 1: replace every `{{key}}` whose key is literally present in the
/// parameter map. This path handles keys the expression lexer cannot
/// (dashes, dots stored flat) and applies the image fallback.
fn substitute_literal_tokens(template: &str, parameters: &ParameterMap) -> String {
    let mut output = template.to_string();
    for (key, value) in parameters {
        let token = format!("{{{{{}}}}}", key);
        if output.contains(&token) {
            output = output.replace(&token, &stringify_param(key, value));
        }
    }
    output
}

/// Pass 2: evaluate every remaining `{{expr}}`.
fn substitute_expressions(template: &str, parameters: &ParameterMap) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(close) = after_open.find("}}") else {
            // Unterminated token: keep the tail verbatim
            break;
        };
        result.push_str(&rest[..start]);
        let inner = &after_open[..close];
        let token = &rest[start..start + 2 + close + 2];
        result.push_str(&substitute_one(inner, token, parameters));
        rest = &after_open[close + 2..];
    }
    result.push_str(rest);
    result
}

fn substitute_one(inner: &str, original_token: &str, parameters: &ParameterMap) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return original_token.to_string();
    }

    // Direct key lookup first - `{{ key }}` with surrounding whitespace
    // lands here rather than in pass 1.
    if let Some(value) = parameters.get(trimmed) {
        return stringify_param(trimmed, value);
    }

    let expr = match parse_expression(trimmed) {
        Ok(expr) => expr,
        Err(e) => {
            debug!(expression = trimmed, error = %e, "unparseable template expression - emitting literal text");
            return original_token.to_string();
        }
    };

    match evaluate(&expr, parameters) {
        Ok(value) => value.to_string(),
        Err(e @ TemplateError::KeyNotFound { .. }) => {
            debug!(expression = trimmed, error = %e, "unresolvable template expression - emitting literal text");
            original_token.to_string()
        }
        Err(e) => {
            debug!(expression = trimmed, error = %e, "template expression failed - emitting literal text");
            original_token.to_string()
        }
    }
}

fn stringify_param(key: &str, value: &ParamValue) -> String {
    if is_image_param(key, value) {
        resolve_image(key, value)
    } else {
        value.to_string()
    }
}
