//! # Sitewright Recovery
//!
//! Reverse direction of the render engine: given arbitrary page markup,
//! reconstruct structured component instances.
//!
//! Two detection strategies, tried in order:
//!
//! 1. **Explicit markers** — elements carrying `data-component-id` /
//!    `data-component-type` attributes, or `<!-- COMPONENT: {json} -->`
//!    comments. Position, size, and parameters are taken verbatim.
//! 2. **Heuristic pattern detection** — best-effort classification over
//!    semantic tags, class/id names, and content density. Its job is
//!    recovery, not correctness: the result is a confidence-free guess.
//!
//! The parser never fails: malformed HTML, empty pages, and pages that are
//! still unrendered templates (contain `{{…}}` placeholders) all yield an
//! empty list.
//!
//! The companion [`generator`] emits canonical, marker-carrying HTML for a
//! small set of known instance types; `parse ∘ generate` is exact for
//! those types' supported parameter keys and positions.

pub mod generator;
pub mod heuristics;
pub mod markers;
pub mod parser;

#[cfg(test)]
mod tests_roundtrip;

pub use generator::{generate, GeneratedComponent};
pub use parser::parse_page;

/// Convert a `data-param-*` attribute suffix back to a parameter key
/// (`background-color` → `backgroundColor`).
pub(crate) fn kebab_to_camel(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper_next = false;
    for c in kebab.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Inverse of [`kebab_to_camel`]: `backgroundColor` → `background-color`.
pub(crate) fn camel_to_kebab(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
