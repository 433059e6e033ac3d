//! # Sitewright Renderer
//!
//! Turns component types + instances into render contexts.
//!
//! ## Degradation contract
//!
//! A broken canvas is worse than a partially-wrong one, so rendering never
//! aborts: a type without a template renders a visible diagnostic block,
//! malformed default-parameter JSON falls back to empty defaults, and
//! unresolvable expressions stay in the output as literal text. All of
//! these are logged; none propagate to the caller.
//!
//! ## Cache contract
//!
//! `render_fast` memoizes by `(type id, instance id, serialized
//! parameters)`. Entries are never evicted automatically: callers clear
//! per-instance entries on delete and per-type entries on type-definition
//! change. Same inputs return the same `Rc<RenderContext>`; any parameter
//! change is a guaranteed miss because the key embeds the serialized map.

pub mod cache;
pub mod dom;
pub mod engine;
pub mod resolver;

#[cfg(test)]
mod tests_engine;

pub use cache::{PerformanceReport, RenderCache};
pub use dom::{Mounter, ScriptRegistry, StyleRegistry};
pub use engine::RenderEngine;
pub use resolver::resolve;
