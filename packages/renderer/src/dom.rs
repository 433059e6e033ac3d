//! Per-instance style/script lifecycle.
//!
//! The registries own a map of instance id → injected element rather than
//! reaching into an ambient document, so mount/unmount is testable without
//! a DOM and a host can swap in whatever sink it likes. All removals are
//! idempotent: unmounting an id that was never mounted is a no-op.

use sitewright_model::{ComponentInstance, RenderContext};
use std::collections::HashMap;
use tracing::debug;

/// Injected `<style>` elements, keyed by instance id. Re-injecting for the
/// same id replaces the prior content in place.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    elements: HashMap<String, String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(&mut self, instance_id: &str, css: &str) {
        self.elements
            .insert(instance_id.to_string(), css.to_string());
    }

    pub fn remove(&mut self, instance_id: &str) -> bool {
        self.elements.remove(instance_id).is_some()
    }

    pub fn get(&self, instance_id: &str) -> Option<&str> {
        self.elements.get(instance_id).map(String::as_str)
    }

    pub fn contains(&self, instance_id: &str) -> bool {
        self.elements.contains_key(instance_id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Deterministic `<style>` markup for every registered instance.
    pub fn to_html(&self) -> String {
        let mut ids: Vec<&String> = self.elements.keys().collect();
        ids.sort();
        let mut out = String::new();
        for id in ids {
            out.push_str(&format!(
                "<style data-component-id=\"{}\">{}</style>\n",
                id, self.elements[id]
            ));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptHandle {
    pub source: String,
    /// Bumped on every injection: script content does not re-execute on
    /// text replacement, so injection models remove-and-recreate.
    pub generation: u64,
}

/// Injected `<script>` elements, keyed by instance id.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    elements: HashMap<String, ScriptHandle>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove-and-recreate: each call produces a fresh element generation.
    pub fn inject(&mut self, instance_id: &str, js: &str) {
        let generation = self
            .elements
            .remove(instance_id)
            .map(|h| h.generation + 1)
            .unwrap_or(1);
        self.elements.insert(
            instance_id.to_string(),
            ScriptHandle {
                source: js.to_string(),
                generation,
            },
        );
    }

    pub fn remove(&mut self, instance_id: &str) -> bool {
        self.elements.remove(instance_id).is_some()
    }

    pub fn get(&self, instance_id: &str) -> Option<&ScriptHandle> {
        self.elements.get(instance_id)
    }

    pub fn contains(&self, instance_id: &str) -> bool {
        self.elements.contains_key(instance_id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

/// Mounts rendered instances: one absolutely-positioned wrapper per
/// instance plus its scoped style/script registry entries.
#[derive(Debug, Default)]
pub struct Mounter {
    wrappers: HashMap<String, String>,
    styles: StyleRegistry,
    scripts: ScriptRegistry,
}

impl Mounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, instance: &ComponentInstance, context: &RenderContext) {
        let wrapper = wrapper_html(instance, &context.rendered_html);
        self.wrappers.insert(instance.id.clone(), wrapper);

        if context.applied_css.is_empty() {
            self.styles.remove(&instance.id);
        } else {
            self.styles.inject(&instance.id, &context.applied_css);
        }

        if context.applied_js.is_empty() {
            self.scripts.remove(&instance.id);
        } else {
            self.scripts.inject(&instance.id, &context.applied_js);
        }
        debug!(instance_id = %instance.id, "mounted");
    }

    /// Remove wrapper, style, and script for an id. Each removal is
    /// independent and tolerant of "already absent".
    pub fn unmount(&mut self, instance_id: &str) {
        let had_wrapper = self.wrappers.remove(instance_id).is_some();
        let had_style = self.styles.remove(instance_id);
        let had_script = self.scripts.remove(instance_id);
        debug!(instance_id, had_wrapper, had_style, had_script, "unmounted");
    }

    pub fn wrapper(&self, instance_id: &str) -> Option<&str> {
        self.wrappers.get(instance_id).map(String::as_str)
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn scripts(&self) -> &ScriptRegistry {
        &self.scripts
    }
}

fn wrapper_html(instance: &ComponentInstance, inner_html: &str) -> String {
    format!(
        "<div id=\"component-{id}\" data-component-id=\"{id}\" style=\"position: absolute; \
         left: {x}px; top: {y}px; width: {w}px; height: {h}px; z-index: {z};\">{inner}</div>",
        id = instance.id,
        x = instance.x_position,
        y = instance.y_position,
        w = instance.width,
        h = instance.height,
        z = instance.z_index,
        inner = inner_html,
    )
}
