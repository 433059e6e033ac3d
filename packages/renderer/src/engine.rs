//! Render engine: parameter resolution + template substitution + caching.

use crate::cache::{PerformanceReport, RenderCache};
use crate::resolver::resolve;
use sitewright_model::{paint_order, ComponentInstance, ComponentType, RenderContext, TypeRegistry};
use sitewright_template::render;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
pub struct RenderEngine {
    cache: RenderCache,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one instance, bypassing the cache.
    ///
    /// Never fails: a type without an HTML template produces a visible
    /// diagnostic placeholder naming the component instead of empty output.
    #[instrument(skip(self, component_type, instance), fields(type_id = %component_type.id, instance_id = %instance.id))]
    pub fn render(
        &self,
        component_type: &ComponentType,
        instance: &ComponentInstance,
    ) -> RenderContext {
        let mut parameters = resolve(component_type, instance);
        // Templates scope CSS selectors per instance with `{{id}}`
        parameters
            .entry("id".to_string())
            .or_insert_with(|| instance.id.clone().into());

        let rendered_html = if component_type.has_template() {
            render(&component_type.html_template, &parameters)
        } else {
            warn!("component type has no HTML template - rendering diagnostic placeholder");
            missing_template_block(&component_type.name)
        };

        let applied_css = if component_type.css_template.is_empty() {
            String::new()
        } else {
            render(&component_type.css_template, &parameters)
        };

        let applied_js = if component_type.js_template.is_empty() {
            String::new()
        } else {
            render(&component_type.js_template, &parameters)
        };

        debug!(
            html_len = rendered_html.len(),
            css_len = applied_css.len(),
            "render complete"
        );

        RenderContext {
            instance: instance.clone(),
            component_type_id: component_type.id.clone(),
            rendered_html,
            applied_css,
            applied_js,
            parameters,
        }
    }

    /// Memoized render. A hit returns a clone of the cached `Rc`; a forced
    /// refresh recomputes and replaces the entry.
    pub fn render_fast(
        &mut self,
        component_type: &ComponentType,
        instance: &ComponentInstance,
        force_refresh: bool,
    ) -> Rc<RenderContext> {
        let key = RenderCache::key(&component_type.id, &instance.id, &instance.parameters);

        if !force_refresh {
            if let Some(cached) = self.cache.get(&key) {
                debug!(instance_id = %instance.id, "cache hit");
                return cached;
            }
        }

        let started = Instant::now();
        let context = Rc::new(self.render(component_type, instance));
        self.cache.insert(key, Rc::clone(&context), started.elapsed());
        context
    }

    /// Render a whole page in ascending `(loadingPriority, zIndex)` order.
    /// Instances whose type is missing from the registry are skipped with a
    /// warning.
    #[instrument(skip(self, instances, registry), fields(count = instances.len()))]
    pub fn render_page(
        &mut self,
        instances: &[ComponentInstance],
        registry: &TypeRegistry,
    ) -> Vec<Rc<RenderContext>> {
        let ordered = paint_order(instances, registry);
        let mut contexts = Vec::with_capacity(ordered.len());
        for instance in ordered {
            match registry.get(&instance.component_type_id) {
                Some(component_type) => {
                    contexts.push(self.render_fast(component_type, instance, false));
                }
                None => {
                    warn!(
                        instance_id = %instance.id,
                        type_id = %instance.component_type_id,
                        "unknown component type - skipping instance"
                    );
                }
            }
        }
        info!(rendered = contexts.len(), "page render complete");
        contexts
    }

    /// Clear cached renders: for one type's entries, or everything.
    pub fn clear_cache(&mut self, type_id: Option<&str>) {
        self.cache.clear(type_id);
    }

    /// Drop cached renders for a deleted instance.
    pub fn evict_instance(&mut self, type_id: &str, instance_id: &str) {
        self.cache.evict_instance(type_id, instance_id);
    }

    pub fn performance_report(&self) -> PerformanceReport {
        self.cache.report()
    }
}

/// Visible, styled diagnostic block for a type with no HTML template.
fn missing_template_block(component_name: &str) -> String {
    format!(
        "<div class=\"sw-missing-template\" style=\"border: 2px dashed #e74c3c; \
         background: #fdf0ef; color: #c0392b; padding: 16px; font-family: sans-serif;\">\
         Component &quot;{}&quot; has no template</div>",
        escape_html(component_name)
    )
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
