//! Unbounded render memo cache.
//!
//! The key embeds the serialized instance parameters, so any mutation is a
//! guaranteed miss. No automatic eviction: hosts watch `cache_size` in the
//! performance report and clear explicitly.

use serde::Serialize;
use sitewright_model::{ParameterMap, RenderContext};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub total_renders: u64,
    pub cache_hits: u64,
    /// Accumulated render time in milliseconds
    pub render_time: f64,
    pub cache_size: usize,
    pub average_render_time: f64,
}

#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<String, Rc<RenderContext>>,
    total_renders: u64,
    cache_hits: u64,
    render_time: Duration,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(type_id: &str, instance_id: &str, parameters: &ParameterMap) -> String {
        let serialized = serde_json::to_string(parameters).unwrap_or_default();
        format!("{}::{}::{}", type_id, instance_id, serialized)
    }

    pub fn get(&mut self, key: &str) -> Option<Rc<RenderContext>> {
        let hit = self.entries.get(key).cloned();
        if hit.is_some() {
            self.cache_hits += 1;
        }
        hit
    }

    pub fn insert(&mut self, key: String, context: Rc<RenderContext>, elapsed: Duration) {
        self.total_renders += 1;
        self.render_time += elapsed;
        self.entries.insert(key, context);
    }

    /// Clear everything, or only entries belonging to one type.
    pub fn clear(&mut self, type_id: Option<&str>) {
        match type_id {
            Some(id) => {
                let prefix = format!("{}::", id);
                self.entries.retain(|key, _| !key.starts_with(&prefix));
            }
            None => self.entries.clear(),
        }
    }

    /// Drop every entry for one instance id, across parameter variants.
    pub fn evict_instance(&mut self, type_id: &str, instance_id: &str) {
        let prefix = format!("{}::{}::", type_id, instance_id);
        self.entries.retain(|key, _| !key.starts_with(&prefix));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn report(&self) -> PerformanceReport {
        let render_time = self.render_time.as_secs_f64() * 1000.0;
        let average_render_time = if self.total_renders > 0 {
            render_time / self.total_renders as f64
        } else {
            0.0
        };
        PerformanceReport {
            total_renders: self.total_renders,
            cache_hits: self.cache_hits,
            render_time,
            cache_size: self.entries.len(),
            average_render_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewright_model::{ComponentInstance, ParameterMap};

    fn dummy_context(instance_id: &str) -> Rc<RenderContext> {
        Rc::new(RenderContext {
            instance: ComponentInstance::new(instance_id, "t"),
            component_type_id: "t".to_string(),
            rendered_html: "<div></div>".to_string(),
            applied_css: String::new(),
            applied_js: String::new(),
            parameters: ParameterMap::new(),
        })
    }

    #[test]
    fn test_key_changes_with_parameters() {
        let empty = ParameterMap::new();
        let mut with_param = ParameterMap::new();
        with_param.insert("a".into(), "1".into());
        assert_ne!(
            RenderCache::key("t", "i", &empty),
            RenderCache::key("t", "i", &with_param)
        );
    }

    #[test]
    fn test_clear_by_type_only_removes_prefixed_entries() {
        let mut cache = RenderCache::new();
        let params = ParameterMap::new();
        cache.insert(
            RenderCache::key("hero", "a", &params),
            dummy_context("a"),
            Duration::ZERO,
        );
        cache.insert(
            RenderCache::key("card", "b", &params),
            dummy_context("b"),
            Duration::ZERO,
        );
        cache.clear(Some("hero"));
        assert_eq!(cache.len(), 1);
        cache.clear(None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_report_counters() {
        let mut cache = RenderCache::new();
        let params = ParameterMap::new();
        let key = RenderCache::key("t", "i", &params);
        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), dummy_context("i"), Duration::from_millis(2));
        assert!(cache.get(&key).is_some());
        let report = cache.report();
        assert_eq!(report.total_renders, 1);
        assert_eq!(report.cache_hits, 1);
        assert_eq!(report.cache_size, 1);
        assert!(report.average_render_time > 0.0);
    }
}
