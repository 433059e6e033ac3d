use crate::component::{ComponentInstance, TypeRegistry};

/// Order instances for rendering: ascending `(loadingPriority, zIndex)`,
/// so later entries visually and logically supersede earlier ones. Types
/// missing from the registry sort with priority 0. The sort is stable, so
/// full ties keep page order.
pub fn paint_order<'a>(
    instances: &'a [ComponentInstance],
    registry: &TypeRegistry,
) -> Vec<&'a ComponentInstance> {
    let mut ordered: Vec<&ComponentInstance> = instances.iter().collect();
    ordered.sort_by_key(|inst| {
        let priority = registry
            .get(&inst.component_type_id)
            .map(|t| t.loading_priority)
            .unwrap_or(0);
        (priority, inst.z_index)
    });
    ordered
}
