//! Effective-parameter resolution.
//!
//! Order: type defaults, overridden by instance parameters, then schema
//! gap-filling so every declared key is present. The resolver never
//! returns a missing entry for a schema-declared key.

use sitewright_model::{ComponentInstance, ComponentType, ParamValue, ParameterDecl, ParameterKind, ParameterMap};

/// Merge defaults, instance overrides, and schema-synthesized values.
pub fn resolve(component_type: &ComponentType, instance: &ComponentInstance) -> ParameterMap {
    let mut map = component_type
        .default_parameters
        .materialize(&component_type.id);

    // Instance wins on shallow merge
    for (key, value) in &instance.parameters {
        map.insert(key.clone(), value.clone());
    }

    // Schema-declared keys still missing (or null) get a usable value
    for decl in &component_type.parameters_schema {
        let needs_fill = matches!(map.get(&decl.name), None | Some(ParamValue::Null));
        if needs_fill {
            let value = decl
                .default_value
                .clone()
                .filter(|v| *v != ParamValue::Null)
                .unwrap_or_else(|| synthesize_default(decl));
            map.insert(decl.name.clone(), value);
        }
    }

    map
}

/// Type-appropriate default for a schema entry with no declared value.
fn synthesize_default(decl: &ParameterDecl) -> ParamValue {
    let name = decl.name.to_lowercase();
    match decl.kind {
        ParameterKind::Color => {
            if name.contains("background") || name.contains("bg") {
                ParamValue::from("#ffffff")
            } else {
                ParamValue::from("#333333")
            }
        }
        ParameterKind::Text => {
            if name.contains("title") || name.contains("heading") || name.contains("headline") {
                ParamValue::from("Welcome to Our Website")
            } else {
                ParamValue::from("Sample text")
            }
        }
        ParameterKind::Select => ParamValue::from(
            decl.options.first().cloned().unwrap_or_default(),
        ),
        ParameterKind::Boolean => ParamValue::Bool(false),
        ParameterKind::Number => ParamValue::from(0.0),
        ParameterKind::Image | ParameterKind::Object | ParameterKind::Array => {
            ParamValue::from("")
        }
    }
}
