use crate::value::{ParamValue, ParameterMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Declared parameter kind in a component type's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Text,
    Number,
    Boolean,
    Color,
    Select,
    Image,
    Object,
    Array,
}

/// One entry of a component type's parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub default_value: Option<ParamValue>,
    #[serde(default)]
    pub required: bool,
    /// Declared choices for `select` parameters.
    #[serde(default)]
    pub options: Vec<String>,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: String::new(),
            default_value: None,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_default(mut self, value: ParamValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Default parameters as delivered by the catalog API: either an inline
/// map or a raw JSON string that still needs parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultParameters {
    Map(ParameterMap),
    Raw(String),
}

impl Default for DefaultParameters {
    fn default() -> Self {
        DefaultParameters::Map(ParameterMap::new())
    }
}

impl DefaultParameters {
    /// Produce the usable map. A malformed raw string degrades to an empty
    /// map — logged, never surfaced, so a bad catalog row cannot take the
    /// canvas down.
    pub fn materialize(&self, type_id: &str) -> ParameterMap {
        match self {
            DefaultParameters::Map(map) => map.clone(),
            DefaultParameters::Raw(raw) => match serde_json::from_str(raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(type_id, error = %e, "malformed defaultParameters JSON - using empty defaults");
                    ParameterMap::new()
                }
            },
        }
    }
}

/// A reusable template + parameter schema for a kind of page element.
/// Immutable per version; owned by the [`TypeRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Template with `{{token}}` placeholders and embedded expressions.
    #[serde(default)]
    pub html_template: String,
    #[serde(default)]
    pub css_template: String,
    #[serde(rename = "javaScriptTemplate", default)]
    pub js_template: String,
    #[serde(default)]
    pub parameters_schema: Vec<ParameterDecl>,
    #[serde(default)]
    pub default_parameters: DefaultParameters,
    #[serde(default = "ComponentType::default_width_px")]
    pub default_width: i64,
    #[serde(default = "ComponentType::default_height_px")]
    pub default_height: i64,
    #[serde(default)]
    pub loading_priority: i64,
}

impl ComponentType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            html_template: String::new(),
            css_template: String::new(),
            js_template: String::new(),
            parameters_schema: Vec::new(),
            default_parameters: DefaultParameters::default(),
            default_width: Self::default_width_px(),
            default_height: Self::default_height_px(),
            loading_priority: 0,
        }
    }

    fn default_width_px() -> i64 {
        400
    }

    fn default_height_px() -> i64 {
        300
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.html_template = template.into();
        self
    }

    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css_template = css.into();
        self
    }

    pub fn with_schema(mut self, schema: Vec<ParameterDecl>) -> Self {
        self.parameters_schema = schema;
        self
    }

    pub fn with_defaults(mut self, defaults: ParameterMap) -> Self {
        self.default_parameters = DefaultParameters::Map(defaults);
        self
    }

    pub fn has_template(&self) -> bool {
        !self.html_template.trim().is_empty()
    }
}

/// A placed, parameterized occurrence of a [`ComponentType`] on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    pub id: String,
    pub component_type_id: String,
    /// Sparse overrides only; defaults come from the owning type.
    #[serde(default)]
    pub parameters: ParameterMap,
    #[serde(default)]
    pub x_position: i64,
    #[serde(default)]
    pub y_position: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub z_index: i64,
}

impl ComponentInstance {
    pub fn new(id: impl Into<String>, component_type_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type_id: component_type_id.into(),
            parameters: ParameterMap::new(),
            x_position: 0,
            y_position: 0,
            width: 0,
            height: 0,
            z_index: 0,
        }
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x_position = x;
        self.y_position = y;
        self
    }

    pub fn sized(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Derived render output for one instance. Recomputed on demand and cached;
/// holds no authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub instance: ComponentInstance,
    pub component_type_id: String,
    #[serde(rename = "renderedHTML")]
    pub rendered_html: String,
    #[serde(rename = "appliedCSS")]
    pub applied_css: String,
    #[serde(rename = "appliedJS")]
    pub applied_js: String,
    pub parameters: ParameterMap,
}

/// Shared owner of component types, keyed by id.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, ComponentType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component_type: ComponentType) {
        self.types
            .insert(component_type.id.clone(), component_type);
    }

    pub fn get(&self, id: &str) -> Option<&ComponentType> {
        self.types.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<ComponentType> {
        self.types.remove(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
