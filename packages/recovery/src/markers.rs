//! Explicit-marker extraction.
//!
//! Markers come in two forms: `data-component-*` attributes on elements,
//! and `<!-- COMPONENT: {json} -->` comments. A malformed payload is
//! logged and skipped; it never aborts the page.

use crate::kebab_to_camel;
use anyhow::{Context, Result};
use serde::Deserialize;
use sitewright_model::{ComponentInstance, ParamValue, ParameterMap};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerPayload {
    id: String,
    #[serde(rename = "type")]
    component_type: String,
    #[serde(default)]
    x: i64,
    #[serde(default)]
    y: i64,
    #[serde(default)]
    width: i64,
    #[serde(default)]
    height: i64,
    #[serde(default)]
    z_index: i64,
    #[serde(default)]
    parameters: ParameterMap,
}

pub fn extract(dom: &tl::VDom) -> Vec<ComponentInstance> {
    let mut instances = Vec::new();
    let mut anonymous_counter = 0usize;

    for node in dom.nodes() {
        match node {
            tl::Node::Tag(tag) => {
                let attrs = attributes_of(tag);
                if attrs.contains_key("data-component-id")
                    || attrs.contains_key("data-component-type")
                {
                    instances.push(instance_from_attributes(&attrs, &mut anonymous_counter));
                }
            }
            tl::Node::Comment(bytes) => {
                let text = bytes.as_utf8_str();
                if let Some(payload) = comment_payload(&text) {
                    match parse_payload(payload) {
                        Ok(instance) => instances.push(instance),
                        Err(e) => {
                            warn!(error = %e, "skipping malformed COMPONENT comment marker")
                        }
                    }
                }
            }
            tl::Node::Raw(_) => {}
        }
    }

    instances
}

fn attributes_of(tag: &tl::HTMLTag) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for (key, value) in tag.attributes().iter() {
        attrs.insert(
            key.as_ref().to_lowercase(),
            value
                .map(|v| unescape_entities(v.as_ref()))
                .unwrap_or_default(),
        );
    }
    attrs
}

/// The markup parser hands back raw attribute bytes; decode the entities
/// the generator emits. `&amp;` last so double-escapes stay stable.
fn unescape_entities(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn instance_from_attributes(
    attrs: &BTreeMap<String, String>,
    anonymous_counter: &mut usize,
) -> ComponentInstance {
    let id = match attrs.get("data-component-id") {
        Some(id) if !id.is_empty() => id.clone(),
        _ => {
            *anonymous_counter += 1;
            format!("component-{}", anonymous_counter)
        }
    };
    let component_type = attrs
        .get("data-component-type")
        .filter(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| "generic".to_string());

    let mut parameters = ParameterMap::new();
    for (key, value) in attrs {
        if let Some(param_key) = key.strip_prefix("data-param-") {
            parameters.insert(kebab_to_camel(param_key), ParamValue::from(value.clone()));
        }
    }

    let mut instance = ComponentInstance::new(id, component_type)
        .at(int_attr(attrs, "data-x"), int_attr(attrs, "data-y"))
        .sized(int_attr(attrs, "data-width"), int_attr(attrs, "data-height"))
        .with_z_index(int_attr(attrs, "data-z-index"));
    instance.parameters = parameters;
    instance
}

fn int_attr(attrs: &BTreeMap<String, String>, name: &str) -> i64 {
    attrs
        .get(name)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Pull the JSON payload out of a `COMPONENT:` comment, tolerating the
/// comment delimiters being present or already stripped by the parser.
fn comment_payload(comment: &str) -> Option<&str> {
    let inner = comment
        .trim()
        .trim_start_matches("<!--")
        .trim_end_matches("-->")
        .trim();
    inner.strip_prefix("COMPONENT:").map(str::trim)
}

fn parse_payload(payload: &str) -> Result<ComponentInstance> {
    let parsed: MarkerPayload =
        serde_json::from_str(payload).context("invalid COMPONENT marker JSON")?;
    let mut instance = ComponentInstance::new(parsed.id, parsed.component_type)
        .at(parsed.x, parsed.y)
        .sized(parsed.width, parsed.height)
        .with_z_index(parsed.z_index);
    instance.parameters = parsed.parameters;
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_markup(markup: &str) -> Vec<ComponentInstance> {
        let dom = tl::parse(markup, tl::ParserOptions::default()).unwrap();
        extract(&dom)
    }

    #[test]
    fn test_attribute_markers() {
        let markup = r##"<div data-component-id="c1" data-component-type="hero-section"
            data-x="10" data-y="20" data-width="800" data-height="400" data-z-index="2"
            data-param-title="Hello" data-param-background-color="#fff"></div>"##;
        let instances = parse_markup(markup);
        assert_eq!(instances.len(), 1);
        let inst = &instances[0];
        assert_eq!(inst.id, "c1");
        assert_eq!(inst.component_type_id, "hero-section");
        assert_eq!(inst.x_position, 10);
        assert_eq!(inst.z_index, 2);
        assert_eq!(inst.parameters["title"], ParamValue::from("Hello"));
        assert_eq!(inst.parameters["backgroundColor"], ParamValue::from("#fff"));
    }

    #[test]
    fn test_comment_markers() {
        let markup = r#"<html><body>
            <!-- COMPONENT: {"id":"c9","type":"card","x":5,"y":6,"width":300,"height":200,"zIndex":1,"parameters":{"title":"T"}} -->
        </body></html>"#;
        let instances = parse_markup(markup);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, "c9");
        assert_eq!(instances[0].component_type_id, "card");
        assert_eq!(instances[0].y_position, 6);
        assert_eq!(instances[0].parameters["title"], ParamValue::from("T"));
    }

    #[test]
    fn test_malformed_comment_marker_skipped() {
        let markup = "<div><!-- COMPONENT: {broken json} --></div>";
        assert!(parse_markup(markup).is_empty());
    }

    #[test]
    fn test_marker_without_id_gets_generated_one() {
        let markup = r#"<div data-component-type="text"></div>"#;
        let instances = parse_markup(markup);
        assert_eq!(instances[0].id, "component-1");
    }
}
