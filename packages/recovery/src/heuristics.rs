//! Heuristic pattern detection for unmarked pages.
//!
//! Walks the element tree and classifies "component-worthy" elements by
//! loose structural checks. A qualifying element is consumed whole — its
//! content becomes parameters — so nested qualifiers inside it are not
//! reported separately. Without a layout engine, recovered instances get
//! deterministic stacked positions.

use sitewright_model::{ComponentInstance, ParamValue, ParameterMap};
use tracing::debug;

const SEMANTIC_TAGS: &[&str] = &[
    "header", "main", "section", "article", "aside", "footer", "nav", "form",
];

const SKIP_TAGS: &[&str] = &["script", "style", "meta", "link", "title"];

/// Structural wrappers: never components themselves, always descended into.
const CONTAINER_TAGS: &[&str] = &["html", "head", "body"];

/// Qualifying content must carry more than this much text to count as
/// non-trivial.
const TEXT_THRESHOLD: usize = 50;

const STACK_HEIGHT: i64 = 200;
const STACK_GAP: i64 = 20;
const STACK_WIDTH: i64 = 800;

pub fn detect(dom: &tl::VDom) -> Vec<ComponentInstance> {
    let parser = dom.parser();
    let mut instances = Vec::new();
    for handle in dom.children() {
        walk(*handle, parser, &mut instances);
    }
    debug!(recovered = instances.len(), "heuristic detection complete");
    instances
}

fn walk(handle: tl::NodeHandle, parser: &tl::Parser, out: &mut Vec<ComponentInstance>) {
    let Some(node) = handle.get(parser) else {
        return;
    };
    let tl::Node::Tag(tag) = node else {
        return;
    };
    let name = tag.name().as_utf8_str().to_lowercase();

    if SKIP_TAGS.contains(&name.as_str()) {
        return;
    }
    if CONTAINER_TAGS.contains(&name.as_str()) {
        for child in tag.children().top().iter() {
            walk(*child, parser, out);
        }
        return;
    }

    if qualifies(tag, parser, &name) {
        let index = out.len();
        out.push(recover(tag, parser, &name, index));
        return;
    }

    for child in tag.children().top().iter() {
        walk(*child, parser, out);
    }
}

fn qualifies(tag: &tl::HTMLTag, parser: &tl::Parser, name: &str) -> bool {
    if SEMANTIC_TAGS.contains(&name) {
        return true;
    }
    let text_len = tag.inner_text(parser).trim().len();
    if has_child_elements(tag, parser) && text_len > TEXT_THRESHOLD {
        return true;
    }
    let has_identity = !attr(tag, "class").unwrap_or_default().trim().is_empty()
        || !attr(tag, "id").unwrap_or_default().trim().is_empty();
    has_identity && text_len > TEXT_THRESHOLD
}

fn recover(
    tag: &tl::HTMLTag,
    parser: &tl::Parser,
    name: &str,
    index: usize,
) -> ComponentInstance {
    let component_type = infer_type_name(tag, parser, name);
    let id = format!("recovered-{}", index + 1);
    debug!(id = %id, component_type = %component_type, "recovered component candidate");

    let mut instance = ComponentInstance::new(id, component_type)
        .at(0, index as i64 * (STACK_HEIGHT + STACK_GAP))
        .sized(STACK_WIDTH, STACK_HEIGHT)
        .with_z_index(index as i64);
    instance.parameters = extract_parameters(tag, parser);
    instance
}

/// Type name, in priority order: semantic tag, first class token, id,
/// content-shape inference.
fn infer_type_name(tag: &tl::HTMLTag, parser: &tl::Parser, name: &str) -> String {
    if SEMANTIC_TAGS.contains(&name) {
        return name.to_string();
    }
    if let Some(class) = attr(tag, "class") {
        if let Some(first) = class.split_whitespace().next() {
            return first.to_string();
        }
    }
    if let Some(id) = attr(tag, "id") {
        if !id.trim().is_empty() {
            return id.trim().to_string();
        }
    }
    infer_from_content_shape(tag, parser, name)
}

fn infer_from_content_shape(tag: &tl::HTMLTag, parser: &tl::Parser, name: &str) -> String {
    let mut shape = ContentShape::default();
    collect_shape(tag, parser, &mut shape);
    if shape.has_heading && shape.has_image {
        "media-content".to_string()
    } else if shape.has_heading {
        "text-content".to_string()
    } else if shape.has_image {
        "image-content".to_string()
    } else if shape.has_form_controls {
        "form-content".to_string()
    } else if shape.has_links {
        "navigation-content".to_string()
    } else {
        format!("{}-content", name)
    }
}

#[derive(Default)]
struct ContentShape {
    has_heading: bool,
    has_image: bool,
    has_form_controls: bool,
    has_links: bool,
}

fn collect_shape(tag: &tl::HTMLTag, parser: &tl::Parser, shape: &mut ContentShape) {
    for child in tag.children().top().iter() {
        let Some(tl::Node::Tag(child_tag)) = child.get(parser) else {
            continue;
        };
        match child_tag.name().as_utf8_str().to_lowercase().as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => shape.has_heading = true,
            "img" => shape.has_image = true,
            "form" | "input" | "select" | "textarea" | "button" => {
                shape.has_form_controls = true
            }
            "a" => shape.has_links = true,
            _ => {}
        }
        collect_shape(child_tag, parser, shape);
    }
}

/// Extract parameter-like data from a recovered element's subtree: leaf
/// text, link text/URLs, image sources, form targets, and inline colors on
/// the root.
fn extract_parameters(tag: &tl::HTMLTag, parser: &tl::Parser) -> ParameterMap {
    let mut params = ParameterMap::new();
    let mut counters = ExtractCounters::default();
    extract_from_subtree(tag, parser, &mut params, &mut counters);

    if let Some(style) = attr(tag, "style") {
        if let Some(bg) = style_property(&style, "background-color") {
            params.insert("backgroundColor".to_string(), ParamValue::from(bg));
        }
        if let Some(color) = style_property(&style, "color") {
            params.insert("textColor".to_string(), ParamValue::from(color));
        }
    }
    params
}

#[derive(Default)]
struct ExtractCounters {
    texts: usize,
    links: usize,
    images: usize,
}

fn extract_from_subtree(
    tag: &tl::HTMLTag,
    parser: &tl::Parser,
    params: &mut ParameterMap,
    counters: &mut ExtractCounters,
) {
    for child in tag.children().top().iter() {
        let Some(tl::Node::Tag(child_tag)) = child.get(parser) else {
            continue;
        };
        let name = child_tag.name().as_utf8_str().to_lowercase();
        match name.as_str() {
            "a" => {
                counters.links += 1;
                let base = numbered("link", counters.links);
                if let Some(href) = attr(child_tag, "href") {
                    params.insert(format!("{}Url", base), ParamValue::from(href));
                }
                let text = child_tag.inner_text(parser).trim().to_string();
                if !text.is_empty() {
                    params.insert(format!("{}Text", base), ParamValue::from(text));
                }
            }
            "img" => {
                counters.images += 1;
                let base = numbered("image", counters.images);
                if let Some(src) = attr(child_tag, "src") {
                    params.insert(format!("{}Src", base), ParamValue::from(src));
                }
                if let Some(alt) = attr(child_tag, "alt") {
                    if !alt.is_empty() {
                        params.insert(format!("{}Alt", base), ParamValue::from(alt));
                    }
                }
            }
            "form" => {
                if let Some(action) = attr(child_tag, "action") {
                    params.insert("formAction".to_string(), ParamValue::from(action));
                }
                if let Some(method) = attr(child_tag, "method") {
                    params.insert("formMethod".to_string(), ParamValue::from(method));
                }
                extract_from_subtree(child_tag, parser, params, counters);
            }
            _ => {
                if has_child_elements(child_tag, parser) {
                    extract_from_subtree(child_tag, parser, params, counters);
                } else {
                    let text = child_tag.inner_text(parser).trim().to_string();
                    if !text.is_empty() {
                        counters.texts += 1;
                        let key = leaf_text_key(child_tag, &name, counters.texts);
                        params.insert(key, ParamValue::from(text));
                    }
                }
            }
        }
    }
}

/// Key for a leaf text node, derived from its id, first class, or tag+index.
fn leaf_text_key(tag: &tl::HTMLTag, name: &str, index: usize) -> String {
    if let Some(id) = attr(tag, "id") {
        if !id.trim().is_empty() {
            return id.trim().to_string();
        }
    }
    if let Some(class) = attr(tag, "class") {
        if let Some(first) = class.split_whitespace().next() {
            return first.to_string();
        }
    }
    format!("{}-{}", name, index)
}

fn numbered(base: &str, count: usize) -> String {
    if count == 1 {
        base.to_string()
    } else {
        format!("{}{}", base, count)
    }
}

fn has_child_elements(tag: &tl::HTMLTag, parser: &tl::Parser) -> bool {
    tag.children()
        .top()
        .iter()
        .any(|h| matches!(h.get(parser), Some(tl::Node::Tag(_))))
}

pub(crate) fn attr(tag: &tl::HTMLTag, name: &str) -> Option<String> {
    for (key, value) in tag.attributes().iter() {
        if key.as_ref().eq_ignore_ascii_case(name) {
            return Some(value.map(|v| v.to_string()).unwrap_or_default());
        }
    }
    None
}

/// Pull one property value out of an inline style string, skipping values
/// that carry no real color.
fn style_property(style: &str, property: &str) -> Option<String> {
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let name = parts.next()?.trim();
        if !name.eq_ignore_ascii_case(property) {
            continue;
        }
        let value = parts.next()?.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case("transparent")
            || value.eq_ignore_ascii_case("inherit")
        {
            return None;
        }
        return Some(value.to_string());
    }
    None
}
