//! Canonical HTML/CSS generation for known instance types.
//!
//! The inverse of the reverse parser for a fixed set of types:
//! `hero-section`, `header`, `text`, `card`, `gallery`, plus a generic
//! fallback. Emitted markup carries the explicit markers
//! (`data-component-*`, `data-param-*`) the parser's first strategy reads
//! back verbatim, which is what makes `parse ∘ generate` exact for the
//! supported parameter keys.

use crate::camel_to_kebab;
use sitewright_model::{ComponentInstance, ParamValue};
use std::fmt::Write;

/// Style-like parameter keys that map onto CSS properties in the per-
/// instance rule.
const STYLE_PARAMS: &[(&str, &str)] = &[
    ("backgroundColor", "background-color"),
    ("textColor", "color"),
    ("fontSize", "font-size"),
    ("fontFamily", "font-family"),
    ("borderRadius", "border-radius"),
    ("padding", "padding"),
    ("margin", "margin"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedComponent {
    pub html: String,
    pub css: String,
}

/// Emit canonical markup and a positioning CSS block for one instance.
pub fn generate(instance: &ComponentInstance) -> GeneratedComponent {
    let body = match instance.component_type_id.as_str() {
        "hero-section" => hero_body(instance),
        "header" => header_body(instance),
        "text" => text_body(instance),
        "card" => card_body(instance),
        "gallery" => gallery_body(instance),
        _ => generic_body(instance),
    };

    let root_tag = match instance.component_type_id.as_str() {
        "hero-section" => "section",
        "header" => "header",
        _ => "div",
    };

    let html = format!(
        "<{tag} id=\"component-{id}\"{markers}>{body}</{tag}>",
        tag = root_tag,
        id = instance.id,
        markers = marker_attributes(instance),
        body = body,
    );

    GeneratedComponent {
        html,
        css: css_block(instance),
    }
}

/// Generate a full page: all instances' markup plus one `<style>` block.
pub fn generate_page(instances: &[ComponentInstance]) -> String {
    let mut body = String::new();
    let mut css = String::new();
    for instance in instances {
        let generated = generate(instance);
        body.push_str(&generated.html);
        body.push('\n');
        css.push_str(&generated.css);
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        css, body
    )
}

fn marker_attributes(instance: &ComponentInstance) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        " data-component-id=\"{}\" data-component-type=\"{}\" data-x=\"{}\" data-y=\"{}\" \
         data-width=\"{}\" data-height=\"{}\" data-z-index=\"{}\"",
        escape_attr(&instance.id),
        escape_attr(&instance.component_type_id),
        instance.x_position,
        instance.y_position,
        instance.width,
        instance.height,
        instance.z_index,
    );
    for (key, value) in &instance.parameters {
        let _ = write!(
            out,
            " data-param-{}=\"{}\"",
            camel_to_kebab(key),
            escape_attr(&value.to_string())
        );
    }
    out
}

fn css_block(instance: &ComponentInstance) -> String {
    let mut rule = format!(
        "#component-{} {{ position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; z-index: {};",
        instance.id,
        instance.x_position,
        instance.y_position,
        instance.width,
        instance.height,
        instance.z_index,
    );
    for (param, css_property) in STYLE_PARAMS {
        if let Some(value) = instance.parameters.get(*param) {
            let text = value.to_string();
            if !text.is_empty() {
                let _ = write!(rule, " {}: {};", css_property, text);
            }
        }
    }
    rule.push_str(" }\n");
    rule
}

fn param<'a>(instance: &'a ComponentInstance, key: &str) -> Option<&'a ParamValue> {
    instance.parameters.get(key).filter(|v| !v.is_empty_like())
}

fn hero_body(instance: &ComponentInstance) -> String {
    let mut body = String::new();
    if let Some(title) = param(instance, "title") {
        let _ = write!(body, "<h1>{}</h1>", escape_html(&title.to_string()));
    }
    if let Some(subtitle) = param(instance, "subtitle") {
        let _ = write!(body, "<p>{}</p>", escape_html(&subtitle.to_string()));
    }
    if let Some(text) = param(instance, "buttonText") {
        let href = param(instance, "buttonLink")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "#".to_string());
        let _ = write!(
            body,
            "<a class=\"hero-button\" href=\"{}\">{}</a>",
            escape_attr(&href),
            escape_html(&text.to_string())
        );
    }
    body
}

fn header_body(instance: &ComponentInstance) -> String {
    let mut body = String::new();
    if let Some(title) = param(instance, "title") {
        let _ = write!(body, "<h1>{}</h1>", escape_html(&title.to_string()));
    }
    if let Some(tagline) = param(instance, "tagline") {
        let _ = write!(
            body,
            "<p class=\"tagline\">{}</p>",
            escape_html(&tagline.to_string())
        );
    }
    body
}

fn text_body(instance: &ComponentInstance) -> String {
    match param(instance, "content") {
        Some(content) => format!("<p>{}</p>", escape_html(&content.to_string())),
        None => String::new(),
    }
}

fn card_body(instance: &ComponentInstance) -> String {
    let mut body = String::new();
    if let Some(image) = param(instance, "imageUrl") {
        let _ = write!(
            body,
            "<img src=\"{}\" alt=\"\">",
            escape_attr(&image.to_string())
        );
    }
    if let Some(title) = param(instance, "title") {
        let _ = write!(body, "<h3>{}</h3>", escape_html(&title.to_string()));
    }
    if let Some(description) = param(instance, "description") {
        let _ = write!(body, "<p>{}</p>", escape_html(&description.to_string()));
    }
    body
}

fn gallery_body(instance: &ComponentInstance) -> String {
    let mut body = String::new();
    if let Some(title) = param(instance, "title") {
        let _ = write!(body, "<h2>{}</h2>", escape_html(&title.to_string()));
    }
    if let Some(images) = param(instance, "images") {
        body.push_str("<div class=\"gallery-grid\">");
        for url in images.to_string().split(',') {
            let url = url.trim();
            if !url.is_empty() {
                let _ = write!(body, "<img src=\"{}\" alt=\"\">", escape_attr(url));
            }
        }
        body.push_str("</div>");
    }
    body
}

fn generic_body(instance: &ComponentInstance) -> String {
    match param(instance, "content") {
        Some(content) => escape_html(&content.to_string()),
        None => String::new(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}
