//! parse ∘ generate round-trip tests for the known instance types
use crate::generator::{generate, generate_page};
use crate::parser::parse_page;
use sitewright_model::ComponentInstance;

fn assert_roundtrip(instance: &ComponentInstance) {
    let generated = generate(instance);
    let recovered = parse_page(&generated.html);
    assert_eq!(recovered.len(), 1, "expected exactly one recovered instance");
    let back = &recovered[0];
    assert_eq!(back.id, instance.id);
    assert_eq!(back.component_type_id, instance.component_type_id);
    assert_eq!(back.x_position, instance.x_position);
    assert_eq!(back.y_position, instance.y_position);
    assert_eq!(back.width, instance.width);
    assert_eq!(back.height, instance.height);
    assert_eq!(back.z_index, instance.z_index);
    for (key, value) in &instance.parameters {
        assert_eq!(
            back.parameters.get(key),
            Some(value),
            "parameter {} did not round-trip",
            key
        );
    }
}

#[test]
fn test_roundtrip_hero_section() {
    assert_roundtrip(
        &ComponentInstance::new("hero-1", "hero-section")
            .at(0, 0)
            .sized(1200, 500)
            .with_z_index(1)
            .with_param("title", "Launch faster")
            .with_param("subtitle", "Everything your business needs")
            .with_param("buttonText", "Get started")
            .with_param("buttonLink", "/signup")
            .with_param("backgroundColor", "#102a43"),
    );
}

#[test]
fn test_roundtrip_header() {
    assert_roundtrip(
        &ComponentInstance::new("hdr", "header")
            .at(0, 0)
            .sized(1200, 80)
            .with_param("title", "Acme Salon")
            .with_param("tagline", "Open late, seven days")
            .with_param("textColor", "#ffffff"),
    );
}

#[test]
fn test_roundtrip_text() {
    assert_roundtrip(
        &ComponentInstance::new("t-3", "text")
            .at(40, 600)
            .sized(700, 120)
            .with_z_index(4)
            .with_param("content", "Walk-ins welcome.")
            .with_param("fontSize", "18px")
            .with_param("fontFamily", "Georgia"),
    );
}

#[test]
fn test_roundtrip_card() {
    assert_roundtrip(
        &ComponentInstance::new("card-2", "card")
            .at(100, 300)
            .sized(320, 280)
            .with_param("title", "Haircut")
            .with_param("description", "Classic cut and style")
            .with_param("imageUrl", "/img/haircut.jpg")
            .with_param("borderRadius", "12px")
            .with_param("padding", "16px"),
    );
}

#[test]
fn test_roundtrip_gallery() {
    assert_roundtrip(
        &ComponentInstance::new("g-1", "gallery")
            .at(0, 900)
            .sized(1200, 400)
            .with_param("title", "Our work")
            .with_param("images", "/a.jpg,/b.jpg,/c.jpg"),
    );
}

#[test]
fn test_roundtrip_generic_fallback() {
    assert_roundtrip(
        &ComponentInstance::new("x-9", "testimonial")
            .at(10, 20)
            .sized(400, 200)
            .with_param("content", "Five stars"),
    );
}

#[test]
fn test_roundtrip_full_page() {
    let instances = vec![
        ComponentInstance::new("a", "header")
            .sized(1200, 80)
            .with_param("title", "Acme"),
        ComponentInstance::new("b", "hero-section")
            .at(0, 80)
            .sized(1200, 400)
            .with_z_index(1)
            .with_param("title", "Welcome"),
        ComponentInstance::new("c", "text")
            .at(0, 500)
            .sized(800, 100)
            .with_param("content", "Hello"),
    ];
    let page = generate_page(&instances);
    let recovered = parse_page(&page);
    assert_eq!(recovered.len(), 3);
    let ids: Vec<&str> = recovered.iter().map(|i| i.id.as_str()).collect();
    assert!(ids.contains(&"a") && ids.contains(&"b") && ids.contains(&"c"));
}

#[test]
fn test_escaped_content_roundtrips() {
    assert_roundtrip(
        &ComponentInstance::new("esc", "text").with_param("content", "Fish & \"Chips\" <fresh>"),
    );
}
