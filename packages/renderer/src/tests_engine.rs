//! Engine-level tests: cache behavior, degradation, page ordering
use crate::engine::RenderEngine;
use sitewright_model::{
    ComponentInstance, ComponentType, ParamValue, ParameterDecl, ParameterKind, TypeRegistry,
};
use std::rc::Rc;

fn hero_type() -> ComponentType {
    ComponentType::new("hero", "Hero Section")
        .with_template("<section><h1>{{title}}</h1><p>{{subtitle || 'Welcome'}}</p></section>")
        .with_css("#component-{{id}} h1 { color: {{textColor}}; }")
        .with_schema(vec![
            ParameterDecl::new("title", ParameterKind::Text),
            ParameterDecl::new("textColor", ParameterKind::Color),
        ])
}

#[test]
fn test_render_substitutes_resolved_parameters() {
    let engine = RenderEngine::new();
    let inst = ComponentInstance::new("c1", "hero").with_param("title", "Big News");
    let ctx = engine.render(&hero_type(), &inst);
    assert!(ctx.rendered_html.contains("<h1>Big News</h1>"));
    // subtitle is not declared anywhere - the || fallback fills it
    assert!(ctx.rendered_html.contains("<p>Welcome</p>"));
    // schema-synthesized color flows into the CSS template
    assert!(ctx.applied_css.contains("color: #333333"));
}

#[test]
fn test_missing_template_renders_diagnostic_block() {
    let engine = RenderEngine::new();
    let ct = ComponentType::new("empty", "Broken <Widget>");
    let ctx = engine.render(&ct, &ComponentInstance::new("c1", "empty"));
    assert!(ctx.rendered_html.contains("sw-missing-template"));
    assert!(ctx.rendered_html.contains("Broken &lt;Widget&gt;"));
}

#[test]
fn test_render_fast_returns_same_rc_on_hit() {
    let mut engine = RenderEngine::new();
    let ct = hero_type();
    let inst = ComponentInstance::new("c1", "hero").with_param("title", "Hi");

    let first = engine.render_fast(&ct, &inst, false);
    let second = engine.render_fast(&ct, &inst, false);
    assert!(Rc::ptr_eq(&first, &second));

    let report = engine.performance_report();
    assert_eq!(report.total_renders, 1);
    assert_eq!(report.cache_hits, 1);
    assert_eq!(report.cache_size, 1);
}

#[test]
fn test_parameter_change_is_guaranteed_miss() {
    let mut engine = RenderEngine::new();
    let ct = hero_type();
    let inst = ComponentInstance::new("c1", "hero").with_param("title", "One");
    let first = engine.render_fast(&ct, &inst, false);

    let changed = inst.clone().with_param("title", "Two");
    let second = engine.render_fast(&ct, &changed, false);
    assert!(!Rc::ptr_eq(&first, &second));
    assert!(second.rendered_html.contains("Two"));
    assert_eq!(engine.performance_report().cache_hits, 0);
}

#[test]
fn test_force_refresh_recomputes() {
    let mut engine = RenderEngine::new();
    let ct = hero_type();
    let inst = ComponentInstance::new("c1", "hero");
    let first = engine.render_fast(&ct, &inst, false);
    let refreshed = engine.render_fast(&ct, &inst, true);
    assert!(!Rc::ptr_eq(&first, &refreshed));
    assert_eq!(engine.performance_report().total_renders, 2);
}

#[test]
fn test_clear_cache_by_type() {
    let mut engine = RenderEngine::new();
    let hero = hero_type();
    let card = ComponentType::new("card", "Card").with_template("<div>{{title}}</div>");
    engine.render_fast(&hero, &ComponentInstance::new("a", "hero"), false);
    engine.render_fast(&card, &ComponentInstance::new("b", "card"), false);

    engine.clear_cache(Some("hero"));
    assert_eq!(engine.performance_report().cache_size, 1);
    engine.clear_cache(None);
    assert_eq!(engine.performance_report().cache_size, 0);
}

#[test]
fn test_evict_instance_on_delete() {
    let mut engine = RenderEngine::new();
    let ct = hero_type();
    engine.render_fast(&ct, &ComponentInstance::new("gone", "hero"), false);
    engine.render_fast(&ct, &ComponentInstance::new("kept", "hero"), false);
    engine.evict_instance("hero", "gone");
    assert_eq!(engine.performance_report().cache_size, 1);
}

#[test]
fn test_render_page_orders_by_priority_then_z_index() {
    let mut registry = TypeRegistry::new();
    let mut first = ComponentType::new("nav", "Nav");
    first.loading_priority = 0;
    first.html_template = "<nav></nav>".to_string();
    let mut second = ComponentType::new("body", "Body");
    second.loading_priority = 5;
    second.html_template = "<main></main>".to_string();
    registry.register(first);
    registry.register(second);

    let instances = vec![
        ComponentInstance::new("b1", "body").with_z_index(0),
        ComponentInstance::new("n2", "nav").with_z_index(7),
        ComponentInstance::new("n1", "nav").with_z_index(3),
    ];
    let mut engine = RenderEngine::new();
    let contexts = engine.render_page(&instances, &registry);
    let ids: Vec<&str> = contexts.iter().map(|c| c.instance.id.as_str()).collect();
    assert_eq!(ids, vec!["n1", "n2", "b1"]);
}

#[test]
fn test_render_page_skips_unknown_types() {
    let registry = TypeRegistry::new();
    let instances = vec![ComponentInstance::new("a", "ghost")];
    let mut engine = RenderEngine::new();
    assert!(engine.render_page(&instances, &registry).is_empty());
}

#[test]
fn test_image_parameter_fallback_through_engine() {
    let ct = ComponentType::new("logo", "Logo")
        .with_template("<img src=\"{{logoUrl}}\" alt=\"logo\">")
        .with_schema(vec![ParameterDecl::new("logoUrl", ParameterKind::Image)]);
    let inst = ComponentInstance::new("c1", "logo").with_param("logoUrl", ParamValue::from(""));
    let ctx = RenderEngine::new().render(&ct, &inst);
    assert!(ctx.rendered_html.contains("https://placehold.co/200x60?text=Logo"));
    assert!(!ctx.rendered_html.contains("src=\"\""));
}
