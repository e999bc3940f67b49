//! Compiled-template cache behaviour under concurrent rendering

use std::sync::Arc;
use std::thread;

use serde_json::json;
use vellum::test_utils::CountingEngine;
use vellum::{Renderer, SearchPath, TemplateCache};

use crate::common::TestProject;
use crate::fixtures;

fn counting_renderer(project: &TestProject, engine: Arc<CountingEngine>, cache: TemplateCache) -> Renderer {
    Renderer::new(vec![SearchPath::new(project.root("templates"))], "html").with_engine(engine).with_cache(cache)
}

#[test]
fn test_concurrent_renders_compile_once() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/home.html.tera", fixtures::HOME_HTML).unwrap();

    let engine = Arc::new(CountingEngine::new());
    let cache = TemplateCache::new();
    let renderer = counting_renderer(&project, engine.clone(), cache.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let renderer = renderer.clone();
            thread::spawn(move || renderer.template("home", &json!({ "title": i }), None))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), format!("<h1>{i}</h1>"));
    }

    assert_eq!(engine.compile_count(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.stats(), (7, 1));
}

#[test]
fn test_shared_cache_is_keyed_by_engine() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/home.html.tera", fixtures::HOME_HTML).unwrap();

    let cache = TemplateCache::new();
    let first = Arc::new(CountingEngine::new());
    let second = Arc::new(CountingEngine::new());

    for engine in [&first, &second] {
        let renderer = counting_renderer(&project, Arc::clone(engine), cache.clone());
        renderer.template("home", &json!({ "title": "a" }), None).unwrap();
        renderer.template("home", &json!({ "title": "b" }), None).unwrap();
    }

    assert_eq!(first.compile_count(), 1);
    assert_eq!(second.compile_count(), 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_failed_compile_is_retried() {
    let project = TestProject::new().unwrap();
    let path = project.write_file("templates/home.html.tera", "{% if %}").unwrap();

    let engine = Arc::new(CountingEngine::new());
    let renderer = counting_renderer(&project, engine.clone(), TemplateCache::new());

    assert!(renderer.template("home", &json!({}), None).is_err());

    std::fs::write(&path, fixtures::HOME_HTML).unwrap();
    assert_eq!(renderer.template("home", &json!({ "title": "ok" }), None).unwrap(), "<h1>ok</h1>");
    assert_eq!(engine.compile_count(), 2);
}

#[test]
fn test_derived_renderers_share_cache() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/admin/home.html.tera", "admin").unwrap();

    let engine = Arc::new(CountingEngine::new());
    let renderer = counting_renderer(&project, engine.clone(), TemplateCache::new());

    renderer.chdir("admin").template("home", &json!({}), None).unwrap();
    renderer.template("admin/home", &json!({}), None).unwrap();

    assert_eq!(engine.compile_count(), 1);
    assert!(renderer.cache().hit_rate() > 0.0);
}
