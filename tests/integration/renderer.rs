//! Template resolution and rendering against real template trees

use serde_json::json;
use vellum::engine::RenderOptions;
use vellum::{Renderer, ViewError};

use crate::common::TestProject;
use crate::fixtures;

#[test]
fn test_template_prefers_format_specific_file() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/home.html.tera", fixtures::HOME_HTML).unwrap();
    project.write_file("templates/home.txt.tera", fixtures::HOME_TXT).unwrap();
    project.write_file("templates/home.tera", "fallback").unwrap();

    let html = project.renderer(&["templates"], "html");
    let txt = project.renderer(&["templates"], "txt");
    let json_format = project.renderer(&["templates"], "json");

    assert_eq!(html.template("home", &json!({ "title": "Hi" }), None).unwrap(), "<h1>Hi</h1>");
    assert_eq!(txt.template("home", &json!({ "title": "Hi" }), None).unwrap(), "# Hi");
    assert_eq!(json_format.template("home", &json!({ "title": "Hi" }), None).unwrap(), "fallback");
}

#[test]
fn test_files_for_other_formats_are_ignored() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/home.txt.tera", fixtures::HOME_TXT).unwrap();

    let renderer = project.renderer(&["templates"], "html");
    assert_eq!(renderer.lookup("home"), None);

    let error = renderer.template("home", &json!({}), None).unwrap_err();
    assert!(error.is_template_not_found());
}

#[test]
fn test_first_search_path_wins() {
    let project = TestProject::new().unwrap();
    project.write_file("app/home.html.tera", "app").unwrap();
    project.write_file("shared/home.html.tera", "shared").unwrap();
    project.write_file("shared/footer.html.tera", "shared footer").unwrap();

    let renderer = project.renderer(&["app", "shared"], "html");

    assert_eq!(renderer.template("home", &json!({}), None).unwrap(), "app");
    assert_eq!(renderer.template("footer", &json!({}), None).unwrap(), "shared footer");
    assert_eq!(renderer.lookup("home"), Some(project.root("app").join("home.html.tera")));
}

#[test]
fn test_partial_resolves_underscored_file() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/articles/_comment.html.tera", fixtures::COMMENT_PARTIAL).unwrap();

    let renderer = project.renderer(&["templates"], "html");
    let output = renderer
        .partial("articles/comment", &json!({ "comment": { "body": "Great article" } }), None)
        .unwrap();

    assert_eq!(output, "<p>Great article</p>");
    assert!(renderer.template("articles/comment", &json!({}), None).unwrap_err().is_template_not_found());
}

#[test]
fn test_not_found_error_names_template_and_paths() {
    let project = TestProject::new().unwrap();
    let renderer = project.renderer(&["app", "shared"], "html");

    let error = renderer.template("missing", &json!({}), None).unwrap_err();
    let ViewError::TemplateNotFound {
        name,
        paths,
    } = &error
    else {
        panic!("expected TemplateNotFound, got {error:?}");
    };

    assert_eq!(name, "missing");
    assert_eq!(paths.len(), 2);
    assert!(error.to_string().contains(&project.root("app").display().to_string()));
    assert!(error.to_string().contains(&project.root("shared").display().to_string()));
}

#[test]
fn test_chdir_scopes_lookup_to_subdirectory() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/admin/home.html.tera", "admin home").unwrap();
    project.write_file("templates/home.html.tera", "home").unwrap();

    let renderer = project.renderer(&["templates"], "html");
    let admin = renderer.chdir("admin");

    assert_eq!(admin.template("home", &json!({}), None).unwrap(), "admin home");
    assert_eq!(renderer.template("home", &json!({}), None).unwrap(), "home");
    assert_ne!(admin, renderer);
    assert_eq!(admin, renderer.chdir("admin"));
}

#[test]
fn test_block_content_is_exposed_to_layouts() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/layouts/app.html.tera", fixtures::LAYOUT).unwrap();
    project.write_file("templates/home.html.tera", fixtures::HOME_HTML).unwrap();

    let renderer = project.renderer(&["templates"], "html");
    let inner = || renderer.template("home", &json!({ "title": "Hi" }), None);

    let output = renderer.template("layouts/app", &json!({}), Some(&inner)).unwrap();
    assert_eq!(output, "<main><h1>Hi</h1></main>");
}

#[test]
fn test_options_select_engine_behaviour_and_cache_entries() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/home.html.tera", fixtures::HOME_HTML).unwrap();
    let scope = json!({ "title": "<b>Hi</b>" });

    let plain = project.renderer(&["templates"], "html");
    let mut options = RenderOptions::new();
    options.insert("autoescape".to_string(), json!(true));
    let escaping = plain.clone().with_options(options);

    assert_eq!(plain.template("home", &scope, None).unwrap(), "<h1><b>Hi</b></h1>");
    assert_eq!(escaping.template("home", &scope, None).unwrap(), "<h1>&lt;b&gt;Hi&lt;&#x2F;b&gt;</h1>");
    assert_eq!(plain.cache().len(), 2);
}

#[test]
fn test_engine_errors_pass_through() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/broken.html.tera", "{% if %}").unwrap();

    let renderer = project.renderer(&["templates"], "html");
    let error = renderer.template("broken", &json!({}), None).unwrap_err();

    assert!(matches!(error, ViewError::Engine(_)));
    assert!(renderer.cache().is_empty());
}

#[test]
fn test_equality_ignores_cache_handle() {
    let project = TestProject::new().unwrap();
    let a = project.renderer(&["templates"], "html");
    let b = project.renderer(&["templates"], "html");

    assert!(!a.cache().ptr_eq(b.cache()));
    assert_eq!(a, b);
    assert_ne!(a, Renderer::new(vec![], "html"));
}
