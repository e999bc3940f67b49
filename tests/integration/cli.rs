//! `vellum` command-line behaviour

use predicates::prelude::*;

use crate::common::TestProject;
use crate::fixtures;

fn project_with_templates() -> TestProject {
    let project = TestProject::new().unwrap();
    project.write_file("vellum.toml", fixtures::CONFIG).unwrap();
    project.write_file("templates/home.html.tera", fixtures::HOME_HTML).unwrap();
    project.write_file("templates/home.txt.tera", fixtures::HOME_TXT).unwrap();
    project.write_file("templates/articles/_comment.html.tera", fixtures::COMMENT_PARTIAL).unwrap();
    project.write_file("templates/articles/show.html.tera", fixtures::ARTICLE_SHOW).unwrap();
    project
}

#[test]
fn test_render_template_with_data() {
    let project = project_with_templates();
    project.write_file("data.json", r#"{ "title": "Hello" }"#).unwrap();

    project
        .vellum()
        .args(["render", "home", "--data", "data.json"])
        .assert()
        .success()
        .stdout("<h1>Hello</h1>");
}

#[test]
fn test_render_with_format_override() {
    let project = project_with_templates();
    project.write_file("data.json", r#"{ "title": "Hello" }"#).unwrap();

    project
        .vellum()
        .args(["render", "home", "--format", "txt", "--data", "data.json"])
        .assert()
        .success()
        .stdout("# Hello");
}

#[test]
fn test_render_partial_as_part() {
    let project = project_with_templates();
    project.write_file("comment.json", r#"{ "body": "Great article" }"#).unwrap();

    project
        .vellum()
        .args(["render", "articles/comment", "--partial", "--as", "comment", "--data", "comment.json"])
        .assert()
        .success()
        .stdout("<p>Great article</p>");
}

#[test]
fn test_render_rejects_non_object_data() {
    let project = project_with_templates();
    project.write_file("data.json", "[1, 2]").unwrap();

    project
        .vellum()
        .args(["render", "home", "--data", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn test_render_missing_template_suggests_alternatives() {
    let project = project_with_templates();

    project
        .vellum()
        .args(["render", "hom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be found"))
        .stderr(predicate::str::contains("home"));
}

#[test]
fn test_lookup_prints_resolved_path() {
    let project = project_with_templates();

    project
        .vellum()
        .args(["lookup", "articles/comment", "--partial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_comment.html.tera"));
}

#[test]
fn test_lookup_with_path_override() {
    let project = project_with_templates();
    project.write_file("other/home.html.tera", "other").unwrap();

    project
        .vellum()
        .args(["lookup", "home", "--path", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("other").and(predicate::str::contains("home.html.tera")));
}

#[test]
fn test_missing_search_paths_is_a_config_error() {
    let project = TestProject::new().unwrap();

    project
        .vellum()
        .args(["lookup", "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no template search paths configured"));
}

#[test]
fn test_explicit_config_file() {
    let project = TestProject::new().unwrap();
    project.write_file("conf/views.toml", "format = \"txt\"\npaths = [\"../templates\"]\n").unwrap();
    project.write_file("templates/home.txt.tera", fixtures::HOME_TXT).unwrap();
    project.write_file("data.json", r#"{ "title": "Configured" }"#).unwrap();

    project
        .vellum()
        .args(["--config", "conf/views.toml", "render", "home", "--data", "data.json"])
        .assert()
        .success()
        .stdout("# Configured");
}
