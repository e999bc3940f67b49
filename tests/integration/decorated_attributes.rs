//! Part / decorated attributes

use std::sync::Arc;

use serde_json::{Map, Value, json};
use vellum::{
    Decoration, DefaultPartBuilder, Part, PartBuilder, PartClass, RegistryPartBuilder, Renderer, Rendering,
};

use crate::common::TestProject;
use crate::fixtures;

fn article(author: Value) -> Value {
    json!({
        "title": "Hello world",
        "author": author,
        "comments": [
            { "author": { "name": "Sue Smith" }, "body": "Great article" }
        ],
    })
}

fn jane() -> Value {
    json!({ "name": "Jane Doe" })
}

fn rendering(part_builder: Arc<dyn PartBuilder>) -> Arc<Rendering> {
    Arc::new(Rendering::new(Renderer::new(vec![], "html")).with_part_builder(part_builder))
}

fn article_part(class: Arc<PartClass>, author: Value, part_builder: Arc<dyn PartBuilder>) -> Part {
    Part::with_class(class, "article", article(author), rendering(part_builder))
}

mod default_part_builder {
    use super::*;

    fn assert_decorated_with_base_class(class: Arc<PartClass>) {
        let part = article_part(class.clone(), jane(), Arc::new(DefaultPartBuilder::new()));

        assert_eq!(part.part("author").unwrap().class_name(), "Part");
        assert_eq!(part.parts("comments").unwrap()[0].class_name(), "Part");

        let part = article_part(class, Value::Null, Arc::new(DefaultPartBuilder::new()));
        assert_eq!(part.attr("author").and_then(|attr| attr.as_value()), Some(&Value::Null));
    }

    #[test]
    fn test_multiple_declarations() {
        let class = PartClass::builder("ArticlePart").decorate(["author"]).decorate(["comments"]).build();
        assert_decorated_with_base_class(class);
    }

    #[test]
    fn test_single_declaration() {
        let class = PartClass::builder("ArticlePart").decorate(["author", "comments"]).build();
        assert_decorated_with_base_class(class);
    }

    #[test]
    fn test_part_class_specified() {
        let author_part = PartClass::builder("AuthorPart").build();
        let comment_part = PartClass::builder("CommentPart").build();
        let class = PartClass::builder("ArticlePart")
            .decorate_with(["author"], Decoration::new().as_class(author_part))
            .decorate_with(["comments"], Decoration::new().as_class(comment_part))
            .build();

        let part = article_part(class.clone(), jane(), Arc::new(DefaultPartBuilder::new()));
        assert_eq!(part.part("author").unwrap().class_name(), "AuthorPart");
        assert_eq!(part.parts("comments").unwrap()[0].class_name(), "CommentPart");

        let part = article_part(class, Value::Null, Arc::new(DefaultPartBuilder::new()));
        assert!(part.part("author").is_none());
        assert_eq!(part.attr("author").and_then(|attr| attr.as_value()), Some(&Value::Null));
    }
}

mod falsy_and_missing_attributes {
    use super::*;
    use vellum::Attr;

    fn author_part(value: Value) -> Part {
        let class = PartClass::builder("ArticlePart").decorate(["author"]).build();
        Part::with_class(class, "article", value, rendering(Arc::new(DefaultPartBuilder::new())))
    }

    #[test]
    fn test_false_is_returned_unchanged() {
        let part = author_part(json!({ "author": false }));
        assert!(matches!(part.attr("author"), Some(Attr::Value(&Value::Bool(false)))));
        assert!(part.part("author").is_none());
    }

    #[test]
    fn test_empty_string_and_empty_list_are_returned_unchanged() {
        let part = author_part(json!({ "author": "" }));
        assert_eq!(part.attr("author").and_then(|attr| attr.as_value()), Some(&json!("")));

        let part = author_part(json!({ "author": [] }));
        assert_eq!(part.attr("author").and_then(|attr| attr.as_value()), Some(&json!([])));
        assert!(part.parts("author").is_none());
    }

    #[test]
    fn test_missing_declared_attribute_is_none() {
        let part = author_part(json!({ "title": "Hello world" }));
        assert!(part.attr("author").is_none());
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({ "title": "Hello world" })
        );
    }
}

mod custom_part_builder {
    use super::*;

    fn registry() -> Arc<RegistryPartBuilder> {
        Arc::new(
            RegistryPartBuilder::new()
                .register(PartClass::builder("AuthorPart").build())
                .register(PartClass::builder("CommentPart").decorate(["author"]).build()),
        )
    }

    fn article_class() -> Arc<PartClass> {
        PartClass::builder("ArticlePart").decorate(["author"]).decorate(["comments"]).build()
    }

    #[test]
    fn test_decorates_using_custom_part_builder() {
        let part = article_part(article_class(), jane(), registry());

        assert_eq!(part.part("author").unwrap().class_name(), "AuthorPart");

        let comment = &part.parts("comments").unwrap()[0];
        assert_eq!(comment.class_name(), "CommentPart");
        assert_eq!(comment.name(), "comment");

        let comment_author = comment.part("author").unwrap();
        assert_eq!(comment_author.class_name(), "AuthorPart");
        assert_eq!(comment_author.value(), &json!({ "name": "Sue Smith" }));
    }

    #[test]
    fn test_falsy_values_are_not_decorated() {
        let part = article_part(article_class(), Value::Null, registry());
        assert!(part.part("author").is_none());
        assert_eq!(part.attr("author").and_then(|attr| attr.as_value()), Some(&Value::Null));
    }

    #[test]
    fn test_collection_elements_resolve_registered_singular_class() {
        let builder = Arc::new(
            RegistryPartBuilder::new()
                .register(PartClass::builder("StatusPart").build())
                .register(PartClass::builder("AnalysisPart").build()),
        );
        let class = PartClass::builder("OrderPart").decorate(["statuses", "analyses"]).build();
        let part = Part::with_class(
            class,
            "order",
            json!({ "statuses": [{ "code": "shipped" }], "analyses": [{ "score": 3 }] }),
            rendering(builder),
        );

        let status = &part.parts("statuses").unwrap()[0];
        assert_eq!(status.name(), "status");
        assert_eq!(status.class_name(), "StatusPart");

        let analysis = &part.parts("analyses").unwrap()[0];
        assert_eq!(analysis.name(), "analysis");
        assert_eq!(analysis.class_name(), "AnalysisPart");
    }

    #[test]
    fn test_nested_parts_share_rendering() {
        let part = article_part(article_class(), jane(), registry());
        let comment = &part.parts("comments").unwrap()[0];

        assert!(Arc::ptr_eq(part.part("author").unwrap().rendering(), part.rendering()));
        assert!(Arc::ptr_eq(comment.part("author").unwrap().rendering(), part.rendering()));
    }
}

#[test]
fn test_decorated_part_renders_partials_through_shared_context() {
    let project = TestProject::new().unwrap();
    project.write_file("templates/articles/_summary.html.tera", fixtures::ARTICLE_SUMMARY).unwrap();

    let author_part = PartClass::builder("AuthorPart")
        .helper("initials", |part| {
            let name = part.value()["name"].as_str().unwrap_or_default();
            json!(name.split_whitespace().filter_map(|word| word.chars().next()).collect::<String>())
        })
        .build();
    let builder = RegistryPartBuilder::new()
        .register(author_part)
        .register(PartClass::builder("ArticlePart").decorate(["author", "comments"]).build());

    let rendering = Arc::new(
        Rendering::new(project.renderer(&["templates"], "html"))
            .with_part_builder(Arc::new(builder))
            .with_context(json!({ "site": "The Blog" })),
    );

    let article = rendering.part("article", article(jane()));
    assert_eq!(article.class_name(), "ArticlePart");
    assert_eq!(
        article.render("articles/summary").unwrap(),
        "Hello world (1 comments) by JD on The Blog"
    );

    let mut locals = Map::new();
    locals.insert("context".to_string(), json!({ "site": "Elsewhere" }));
    assert_eq!(
        article.render_with("articles/summary", locals).unwrap(),
        "Hello world (1 comments) by JD on Elsewhere"
    );
}
