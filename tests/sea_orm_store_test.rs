use crudsearch::{ModelRegistry, SeaOrmStore, Search, SearchError};
use serde_json::Value;

mod common;
use common::{article_entity, init_tracing, setup_articles_db};

async fn setup_search() -> Search<SeaOrmStore> {
    init_tracing();
    let db = setup_articles_db()
        .await
        .expect("Failed to setup test database");

    let mut registry = ModelRegistry::new();
    registry.register_entity::<article_entity::Entity>(article_entity::SEARCHABLE);

    Search::new(&registry, "articles", SeaOrmStore::new(db)).expect("articles is registered")
}

fn titles(rows: &[Value]) -> Vec<&str> {
    rows.iter()
        .map(|row| row["title"].as_str().expect("title column"))
        .collect()
}

#[tokio::test]
async fn test_substring_filter_with_sort() {
    let search = setup_search().await;

    let result = search
        .find([("title*has", "Rust"), ("sort", "views*desc")])
        .await
        .unwrap();

    assert_eq!(
        titles(&result.result),
        vec!["Rust in Action", "Async Rust", "Rusty Tools"]
    );
    assert_eq!(result.total, 3);
    assert_eq!(result.pages, None);
}

#[tokio::test]
async fn test_property_list_ors_properties() {
    let search = setup_search().await;

    let result = search
        .find([("description*title*has", "rust"), ("sort", "id*asc")])
        .await
        .unwrap();

    // "Trust the recipe" matches through its description
    assert_eq!(
        titles(&result.result),
        vec!["Rust in Action", "Async Rust", "Rusty Tools", "Cooking"]
    );
    assert_eq!(result.total, 4);
}

#[tokio::test]
async fn test_numeric_range() {
    let search = setup_search().await;

    let result = search
        .find([("views*min", "50"), ("views*max", "100"), ("sort", "views*asc")])
        .await
        .unwrap();

    assert_eq!(titles(&result.result), vec!["Cooking", "Async Rust"]);
    assert_eq!(result.total, 2);
}

#[tokio::test]
async fn test_exact_match() {
    let search = setup_search().await;

    let result = search.find([("title*is", "Gardening")]).await.unwrap();

    assert_eq!(titles(&result.result), vec!["Gardening"]);
    assert_eq!(result.result[0]["views"].as_i64(), Some(15));
}

#[tokio::test]
async fn test_pagination_counts_all_matches() {
    let search = setup_search().await;

    let result = search
        .find([("sort", "id*asc"), ("limit", "2"), ("offset", "2")])
        .await
        .unwrap();

    assert_eq!(titles(&result.result), vec!["Gardening", "Rusty Tools"]);
    assert_eq!(result.total, 5);
    assert_eq!(result.pages, Some(3));
    assert_eq!(result.page, Some(1));
    assert_eq!(result.query, "sort=id*asc");
    assert_eq!(result.section, "limit=2&offset=2");
}

#[tokio::test]
async fn test_offset_alone_returns_everything() {
    let search = setup_search().await;

    let result = search.find([("offset", "3")]).await.unwrap();

    assert_eq!(result.result.len(), 5);
    assert_eq!(result.total, 5);
}

#[tokio::test]
async fn test_bare_criterion_searches_all_searchable_columns() {
    let search = setup_search().await;

    let result = search.find([("*has", "tomato")]).await.unwrap();

    assert_eq!(titles(&result.result), vec!["Gardening"]);
    assert_eq!(result.total, 1);
}

#[tokio::test]
async fn test_hidden_column_is_rejected() {
    let search = setup_search().await;

    let err = search.find([("secret*is", "k1")]).await.unwrap_err();

    assert!(matches!(err, SearchError::NotSearchable { ref property, .. } if property == "secret"));
}

#[tokio::test]
async fn test_missing_table_surfaces_store_error() {
    init_tracing();
    let db = setup_articles_db().await.unwrap();
    let mut registry = ModelRegistry::new();
    registry.register_entity::<article_entity::Entity>(article_entity::SEARCHABLE);
    let store = SeaOrmStore::new(db).with_table("articles", "no_such_table");
    let search = Search::new(&registry, "articles", store).unwrap();

    let err = search.find([("title*is", "x")]).await.unwrap_err();

    assert!(matches!(err, SearchError::Store(_)));
    assert!(!err.is_validation());
}
