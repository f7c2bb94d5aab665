#![allow(dead_code)]

use async_trait::async_trait;
use crudsearch::{Bindings, ModelRegistry, ModelSchema, PropertySchema, SearchQuery, Store};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};
use serde_json::{Value, json};
use std::sync::Mutex;

pub mod article_entity;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn article_schema() -> ModelSchema {
    ModelSchema::new(
        "article",
        vec![
            PropertySchema::searchable("title"),
            PropertySchema::searchable("description"),
            PropertySchema::searchable("a"),
            PropertySchema::searchable("b"),
            PropertySchema::searchable("views"),
            PropertySchema::hidden("secret"),
        ],
    )
}

pub fn registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .register(article_schema())
        .register(ModelSchema::new("vault", vec![PropertySchema::hidden("secret")]));
    registry
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountCall {
    pub model: String,
    pub predicate: String,
    pub bindings: Bindings,
}

/// Store stub returning canned rows and recording every call
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub records: Vec<Value>,
    pub total: u64,
    pub failure: Option<String>,
    pub finds: Mutex<Vec<(String, SearchQuery)>>,
    pub counts: Mutex<Vec<CountCall>>,
}

impl RecordingStore {
    pub fn with_rows(total: u64) -> Self {
        Self {
            records: vec![json!({"title": "foo fighters"}), json!({"title": "food"})],
            total,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn last_find(&self) -> Option<(String, SearchQuery)> {
        self.finds.lock().unwrap().last().cloned()
    }

    pub fn last_count(&self) -> Option<CountCall> {
        self.counts.lock().unwrap().last().cloned()
    }

    pub fn calls(&self) -> usize {
        self.finds.lock().unwrap().len() + self.counts.lock().unwrap().len()
    }
}

#[async_trait]
impl Store for RecordingStore {
    type Record = Value;

    async fn find(&self, model: &str, query: &SearchQuery) -> Result<Vec<Value>, DbErr> {
        self.finds
            .lock()
            .unwrap()
            .push((model.to_string(), query.clone()));
        if let Some(message) = &self.failure {
            return Err(DbErr::Custom(message.clone()));
        }
        Ok(self.records.clone())
    }

    async fn count(&self, model: &str, predicate: &str, bindings: &Bindings) -> Result<u64, DbErr> {
        self.counts.lock().unwrap().push(CountCall {
            model: model.to_string(),
            predicate: predicate.to_string(),
            bindings: bindings.clone(),
        });
        if let Some(message) = &self.failure {
            return Err(DbErr::Custom(message.clone()));
        }
        Ok(self.total)
    }
}

pub async fn setup_articles_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    db.execute_unprepared(
        "CREATE TABLE articles (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            views INTEGER NOT NULL,
            secret TEXT NOT NULL
        )",
    )
    .await?;

    db.execute_unprepared(
        "INSERT INTO articles (id, title, description, views, secret) VALUES
            (1, 'Rust in Action', 'Systems programming with Rust', 120, 'k1'),
            (2, 'Async Rust', 'Futures and executors', 80, 'k2'),
            (3, 'Gardening', 'Growing tomatoes', 15, 'k3'),
            (4, 'Rusty Tools', 'Restoring old tools', 40, 'k4'),
            (5, 'Cooking', 'Trust the recipe', 60, 'k5')",
    )
    .await?;

    Ok(db)
}
