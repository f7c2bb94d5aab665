use async_trait::async_trait;
use sea_orm::sea_query::{
    Alias, Asterisk, ConditionalStatement, Expr, Order, OrderedStatement, Query, SelectStatement,
    SimpleExpr,
};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, JsonValue,
    Value,
};
use std::collections::HashMap;

use crate::filtering::{Bindings, BoundValue, Direction, SearchQuery};
use crate::traits::Store;

/// [`Store`] running searches through a Sea-ORM connection.
///
/// Rows come back as JSON objects keyed by column name. A model maps to the
/// table of the same name unless overridden with [`SeaOrmStore::with_table`].
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    tables: HashMap<String, String>,
}

impl SeaOrmStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            tables: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, model: impl Into<String>, table: impl Into<String>) -> Self {
        self.tables.insert(model.into(), table.into());
        self
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn table<'a>(&'a self, model: &'a str) -> &'a str {
        self.tables.get(model).map_or(model, String::as_str)
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    type Record = JsonValue;

    async fn find(&self, model: &str, query: &SearchQuery) -> Result<Vec<JsonValue>, DbErr> {
        let backend = self.db.get_database_backend();
        let select = select_statement(self.table(model), query, backend)?;
        let statement = backend.build(&select);
        tracing::trace!(sql = %statement.sql, "Executing search statement");
        JsonValue::find_by_statement(statement).all(&self.db).await
    }

    async fn count(&self, model: &str, predicate: &str, bindings: &Bindings) -> Result<u64, DbErr> {
        let backend = self.db.get_database_backend();
        let select = count_statement(self.table(model), predicate, bindings, backend)?;
        let statement = backend.build(&select);
        tracing::trace!(sql = %statement.sql, "Executing count statement");
        let row = self
            .db
            .query_one(statement)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("count of {model} returned no row")))?;
        let total: i64 = row.try_get("", "num_items")?;
        u64::try_from(total).map_err(|_| DbErr::Type(format!("negative count {total}")))
    }
}

impl From<Direction> for Order {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Ascending => Order::Asc,
            Direction::Descending => Order::Desc,
        }
    }
}

fn select_statement(
    table: &str,
    query: &SearchQuery,
    backend: DatabaseBackend,
) -> Result<SelectStatement, DbErr> {
    let mut select = Query::select();
    select.column(Asterisk).from(Alias::new(table));
    if let Some(condition) = condition(&query.predicate, &query.bindings, backend)? {
        select.and_where(condition);
    }
    for (properties, direction) in &query.sort {
        select.order_by_expr(Expr::cust(properties.as_str()), (*direction).into());
    }
    if let Some(limit) = query.limit {
        select.limit(limit);
        if let Some(offset) = query.bounded_offset() {
            select.offset(offset);
        }
    }
    Ok(select)
}

fn count_statement(
    table: &str,
    predicate: &str,
    bindings: &Bindings,
    backend: DatabaseBackend,
) -> Result<SelectStatement, DbErr> {
    let mut select = Query::select();
    select
        .expr_as(Expr::col(Asterisk).count(), Alias::new("num_items"))
        .from(Alias::new(table));
    if let Some(condition) = condition(predicate, bindings, backend)? {
        select.and_where(condition);
    }
    Ok(select)
}

/// The predicate as a custom expression carrying its values, `None` when empty
fn condition(
    predicate: &str,
    bindings: &Bindings,
    backend: DatabaseBackend,
) -> Result<Option<SimpleExpr>, DbErr> {
    if predicate.is_empty() {
        return Ok(None);
    }
    let (sql, values) = to_positional(predicate, bindings, backend)?;
    Ok(Some(Expr::cust_with_values(sql, values)))
}

fn to_value(bound: &BoundValue) -> Value {
    match bound {
        BoundValue::Integer(integer) => Value::from(*integer),
        BoundValue::Float(float) => Value::from(*float),
        BoundValue::Text(text) => Value::from(text.clone()),
    }
}

/// Rewrite `:name` placeholders into the backend's positional form.
///
/// Values are emitted in order of appearance, so a name used twice is bound
/// twice. Text inside quotes is copied untouched.
fn to_positional(
    sql: &str,
    bindings: &Bindings,
    backend: DatabaseBackend,
) -> Result<(String, Vec<Value>), DbErr> {
    let mut rewritten = String::with_capacity(sql.len());
    let mut values = Vec::with_capacity(bindings.len());
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices();

    while let Some((start, c)) = chars.next() {
        match (quote, c) {
            (Some(open), _) => {
                if c == open {
                    quote = None;
                }
                rewritten.push(c);
            }
            (None, '\'' | '"' | '`') => {
                quote = Some(c);
                rewritten.push(c);
            }
            (None, ':') => {
                let after = &sql[start + 1..];
                let name_len = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                let name = &after[..name_len];
                let value = bindings.get(name).ok_or_else(|| {
                    DbErr::Custom(format!("no value bound for placeholder ':{name}'"))
                })?;
                values.push(to_value(value));
                match backend {
                    DatabaseBackend::Postgres => rewritten.push_str(&format!("${}", values.len())),
                    _ => rewritten.push('?'),
                }
                // names are ASCII, one char per byte
                if name_len > 0 {
                    chars.nth(name_len - 1);
                }
            }
            (None, _) => rewritten.push(c),
        }
    }

    Ok((rewritten, values))
}
