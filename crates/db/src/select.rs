//! SELECT statement builder over an aliased entity table.
//!
//! Every projected column is emitted as `{alias}.{column} AS {alias}_{column}`
//! so row mappers can read columns by prefix regardless of how many tables a
//! statement touches.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::page::Pageable;

/// Alias used for the root entity of a query.
pub const ENTITY_ALIAS: &str = "e";

/// A table reference with an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    name: &'static str,
    alias: &'static str,
}

impl Table {
    pub const fn aliased(name: &'static str, alias: &'static str) -> Self {
        Self { name, alias }
    }

    /// The table of entity `E` under the root entity alias.
    pub fn of<E: Entity>() -> Self {
        Self::aliased(E::table_name(), ENTITY_ALIAS)
    }

    /// Qualified column reference, e.g. `e.title`.
    pub fn column(&self, column: &str) -> String {
        format!("{}.{}", self.alias, column)
    }

    /// Projection of one column under its prefixed label, e.g. `e.title AS e_title`.
    pub fn projection(&self, column: &str) -> String {
        format!("{}.{} AS {}_{}", self.alias, column, self.alias, column)
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Integer(i64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Integer(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Eq(String, BindValue),
}

/// Builder for a single-table SELECT.
#[derive(Debug, Clone)]
pub struct Select {
    table: Table,
    columns: Vec<String>,
    conditions: Vec<Condition>,
    order: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    pub fn from_table(table: Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Select every declared column of `E` from its aliased table.
    pub fn entity<E: Entity>() -> Self {
        let table = Table::of::<E>();
        Self::from_table(table).columns(E::columns())
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns
            .extend(columns.iter().map(|column| self.table.projection(column)));
        self
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<BindValue>) -> Self {
        self.conditions
            .push(Condition::Eq(self.table.column(column), value.into()));
        self
    }

    /// Apply sort keys, `LIMIT` and `OFFSET` from a page request.
    ///
    /// Sort properties must be one of `sortable`; anything else is rejected
    /// before it reaches the SQL text.
    pub fn paged(mut self, pageable: &Pageable, sortable: &[&str]) -> RepositoryResult<Self> {
        for order in &pageable.sort {
            if !sortable.contains(&order.property.as_str()) {
                return Err(RepositoryError::UnknownProperty(order.property.clone()));
            }
            self.order.push(format!(
                "{} {}",
                self.table.column(&order.property),
                order.direction.as_sql()
            ));
        }
        self.limit = Some(pageable.size);
        self.offset = Some(pageable.offset());
        Ok(self)
    }

    /// Render the statement and its bind values in placeholder order.
    pub fn build(&self) -> (String, Vec<BindValue>) {
        let projection = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut sql = format!(
            "SELECT {projection} FROM {} {}",
            self.table.name, self.table.alias
        );
        let mut binds = Vec::with_capacity(self.conditions.len());

        if !self.conditions.is_empty() {
            let predicates: Vec<String> = self
                .conditions
                .iter()
                .map(|condition| match condition {
                    Condition::Eq(column, value) => {
                        binds.push(value.clone());
                        format!("{column} = ?")
                    }
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            binds.push(BindValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        }
        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ?");
            binds.push(BindValue::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
        }

        (sql, binds)
    }
}

/// Attach `binds` to `query` in order.
pub fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    binds: &[BindValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in binds {
        query = match value {
            BindValue::Integer(value) => query.bind(*value),
            BindValue::Text(value) => query.bind(value.clone()),
        };
    }
    query
}
