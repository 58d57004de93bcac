//! Base PostgreSQL grammar
//!
//! [`BaseGrammar`] is the contract the PostGIS grammar builds on: identifier
//! quoting, table prefixing, SQL types for the standard column types and the
//! table-level statements (create, alter, drop, keys and plain indexes).
//! [`PostgresGrammar`] is the stock implementation.

use crate::blueprint::{Blueprint, ColumnDefinition, ColumnType, DefaultValue, IndexCommand, IndexKind};
use crate::error::{Result, SchemaError};

/// Identifier quoting, base column types and table statements for PostgreSQL.
///
/// Everything except [`table_prefix`](BaseGrammar::table_prefix) has a
/// default implementation producing PostgreSQL syntax.
pub trait BaseGrammar {
    /// Prefix prepended to every table name.
    fn table_prefix(&self) -> &str;

    /// Quote an identifier, segment by segment: `a.b` becomes `"a"."b"`.
    fn wrap(&self, value: &str) -> String {
        value
            .split('.')
            .map(|segment| {
                if segment == "*" {
                    segment.to_string()
                } else {
                    format!("\"{}\"", segment.replace('"', "\"\""))
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quote a table name after applying the table prefix.
    fn wrap_table(&self, table: &str) -> String {
        self.wrap(&format!("{}{}", self.table_prefix(), table))
    }

    /// Quote and comma-join a list of column names.
    fn columnize(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| self.wrap(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// SQL type for the standard (non-PostGIS) column types.
    fn type_fallback(&self, column: &ColumnDefinition) -> Result<String> {
        let serial = column.auto_increment;
        let sql = match &column.column_type {
            ColumnType::Increments => "serial".to_string(),
            ColumnType::BigIncrements => "bigserial".to_string(),
            ColumnType::Integer if serial => "serial".to_string(),
            ColumnType::Integer => "integer".to_string(),
            ColumnType::BigInteger if serial => "bigserial".to_string(),
            ColumnType::BigInteger => "bigint".to_string(),
            ColumnType::SmallInteger if serial => "smallserial".to_string(),
            ColumnType::SmallInteger => "smallint".to_string(),
            ColumnType::String { length } => format!("varchar({})", length),
            ColumnType::Text => "text".to_string(),
            ColumnType::Boolean => "boolean".to_string(),
            ColumnType::Float | ColumnType::Double => "double precision".to_string(),
            ColumnType::Decimal { precision, scale } => format!("decimal({}, {})", precision, scale),
            ColumnType::Date => "date".to_string(),
            ColumnType::Timestamp => "timestamp(0) without time zone".to_string(),
            ColumnType::TimestampTz => "timestamp(0) with time zone".to_string(),
            ColumnType::Json => "json".to_string(),
            ColumnType::Binary => "bytea".to_string(),
            other => return Err(SchemaError::UnsupportedColumnType(other.name().to_string())),
        };
        Ok(sql)
    }

    /// Render a default value: booleans as `'1'`/`'0'`, numbers bare,
    /// strings single-quoted, raw expressions verbatim.
    fn default_value(&self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::Bool(b) => (if *b { "'1'" } else { "'0'" }).to_string(),
            DefaultValue::Int(n) => n.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::String(s) => format!("'{}'", s.replace('\'', "''")),
            DefaultValue::Raw(expr) => expr.clone(),
        }
    }

    /// Column clause: `"name" type[ primary key][ null| not null][ default X]`.
    fn column_clause(&self, column: &ColumnDefinition, sql_type: &str, default: Option<&str>) -> String {
        let mut clause = format!("{} {}", self.wrap(&column.name), sql_type);
        if column.auto_increment && is_integer(&column.column_type) {
            clause.push_str(" primary key");
        }
        clause.push_str(if column.nullable { " null" } else { " not null" });
        if let Some(default) = default {
            clause.push_str(" default ");
            clause.push_str(default);
        }
        clause
    }

    /// Derived index name: `{prefix}{table}_{columns}_{kind}`, lowercased,
    /// with `-` and `.` replaced by `_`.
    fn index_name(&self, table: &str, kind: IndexKind, columns: &[String]) -> String {
        format!(
            "{}{}_{}_{}",
            self.table_prefix(),
            table,
            columns.join("_"),
            kind.as_str()
        )
        .to_lowercase()
        .replace(['-', '.'], "_")
    }

    fn compile_create(&self, blueprint: &Blueprint, columns: &[String]) -> String {
        let mut sql = format!(
            "{} table {} ({})",
            if blueprint.is_temporary() {
                "create temporary"
            } else {
                "create"
            },
            self.wrap_table(blueprint.table()),
            columns.join(", ")
        );
        if let Some(parent) = blueprint.parent() {
            sql.push_str(&format!(" inherits ({})", self.wrap_table(parent)));
        }
        sql
    }

    fn compile_add(&self, blueprint: &Blueprint, columns: &[String]) -> String {
        let columns: Vec<String> = columns
            .iter()
            .map(|column| format!("add column {}", column))
            .collect();
        format!(
            "alter table {} {}",
            self.wrap_table(blueprint.table()),
            columns.join(", ")
        )
    }

    fn compile_drop(&self, blueprint: &Blueprint) -> String {
        format!("drop table {}", self.wrap_table(blueprint.table()))
    }

    fn compile_drop_if_exists(&self, blueprint: &Blueprint) -> String {
        format!("drop table if exists {}", self.wrap_table(blueprint.table()))
    }

    fn compile_primary(&self, blueprint: &Blueprint, command: &IndexCommand) -> String {
        format!(
            "alter table {} add primary key ({})",
            self.wrap_table(blueprint.table()),
            self.columnize(&command.columns)
        )
    }

    fn compile_unique(&self, blueprint: &Blueprint, command: &IndexCommand, name: &str) -> String {
        format!(
            "alter table {} add constraint {} unique ({})",
            self.wrap_table(blueprint.table()),
            self.wrap(name),
            self.columnize(&command.columns)
        )
    }

    fn compile_index(&self, blueprint: &Blueprint, command: &IndexCommand, name: &str) -> String {
        format!(
            "create index {} on {} ({})",
            self.wrap(name),
            self.wrap_table(blueprint.table()),
            self.columnize(&command.columns)
        )
    }
}

fn is_integer(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::Increments
            | ColumnType::BigIncrements
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::SmallInteger
    )
}

/// Stock PostgreSQL grammar with an optional table prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostgresGrammar {
    table_prefix: String,
}

impl PostgresGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }
}

impl BaseGrammar for PostgresGrammar {
    fn table_prefix(&self) -> &str {
        &self.table_prefix
    }
}
