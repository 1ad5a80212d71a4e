//! SQL Transpiler for parsed `find` queries.
//!
//! Converts a [`FindQuery`] into a `SELECT` statement.

use serde::{Deserialize, Serialize};

use crate::ast::*;

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Wrap `$and`/`$or` groups of two or more conditions in parentheses.
    ///
    /// Off by default: groups are spliced inline, so a nested group
    /// associates left to right with its neighbours.
    pub parenthesize_groups: bool,
}

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string with default options.
    fn to_sql(&self) -> String {
        self.to_sql_with(&RenderOptions::default())
    }

    /// Convert this node to a SQL string.
    fn to_sql_with(&self, options: &RenderOptions) -> String;
}

impl ToSql for FindQuery {
    fn to_sql_with(&self, options: &RenderOptions) -> String {
        let mut sql = String::from("SELECT ");
        sql.push_str(&self.projection.to_sql_with(options));

        // FROM
        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        // WHERE - top level conditions are an implicit AND
        let where_clause = join_conditions(&self.filter, LogicalOp::And, options);
        if !where_clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause);
        }

        sql.push(';');
        sql
    }
}

impl ToSql for Projection {
    fn to_sql_with(&self, _options: &RenderOptions) -> String {
        let columns: Vec<&str> = match self {
            Projection::All => Vec::new(),
            Projection::Columns(conditions) => conditions
                .iter()
                .filter_map(Condition::as_leaf)
                .map(|c| c.field.as_str())
                .collect(),
        };

        if columns.is_empty() {
            "*".to_string()
        } else {
            columns.join(", ")
        }
    }
}

impl ToSql for Condition {
    fn to_sql_with(&self, options: &RenderOptions) -> String {
        match self {
            Condition::Leaf(comparison) => comparison.to_sql_with(options),
            Condition::Group(group) => {
                let inner = join_conditions(&group.children, group.op, options);
                if options.parenthesize_groups && group.children.len() > 1 {
                    format!("({})", inner)
                } else {
                    inner
                }
            }
        }
    }
}

impl ToSql for Comparison {
    fn to_sql_with(&self, _options: &RenderOptions) -> String {
        match self.op {
            Operator::Eq => format!("{} = {}", self.field, boolean_literal(&self.value)),
            op => format!("{} {} {}", self.field, op, self.value),
        }
    }
}

fn join_conditions(conditions: &[Condition], op: LogicalOp, options: &RenderOptions) -> String {
    let joiner = match op {
        LogicalOp::And => " AND ",
        LogicalOp::Or => " OR ",
    };
    let parts: Vec<String> = conditions.iter().map(|c| c.to_sql_with(options)).collect();
    parts.join(joiner)
}

/// `true`/`false` in any case become `TRUE`/`FALSE`; anything else is kept.
fn boolean_literal(value: &str) -> String {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        value.to_ascii_uppercase()
    } else {
        value.to_string()
    }
}
