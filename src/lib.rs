//! # mongo2sql
//!
//! Translates a MongoDB `find` query into an SQL `SELECT` statement.
//!
//! ## Quick Example
//!
//! ```rust
//! let sql = mongo2sql::translate("db.user.find({age: {$gte: 21}}, {name: 1, _id: 1});").unwrap();
//! assert_eq!(sql, "SELECT name, _id FROM user WHERE age >= 21;");
//! ```
//!
//! ## Operators
//!
//! | MongoDB | SQL   |
//! |---------|-------|
//! | `$or`   | `OR`  |
//! | `$and`  | `AND` |
//! | `$lt`   | `<`   |
//! | `$lte`  | `<=`  |
//! | `$gt`   | `>`   |
//! | `$gte`  | `>=`  |
//! | `$ne`   | `!=`  |
//! | `$in`   | `IN`  |
//!
//! Values are copied into the SQL as written; nothing is quoted or escaped.

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::parser::parse;
    pub use crate::transpiler::{RenderOptions, ToSql};
}

use transpiler::ToSql;

/// Parse a `db.<table>.find(...)` query into its table, projection and filter.
///
/// # Example
///
/// ```
/// use mongo2sql::parse;
///
/// let query = parse("db.user.find({name: 'julio'})").unwrap();
/// assert_eq!(query.table, "user");
/// ```
pub fn parse(input: &str) -> Result<ast::FindQuery, error::QueryError> {
    parser::parse(input)
}

/// Translate a `find` query into SQL with default rendering options.
pub fn translate(input: &str) -> Result<String, error::QueryError> {
    translate_with(input, &transpiler::RenderOptions::default())
}

/// Translate a `find` query into SQL.
pub fn translate_with(
    input: &str,
    options: &transpiler::RenderOptions,
) -> Result<String, error::QueryError> {
    Ok(parser::parse(input)?.to_sql_with(options))
}
