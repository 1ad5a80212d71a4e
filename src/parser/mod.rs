//! MongoDB `find` query parser.
//!
//! Turns `db.<table>.find(filter, projection)` text into a [`FindQuery`].
//!
//! # Syntax Overview
//!
//! ```text
//! db.user.find({age: {$gte: 21}}, {name: 1, _id: 1});
//! ─┬ ──┬─ ─┬── ─────────┬──────── ─────────┬───────
//!  │   │   │            │                  │
//!  │   │   │            │                  └── Projection (second group)
//!  │   │   │            └── Filter (first group)
//!  │   │   └── find call
//!  │   └── Table name
//!  └── Database handle
//! ```
//!
//! With a single group, the group is a projection when every value is `0` or
//! `1`, and a filter otherwise.

pub mod conditions;
pub mod groups;


use nom::{
    bytes::complete::{tag, take_while1},
    sequence::delimited,
    IResult,
};
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{QueryError, QueryResult};
pub use conditions::parse_conditions;
pub use groups::split_groups;

/// Parse a complete `find` query string.
pub fn parse(input: &str) -> QueryResult<FindQuery> {
    let input = input.trim();

    let (rest, table) = parse_table_name(input).map_err(|_| QueryError::TableNameNotFound)?;
    let args = find_arguments(rest);
    debug!(table = table, args = args, "extracted find() call");

    let groups = split_groups(args);
    trace!(count = groups.len(), ?groups, "split argument groups");

    let total = count_groups(args);
    if total > 2 {
        return Err(QueryError::TooManyArgumentGroups(total));
    }

    let (projection, filter) = match groups.as_slice() {
        [] => (Projection::All, Vec::new()),
        [group] => {
            let conditions = parse_conditions(group)?;
            if is_projection(&conditions) {
                debug!("single group classified as projection");
                (Projection::Columns(conditions), Vec::new())
            } else {
                debug!("single group classified as filter");
                (Projection::All, conditions)
            }
        }
        [filter, projection] => {
            let filter = parse_conditions(filter)?;
            let columns = parse_conditions(projection)?;
            let projection = if columns.is_empty() {
                Projection::All
            } else {
                Projection::Columns(columns)
            };
            (projection, filter)
        }
        _ => return Err(QueryError::TooManyArgumentGroups(groups.len())),
    };

    Ok(FindQuery {
        table: table.to_string(),
        projection,
        filter,
    })
}

/// Parse the table name out of `db.<table>.find`.
fn parse_table_name(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("db."),
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        tag(".find"),
    )(input)
}

/// Text between the `(` after `find` and its partner `)`, or `""` if there is
/// no closed call. Chained calls such as `.limit(5)` are ignored.
fn find_arguments(rest: &str) -> &str {
    let Some(open) = rest.find('(') else {
        return "";
    };

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut prev = '(';
    for (idx, c) in rest[open..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => continue,
            (None, '\'' | '"') if matches!(prev, '(' | '{' | '[' | ':' | ',') => {
                quote = Some(c)
            }
            (None, '(') => depth += 1,
            (None, ')') => {
                depth -= 1;
                if depth == 0 {
                    return &rest[open + 1..open + idx];
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev = c;
        }
    }
    ""
}

/// Number of top-level groups in an argument list, counting past the two
/// that `split_groups` separates.
fn count_groups(args: &str) -> usize {
    let mut count = 0;
    let mut rest = args;
    loop {
        let groups = split_groups(rest);
        count += groups.len().min(1);
        match groups.get(1) {
            Some(next) => rest = next,
            None => return count,
        }
    }
}

/// Whether a lone argument group is a projection: every condition is a plain
/// `field: 1` or `field: 0` inclusion flag.
pub fn is_projection(conditions: &[Condition]) -> bool {
    !conditions.is_empty()
        && conditions.iter().all(|cond| {
            matches!(
                cond,
                Condition::Leaf(Comparison { op: Operator::Eq, value, .. })
                    if value == "1" || value == "0"
            )
        })
}
