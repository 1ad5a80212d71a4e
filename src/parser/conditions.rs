//! Recursive parser for one bracketed argument group.
//!
//! A group is a comma separated list of `key: value` pairs. Values that are
//! documents are parsed recursively and flattened onto their key:
//!
//! ```text
//! {age: {$lt: 30, $gt: 20}}        =>  age < 30, age > 20
//! {name: {first: 'Alexa'}}         =>  name.first = 'Alexa'
//! {$or: [{ticket_no: 725}, {w: 1}]} =>  OR(ticket_no = 725, w = 1)
//! ```

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    sequence::terminated,
    IResult,
};

use super::groups::scan_depth;
use crate::ast::*;
use crate::error::{QueryError, QueryResult};

/// A parsed pair before comparison operators are attached to their field.
#[derive(Debug)]
enum Entry<'a> {
    Condition(Condition),
    /// `$gte: 21` inside a field document
    Compare {
        keyword: &'a str,
        op: Operator,
        value: &'a str,
    },
}

/// Parse one argument group into its condition sequence.
pub fn parse_conditions(group: &str) -> QueryResult<Vec<Condition>> {
    parse_entries(group)?
        .into_iter()
        .map(|entry| match entry {
            Entry::Condition(cond) => Ok(cond),
            Entry::Compare { keyword, .. } => Err(QueryError::parse(
                group.trim(),
                format!("operator '{}' is not applied to a field", keyword),
            )),
        })
        .collect()
}

fn parse_entries(text: &str) -> QueryResult<Vec<Entry<'_>>> {
    let body = strip_enclosing(text.trim(), '{', '}');
    let body = strip_enclosing(body.trim(), '[', ']');

    let mut entries = Vec::new();
    for pair in split_top_level(body) {
        let pair = strip_enclosing(pair, '{', '}').trim();
        let (key, value) = split_pair(pair)?;

        if key.starts_with('$') {
            match MongoOperator::from_keyword(key) {
                Some(MongoOperator::Logical(op)) => {
                    entries.push(Entry::Condition(parse_logical(op, key, value)?));
                }
                Some(MongoOperator::Compare(op)) => {
                    if value.starts_with('{') {
                        return Err(QueryError::parse(
                            pair,
                            format!("'{}' expects a literal value, not a document", key),
                        ));
                    }
                    entries.push(Entry::Compare {
                        keyword: key,
                        op,
                        value,
                    });
                }
                None => return Err(QueryError::UnsupportedOperator(key.to_string())),
            }
        } else if value.starts_with('{') {
            let nested = parse_entries(value)?;
            if nested.is_empty() {
                return Err(QueryError::parse(pair, "empty document"));
            }
            for entry in nested {
                entries.push(Entry::Condition(flatten(key, entry)?));
            }
        } else {
            entries.push(Entry::Condition(Condition::leaf(key, Operator::Eq, value)));
        }
    }

    Ok(entries)
}

/// Attach a nested entry to the field it was found under.
fn flatten(field: &str, entry: Entry<'_>) -> QueryResult<Condition> {
    match entry {
        Entry::Compare { op, value, .. } => Ok(Condition::leaf(field, op, value)),
        Entry::Condition(Condition::Leaf(nested)) => Ok(Condition::leaf(
            format!("{}.{}", field, nested.field),
            nested.op,
            nested.value,
        )),
        Entry::Condition(Condition::Group(group)) => Err(QueryError::parse(
            field,
            format!("{} group cannot be nested under a field", group.op),
        )),
    }
}

/// Parse the array value of `$and` / `$or`.
///
/// Each element is a document; one holding several pairs is an implicit AND.
fn parse_logical(op: LogicalOp, keyword: &str, value: &str) -> QueryResult<Condition> {
    if !value.starts_with('[') {
        return Err(QueryError::parse(
            value,
            format!("'{}' expects an array of conditions", keyword),
        ));
    }

    let mut children = Vec::new();
    for element in split_top_level(strip_enclosing(value, '[', ']')) {
        let mut conditions = parse_conditions(element)?;
        match conditions.len() {
            0 => {}
            1 => children.append(&mut conditions),
            _ => children.push(Condition::Group(LogicalGroup {
                op: LogicalOp::And,
                children: conditions,
            })),
        }
    }

    if children.is_empty() {
        return Err(QueryError::parse(
            value,
            format!("'{}' requires at least one condition", keyword),
        ));
    }

    Ok(Condition::Group(LogicalGroup { op, children }))
}

/// Remove one `open`..`close` pair, but only if the opening bracket's partner
/// is the last character.
fn strip_enclosing(text: &str, open: char, close: char) -> &str {
    if text.len() < 2 || !text.starts_with(open) || !text.ends_with(close) {
        return text;
    }
    let partner = scan_depth(text)
        .find(|&(_, _, depth)| depth <= 0)
        .map(|(idx, _, _)| idx);
    if partner == Some(text.len() - close.len_utf8()) {
        &text[open.len_utf8()..text.len() - close.len_utf8()]
    } else {
        text
    }
}

/// Split on commas that are not nested in brackets or quotes.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (idx, c, depth) in scan_depth(body) {
        if c == ',' && depth == 0 {
            parts.push(body[start..idx].trim());
            start = idx + 1;
        }
    }
    parts.push(body[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

fn parse_key(input: &str) -> IResult<&str, &str> {
    terminated(take_till(|c| c == ':'), char(':'))(input)
}

/// Split `key: value` on the first colon.
fn split_pair(pair: &str) -> QueryResult<(&str, &str)> {
    let (value, key) = parse_key(pair)
        .map_err(|_| QueryError::parse(pair, "missing ':' between key and value"))?;
    let (key, value) = (key.trim(), value.trim());

    if key.is_empty() {
        return Err(QueryError::parse(pair, "missing key"));
    }
    if key.contains(['{', '}', '[', ']']) {
        return Err(QueryError::parse(pair, format!("malformed key '{}'", key)));
    }
    if value.is_empty() {
        return Err(QueryError::parse(pair, "missing value"));
    }
    Ok((key, value))
}
