//! Condition tree produced by the parser and consumed by the transpiler.

use serde::{Deserialize, Serialize};

/// Logical operator between conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// Comparison operator of a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Operator {
    /// Implicit equality (`{name: 'julio'}`)
    #[default]
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "IN",
        };
        write!(f, "{}", op)
    }
}

/// A `$`-prefixed MongoDB query operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MongoOperator {
    Logical(LogicalOp),
    Compare(Operator),
}

impl MongoOperator {
    /// Look up a `$` keyword in the fixed translation table.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let op = match keyword {
            "$or" => Self::Logical(LogicalOp::Or),
            "$and" => Self::Logical(LogicalOp::And),
            "$lt" => Self::Compare(Operator::Lt),
            "$lte" => Self::Compare(Operator::Lte),
            "$gt" => Self::Compare(Operator::Gt),
            "$gte" => Self::Compare(Operator::Gte),
            "$ne" => Self::Compare(Operator::Ne),
            "$in" => Self::Compare(Operator::In),
            _ => return None,
        };
        Some(op)
    }
}

/// A single comparison: `field op value`.
///
/// `value` keeps the literal text from the query (`'Alexa'`, `21`, `true`,
/// `[725, 542]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub field: String,
    #[serde(default)]
    pub op: Operator,
    pub value: String,
}

impl Comparison {
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// Children joined by `$and` / `$or`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalGroup {
    pub op: LogicalOp,
    pub children: Vec<Condition>,
}

/// A parsed condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Leaf(Comparison),
    Group(LogicalGroup),
}

impl Condition {
    /// Shorthand for a leaf condition.
    pub fn leaf(field: impl Into<String>, op: Operator, value: impl Into<String>) -> Self {
        Condition::Leaf(Comparison::new(field, op, value))
    }

    pub fn as_leaf(&self) -> Option<&Comparison> {
        match self {
            Condition::Leaf(c) => Some(c),
            Condition::Group(_) => None,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Leaf(c) => write!(f, "{} {} {}", c.field, c.op, c.value),
            Condition::Group(g) => {
                let parts: Vec<String> = g.children.iter().map(|c| c.to_string()).collect();
                write!(f, "{}({})", g.op, parts.join(", "))
            }
        }
    }
}

/// The SELECT list of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Projection {
    /// `SELECT *`
    #[default]
    All,
    /// Columns named by the leaves, in query order.
    Columns(Vec<Condition>),
}

/// A translated `db.<table>.find(filter, projection)` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindQuery {
    pub table: String,
    pub projection: Projection,
    pub filter: Vec<Condition>,
}
