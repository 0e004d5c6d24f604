//! The expression tree produced by the marker parser

use std::fmt;

/// A comparison operator in a marker expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
    /// `~=`
    TildeEqual,
    /// `===`
    ExactEqual,
    /// `in`
    In,
    /// `not in`
    NotIn,
}

impl MarkerOperator {
    /// The operator as it is written in a marker
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerOperator::Equal => "==",
            MarkerOperator::NotEqual => "!=",
            MarkerOperator::LessThan => "<",
            MarkerOperator::LessEqual => "<=",
            MarkerOperator::GreaterThan => ">",
            MarkerOperator::GreaterEqual => ">=",
            MarkerOperator::TildeEqual => "~=",
            MarkerOperator::ExactEqual => "===",
            MarkerOperator::In => "in",
            MarkerOperator::NotIn => "not in",
        }
    }
}

impl fmt::Display for MarkerOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `and` / `or`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOperator {
    /// Both sides must hold
    And,
    /// Either side must hold
    Or,
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOperator::And => f.write_str("and"),
            BoolOperator::Or => f.write_str("or"),
        }
    }
}

/// An operand of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerValue {
    /// A quoted string
    Literal(String),
    /// A variable such as `python_version` or `sys.platform`. Dotted names
    /// are stored joined with `.`.
    Identifier(String),
}

impl fmt::Display for MarkerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerValue::Literal(value) if value.contains('\'') => write!(f, "\"{value}\""),
            MarkerValue::Literal(value) => write!(f, "'{value}'"),
            MarkerValue::Identifier(name) => f.write_str(name),
        }
    }
}

/// A parsed environment marker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerExpression {
    /// `<value> <op> <value>`
    Compare {
        /// Left-hand operand
        lhs: MarkerValue,
        /// Comparison operator
        operator: MarkerOperator,
        /// Right-hand operand
        rhs: MarkerValue,
    },
    /// `<expr> and <expr>` / `<expr> or <expr>`
    BoolOp {
        /// The boolean combinator
        operator: BoolOperator,
        /// Left-hand expression
        lhs: Box<MarkerExpression>,
        /// Right-hand expression
        rhs: Box<MarkerExpression>,
    },
}

impl fmt::Display for MarkerExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerExpression::Compare { lhs, operator, rhs } => write!(f, "{lhs} {operator} {rhs}"),
            MarkerExpression::BoolOp { operator, lhs, rhs } => {
                write_operand(f, lhs, *operator)?;
                write!(f, " {operator} ")?;
                write_operand(f, rhs, *operator)
            }
        }
    }
}

/// `or` binds looser than `and`, so an `or` nested below an `and` needs
/// parentheses to keep its meaning.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &MarkerExpression,
    parent: BoolOperator,
) -> fmt::Result {
    match expr {
        MarkerExpression::BoolOp {
            operator: BoolOperator::Or,
            ..
        } if parent == BoolOperator::And => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}
