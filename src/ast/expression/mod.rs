pub mod array;
pub mod call;
pub mod function;
pub mod hash;
pub mod if_expr;
pub mod index;
pub mod while_expr;

use num_bigint::BigInt;

use super::Node;
use crate::token::Position;

pub use array::ArrayLiteral;
pub use call::CallExpression;
pub use function::FunctionLiteral;
pub use hash::HashLiteral;
pub use if_expr::IfExpression;
pub use index::IndexExpression;
pub use while_expr::WhileExpression;

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    Boolean(BooleanLiteral),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Str(StringLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    While(WhileExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Array(ArrayLiteral),
    Index(IndexExpression),
    Hash(HashLiteral),
}

impl Node for Expression {
    fn position(&self) -> &Position {
        match self {
            Expression::Identifier(e) => &e.position,
            Expression::Boolean(e) => &e.position,
            Expression::Integer(e) => &e.position,
            Expression::Float(e) => &e.position,
            Expression::Str(e) => &e.position,
            Expression::Prefix(e) => &e.position,
            Expression::Infix(e) => &e.position,
            Expression::If(e) => &e.position,
            Expression::While(e) => &e.position,
            Expression::Function(e) => &e.position,
            Expression::Call(e) => &e.position,
            Expression::Array(e) => &e.position,
            Expression::Index(e) => &e.position,
            Expression::Hash(e) => &e.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub value: bool,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub value: BigInt,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct FloatLiteral {
    pub value: f64,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub position: Position,
}

/// Unary prefix operators: `-`, `!`, `hằng`, `biến`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Minus,
    Bang,
    Const,
    Mut,
}

#[derive(Debug, Clone)]
pub struct PrefixExpression {
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
    pub position: Position,
}

/// Binary operators, including assignment (`=`) and the `thuộc` (`in`)
/// membership test, both parsed as ordinary infix expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
    In,
}

impl std::fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            InfixOperator::Assign => "=",
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Percent => "%",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::LtEq => "<=",
            InfixOperator::GtEq => ">=",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
            InfixOperator::And => "&&",
            InfixOperator::Or => "||",
            InfixOperator::In => "thuộc",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
    pub position: Position,
}
