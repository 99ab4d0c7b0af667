use crate::ast::statement::Block;
use crate::token::Position;

use super::Identifier;

#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub params: Vec<Identifier>,
    pub body: Block,
    pub position: Position,
}
