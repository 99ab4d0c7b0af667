pub mod error;

use num_bigint::BigInt;
use num_traits::Num;

use crate::ast::expression::{
    ArrayLiteral, BooleanLiteral, CallExpression, Expression, FloatLiteral, FunctionLiteral,
    HashLiteral, Identifier, IfExpression, IndexExpression, InfixExpression, InfixOperator,
    IntegerLiteral, PrefixExpression, PrefixOperator, StringLiteral, WhileExpression,
};
use crate::ast::statement::{
    Block, ExpressionStatement, LetStatement, ReturnStatement, Statement,
};
use crate::ast::Program;
use crate::lexer::lex;
use crate::token::{Position, Token, TokenKind};

pub use error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Assignment,
    Logical,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Assign => Precedence::Assignment,
        TokenKind::And | TokenKind::Or | TokenKind::In => Precedence::Logical,
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::LParen | TokenKind::LBracket | TokenKind::Dot => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    source_lines: Vec<String>,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(file: impl Into<String>, source: &str) -> Self {
        let tokens = lex(file, source);
        Self {
            tokens,
            pos: 0,
            source_lines: source.lines().map(|l| l.to_string()).collect(),
            errors: Vec::new(),
        }
    }

    /// Parses the whole input to a `Program`, accumulating errors instead
    /// of aborting on the first one.
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        self.skip_terminators();
        while !self.cur_is(TokenKind::Eof) {
            let before = self.pos;
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.skip_terminators();
            self.ensure_progress(before);
        }
        (Program::new(statements), self.errors)
    }

    /// Parses exactly one statement, for the REPL's one-statement-per-prompt
    /// contract. Leftover tokens (if the caller fed more than one
    /// statement's worth of input) are ignored.
    pub fn parse_one_statement(mut self) -> (Option<Statement>, Vec<ParseError>) {
        self.skip_terminators();
        let stmt = if self.cur_is(TokenKind::Eof) {
            None
        } else {
            self.parse_statement()
        };
        (stmt, self.errors)
    }

    fn cur(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur().kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn skip_terminators(&mut self) {
        while matches!(self.cur().kind, TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// A statement that records a parse error without consuming a token
    /// (e.g. `expect_peek` failing, or a prefix position with no parse
    /// rule) would otherwise stall the `parse_program`/`parse_block` loops
    /// forever. Force at least one token of progress whenever a parse
    /// attempt left `pos` exactly where it started.
    fn ensure_progress(&mut self, before: usize) {
        if self.pos == before && !self.cur_is(TokenKind::Eof) {
            self.advance();
        }
    }

    fn line_text_at(&self, position: &Position) -> Option<String> {
        self.source_lines.get(position.1.saturating_sub(1)).cloned()
    }

    fn error_here(&mut self, message: impl Into<String>) {
        let position = self.cur().position.clone();
        let line_text = self.line_text_at(&position);
        self.errors.push(ParseError::new(message, position, line_text));
    }

    /// Consumes `kind` if it's next, else records an error and does not
    /// advance.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            let position = self.peek().position.clone();
            let line_text = self.line_text_at(&position);
            self.errors.push(ParseError::new(
                format!("expected next token to be {:?}, got {:?} instead", kind, self.peek().kind),
                position,
                line_text,
            ));
            false
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur().kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                let position = self.cur().position.clone();
                self.advance();
                Some(Statement::Break(position))
            }
            TokenKind::Continue => {
                let position = self.cur().position.clone();
                self.advance();
                Some(Statement::Continue(position))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let position = self.cur().position.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur().literal.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Let(LetStatement {
            name,
            value,
            position,
        }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let position = self.cur().position.clone();
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Return(ReturnStatement { value, position }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let position = self.cur().position.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if matches!(self.peek().kind, TokenKind::Semicolon | TokenKind::Newline) {
            self.advance();
        }
        Some(Statement::Expression(ExpressionStatement {
            expression,
            position,
        }))
    }

    fn parse_block(&mut self) -> Block {
        let position = self.cur().position.clone();
        self.advance(); // consume `{`
        let mut statements = Vec::new();
        self.skip_terminators();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            let before = self.pos;
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.skip_terminators();
            self.ensure_progress(before);
        }
        if self.cur_is(TokenKind::RBrace) {
            self.advance();
        } else {
            self.error_here("expected `}` to close block");
        }
        Block {
            statements,
            position,
        }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !matches!(self.peek().kind, TokenKind::Semicolon | TokenKind::Newline | TokenKind::Eof)
            && precedence < precedence_of(self.peek().kind)
        {
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur().kind {
            TokenKind::Ident => Some(self.parse_identifier()),
            TokenKind::True | TokenKind::False => Some(self.parse_boolean()),
            TokenKind::Int => self.parse_integer(),
            TokenKind::Float => self.parse_float(),
            TokenKind::Str => Some(self.parse_string()),
            TokenKind::Bang | TokenKind::Minus | TokenKind::Const | TokenKind::Mut => {
                self.parse_prefix_expression()
            }
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::While => self.parse_while_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            kind => {
                self.error_here(format!("no prefix parse function for {kind:?} found"));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur().kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            TokenKind::Dot => self.parse_dot_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_identifier(&self) -> Expression {
        Expression::Identifier(Identifier {
            value: self.cur().literal.clone(),
            position: self.cur().position.clone(),
        })
    }

    fn parse_boolean(&self) -> Expression {
        Expression::Boolean(BooleanLiteral {
            value: self.cur_is(TokenKind::True),
            position: self.cur().position.clone(),
        })
    }

    fn parse_integer(&mut self) -> Option<Expression> {
        let literal = &self.cur().literal;
        match BigInt::from_str_radix(literal, 10) {
            Ok(value) => Some(Expression::Integer(IntegerLiteral {
                value,
                position: self.cur().position.clone(),
            })),
            Err(_) => {
                self.error_here(format!("could not parse {literal:?} as integer"));
                None
            }
        }
    }

    fn parse_float(&mut self) -> Option<Expression> {
        let literal = &self.cur().literal;
        match literal.parse::<f64>() {
            Ok(value) => Some(Expression::Float(FloatLiteral {
                value,
                position: self.cur().position.clone(),
            })),
            Err(_) => {
                self.error_here(format!("could not parse {literal:?} as float"));
                None
            }
        }
    }

    fn parse_string(&self) -> Expression {
        Expression::Str(StringLiteral {
            value: self.cur().literal.clone(),
            position: self.cur().position.clone(),
        })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let position = self.cur().position.clone();
        let operator = match self.cur().kind {
            TokenKind::Bang => PrefixOperator::Bang,
            TokenKind::Minus => PrefixOperator::Minus,
            TokenKind::Const => PrefixOperator::Const,
            TokenKind::Mut => PrefixOperator::Mut,
            _ => unreachable!(),
        };
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(PrefixExpression {
            operator,
            right: Box::new(right),
            position,
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let position = self.cur().position.clone();
        let mut conditions = Vec::new();
        let mut consequences = Vec::new();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        conditions.push(self.parse_expression(Precedence::Lowest)?);
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        consequences.push(self.parse_block());

        let mut alternative = None;
        loop {
            if self.peek_is(TokenKind::ElseIf) {
                self.advance();
                if !self.expect_peek(TokenKind::LParen) {
                    return None;
                }
                self.advance();
                conditions.push(self.parse_expression(Precedence::Lowest)?);
                if !self.expect_peek(TokenKind::RParen) {
                    return None;
                }
                if !self.expect_peek(TokenKind::LBrace) {
                    return None;
                }
                consequences.push(self.parse_block());
                continue;
            }
            if self.peek_is(TokenKind::Else) {
                self.advance();
                if !self.expect_peek(TokenKind::LBrace) {
                    return None;
                }
                alternative = Some(self.parse_block());
            }
            break;
        }

        Some(Expression::If(IfExpression {
            conditions,
            consequences,
            alternative,
            position,
        }))
    }

    fn parse_while_expression(&mut self) -> Option<Expression> {
        let position = self.cur().position.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block();
        Some(Expression::While(WhileExpression {
            condition: Box::new(condition),
            body,
            position,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let position = self.cur().position.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_params()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block();
        Some(Expression::Function(FunctionLiteral {
            params,
            body,
            position,
        }))
    }

    fn parse_function_params(&mut self) -> Option<Vec<Identifier>> {
        let mut params = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Some(params);
        }
        self.advance();
        params.push(Identifier {
            value: self.cur().literal.clone(),
            position: self.cur().position.clone(),
        });
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            params.push(Identifier {
                value: self.cur().literal.clone(),
                position: self.cur().position.clone(),
            });
        }
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let position = self.cur().position.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression {
            function: Box::new(function),
            arguments,
            position,
        }))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.advance();
            return Some(list);
        }
        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let position = self.cur().position.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { elements, position }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur().position.clone();
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        Some(Expression::Index(IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
            position,
        }))
    }

    fn parse_dot_expression(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur().position.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let field = self.cur().literal.clone();
        let field_position = self.cur().position.clone();
        Some(Expression::Index(IndexExpression {
            left: Box::new(left),
            index: Box::new(Expression::Str(StringLiteral {
                value: field,
                position: field_position,
            })),
            position,
        }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let position = self.cur().position.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.advance();
            let (key, value) = self.parse_hash_pair()?;
            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expression::Hash(HashLiteral { pairs, position }))
    }

    /// Accepts `key: value` or a bare identifier `k`, which desugars to
    /// `"k": k`.
    fn parse_hash_pair(&mut self) -> Option<(Expression, Expression)> {
        if self.cur_is(TokenKind::Ident) && self.peek_is(TokenKind::Comma)
            || self.cur_is(TokenKind::Ident) && self.peek_is(TokenKind::RBrace)
        {
            let name = self.cur().literal.clone();
            let position = self.cur().position.clone();
            let key = Expression::Str(StringLiteral {
                value: name.clone(),
                position: position.clone(),
            });
            let value = Expression::Identifier(Identifier {
                value: name,
                position,
            });
            return Some((key, value));
        }

        let key = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Colon) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some((key, value))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur().position.clone();
        let operator = match self.cur().kind {
            TokenKind::Assign => InfixOperator::Assign,
            TokenKind::Plus => InfixOperator::Plus,
            TokenKind::Minus => InfixOperator::Minus,
            TokenKind::Asterisk => InfixOperator::Asterisk,
            TokenKind::Slash => InfixOperator::Slash,
            TokenKind::Percent => InfixOperator::Percent,
            TokenKind::Lt => InfixOperator::Lt,
            TokenKind::Gt => InfixOperator::Gt,
            TokenKind::LtEq => InfixOperator::LtEq,
            TokenKind::GtEq => InfixOperator::GtEq,
            TokenKind::Eq => InfixOperator::Eq,
            TokenKind::NotEq => InfixOperator::NotEq,
            TokenKind::And => InfixOperator::And,
            TokenKind::Or => InfixOperator::Or,
            TokenKind::In => InfixOperator::In,
            kind => {
                self.error_here(format!("{kind:?} is not an infix operator"));
                return None;
            }
        };
        let precedence = precedence_of(self.cur().kind);
        self.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix(InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            position,
        }))
    }
}

/// Convenience wrapper matching the collaborator contract the REPL needs:
/// parse a whole file/program in one shot.
pub fn parse_program(file: impl Into<String>, source: &str) -> (Program, Vec<ParseError>) {
    Parser::new(file, source).parse_program()
}

pub fn parse_one_statement(source: &str) -> (Option<Statement>, Vec<ParseError>) {
    Parser::new("<repl>", source).parse_one_statement()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse_program("test", source);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        program
    }

    #[test]
    fn let_statement() {
        let program = parse_ok("đặt a = 5;");
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(program.statements[0], Statement::Let(_)));
    }

    #[test]
    fn assignment_parses_as_a_full_infix_expression() {
        // Regression test: `=` must bind above `Precedence::Lowest` or the
        // Pratt loop's `precedence < precedence_of(peek)` check can never
        // admit it, leaving the right-hand side unparsed.
        let program = parse_ok("a[1] = 9;");
        assert_eq!(program.statements.len(), 1);
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Infix(infix) = &stmt.expression else {
            panic!("expected an infix expression, got {:?}", stmt.expression);
        };
        assert_eq!(infix.operator, InfixOperator::Assign);
        assert!(matches!(*infix.right, Expression::Integer(_)));
    }

    #[test]
    fn assignment_binds_looser_than_arithmetic() {
        let program = parse_ok("a = 1 + 2;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Infix(infix) = &stmt.expression else {
            panic!("expected an infix expression");
        };
        assert_eq!(infix.operator, InfixOperator::Assign);
        assert!(matches!(*infix.right, Expression::Infix(_)));
    }

    #[test]
    fn if_elif_else_chain() {
        let program = parse_ok("nếu (a) { 1 } còn_nếu (b) { 2 } ngược_lại { 3 }");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::If(if_expr) = &stmt.expression else {
            panic!("expected an if expression");
        };
        assert_eq!(if_expr.conditions.len(), 2);
        assert_eq!(if_expr.consequences.len(), 2);
        assert!(if_expr.alternative.is_some());
    }

    #[test]
    fn dot_expression_desugars_to_string_index() {
        let program = parse_ok("a.b;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Index(index) = &stmt.expression else {
            panic!("expected an index expression, got {:?}", stmt.expression);
        };
        assert!(matches!(*index.index, Expression::Str(_)));
    }

    #[test]
    fn bare_identifier_hash_key_desugars() {
        let program = parse_ok("{k};");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Hash(hash) = &stmt.expression else {
            panic!("expected a hash literal, got {:?}", stmt.expression);
        };
        assert_eq!(hash.pairs.len(), 1);
        assert!(matches!(hash.pairs[0].0, Expression::Str(_)));
        assert!(matches!(hash.pairs[0].1, Expression::Identifier(_)));
    }

    #[test]
    fn parse_errors_accumulate_instead_of_aborting() {
        let (_, errors) = parse_program("test", "đặt = ; đặt = ;");
        assert!(errors.len() >= 2);
    }
}
