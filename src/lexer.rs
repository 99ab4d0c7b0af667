use std::iter::Peekable;
use std::str::Chars;

use crate::token::{lookup_ident, Position, Token, TokenKind};

/// Hand-rolled scanner over `Peekable<Chars>`. Unicode identifiers (the
/// Vietnamese keyword set included) are classified by `char::is_alphabetic`
/// plus the underscore, so multi-word keywords like `còn_nếu` lex as one
/// identifier.
pub struct Lexer<'a> {
    file: String,
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: impl Into<String>, input: &'a str) -> Self {
        Self {
            file: file.into(),
            chars: input.chars().peekable(),
            line: 1,
            col: 0,
        }
    }

    fn pos(&self) -> Position {
        (self.file.clone(), self.line, self.col)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn eat_whitespace_except_newline(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    /// Produces the full token stream, terminated by exactly one `Eof`.
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn next_token(&mut self) -> Token {
        self.eat_whitespace_except_newline();

        let position = self.pos();
        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, "", position);
        };

        if c == '\n' {
            self.bump();
            return Token::new(TokenKind::Newline, "\n", position);
        }

        if c.is_alphabetic() || c == '_' {
            return self.lex_alphanumeric(position);
        }

        if c.is_ascii_digit() {
            return self.lex_numeric(position);
        }

        if c == '"' {
            return self.lex_string(position);
        }

        self.lex_special(position)
    }

    fn lex_alphanumeric(&mut self, position: Position) -> Token {
        let mut literal = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                literal.push(c);
                self.bump();
            } else {
                break;
            }
        }
        // trailing `?` or `!` folds into the identifier literal
        if matches!(self.peek(), Some('?') | Some('!')) {
            literal.push(self.bump().unwrap());
        }

        match lookup_ident(&literal) {
            Some(kind) => Token::new(kind, literal, position),
            None => Token::new(TokenKind::Ident, literal, position),
        }
    }

    fn lex_numeric(&mut self, position: Position) -> Token {
        let mut literal = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                literal.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            // lookahead: only treat as float if followed by a digit, so
            // `1.` isn't swallowed when `.` starts a dot-expression
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                literal.push(self.bump().unwrap());
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        literal.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, literal, position)
    }

    fn lex_string(&mut self, position: Position) -> Token {
        self.bump(); // opening quote
        let mut raw = String::new();
        loop {
            match self.bump() {
                None | Some('"') => break,
                Some('\\') => {
                    raw.push('\\');
                    if let Some(escaped) = self.bump() {
                        raw.push(escaped);
                    }
                }
                Some(c) => raw.push(c),
            }
        }
        let literal = unescape::unescape(&raw).unwrap_or(raw);
        Token::new(TokenKind::Str, literal, position)
    }

    fn lex_special(&mut self, position: Position) -> Token {
        let c = self.bump().unwrap();
        macro_rules! two_char {
            ($second:expr, $two_kind:expr, $one_kind:expr) => {{
                if self.peek() == Some($second) {
                    self.bump();
                    let mut literal = String::new();
                    literal.push(c);
                    literal.push($second);
                    Token::new($two_kind, literal, position)
                } else {
                    Token::new($one_kind, c.to_string(), position)
                }
            }};
        }

        match c {
            '=' => two_char!('=', TokenKind::Eq, TokenKind::Assign),
            '!' => two_char!('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => two_char!('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => two_char!('=', TokenKind::GtEq, TokenKind::Gt),
            '&' => two_char!('&', TokenKind::And, TokenKind::Illegal),
            '|' => two_char!('|', TokenKind::Or, TokenKind::Illegal),
            '+' => Token::new(TokenKind::Plus, c, position),
            '-' => Token::new(TokenKind::Minus, c, position),
            '*' => Token::new(TokenKind::Asterisk, c, position),
            '/' => Token::new(TokenKind::Slash, c, position),
            '%' => Token::new(TokenKind::Percent, c, position),
            ',' => Token::new(TokenKind::Comma, c, position),
            ';' => Token::new(TokenKind::Semicolon, c, position),
            ':' => Token::new(TokenKind::Colon, c, position),
            '.' => Token::new(TokenKind::Dot, c, position),
            '(' => Token::new(TokenKind::LParen, c, position),
            ')' => Token::new(TokenKind::RParen, c, position),
            '{' => Token::new(TokenKind::LBrace, c, position),
            '}' => Token::new(TokenKind::RBrace, c, position),
            '[' => Token::new(TokenKind::LBracket, c, position),
            ']' => Token::new(TokenKind::RBracket, c, position),
            other => Token::new(TokenKind::Illegal, other, position),
        }
    }
}

pub fn lex(file: impl Into<String>, input: &str) -> Vec<Token> {
    Lexer::new(file, input).lex()
}

pub fn lex_one_statement_tokens(input: &str) -> Vec<Token> {
    lex("<repl>".to_string(), input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex("test", src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_let_statement() {
        let tokens = lex("test", "đặt a = 5;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].literal, "a");
        assert_eq!(tokens[3].literal, "5");
    }

    #[test]
    fn lex_function_keyword() {
        assert_eq!(
            kinds("hàm"),
            vec![TokenKind::Function, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_multi_word_keyword() {
        assert_eq!(kinds("còn_nếu"), vec![TokenKind::ElseIf, TokenKind::Eof]);
    }

    #[test]
    fn lex_digraph_operators() {
        assert_eq!(
            kinds("== != <= >= && ||"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_float_vs_dot_index() {
        assert_eq!(
            kinds("1.5"),
            vec![TokenKind::Float, TokenKind::Eof]
        );
        assert_eq!(
            kinds("a.b"),
            vec![TokenKind::Ident, TokenKind::Dot, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_string_with_escapes() {
        let tokens = lex("test", r#""hi\nthere""#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].literal, "hi\nthere");
    }

    #[test]
    fn lex_identifier_with_bang_suffix() {
        let tokens = lex("test", "đẩy!");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].literal, "đẩy!");
    }

    #[test]
    fn lex_newline_preserved() {
        assert_eq!(
            kinds("đặt a = 1\na"),
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Newline,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn illegal_rune_is_not_fatal() {
        assert_eq!(kinds("@"), vec![TokenKind::Illegal, TokenKind::Eof]);
    }
}
