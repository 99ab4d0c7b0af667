use std::fmt;

/// Source position of a token: file name, 1-based line, 1-based column.
pub type Position = (String, usize, usize);

pub fn dummy_position() -> Position {
    (String::new(), 0, 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,
    Newline,

    Ident,
    Int,
    Float,
    Str,

    Assign,
    Plus,
    Minus,
    Bang,
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

    Comma,
    Semicolon,
    Colon,
    Dot,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // keywords
    Let,
    Function,
    Mut,
    Const,
    True,
    False,
    If,
    ElseIf,
    Else,
    Return,
    While,
    Break,
    Continue,
    In,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

/// Maps a reserved Vietnamese keyword to its token kind; identifiers that
/// don't match any entry fall through to `TokenKind::Ident` at the call site.
pub fn lookup_ident(ident: &str) -> Option<TokenKind> {
    match ident {
        "đặt" => Some(TokenKind::Let),
        "hàm" => Some(TokenKind::Function),
        "biến" => Some(TokenKind::Mut),
        "hằng" => Some(TokenKind::Const),
        "đúng" => Some(TokenKind::True),
        "sai" => Some(TokenKind::False),
        "nếu" => Some(TokenKind::If),
        "còn_nếu" => Some(TokenKind::ElseIf),
        "ngược_lại" => Some(TokenKind::Else),
        "trả_về" => Some(TokenKind::Return),
        "khi" => Some(TokenKind::While),
        "ngắt" => Some(TokenKind::Break),
        "tiếp" => Some(TokenKind::Continue),
        "thuộc" => Some(TokenKind::In),
        _ => None,
    }
}
