//! Token definitions shared by the lexer, parser, and formatter.

use suru_core::StringId;

/// All kinds of tokens the lexer produces.
///
/// Keyword and punctuation tokens carry no text: their lexeme is fully
/// determined by the kind. Identifier, number, string, and trivia tokens
/// intern their lexeme into the [`StringStore`](suru_core::StringStore).
/// The interpolation boundary tokens (`StringIStart`, `StringIEnd`) carry
/// the backtick delimiter count as interned decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Newline,

    // Keywords
    Module,
    Import,
    Export,
    Return,
    Match,
    Type,
    Try,
    And,
    Or,
    True,
    False,
    This,
    Partial,

    Identifier,

    // Numbers
    Number,
    NumberBinary,
    NumberOctal,
    NumberHex,
    NumberFloat,

    // Punctuation
    Colon,
    Semicolon,
    Comma,
    Dot,
    Pipe,
    Underscore,
    Star,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Plus,
    Minus,

    // Strings
    String,
    StringIStart,
    StringI,
    StringIEnd,
    StringIIndent,
    StringIExprStart,
    StringIExprEnd,

    Comment,
    Documentation,
    Unknown,
}

impl TokenKind {
    /// The `TOKEN_*` spelling used by the token-stream dump.
    pub fn dump_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "TOKEN_EOF",
            TokenKind::Newline => "TOKEN_NEWLINE",
            TokenKind::Module => "TOKEN_MODULE",
            TokenKind::Import => "TOKEN_IMPORT",
            TokenKind::Export => "TOKEN_EXPORT",
            TokenKind::Return => "TOKEN_RETURN",
            TokenKind::Match => "TOKEN_MATCH",
            TokenKind::Type => "TOKEN_TYPE",
            TokenKind::Try => "TOKEN_TRY",
            TokenKind::And => "TOKEN_AND",
            TokenKind::Or => "TOKEN_OR",
            TokenKind::True => "TOKEN_TRUE",
            TokenKind::False => "TOKEN_FALSE",
            TokenKind::This => "TOKEN_THIS",
            TokenKind::Partial => "TOKEN_PARTIAL",
            TokenKind::Identifier => "TOKEN_IDENTIFIER",
            TokenKind::Number => "TOKEN_NUMBER",
            TokenKind::NumberBinary => "TOKEN_NUMBER_BINARY",
            TokenKind::NumberOctal => "TOKEN_NUMBER_OCTAL",
            TokenKind::NumberHex => "TOKEN_NUMBER_HEX",
            TokenKind::NumberFloat => "TOKEN_NUMBER_FLOAT",
            TokenKind::Colon => "TOKEN_COLON",
            TokenKind::Semicolon => "TOKEN_SEMICOLON",
            TokenKind::Comma => "TOKEN_COMMA",
            TokenKind::Dot => "TOKEN_DOT",
            TokenKind::Pipe => "TOKEN_PIPE",
            TokenKind::Underscore => "TOKEN_UNDERSCORE",
            TokenKind::Star => "TOKEN_STAR",
            TokenKind::LParen => "TOKEN_LPAREN",
            TokenKind::RParen => "TOKEN_RPAREN",
            TokenKind::LBrace => "TOKEN_LBRACE",
            TokenKind::RBrace => "TOKEN_RBRACE",
            TokenKind::LBracket => "TOKEN_LBRACKET",
            TokenKind::RBracket => "TOKEN_RBRACKET",
            TokenKind::LAngle => "TOKEN_LANGLE",
            TokenKind::RAngle => "TOKEN_RANGLE",
            TokenKind::Plus => "TOKEN_PLUS",
            TokenKind::Minus => "TOKEN_MINUS",
            TokenKind::String => "TOKEN_STRING",
            TokenKind::StringIStart => "TOKEN_STRING_I_START",
            TokenKind::StringI => "TOKEN_STRING_I",
            TokenKind::StringIEnd => "TOKEN_STRING_I_END",
            TokenKind::StringIIndent => "TOKEN_STRING_I_INDENT",
            TokenKind::StringIExprStart => "TOKEN_STRING_I_EXPR_START",
            TokenKind::StringIExprEnd => "TOKEN_STRING_I_EXPR_END",
            TokenKind::Comment => "TOKEN_COMMENT",
            TokenKind::Documentation => "TOKEN_DOCUMENTATION",
            TokenKind::Unknown => "TOKEN_UNKNOWN",
        }
    }

    /// The fixed lexeme for kinds whose spelling is determined by the kind
    /// alone. `None` for kinds that carry interned text.
    pub fn canonical_lexeme(self) -> Option<&'static str> {
        let lexeme = match self {
            TokenKind::Module => "module",
            TokenKind::Import => "import",
            TokenKind::Export => "export",
            TokenKind::Return => "return",
            TokenKind::Match => "match",
            TokenKind::Type => "type",
            TokenKind::Try => "try",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::This => "this",
            TokenKind::Partial => "partial",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Pipe => "|",
            TokenKind::Underscore => "_",
            TokenKind::Star => "*",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LAngle => "<",
            TokenKind::RAngle => ">",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Newline => "\n",
            _ => return None,
        };
        Some(lexeme)
    }

    /// Trivia tokens are preserved in the parse tree for round-tripping and
    /// dropped when lowering to the AST.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment)
    }
}

/// A single token: kind, optional interned text, and 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<StringId>,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, column: u32) -> Token {
        Token {
            kind,
            text: None,
            line,
            column,
        }
    }

    pub fn with_text(kind: TokenKind, text: StringId, line: u32, column: u32) -> Token {
        Token {
            kind,
            text: Some(text),
            line,
            column,
        }
    }
}
