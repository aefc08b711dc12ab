//! Tokenizer for Suru source text.
//!
//! The lexer scans bytes left to right, tracking a 1-based line/column
//! position, and keeps an eager one-token lookahead in [`Lexer::current`].
//! Whitespace other than `\n` is skipped; newlines and comments come out as
//! trivia tokens so the parse tree can round-trip them.
//!
//! # Interpolated strings
//!
//! An interpolated string opens with a run of one or more backticks; the run
//! length `N` becomes the delimiter count for the whole string. Content runs
//! emit `StringI` tokens. A run of `N` opening braces switches to embedded
//! expression scanning (ordinary tokens) until a matching run of `N` closing
//! braces at brace depth 1; a run of `N` backticks closes the string. Three
//! counters drive the mode:
//!
//! - `in_string_interpolation`: the delimiter count `N`, 0 when outside
//! - `is_multiline_string`: set when the opening run is followed by `\n`
//! - `brace_depth`: 0 while scanning content, ≥ 1 inside an embedded
//!   expression (nested single braces adjust it)
//!
//! In multiline mode the lexer looks ahead at each line start for the closing
//! delimiter and emits a `StringIIndent` token for any indentation in front
//! of it.
//!
//! The lexer never fails: unexpected bytes become `Unknown` tokens and
//! strings truncate at end of input. Deciding whether that is an error is the
//! parser's job.

use suru_core::{StringId, StringStore};

use crate::token::{Token, TokenKind};

pub struct Lexer<'src, 'st> {
    source: &'src [u8],
    strings: &'st mut StringStore,
    position: usize,
    line: u32,
    column: u32,
    in_string_interpolation: u32,
    is_multiline_string: bool,
    brace_depth: u32,
    /// Eager one-token lookahead.
    pub current: Token,
}

impl<'src, 'st> Lexer<'src, 'st> {
    pub fn new(source: &'src str, strings: &'st mut StringStore) -> Lexer<'src, 'st> {
        let mut lexer = Lexer {
            source: source.as_bytes(),
            strings,
            position: 0,
            line: 1,
            column: 1,
            in_string_interpolation: 0,
            is_multiline_string: false,
            brace_depth: 0,
            current: Token::new(TokenKind::Eof, 1, 1),
        };
        lexer.current = lexer.next_token();
        lexer
    }

    /// Consumes the current token and refills the lookahead.
    pub fn bump(&mut self) -> Token {
        let token = self.current;
        self.current = self.next_token();
        token
    }

    pub fn strings(&self) -> &StringStore {
        self.strings
    }

    /// Interns extra text into the store the lexer writes to. The parser
    /// uses this for fixed names it compares handles against.
    pub fn intern_str(&mut self, s: &str) -> StringId {
        self.strings.intern_str(s)
    }

    // === Byte-level cursor ===============================================

    fn at_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    fn byte(&self) -> u8 {
        if self.at_eof() {
            0
        } else {
            self.source[self.position]
        }
    }

    fn peek(&self, offset: usize) -> u8 {
        *self.source.get(self.position + offset).unwrap_or(&0)
    }

    fn advance(&mut self) {
        if self.position < self.source.len() {
            if self.source[self.position] == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Length of the run of `byte` starting at `index`.
    fn run_length_at(&self, index: usize, byte: u8) -> usize {
        let mut end = index;
        while end < self.source.len() && self.source[end] == byte {
            end += 1;
        }
        end - index
    }

    fn intern_range(&mut self, start: usize, end: usize) -> StringId {
        self.strings.intern(&self.source[start..end])
    }

    fn intern_count(&mut self, count: usize) -> StringId {
        let mut buf = [0u8; 20];
        let mut n = count;
        let mut at = buf.len();
        loop {
            at -= 1;
            buf[at] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        self.strings.intern(&buf[at..])
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.byte(), b' ' | b'\t' | b'\r') && !self.at_eof() {
            self.advance();
        }
    }

    // === Token scanning ==================================================

    fn next_token(&mut self) -> Token {
        if self.in_string_interpolation > 0 && self.brace_depth == 0 {
            return self.string_content_token();
        }

        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if self.at_eof() {
            return Token::new(TokenKind::Eof, line, column);
        }

        let c = self.byte();

        if c == b'\n' {
            self.advance();
            return Token::new(TokenKind::Newline, line, column);
        }

        if c == b'/' && self.peek(1) == b'/' {
            return self.comment(line, column);
        }

        if c == b'=' && column == 1 && self.run_length_at(self.position, b'=') >= 4 {
            return self.documentation(line, column);
        }

        if is_identifier_start(c) {
            return self.identifier_or_keyword(line, column);
        }

        if c.is_ascii_digit() {
            return self.number(line, column);
        }

        if c == b'"' || c == b'\'' {
            return self.string(c, line, column);
        }

        if c == b'`' {
            return self.interpolated_string_start(line, column);
        }

        if c == b'{' {
            self.advance();
            if self.in_string_interpolation > 0 {
                self.brace_depth += 1;
            }
            return Token::new(TokenKind::LBrace, line, column);
        }

        if c == b'}' {
            return self.closing_brace(line, column);
        }

        let kind = match c {
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'|' => TokenKind::Pipe,
            b'*' => TokenKind::Star,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'<' => TokenKind::LAngle,
            b'>' => TokenKind::RAngle,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            _ => TokenKind::Unknown,
        };
        self.advance();
        Token::new(kind, line, column)
    }

    /// `}` while inside an embedded interpolation expression needs run
    /// counting; everywhere else it is plain punctuation.
    fn closing_brace(&mut self, line: u32, column: u32) -> Token {
        let n = self.in_string_interpolation as usize;
        if n > 0 && self.brace_depth == 1 {
            let run = self.run_length_at(self.position, b'}');
            if run >= n {
                self.advance_n(n);
                self.brace_depth = 0;
                return Token::new(TokenKind::StringIExprEnd, line, column);
            }
            // Not enough braces to close the expression; stay at depth 1.
            self.advance();
            return Token::new(TokenKind::RBrace, line, column);
        }
        self.advance();
        if self.in_string_interpolation > 0 && self.brace_depth > 1 {
            self.brace_depth -= 1;
        }
        Token::new(TokenKind::RBrace, line, column)
    }

    fn comment(&mut self, line: u32, column: u32) -> Token {
        let start = self.position;
        while !self.at_eof() && self.byte() != b'\n' {
            self.advance();
        }
        let text = self.intern_range(start, self.position);
        Token::with_text(TokenKind::Comment, text, line, column)
    }

    /// `====` at the start of a line opens a documentation block that runs to
    /// the next line starting with `====` (or end of input). The whole region
    /// becomes one token.
    fn documentation(&mut self, line: u32, column: u32) -> Token {
        let start = self.position;
        // Opening delimiter line.
        while !self.at_eof() && self.byte() != b'\n' {
            self.advance();
        }
        // Scan line by line for the closing delimiter.
        while !self.at_eof() {
            self.advance(); // consume the newline, landing at column 1
            let line_start = self.position;
            let delimiter = {
                let mut i = line_start;
                if self.source.get(i) == Some(&b'\r') {
                    i += 1;
                }
                self.run_length_at(i, b'=') >= 4
            };
            while !self.at_eof() && self.byte() != b'\n' {
                self.advance();
            }
            if delimiter {
                break;
            }
        }
        let text = self.intern_range(start, self.position);
        Token::with_text(TokenKind::Documentation, text, line, column)
    }

    fn identifier_or_keyword(&mut self, line: u32, column: u32) -> Token {
        let start = self.position;
        while is_identifier_char(self.byte()) && !self.at_eof() {
            self.advance();
        }
        let text = &self.source[start..self.position];

        if text == b"_" {
            return Token::new(TokenKind::Underscore, line, column);
        }

        // Uppercase-first and long lexemes can never be keywords.
        if !text[0].is_ascii_uppercase() && text.len() <= 7 {
            if let Some(kind) = keyword_kind(text) {
                return Token::new(kind, line, column);
            }
        }

        let id = self.intern_range(start, self.position);
        Token::with_text(TokenKind::Identifier, id, line, column)
    }

    fn number(&mut self, line: u32, column: u32) -> Token {
        let start = self.position;

        let kind = if self.byte() == b'0' && self.peek(1) == b'b' {
            self.advance_n(2);
            while matches!(self.byte(), b'0' | b'1' | b'_') && !self.at_eof() {
                self.advance();
            }
            TokenKind::NumberBinary
        } else if self.byte() == b'0' && self.peek(1) == b'o' {
            self.advance_n(2);
            while matches!(self.byte(), b'0'..=b'7' | b'_') && !self.at_eof() {
                self.advance();
            }
            TokenKind::NumberOctal
        } else if self.byte() == b'0' && self.peek(1) == b'x' {
            self.advance_n(2);
            while (self.byte().is_ascii_hexdigit() || self.byte() == b'_') && !self.at_eof() {
                self.advance();
            }
            TokenKind::NumberHex
        } else {
            while (self.byte().is_ascii_digit() || self.byte() == b'_') && !self.at_eof() {
                self.advance();
            }
            if self.byte() == b'.' && self.peek(1).is_ascii_digit() {
                self.advance(); // the '.'
                while self.byte().is_ascii_digit() && !self.at_eof() {
                    self.advance();
                }
                TokenKind::NumberFloat
            } else {
                TokenKind::Number
            }
        };

        self.consume_type_suffix();

        let text = self.intern_range(start, self.position);
        Token::with_text(kind, text, line, column)
    }

    /// Consumes a trailing `i8..i128` / `u8..u128` / `f16..f128` suffix, but
    /// only when the byte after it could not continue an identifier.
    fn consume_type_suffix(&mut self) {
        let letter = self.byte();
        if !matches!(letter, b'i' | b'u' | b'f') {
            return;
        }
        let widths: &[&[u8]] = if letter == b'f' {
            &[b"128", b"16", b"32", b"64"]
        } else {
            &[b"128", b"16", b"32", b"64", b"8"]
        };
        let rest = &self.source[self.position + 1..];
        for &width in widths {
            if rest.starts_with(width) {
                let after = rest.get(width.len()).copied().unwrap_or(0);
                if !is_identifier_char(after) {
                    self.advance_n(1 + width.len());
                }
                return;
            }
        }
    }

    fn string(&mut self, quote: u8, line: u32, column: u32) -> Token {
        let start = self.position;
        self.advance(); // opening quote
        while !self.at_eof() {
            let c = self.byte();
            if c == b'\\' {
                self.advance();
                self.advance(); // escaped byte, whatever it is
                continue;
            }
            self.advance();
            if c == quote {
                break;
            }
        }
        let text = self.intern_range(start, self.position);
        Token::with_text(TokenKind::String, text, line, column)
    }

    fn interpolated_string_start(&mut self, line: u32, column: u32) -> Token {
        let n = self.run_length_at(self.position, b'`');
        self.advance_n(n);
        self.in_string_interpolation = n as u32;
        self.brace_depth = 0;
        self.is_multiline_string = self.byte() == b'\n' && !self.at_eof();
        let text = self.intern_count(n);
        Token::with_text(TokenKind::StringIStart, text, line, column)
    }

    /// Scans interpolated-string content: runs of raw bytes between the
    /// delimiters, the closing backtick run, embedded expression openers, and
    /// (in multiline mode) the indentation in front of the closing delimiter.
    fn string_content_token(&mut self) -> Token {
        let n = self.in_string_interpolation as usize;
        let line = self.line;
        let column = self.column;

        // At the start of a line of a multiline string, look past the
        // indentation for the closing delimiter.
        if self.is_multiline_string && self.column == 1 {
            let mut i = self.position;
            while matches!(self.source.get(i), Some(b' ' | b'\t')) {
                i += 1;
            }
            if self.run_length_at(i, b'`') >= n {
                if i > self.position {
                    let text = self.intern_range(self.position, i);
                    self.advance_n(i - self.position);
                    return Token::with_text(TokenKind::StringIIndent, text, line, column);
                }
                self.advance_n(n);
                let text = self.intern_count(n);
                self.reset_interpolation();
                return Token::with_text(TokenKind::StringIEnd, text, line, column);
            }
        }

        let start = self.position;
        loop {
            if self.at_eof() {
                // Truncated string: flush what we have, then report EOF.
                if self.position > start {
                    let text = self.intern_range(start, self.position);
                    return Token::with_text(TokenKind::StringI, text, line, column);
                }
                self.reset_interpolation();
                return Token::new(TokenKind::Eof, self.line, self.column);
            }

            let c = self.byte();

            // Escapes consume two bytes and never participate in delimiter
            // scanning.
            if c == b'\\' && self.position + 1 < self.source.len() {
                self.advance_n(2);
                continue;
            }

            if c == b'`' {
                let run = self.run_length_at(self.position, b'`');
                if run >= n {
                    if self.position > start {
                        let text = self.intern_range(start, self.position);
                        return Token::with_text(TokenKind::StringI, text, line, column);
                    }
                    self.advance_n(n);
                    let text = self.intern_count(n);
                    self.reset_interpolation();
                    return Token::with_text(TokenKind::StringIEnd, text, line, column);
                }
                self.advance_n(run);
                continue;
            }

            if c == b'{' {
                let run = self.run_length_at(self.position, b'{');
                if run >= n {
                    if self.position > start {
                        let text = self.intern_range(start, self.position);
                        return Token::with_text(TokenKind::StringI, text, line, column);
                    }
                    self.advance_n(n);
                    self.brace_depth = 1;
                    return Token::new(TokenKind::StringIExprStart, line, column);
                }
                self.advance_n(run);
                continue;
            }

            if c == b'\n' && self.is_multiline_string {
                // If the next line holds the closing delimiter, flush the
                // content up to (but excluding) this newline and position the
                // scanner at column 1 for the next call.
                let mut i = self.position + 1;
                while matches!(self.source.get(i), Some(b' ' | b'\t')) {
                    i += 1;
                }
                if self.run_length_at(i, b'`') >= n {
                    if self.position > start {
                        let text = self.intern_range(start, self.position);
                        self.advance();
                        return Token::with_text(TokenKind::StringI, text, line, column);
                    }
                    self.advance();
                    return self.string_content_token();
                }
                self.advance();
                continue;
            }

            self.advance();
        }
    }

    fn reset_interpolation(&mut self) {
        self.in_string_interpolation = 0;
        self.is_multiline_string = false;
        self.brace_depth = 0;
    }
}

fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn keyword_kind(text: &[u8]) -> Option<TokenKind> {
    // Grouped by length so each lexeme is compared against at most four
    // candidates.
    let kind = match text.len() {
        2 => match text {
            b"or" => TokenKind::Or,
            _ => return None,
        },
        3 => match text {
            b"and" => TokenKind::And,
            b"try" => TokenKind::Try,
            _ => return None,
        },
        4 => match text {
            b"type" => TokenKind::Type,
            b"true" => TokenKind::True,
            b"this" => TokenKind::This,
            _ => return None,
        },
        5 => match text {
            b"match" => TokenKind::Match,
            b"false" => TokenKind::False,
            _ => return None,
        },
        6 => match text {
            b"module" => TokenKind::Module,
            b"import" => TokenKind::Import,
            b"export" => TokenKind::Export,
            b"return" => TokenKind::Return,
            _ => return None,
        },
        7 => match text {
            b"partial" => TokenKind::Partial,
            _ => return None,
        },
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
