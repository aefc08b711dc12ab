//! Textual dumps of the token stream and the parse tree.
//!
//! These back the `lex` and `parse` subcommands and double as the snapshot
//! format in tests.

use std::fmt::Write as _;

use suru_core::StringStore;

use crate::lexer::Lexer;
use crate::token::TokenKind;
use crate::tree::{NodeId, ParseTree};

/// One token per line: `Token: <KIND>[ Text: <lexeme>]`, stopping at EOF.
pub fn dump_tokens(source: &str, strings: &mut StringStore) -> String {
    let mut lexer = Lexer::new(source, strings);
    let mut out = String::new();
    while lexer.current.kind != TokenKind::Eof {
        let token = lexer.bump();
        let _ = write!(out, "Token: {}", token.kind.dump_name());
        if let Some(text) = token.text {
            let _ = write!(out, " Text: {}", lexer.strings().resolve(text));
        }
        out.push('\n');
    }
    out
}

/// One node per line: `INDENT KIND[: lexeme]`, two spaces per depth, with
/// `\n` `\t` `\r` `\"` `\\` escaped in lexemes.
pub fn dump_tree(tree: &ParseTree, strings: &StringStore) -> String {
    let mut out = String::new();
    match tree.root() {
        None => out.push_str("(empty tree)\n"),
        Some(root) => dump_node(tree, strings, root, 0, &mut out),
    }
    out
}

fn dump_node(tree: &ParseTree, strings: &StringStore, id: NodeId, depth: usize, out: &mut String) {
    let node = tree.get(id);
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(node.kind.name());
    if let Some(text) = node.token.text {
        out.push_str(": ");
        push_escaped(out, strings.resolve(text));
    }
    out.push('\n');
    for child in tree.children(id) {
        dump_node(tree, strings, child, depth + 1, out);
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    #[test]
    fn token_dump_layout() {
        let mut strings = StringStore::new();
        let out = dump_tokens("main : ()\n", &mut strings);
        insta::assert_snapshot!(out, @r"
        Token: TOKEN_IDENTIFIER Text: main
        Token: TOKEN_COLON
        Token: TOKEN_LPAREN
        Token: TOKEN_RPAREN
        Token: TOKEN_NEWLINE
        ");
    }

    #[test]
    fn tree_dump_escapes_specials() {
        let mut strings = StringStore::new();
        let parse = parse_source("main : () {\n    print(\"a\\nb\")\n}\n", &mut strings);
        let out = dump_tree(&parse.tree, &strings);
        assert!(out.contains("STRING_LITERAL: \\\"a\\\\nb\\\""));
    }

    #[test]
    fn empty_tree_dump() {
        let tree = ParseTree::new();
        let strings = StringStore::new();
        assert_eq!(dump_tree(&tree, &strings), "(empty tree)\n");
    }
}
