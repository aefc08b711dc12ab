//! Front-end for the Suru language.
//!
//! The pipeline: source text → [`lexer::Lexer`] → tokens →
//! [`parser::parse_source`] → lossless [`tree::ParseTree`] →
//! [`ast::build_ast`] → [`ast::Ast`]. The [`format`] module walks the parse
//! tree back into text; [`dump`] renders debug views of tokens and trees.
//!
//! # Example
//!
//! ```
//! use suru_core::StringStore;
//! use suru_compiler::parser::parse_source;
//! use suru_compiler::ast::build_ast;
//!
//! let mut strings = StringStore::new();
//! let parse = parse_source("main : () {\n    print(\"hi\")\n}\n", &mut strings);
//! assert!(parse.is_valid());
//! let ast = build_ast(&parse.tree);
//! assert!(ast.root().is_some());
//! ```

pub mod ast;
pub mod dump;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;

pub use ast::{Ast, AstId, AstKind, build_ast};
pub use format::format_tree;
pub use lexer::Lexer;
pub use parser::{Parse, SyntaxError, parse_source, render_errors};
pub use token::{Token, TokenKind};
pub use tree::{NodeId, ParseNode, ParseNodeKind, ParseTree};
