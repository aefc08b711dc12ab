use std::path::Path;

use suru_compiler::ast::build_ast;
use suru_compiler::parser::parse_source;
use suru_core::StringStore;
use suru_interp::run_program;

use super::read_source;

/// lex → parse → build AST → interpret. Syntax errors stop the pipeline
/// before the AST is built.
pub fn run(path: &Path) -> u8 {
    let Some(source) = read_source(path) else {
        return 1;
    };

    let mut strings = StringStore::new();
    let parse = parse_source(&source, &mut strings);
    if !parse.is_valid() {
        for error in &parse.errors {
            eprintln!("{error}");
        }
        return 1;
    }

    let ast = build_ast(&parse.tree);
    let stdout = std::io::stdout();
    match run_program(&ast, &mut strings, stdout.lock()) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}
