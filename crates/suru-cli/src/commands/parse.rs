use std::path::Path;

use suru_compiler::dump::dump_tree;
use suru_compiler::parser::parse_source;
use suru_core::StringStore;

use super::read_source;

/// Dumps the parse tree to stdout. Syntax errors go to stderr but do not
/// change the exit code: the tree itself always exists.
pub fn run(path: &Path) -> u8 {
    let Some(source) = read_source(path) else {
        return 1;
    };
    let mut strings = StringStore::new();
    let parse = parse_source(&source, &mut strings);
    for error in &parse.errors {
        eprintln!("{error}");
    }
    print!("{}", dump_tree(&parse.tree, &strings));
    0
}
