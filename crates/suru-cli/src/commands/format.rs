use std::path::Path;

use suru_compiler::format::format_tree;
use suru_compiler::parser::parse_source;
use suru_core::StringStore;

use super::read_source;

pub fn run(path: &Path, write: bool) -> u8 {
    let Some(source) = read_source(path) else {
        return 1;
    };
    let mut strings = StringStore::new();
    let parse = parse_source(&source, &mut strings);
    let formatted = format_tree(&parse.tree, &strings);

    if write {
        if std::fs::write(path, &formatted).is_err() {
            eprintln!("Error: Could not open file {} for writing", path.display());
            return 1;
        }
        return 0;
    }

    print!("{formatted}");
    0
}
