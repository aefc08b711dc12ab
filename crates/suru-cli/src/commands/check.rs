use std::path::Path;

use suru_compiler::parser::{parse_source, render_errors};
use suru_core::StringStore;

use super::read_source;

/// Parse only. Pretty diagnostics on stderr when the file has syntax
/// errors; silent on success, like `cargo check`.
pub fn run(path: &Path) -> u8 {
    let Some(source) = read_source(path) else {
        return 1;
    };
    let mut strings = StringStore::new();
    let parse = parse_source(&source, &mut strings);
    if parse.is_valid() {
        return 0;
    }
    let path = path.display().to_string();
    eprintln!("{}", render_errors(&source, &parse.errors, Some(&path)));
    1
}
