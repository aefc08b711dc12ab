use std::path::Path;

use suru_compiler::dump::dump_tokens;
use suru_core::StringStore;

use super::read_source;

pub fn run(path: &Path) -> u8 {
    let Some(source) = read_source(path) else {
        return 1;
    };
    let mut strings = StringStore::new();
    print!("{}", dump_tokens(&source, &mut strings));
    0
}
