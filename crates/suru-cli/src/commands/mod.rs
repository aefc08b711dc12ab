pub mod check;
pub mod format;
pub mod lex;
pub mod parse;
pub mod run;

use std::path::Path;

/// Reads a source file as text, tolerating stray non-UTF-8 bytes.
/// Reports the failure itself so every command prints the same message.
pub(crate) fn read_source(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(_) => {
            eprintln!("Error: Could not open file {}", path.display());
            None
        }
    }
}
