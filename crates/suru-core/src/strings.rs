//! Content-addressed string interning.
//!
//! Every distinct byte sequence is stored once, in an arena owned by the
//! store. The returned [`StringId`] is the string's identity: two ids compare
//! equal iff the interned content is equal, so every downstream consumer
//! (variable lookup, `main` detection) compares handles instead of bytes.
//!
//! Lookup is a linear scan with a length fast-reject. The source language
//! produces few distinct strings per file, so the scan stays cheap and the
//! store needs no hash index.

use std::fmt::Write as _;

use crate::arena::{Arena, ArenaRef};

/// Handle to an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u32);

pub struct StringStore {
    arena: Arena,
    entries: Vec<ArenaRef>,
}

impl StringStore {
    pub fn new() -> StringStore {
        StringStore {
            arena: Arena::new(0),
            entries: Vec::new(),
        }
    }

    /// Interns a byte slice, returning the handle of the existing entry with
    /// the same content or a freshly allocated one.
    pub fn intern(&mut self, bytes: &[u8]) -> StringId {
        for (i, &entry) in self.entries.iter().enumerate() {
            if entry.len() == bytes.len() && self.arena.bytes(entry) == bytes {
                return StringId(i as u32);
            }
        }
        let copy = self.arena.copy_in(bytes);
        self.entries.push(copy);
        StringId((self.entries.len() - 1) as u32)
    }

    pub fn intern_str(&mut self, s: &str) -> StringId {
        self.intern(s.as_bytes())
    }

    #[inline]
    pub fn resolve_bytes(&self, id: StringId) -> &[u8] {
        self.arena.bytes(self.entries[id.0 as usize])
    }

    /// The interned text behind a handle.
    ///
    /// The store only ever receives slices of UTF-8 source text, so the
    /// stored bytes are valid UTF-8 by construction.
    #[inline]
    pub fn resolve(&self, id: StringId) -> &str {
        let bytes = self.resolve_bytes(id);
        debug_assert!(std::str::from_utf8(bytes).is_ok());
        // SAFETY: intern() is only fed byte views of validated UTF-8 input,
        // and slices never split a multi-byte sequence (all delimiters the
        // lexer cuts on are ASCII).
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per entry, in interning order. Debug aid.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Stored strings ({} total):", self.entries.len());
        for (i, &entry) in self.entries.iter().enumerate() {
            let text = String::from_utf8_lossy(self.arena.bytes(entry));
            let _ = writeln!(out, "  [{i}] len={}: \"{text}\"", entry.len());
        }
        out
    }
}

impl Default for StringStore {
    fn default() -> Self {
        StringStore::new()
    }
}
