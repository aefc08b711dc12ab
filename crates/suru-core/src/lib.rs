//! Shared infrastructure for the Suru toolchain.
//!
//! Everything the compile-time pipeline allocates — interned strings, parse
//! nodes, AST nodes — lives in one of the containers defined here:
//!
//! - [`Arena`]: bump allocation with chunk recycling, no per-object free
//! - [`ChunkedVec`]: index-stable dynamic array over page-sized chunks
//! - [`StringStore`]: content-addressed interning with identity equality

pub mod arena;
pub mod array;
pub mod strings;

pub use arena::{Arena, ArenaRef};
pub use array::ChunkedVec;
pub use strings::{StringId, StringStore};
