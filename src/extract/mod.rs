// src/extract/mod.rs
// =============================================================================
// This module turns a fetched HTML page into the two things the crawler
// cares about: links to follow and words to count.
//
// Submodules:
// - html: walks the parsed document once and yields links and words
// - tokens: splits text into lowercase word tokens
//
// Both are lazy: nothing is collected into a Vec, the caller consumes the
// sequence and acts on each item as it appears.
// =============================================================================

mod html;
mod tokens;

pub use html::{scan, Found};
pub use tokens::tokenize;
