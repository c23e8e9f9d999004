//! Markdown table recognition and parsing.
//!
//! Turns a document's raw markdown into structured records in three steps:
//! 1. [`extract_title`] — title from the leading front-matter block
//! 2. [`extract_tables`] — isolate pipe-delimited blocks matching the unit
//!    table schema
//! 3. [`parse_table`] — one block into header-keyed [`FieldRecord`]s
//!
//! Everything here is tolerant by design: malformed or unexpected input
//! degrades to fallbacks or silent exclusion, never to an error.
//!
//! [`FieldRecord`]: unitdex_shared::FieldRecord

mod frontmatter;
mod tables;

pub use frontmatter::{UNTITLED, extract_title};
pub use tables::{REQUIRED_HEADERS, extract_tables, parse_table};
