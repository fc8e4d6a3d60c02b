//! JSON persistence for tech packs.
//!
//! A tech pack is stored as a single pretty-printed JSON object with three
//! keys: `style`, `measurements` and `revisions`. Files are always read and
//! written whole.

mod document;

pub use document::{LoadError, SaveError, from_json, from_value, load, save, to_json, to_value};
