//! Parsers for discmos inputs.
//!
//! - `catalog`: the scraped `emoji-data.json` catalog
//! - `script`: the selection script (`include.txt`)
//! - `pattern`: the server and name patterns scripts are written with

pub mod catalog;
pub mod pattern;
pub mod script;

pub use catalog::{load_catalog, parse_catalog};
pub use pattern::{NamePattern, ServerPattern};
pub use script::{parse_line, parse_script, Action, Directive, ScriptLine};
