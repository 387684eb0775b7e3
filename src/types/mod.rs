//! Core data types for discmos.

mod colour;
mod emoji;

pub use colour::Colour;
pub use emoji::{Catalog, EmojiRecord};
