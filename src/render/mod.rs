//! Rendering module for discmos.
//!
//! Turns a finished mosaic grid into paste-able text or a composite image.

mod composite;
mod png;
mod text;

pub use composite::{fit_square, render_composite, resize_to_width, EMOJI_SIZE};
pub use png::write_png;
pub use text::{fits_in_message, render_preview, render_text, MESSAGE_LIMIT};
