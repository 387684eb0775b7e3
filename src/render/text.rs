//! Text output: emoji shortcodes ready to paste into Discord.

use std::collections::BTreeSet;

use crate::mosaic::OutputGrid;
use crate::types::EmojiRecord;

/// Maximum length of a Discord message without Nitro.
pub const MESSAGE_LIMIT: usize = 2000;

/// Render a grid as one line of space-separated shortcodes per row.
pub fn render_text(grid: &OutputGrid) -> String {
    let mut text = String::new();
    for row in grid.iter_rows() {
        let codes: Vec<String> = row.iter().map(EmojiRecord::shortcode).collect();
        text.push_str(&codes.join(" "));
        text.push('\n');
    }
    text
}

/// Render a selection as one descriptive line per emoji.
pub fn render_preview(emojis: &BTreeSet<EmojiRecord>) -> String {
    emojis
        .iter()
        .map(|emoji| format!("Emoji {} from server \"{}\"\n", emoji.shortcode(), emoji.server))
        .collect()
}

/// Whether text fits in a single Discord message.
pub fn fits_in_message(text: &str) -> bool {
    text.trim_end().chars().count() <= MESSAGE_LIMIT
}
