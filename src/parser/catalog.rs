//! Emoji catalog (`emoji-data.json`) parser.
//!
//! The catalog is produced by a browser console script, so the schema is
//! checked strictly here and the rest of the crate works with typed records:
//!
//! ```json
//! {
//!   "servers": ["Blob Emoji"],
//!   "emojis": [{ "id": "396521773144866826", "name": "blobwave", "server": "Blob Emoji" }]
//! }
//! ```
//!
//! Ids may be JSON numbers or strings of digits. The scraper serialises its
//! server set as `{}`; an empty server list is rebuilt from the emojis.

use std::path::Path;

use serde::Deserialize;

use crate::error::{MosaicError, Result};
use crate::types::{Catalog, EmojiRecord};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    servers: RawServers,
    emojis: Vec<RawEmoji>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawServers {
    List(Vec<String>),
    #[allow(dead_code)]
    Empty(EmptyObject),
}

impl Default for RawServers {
    fn default() -> Self {
        RawServers::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyObject {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEmoji {
    id: RawId,
    name: String,
    server: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn resolve(self) -> std::result::Result<u64, String> {
        match self {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => {
                if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(format!("emoji id \"{}\" is not a number", text));
                }
                text.parse()
                    .map_err(|_| format!("emoji id \"{}\" is out of range", text))
            }
        }
    }
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(source: &str) -> Result<Catalog> {
    let raw: RawCatalog = serde_json::from_str(source).map_err(|e| MosaicError::Parse {
        message: format!("Invalid emoji catalog: {}", e),
        help: Some(
            "Expected {\"servers\": [...], \"emojis\": [{\"id\", \"name\", \"server\"}]}".to_string(),
        ),
    })?;

    let mut emojis = Vec::with_capacity(raw.emojis.len());
    for emoji in raw.emojis {
        let id = emoji.id.resolve().map_err(|message| MosaicError::Parse {
            message: format!("Invalid emoji catalog: {} (emoji :{}:)", message, emoji.name),
            help: None,
        })?;
        emojis.push(EmojiRecord::new(id, emoji.name, emoji.server));
    }

    let servers = match raw.servers {
        RawServers::List(servers) if !servers.is_empty() => servers,
        _ => emojis.iter().map(|e| e.server.clone()).collect(),
    };

    Ok(Catalog::new(servers, emojis))
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let source = std::fs::read_to_string(path).map_err(|e| MosaicError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read emoji catalog: {}", e),
    })?;

    parse_catalog(&source)
}
