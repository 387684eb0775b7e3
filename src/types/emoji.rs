//! Emoji records and the catalog they are loaded into.

use std::collections::BTreeSet;
use std::fmt;

/// A custom emoji belonging to a Discord server.
///
/// Names are unique within a server but not across servers, so records
/// compare on all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmojiRecord {
    pub id: u64,
    pub name: String,
    pub server: String,
}

impl EmojiRecord {
    pub fn new(id: u64, name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            server: server.into(),
        }
    }

    /// The chat shortcode for this emoji, e.g. `:smile:`.
    pub fn shortcode(&self) -> String {
        format!(":{}:", self.name)
    }
}

impl fmt::Display for EmojiRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}: ({}) from \"{}\"", self.name, self.id, self.server)
    }
}

/// Every known server and emoji.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub servers: BTreeSet<String>,
    pub emojis: BTreeSet<EmojiRecord>,
}

impl Catalog {
    pub fn new(
        servers: impl IntoIterator<Item = String>,
        emojis: impl IntoIterator<Item = EmojiRecord>,
    ) -> Self {
        Self {
            servers: servers.into_iter().collect(),
            emojis: emojis.into_iter().collect(),
        }
    }

    /// Whether a server name is known.
    pub fn has_server(&self, name: &str) -> bool {
        self.servers.contains(name)
    }

    /// Emojis whose server is not in the server set.
    pub fn orphaned_emojis(&self) -> impl Iterator<Item = &EmojiRecord> {
        self.emojis
            .iter()
            .filter(|emoji| !self.servers.contains(&emoji.server))
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emojis.len()
    }
}
