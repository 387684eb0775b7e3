//! Server and emoji-name patterns used by selection scripts.
//!
//! A pattern is one of:
//! - `all` (servers only)
//! - `"exact name"`
//! - `/regex/`
//!
//! Any pattern may be followed by spaces and a `// comment`.

use regex::Regex;

/// A pattern on a server directive line.
#[derive(Debug, Clone)]
pub enum ServerPattern {
    /// Every known server.
    All,
    /// A single server, matched by exact name.
    Exact(String),
    /// Every server whose name the regex finds a match in.
    Regex(Regex),
}

/// A pattern on an emoji directive line.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Emojis with exactly this name.
    Exact(String),
    /// Emojis whose name the regex finds a match in.
    Regex(Regex),
}

impl ServerPattern {
    /// Parse a server pattern. Returns `Ok(None)` if the text is not a
    /// pattern at all, and an error message if it is a malformed regex.
    pub fn parse(text: &str) -> std::result::Result<Option<Self>, String> {
        if text == "all" || text.strip_prefix("all").is_some_and(is_trailer) {
            return Ok(Some(Self::All));
        }
        if let Some(name) = delimited(text, '"') {
            return Ok(Some(Self::Exact(name.to_string())));
        }
        match delimited(text, '/') {
            Some(body) => compile(body).map(|re| Some(Self::Regex(re))),
            None => Ok(None),
        }
    }

    /// Whether this pattern selects the given server name.
    pub fn matches(&self, server: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(name) => name == server,
            Self::Regex(re) => re.is_match(server),
        }
    }
}

impl NamePattern {
    /// Parse an emoji name pattern. Returns `Ok(None)` if the text is not a
    /// pattern at all, and an error message if it is a malformed regex.
    pub fn parse(text: &str) -> std::result::Result<Option<Self>, String> {
        if let Some(name) = delimited(text, '"') {
            return Ok(Some(Self::Exact(name.to_string())));
        }
        match delimited(text, '/') {
            Some(body) => compile(body).map(|re| Some(Self::Regex(re))),
            None => Ok(None),
        }
    }

    /// Whether this pattern selects the given emoji name.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Regex(re) => re.is_match(name),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Self::Regex(_))
    }
}

impl PartialEq for ServerPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Extract the body between an opening delimiter at the start of `text` and
/// the last closing delimiter that is followed only by a trailer.
fn delimited(text: &str, delim: char) -> Option<&str> {
    let rest = text.strip_prefix(delim)?;
    rest.rmatch_indices(delim)
        .find(|(i, _)| is_trailer(&rest[i + delim.len_utf8()..]))
        .map(|(i, _)| &rest[..i])
}

/// Optional spaces followed by nothing or a `// ` comment.
fn is_trailer(text: &str) -> bool {
    let text = text.trim_start_matches(' ');
    text.is_empty() || text.starts_with("// ")
}

fn compile(body: &str) -> std::result::Result<Regex, String> {
    Regex::new(body).map_err(|e| format!("invalid regex /{}/: {}", body, e))
}
