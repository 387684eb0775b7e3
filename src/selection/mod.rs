//! Selection engine.
//!
//! Evaluates a selection script against a catalog to decide which emojis
//! are eligible for a mosaic. The script is a sequence of set operations
//! applied top to bottom, so later lines override earlier ones for the
//! emojis they touch.
//!
//! # Scoping
//!
//! A server directive sets the *current servers*. Quoted emoji directives
//! only look at emojis of the current servers. Regex emoji directives look
//! at the whole catalog unless [`RegexScope::CurrentServers`] is chosen:
//!
//! ```text
//! - all
//! "A"
//!     + /^smile$/    // also picks up :smile: from every other server
//!     + "frown"      // only :frown: from A
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::{parse_line, Action, Directive, NamePattern, ScriptLine, ServerPattern};
use crate::types::{Catalog, EmojiRecord};

/// Which emojis a `/regex/` emoji directive is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegexScope {
    /// Every emoji in the catalog, regardless of the current servers.
    #[default]
    Catalog,
    /// Only emojis of the current servers, like quoted names.
    #[serde(alias = "servers")]
    CurrentServers,
}

/// Options for [`select_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub regex_scope: RegexScope,
}

/// Evaluate a selection script with default options.
pub fn select(catalog: &Catalog, script: &str) -> Result<BTreeSet<EmojiRecord>> {
    select_with(catalog, script, SelectOptions::default())
}

/// Evaluate a selection script.
///
/// Fails with [`MosaicError::ScriptSyntax`](crate::MosaicError::ScriptSyntax)
/// on the first malformed line or on an emoji directive that appears before
/// any server directive. Nothing is returned on failure.
pub fn select_with(
    catalog: &Catalog,
    script: &str,
    options: SelectOptions,
) -> Result<BTreeSet<EmojiRecord>> {
    let mut evaluator = Evaluator::new(catalog, options);

    for (index, text) in script.lines().enumerate() {
        if let Some(line) = parse_line(index + 1, text)? {
            evaluator.apply(&line)?;
        }
    }

    Ok(evaluator.selected)
}

struct Evaluator<'a> {
    catalog: &'a Catalog,
    options: SelectOptions,
    selected: BTreeSet<EmojiRecord>,
    /// `None` until the first server directive.
    current_servers: Option<BTreeSet<&'a str>>,
}

impl<'a> Evaluator<'a> {
    fn new(catalog: &'a Catalog, options: SelectOptions) -> Self {
        Self {
            catalog,
            options,
            selected: BTreeSet::new(),
            current_servers: None,
        }
    }

    fn apply(&mut self, line: &ScriptLine) -> Result<()> {
        match &line.directive {
            Directive::Server { action, pattern } => {
                let servers = self.resolve_servers(pattern);
                self.current_servers = Some(servers);
                if let Some(action) = action {
                    let emojis = self.scope_emojis(|_| true);
                    self.update(*action, emojis);
                }
            }
            Directive::Emoji { action, pattern } => {
                if self.current_servers.is_none() {
                    return Err(line.error("emoji directive without a server directive before it"));
                }
                let emojis = self.resolve_emojis(pattern);
                self.update(*action, emojis);
            }
        }
        Ok(())
    }

    fn resolve_servers(&self, pattern: &ServerPattern) -> BTreeSet<&'a str> {
        self.catalog
            .servers
            .iter()
            .filter(|server| pattern.matches(server))
            .map(String::as_str)
            .collect()
    }

    fn in_scope(&self, emoji: &EmojiRecord) -> bool {
        self.current_servers
            .as_ref()
            .is_some_and(|servers| servers.contains(emoji.server.as_str()))
    }

    fn scope_emojis(&self, keep: impl Fn(&EmojiRecord) -> bool) -> Vec<&'a EmojiRecord> {
        self.catalog
            .emojis
            .iter()
            .filter(|emoji| self.in_scope(emoji) && keep(emoji))
            .collect()
    }

    fn resolve_emojis(&self, pattern: &NamePattern) -> Vec<&'a EmojiRecord> {
        if pattern.is_regex() && self.options.regex_scope == RegexScope::Catalog {
            return self
                .catalog
                .emojis
                .iter()
                .filter(|emoji| pattern.matches(&emoji.name))
                .collect();
        }
        self.scope_emojis(|emoji| pattern.matches(&emoji.name))
    }

    fn update(&mut self, action: Action, emojis: Vec<&EmojiRecord>) {
        match action {
            Action::Include => self.selected.extend(emojis.into_iter().cloned()),
            Action::Exclude => {
                for emoji in emojis {
                    self.selected.remove(emoji);
                }
            }
        }
    }
}
