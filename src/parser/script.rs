//! Selection script parser.
//!
//! Scripts are line-oriented. Unindented lines are server directives and
//! lines indented by four spaces are emoji directives:
//!
//! ```text
//! + all
//! // comments start with "// "
//! - /^test/
//! "Blob Emoji"
//!     + "blobwave"
//!     - /^blob_?cat/
//! ```
//!
//! A `+ ` prefix includes, `- ` excludes, and a bare server pattern only
//! selects the servers that following emoji directives apply to.

use crate::error::{MosaicError, Result};

use super::pattern::{NamePattern, ServerPattern};

/// Marker that starts a comment line.
pub const COMMENT_MARKER: &str = "// ";

/// Indentation that marks an emoji directive.
pub const EMOJI_INDENT: &str = "    ";

const INCLUDE_PREFIX: &str = "+ ";
const EXCLUDE_PREFIX: &str = "- ";

/// Whether a directive adds to or removes from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Include,
    Exclude,
}

/// A single parsed directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Selects the current servers. `action` is `None` for passive lines.
    Server {
        action: Option<Action>,
        pattern: ServerPattern,
    },
    /// Adds or removes emojis by name.
    Emoji {
        action: Action,
        pattern: NamePattern,
    },
}

/// A directive together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// Line number (1-indexed)
    pub line: usize,
    /// The line as written
    pub content: String,
    pub directive: Directive,
}

impl ScriptLine {
    /// Build a syntax error pointing at this line.
    pub fn error(&self, reason: impl Into<String>) -> MosaicError {
        syntax_error(self.line, &self.content, reason)
    }
}

/// Parse a whole script, stopping at the first malformed line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (index, text) in source.lines().enumerate() {
        if let Some(line) = parse_line(index + 1, text)? {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Parse one line. Blank and comment lines yield `Ok(None)`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptLine>> {
    if is_ignored(text) {
        return Ok(None);
    }

    let directive = match text.strip_prefix(EMOJI_INDENT) {
        Some(rest) => parse_emoji_directive(line, text, rest)?,
        None => parse_server_directive(line, text)?,
    };

    Ok(Some(ScriptLine {
        line,
        content: text.to_string(),
        directive,
    }))
}

fn is_ignored(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with(COMMENT_MARKER)
        || trimmed.trim_end() == COMMENT_MARKER.trim_end()
}

fn split_action(text: &str) -> (Option<Action>, &str) {
    if let Some(rest) = text.strip_prefix(INCLUDE_PREFIX) {
        (Some(Action::Include), rest)
    } else if let Some(rest) = text.strip_prefix(EXCLUDE_PREFIX) {
        (Some(Action::Exclude), rest)
    } else {
        (None, text)
    }
}

fn parse_server_directive(line: usize, text: &str) -> Result<Directive> {
    let (action, rest) = split_action(text);

    match ServerPattern::parse(rest) {
        Ok(Some(pattern)) => Ok(Directive::Server { action, pattern }),
        Ok(None) => Err(syntax_error(
            line,
            text,
            format!("invalid server pattern `{}`", rest),
        )),
        Err(reason) => Err(syntax_error(line, text, reason)),
    }
}

fn parse_emoji_directive(line: usize, text: &str, rest: &str) -> Result<Directive> {
    let (action, rest) = split_action(rest);
    let action = action.ok_or_else(|| {
        syntax_error(line, text, "emoji directive must start with \"+ \" or \"- \"")
    })?;

    match NamePattern::parse(rest) {
        Ok(Some(pattern)) => Ok(Directive::Emoji { action, pattern }),
        Ok(None) => Err(syntax_error(
            line,
            text,
            format!("invalid emoji pattern `{}`", rest),
        )),
        Err(reason) => Err(syntax_error(line, text, reason)),
    }
}

fn syntax_error(line: usize, content: &str, reason: impl Into<String>) -> MosaicError {
    MosaicError::ScriptSyntax {
        line,
        content: content.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directives(source: &str) -> Vec<Directive> {
        parse_script(source)
            .unwrap()
            .into_iter()
            .map(|l| l.directive)
            .collect()
    }

    #[test]
    fn test_server_modes() {
        let parsed = directives("+ all\n- \"Spam\"\n/^Blob/\n");
        assert_eq!(
            parsed[0],
            Directive::Server {
                action: Some(Action::Include),
                pattern: ServerPattern::All,
            }
        );
        assert_eq!(
            parsed[1],
            Directive::Server {
                action: Some(Action::Exclude),
                pattern: ServerPattern::Exact("Spam".to_string()),
            }
        );
        assert!(matches!(
            parsed[2],
            Directive::Server { action: None, pattern: ServerPattern::Regex(_) }
        ));
    }

    #[test]
    fn test_emoji_directive() {
        let parsed = directives("all\n    - \"smile\" // too common\n");
        assert_eq!(
            parsed[1],
            Directive::Emoji {
                action: Action::Exclude,
                pattern: NamePattern::Exact("smile".to_string()),
            }
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let lines = parse_script("\n// header\n   \n+ all\n    // note\n//\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line, 4);
        assert_eq!(lines[0].content, "+ all");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = directives("+ all\r\n    - \"x\"\r\n");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_emoji_without_action_is_error() {
        let err = parse_script("all\n    \"smile\"\n").unwrap_err();
        match err {
            MosaicError::ScriptSyntax { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("must start with"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_server_pattern_names_line() {
        let err = parse_script("+ all\n+ Server Without Quotes\n").unwrap_err();
        assert!(matches!(err, MosaicError::ScriptSyntax { line: 2, .. }));
        assert!(err.to_string().contains("invalid server pattern `Server Without Quotes`"));
    }

    #[test]
    fn test_all_is_not_an_emoji_pattern() {
        let err = parse_script("+ all\n    + all\n").unwrap_err();
        assert!(matches!(err, MosaicError::ScriptSyntax { line: 2, .. }));
    }

    #[test]
    fn test_bad_regex_is_syntax_error() {
        let err = parse_script("+ /[/\n").unwrap_err();
        match err {
            MosaicError::ScriptSyntax { reason, .. } => assert!(reason.starts_with("invalid regex")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_other_indentation_is_a_server_line() {
        // Two spaces is not the emoji marker, so the line fails as a server pattern.
        let err = parse_script("  + \"smile\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid server pattern"));
    }
}
