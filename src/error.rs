use miette::Diagnostic;
use thiserror::Error;

/// Main error type for discmos operations
#[derive(Error, Diagnostic, Debug)]
pub enum MosaicError {
    #[error("IO error: {0}")]
    #[diagnostic(code(discmos::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(discmos::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(discmos::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Selection script line {line} (\"{content}\"): {reason}")]
    #[diagnostic(
        code(discmos::script),
        help("Server lines look like `+ all`, `- \"Server\"` or `/regex/`; emoji lines are indented four spaces")
    )]
    ScriptSyntax {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("No emojis are selected")]
    #[diagnostic(
        code(discmos::select),
        help("Check include.txt; `+ all` selects every emoji in the catalog")
    )]
    EmptySelection,

    #[error("Missing image for emoji :{name}: ({id}): {message}")]
    #[diagnostic(
        code(discmos::asset),
        help("Emoji images are expected at <workspace>/emojis/<id>.png")
    )]
    MissingAsset {
        id: u64,
        name: String,
        message: String,
    },

    #[error("Invalid dimensions: {message}")]
    #[diagnostic(code(discmos::dimension))]
    Dimension { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(discmos::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MosaicError>;
