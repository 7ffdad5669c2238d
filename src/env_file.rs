//! `.env` file parsing.
//!
//! Accepts the common dotenv subset: `KEY=VALUE` lines, `#` comments,
//! an optional `export` prefix, and single- or double-quoted values.
//! Anything else is rejected with the offending line number.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// A syntax error at a specific line of a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct EnvSyntaxError {
    /// 1-based line number.
    pub line: usize,
    /// What was wrong with the line.
    pub reason: String,
}

impl EnvSyntaxError {
    fn new(line_index: usize, reason: impl Into<String>) -> Self {
        Self {
            line: line_index + 1,
            reason: reason.into(),
        }
    }
}

/// Errors from loading a `.env` file from disk.
#[derive(Debug, Error)]
pub enum EnvFileError {
    /// The file exists but could not be read.
    #[error("failed to read env file '{path}'")]
    Read {
        /// File path as given.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The file could not be parsed.
    #[error("failed to parse env file '{path}'")]
    Syntax {
        /// File path as given.
        path: String,
        /// Line-level syntax error.
        #[source]
        source: EnvSyntaxError,
    },
}

/// Loads `path` if it exists. A missing file is not an error.
///
/// # Errors
///
/// Returns [`EnvFileError`] when the file is unreadable or malformed.
pub fn load_env_file(path: &Path) -> Result<Option<BTreeMap<String, String>>, EnvFileError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(EnvFileError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    parse_env_str(&raw)
        .map(Some)
        .map_err(|source| EnvFileError::Syntax {
            path: path.display().to_string(),
            source,
        })
}

/// Parses `.env` content into an ordered key/value map. Later duplicates win.
///
/// # Errors
///
/// Returns [`EnvSyntaxError`] for the first malformed line.
pub fn parse_env_str(raw: &str) -> Result<BTreeMap<String, String>, EnvSyntaxError> {
    let mut vars = BTreeMap::new();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            return Err(EnvSyntaxError::new(line_index, "expected KEY=VALUE"));
        };

        let key = raw_key.trim();
        if !is_valid_key(key) {
            return Err(EnvSyntaxError::new(
                line_index,
                format!("invalid variable name '{key}'"),
            ));
        }

        let value = parse_value(raw_value.trim())
            .map_err(|reason| EnvSyntaxError::new(line_index, reason))?;
        vars.insert(key.to_string(), value);
    }
    Ok(vars)
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(raw_value: &str) -> Result<String, &'static str> {
    for quote in ['"', '\''] {
        if raw_value.starts_with(quote) {
            if raw_value.len() < 2 || !raw_value.ends_with(quote) {
                return Err("unterminated quoted value");
            }
            return Ok(raw_value[1..raw_value.len() - 1].to_string());
        }
    }
    Ok(raw_value.to_string())
}

/// Cuts a `#` comment that starts the line or follows whitespace outside quotes.
fn strip_inline_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut previous_is_space = true;
    for (index, ch) in line.char_indices() {
        match (ch, quote) {
            ('"' | '\'', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            ('#', None) if previous_is_space => return &line[..index],
            _ => {}
        }
        previous_is_space = ch.is_whitespace();
    }
    line
}
