//! Reader and writer for block-structured input decks.
//!
//! ```text
//! # comment
//! begin:control
//!   nx = 256
//!   t_end = 1.0e-12
//!   use_balance = T
//! end:control
//! ```
//!
//! Blocks map parameter names to scalars. A block that appears twice is
//! merged, later keys winning. Values read as booleans (`T`, `F`, `true`,
//! `false`), then integers, then finite floats; anything else is kept as a
//! string, so expressions such as `1.0 * micron` survive a round trip.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::Value;
use serde::{Deserialize, Serialize};

/// Parameters of one deck block, in file order.
pub type Block = IndexMap<String, Value>;

/// Parsed deck: block name to parameters, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    blocks: IndexMap<String, Block>,
}

impl Deck {
    /// Empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of block `name`.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    /// Value of `key` in `block`.
    pub fn get(&self, block: &str, key: &str) -> Option<&Value> {
        self.blocks.get(block).and_then(|params| params.get(key))
    }

    /// Sets `block.key`, creating the block when needed.
    pub fn set(&mut self, block: impl Into<String>, key: impl Into<String>, value: Value) {
        self.blocks
            .entry(block.into())
            .or_default()
            .insert(key.into(), value);
    }

    /// Returns the deck extended with `block.key = value`.
    pub fn with(mut self, block: &str, key: &str, value: impl Into<Value>) -> Self {
        self.set(block, key, value.into());
        self
    }

    /// Overlays `other` onto `self`; `other` wins on collisions and its new
    /// blocks are appended.
    pub fn overlay(&mut self, other: &Deck) {
        for (name, params) in &other.blocks {
            let block = self.blocks.entry(name.clone()).or_default();
            for (key, value) in params {
                block.insert(key.clone(), value.clone());
            }
        }
    }

    /// Blocks in file order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &Block)> + '_ {
        self.blocks.iter().map(|(name, block)| (name.as_str(), block))
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the deck has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Checks that `block.key = value` can be written and read back as the same
/// block, key and value. Strings that would read back as another type (`5`,
/// `T`) or lose surrounding whitespace are rejected.
pub fn check_entry(block: &str, key: &str, value: &Value) -> Result<(), ErrorInfo> {
    let reject = |message: &str| {
        ErrorInfo::new("deck-unrepresentable", message.to_string())
            .with_context("block", block)
            .with_context("key", key)
    };
    if block.is_empty() || block.chars().any(|c| c.is_whitespace() || c == '#' || c == ':') {
        return Err(reject("block names must be non-empty words"));
    }
    if key.is_empty() || key.chars().any(|c| c.is_whitespace() || c == '#' || c == '=') {
        return Err(reject("parameter names must be non-empty words without `=`"));
    }
    match value {
        Value::Float(v) if !v.is_finite() => Err(reject("floats must be finite")),
        Value::Str(s) if s.contains(['\n', '\r', '#']) => {
            Err(reject("strings may not contain line breaks or `#`"))
        }
        Value::Str(s) if s.trim() != s || parse_value(s) != *value => {
            Err(reject("string would read back as a different value"))
        }
        _ => Ok(()),
    }
}

/// Parses deck text.
pub fn load(text: &str) -> Result<Deck, ScanError> {
    let mut deck = Deck::new();
    let mut current: Option<(String, usize)> = None;
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix("begin:") {
            let name = name.trim();
            if let Some((open, opened_at)) = &current {
                return Err(parse_error(line_no, "nested block")
                    .with_context("open_block", open.clone())
                    .with_context("opened_at", opened_at.to_string())
                    .into_deck());
            }
            if name.is_empty() {
                return Err(parse_error(line_no, "block name is empty").into_deck());
            }
            deck.blocks.entry(name.to_string()).or_default();
            current = Some((name.to_string(), line_no));
            continue;
        }
        if let Some(name) = line.strip_prefix("end:") {
            let name = name.trim();
            match current.take() {
                Some((open, _)) if open == name => continue,
                Some((open, _)) => {
                    return Err(parse_error(line_no, "end does not match open block")
                        .with_context("open_block", open)
                        .with_context("end_block", name)
                        .into_deck());
                }
                None => {
                    return Err(parse_error(line_no, "end without matching begin")
                        .with_context("end_block", name)
                        .into_deck());
                }
            }
        }
        let Some((block, _)) = &current else {
            return Err(parse_error(line_no, "parameter outside of a block").into_deck());
        };
        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_error(line_no, "expected `key = value`").into_deck());
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(parse_error(line_no, "parameter name is empty").into_deck());
        }
        deck.set(block.clone(), key, parse_value(value.trim()));
    }
    if let Some((open, opened_at)) = current {
        return Err(ScanError::Deck(
            ErrorInfo::new("deck-unterminated", "block is never closed")
                .with_context("block", open)
                .with_context("line", opened_at.to_string()),
        ));
    }
    Ok(deck)
}

/// Renders a deck. Fails if an entry cannot be read back (see
/// [`check_entry`]).
pub fn dump(deck: &Deck) -> Result<String, ScanError> {
    let mut out = String::new();
    for (idx, (name, params)) in deck.blocks().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str("begin:");
        out.push_str(name);
        out.push('\n');
        for (key, value) in params {
            check_entry(name, key, value).map_err(ScanError::Deck)?;
            out.push_str(&format!("  {key} = {value}\n"));
        }
        out.push_str("end:");
        out.push_str(name);
        out.push('\n');
    }
    Ok(out)
}

/// Reads and parses a deck file.
pub fn load_file(path: &Path) -> Result<Deck, ScanError> {
    let text = fs::read_to_string(path).map_err(|err| {
        ScanError::Io(
            ErrorInfo::new("deck-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    load(&text).map_err(|err| match err {
        ScanError::Deck(info) => {
            ScanError::Deck(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

/// Renders `deck` into `path`, replacing any previous content.
pub fn dump_file(deck: &Deck, path: &Path) -> Result<(), ScanError> {
    let text = dump(deck)?;
    fs::write(path, text).map_err(|err| {
        ScanError::Io(
            ErrorInfo::new("deck-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Interprets a raw deck value.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "T" | "t" => return Value::Bool(true),
        "F" | "f" => return Value::Bool(false),
        _ => {}
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Int(int);
    }
    match raw.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::Float(float),
        _ => Value::Str(raw.to_string()),
    }
}

fn parse_error(line: usize, message: &str) -> ErrorInfo {
    ErrorInfo::new("deck-parse", message.to_string()).with_context("line", line.to_string())
}

trait IntoDeckError {
    fn into_deck(self) -> ScanError;
}

impl IntoDeckError for ErrorInfo {
    fn into_deck(self) -> ScanError {
        ScanError::Deck(self)
    }
}
