//! Error families raised while sampling spaces and writing campaigns.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, with enough context to find the offending key, file
/// or line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code tests and callers match on, e.g. `grid-too-small`.
    pub code: String,
    /// One-line description.
    pub message: String,
    /// Where it happened: parameter keys, paths, line numbers.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, when there is an obvious one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Error raised by every fallible scan operation, grouped by family so
/// callers can match on the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ScanError {
    /// Malformed parameter specification or parameter space.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// Requested sample count cannot be honoured.
    #[error("invalid sample count: {0}")]
    InvalidSampleCount(ErrorInfo),
    /// A case directory could not be created.
    #[error("directory creation failed: {0}")]
    DirectoryCreation(ErrorInfo),
    /// An assignment could not be merged into the template.
    #[error("template merge failed: {0}")]
    TemplateMerge(ErrorInfo),
    /// Input deck parse or format errors.
    #[error("deck error: {0}")]
    Deck(ErrorInfo),
    /// File read and write failures outside directory creation.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    /// Renders `message [code] (key=value, ...); hint: ...`, omitting empty
    /// parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        let mut context = self.context.iter();
        if let Some((key, value)) = context.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in context {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl ScanError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ScanError::InvalidParameter(info)
            | ScanError::InvalidSampleCount(info)
            | ScanError::DirectoryCreation(info)
            | ScanError::TemplateMerge(info)
            | ScanError::Deck(info)
            | ScanError::Io(info)
            | ScanError::Serde(info) => info,
        }
    }

    /// Returns the stable code of the underlying payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
