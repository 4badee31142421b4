use serde::Serialize;

pub(crate) const SUPPORTED_SUGGESTION: &str = "Use hex, rgb[a], hsl[a], oklch, or oklab.";

/// Why a color string was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum ErrorKind {
    /// Empty input, or a recognized syntax with a malformed body.
    InvalidColor,
    /// The syntax isn't recognized and no resolver could translate it.
    UnsupportedFormat,
    /// A resolver answered with something that doesn't parse either.
    BrowserConversionFailed,
}

/// The failure side of a parse. Carries everything a UI needs to explain
/// the rejection to the user.
#[derive(Clone, Debug, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ColorError {
    pub input: String,
    #[serde(rename = "reason")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ColorError {
    pub(crate) fn new(input: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            input: input.to_owned(),
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    pub(crate) fn unsupported(input: &str) -> Self {
        Self {
            suggestion: Some(SUPPORTED_SUGGESTION.to_owned()),
            ..Self::new(
                input,
                ErrorKind::UnsupportedFormat,
                format!("Unsupported color: {input}"),
            )
        }
    }
}

/// Problems found inside the body of an otherwise recognized color function.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ComponentError {
    #[error("expected functional notation like name(...)")]
    MissingParens,
    #[error("hex colors need 3, 4, 6 or 8 digits, found {0}")]
    HexLength(usize),
    #[error("invalid hex digits '{0}'")]
    HexDigits(String),
    #[error("expected {expected} components, found {found}")]
    ComponentCount { expected: usize, found: usize },
    #[error("malformed component list '{0}'")]
    Malformed(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Expected percentage (e.g., 50%).")]
    ExpectedPercentage,
}
