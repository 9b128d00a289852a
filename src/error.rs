//! Error types for the annotext library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`AnnotextError`] enum.
//!
//! # Examples
//!
//! ```
//! use annotext::error::{AnnotextError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AnnotextError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use serde_json::Value;
use thiserror::Error;

/// Kind of JSON token found where a codec expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonToken {
    StartArray,
    StartObject,
    String,
    Number,
    Boolean,
    Null,
}

impl JsonToken {
    /// The token a JSON value starts with.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => JsonToken::StartArray,
            Value::Object(_) => JsonToken::StartObject,
            Value::String(_) => JsonToken::String,
            Value::Number(_) => JsonToken::Number,
            Value::Bool(_) => JsonToken::Boolean,
            Value::Null => JsonToken::Null,
        }
    }
}

impl fmt::Display for JsonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonToken::StartArray => "START_ARRAY",
            JsonToken::StartObject => "START_OBJECT",
            JsonToken::String => "VALUE_STRING",
            JsonToken::Number => "VALUE_NUMBER",
            JsonToken::Boolean => "VALUE_BOOLEAN",
            JsonToken::Null => "VALUE_NULL",
        };
        f.write_str(name)
    }
}

/// The main error type for annotext operations.
#[derive(Error, Debug)]
pub enum AnnotextError {
    /// I/O errors (reading or writing documents)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input did not start with the token a codec requires.
    #[error("Unexpected token: expected {expected}, found {actual}")]
    UnexpectedToken {
        expected: JsonToken,
        actual: JsonToken,
    },

    /// A codec was used before its shape decoders were bound.
    #[error("Unbound codec: {0}")]
    UnboundCodec(String),

    /// An attribute key name outside the fixed catalog.
    #[error("Unknown attribute key: {0}")]
    UnknownAttributeKey(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with AnnotextError.
pub type Result<T> = std::result::Result<T, AnnotextError>;

impl AnnotextError {
    /// Create an error for input that should have started with `expected`.
    pub fn unexpected_token(expected: JsonToken, actual: &Value) -> Self {
        AnnotextError::UnexpectedToken {
            expected,
            actual: JsonToken::of(actual),
        }
    }

    /// Create a new unbound codec error.
    pub fn unbound_codec<S: Into<String>>(msg: S) -> Self {
        AnnotextError::UnboundCodec(msg.into())
    }

    /// Create a new unknown attribute key error.
    pub fn unknown_attribute_key<S: Into<String>>(name: S) -> Self {
        AnnotextError::UnknownAttributeKey(name.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AnnotextError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        AnnotextError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
