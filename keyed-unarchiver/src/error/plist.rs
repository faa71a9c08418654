/*!
 Errors that can happen when extracting data from a `plist` value tree.
*/

use std::fmt::{Display, Formatter, Result};

/// Errors that can happen when extracting data from a `plist` value tree
#[derive(Debug, PartialEq, Eq)]
pub enum PlistParseError {
    /// The key was not present on the dictionary
    MissingKey(String),
    /// The value at the key was not the expected type
    InvalidType(String, String),
    /// The value at the index was not the expected type
    InvalidTypeIndex(usize, String),
}

impl Display for PlistParseError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            PlistParseError::MissingKey(key) => write!(fmt, "Expected key {key}, found nothing!"),
            PlistParseError::InvalidType(key, value) => {
                write!(fmt, "Invalid data found at {key}, expected {value}")
            }
            PlistParseError::InvalidTypeIndex(idx, value) => {
                write!(fmt, "Invalid data found at object index {idx}, expected {value}")
            }
        }
    }
}

impl std::error::Error for PlistParseError {}
