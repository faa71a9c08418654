/*!
 Errors that can happen while resolving an archive into live objects.

 Every variant is fatal for the session that produced it; there is no retry.
*/

use std::fmt::{Display, Formatter, Result};

use crate::{archive::models::ObjectId, error::archive::ArchiveError};

/// Errors that can happen while resolving an archive into live objects
#[derive(Debug)]
pub enum UnarchiveError {
    /// The archive could not be loaded or is structurally invalid
    MalformedArchive(ArchiveError),
    /// An instance references a class name with no registered capability
    UnknownClass(String),
    /// A reference points at a class definition or at a slot with no entry
    InvalidReference(ObjectId, String),
    /// The requested attribute is absent from the current container
    KeyNotFound(String),
    /// `decode(None)` was called below the top level
    MissingKey,
    /// The attribute exists but does not have the expected shape
    InvalidType(String, String),
    /// An object was read before its initializer finished
    Uninitialized(ObjectId),
    /// An object was read as a type it is not
    TypeMismatch(ObjectId, &'static str),
    /// A class was registered after decoding started
    RegistryLocked(String),
    /// A previous initializer failed, so the session can no longer be trusted
    Poisoned,
}

impl Display for UnarchiveError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            UnarchiveError::MalformedArchive(why) => write!(fmt, "{why}"),
            UnarchiveError::UnknownClass(name) => {
                write!(fmt, "Class {name} is not registered on the unarchiver")
            }
            UnarchiveError::InvalidReference(id, why) => {
                write!(fmt, "Invalid reference to {id}: {why}")
            }
            UnarchiveError::KeyNotFound(key) => {
                write!(fmt, "Key {key} not found on the current object")
            }
            UnarchiveError::MissingKey => write!(
                fmt,
                "A key must be specified when decoding attributes of an object"
            ),
            UnarchiveError::InvalidType(key, expected) => {
                write!(fmt, "Invalid data found at {key}, expected {expected}")
            }
            UnarchiveError::Uninitialized(id) => {
                write!(fmt, "Object {id} was read before it was initialized")
            }
            UnarchiveError::TypeMismatch(id, expected) => {
                write!(fmt, "Object {id} is not a {expected}")
            }
            UnarchiveError::RegistryLocked(name) => {
                write!(fmt, "Cannot register {name} after decoding has started")
            }
            UnarchiveError::Poisoned => {
                write!(fmt, "A previous initializer failed; start a new session")
            }
        }
    }
}

impl std::error::Error for UnarchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UnarchiveError::MalformedArchive(why) => Some(why),
            _ => None,
        }
    }
}

impl From<ArchiveError> for UnarchiveError {
    fn from(why: ArchiveError) -> Self {
        UnarchiveError::MalformedArchive(why)
    }
}
