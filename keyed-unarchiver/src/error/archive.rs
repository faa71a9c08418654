/*!
 Errors that can happen when building an archive table from `plist` data.
*/

use std::fmt::{Display, Formatter, Result};

use crate::error::plist::PlistParseError;

/// Errors that can happen when building an [`ArchiveTable`](crate::archive::table::ArchiveTable)
#[derive(Debug)]
pub enum ArchiveError {
    /// The substrate `plist` could not be read
    Plist(plist::Error),
    /// The top level of the archive does not have the expected shape
    Structure(PlistParseError),
    /// The archive declares a `$version` other than the supported one
    VersionMismatch(u64, u64),
    /// No entry exists in `$objects` for the given UID
    MissingObject(u64, usize),
    /// A `$classname`/`$classes` entry is not well formed
    InvalidClassDefinition(usize),
    /// A `$class` entry is not a reference
    InvalidInstance(usize),
}

impl Display for ArchiveError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            ArchiveError::Plist(why) => write!(fmt, "Unable to read plist: {why}"),
            ArchiveError::Structure(why) => write!(fmt, "Malformed archive: {why}"),
            ArchiveError::VersionMismatch(expected, found) => {
                write!(fmt, "Unsupported archive version {found}, expected {expected}")
            }
            ArchiveError::MissingObject(uid, len) => {
                write!(fmt, "UID {uid} is outside of the object table of length {len}")
            }
            ArchiveError::InvalidClassDefinition(idx) => {
                write!(fmt, "Class definition at object index {idx} is malformed")
            }
            ArchiveError::InvalidInstance(idx) => {
                write!(fmt, "Instance at object index {idx} has a malformed $class")
            }
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Plist(why) => Some(why),
            ArchiveError::Structure(why) => Some(why),
            _ => None,
        }
    }
}

impl From<plist::Error> for ArchiveError {
    fn from(why: plist::Error) -> Self {
        ArchiveError::Plist(why)
    }
}

impl From<PlistParseError> for ArchiveError {
    fn from(why: PlistParseError) -> Self {
        ArchiveError::Structure(why)
    }
}
