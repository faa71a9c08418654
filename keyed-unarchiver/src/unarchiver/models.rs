/*!
 Data structures produced by an [`Unarchiver`](crate::unarchiver::session::Unarchiver) session.
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::archive::models::{ObjectId, Scalar};

/// A fully resolved attribute value
///
/// Instances are never inlined: they are returned as [`Decoded::Object`] handles into the session's arena, so two
/// attributes that reference the same archived object hold the same [`ObjectId`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Decoded {
    /// A reference to UID `0`
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<Decoded>),
    Dictionary(BTreeMap<String, Decoded>),
    /// A live object stored in the session's arena
    Object(ObjectId),
}

impl Decoded {
    pub fn is_null(&self) -> bool {
        matches!(self, Decoded::Null)
    }

    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Decoded::Object(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Decoded::Scalar(Scalar::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Integers that fit in an [`i64`]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Decoded::Scalar(Scalar::SignedInteger(int)) => Some(*int),
            Decoded::Scalar(Scalar::UnsignedInteger(int)) => i64::try_from(*int).ok(),
            _ => None,
        }
    }

    /// Reals, or integers widened to [`f64`]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Decoded::Scalar(Scalar::Real(real)) => Some(*real),
            Decoded::Scalar(Scalar::SignedInteger(int)) => Some(*int as f64),
            Decoded::Scalar(Scalar::UnsignedInteger(int)) => Some(*int as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Decoded::Scalar(Scalar::Boolean(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Decoded::Scalar(Scalar::Data(bytes)) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Decoded::Scalar(Scalar::Date(date)) => Some(date),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Decoded]> {
        match self {
            Decoded::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Lifecycle of an object in the session's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    /// Allocated and waiting in the pending queue
    Allocated,
    /// Its initializer is currently running
    Initializing,
    /// Its initializer has finished
    Initialized,
}
