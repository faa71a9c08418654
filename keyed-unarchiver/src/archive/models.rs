/*!
 Data structures that describe the contents of an `NSKeyedArchiver` object table.
*/

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use chrono::{DateTime, Utc};
use plist::{Uid, Value};

use crate::{error::plist::PlistParseError, util::plist::as_uid};

/// Prefix the archiver reserves for its own metadata keys
pub const RESERVED_PREFIX: char = '$';
/// Key on an instance that references its class definition
pub const CLASS_KEY: &str = "$class";
/// Key on a class definition that names the class
pub const CLASS_NAME_KEY: &str = "$classname";
/// Key on a class definition that lists the class and its ancestors
pub const CLASS_ANCESTRY_KEY: &str = "$classes";

/// Named attributes of an archived instance or dictionary
pub type Attributes = BTreeMap<String, ArchiveValue>;

/// Handle to a slot in the archive's object table
///
/// [`ObjectId::NULL`] is reserved and always denotes the null reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// The null reference
    pub const NULL: ObjectId = ObjectId(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl From<Uid> for ObjectId {
    fn from(uid: Uid) -> Self {
        Self(uid.get())
    }
}

impl Display for ObjectId {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        write!(fmt, "UID {}", self.0)
    }
}

/// A single primitive value the substrate `plist` parser has already fully decoded
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    /// Signed integer types are coerced into this container
    SignedInteger(i64),
    /// Only used for integers too large to fit in an [`i64`]
    UnsignedInteger(u64),
    Real(f64),
    String(String),
    Data(Vec<u8>),
    Date(DateTime<Utc>),
}

/// Any value that can appear as an attribute or as an element of a sequence
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveValue {
    Scalar(Scalar),
    /// An ordered collection of values
    Sequence(Vec<ArchiveValue>),
    /// A plain dictionary that is neither an instance nor a class definition
    Dictionary(Attributes),
    /// Points at another slot in the object table
    Reference(ObjectId),
}

impl ArchiveValue {
    /// Convert a substrate `plist` value, keeping UIDs as unresolved references
    pub fn from_plist(value: &Value) -> Result<Self, PlistParseError> {
        if let Some(uid) = as_uid(value) {
            return Ok(Self::Reference(ObjectId::from(uid)));
        }
        Ok(match value {
            Value::Boolean(flag) => Self::Scalar(Scalar::Boolean(*flag)),
            Value::Integer(int) => match int.as_signed() {
                Some(signed) => Self::Scalar(Scalar::SignedInteger(signed)),
                None => Self::Scalar(Scalar::UnsignedInteger(int.as_unsigned().ok_or_else(
                    || PlistParseError::InvalidType(format!("{int:?}"), "integer".to_string()),
                )?)),
            },
            Value::Real(real) => Self::Scalar(Scalar::Real(*real)),
            Value::String(text) => Self::Scalar(Scalar::String(text.clone())),
            Value::Data(bytes) => Self::Scalar(Scalar::Data(bytes.clone())),
            Value::Date(date) => {
                Self::Scalar(Scalar::Date(std::time::SystemTime::from(*date).into()))
            }
            Value::Array(items) => Self::Sequence(
                items
                    .iter()
                    .map(Self::from_plist)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Dictionary(body) => Self::Dictionary(
                body.iter()
                    .map(|(key, item)| Ok((key.clone(), Self::from_plist(item)?)))
                    .collect::<Result<_, PlistParseError>>()?,
            ),
            other => {
                return Err(PlistParseError::InvalidType(
                    format!("{other:?}"),
                    "supported plist value".to_string(),
                ))
            }
        })
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            ArchiveValue::Reference(id) => Some(*id),
            _ => None,
        }
    }
}

/// An archived object: a reference to its class plus its named attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedInstance {
    /// Slot of the [`ArchivedClass`] describing this instance
    pub class_ref: ObjectId,
    /// Attributes as stored, without the `$class` key
    pub attributes: Attributes,
}

impl ArchivedInstance {
    /// Attribute names as callers would request them, with any escaping removed
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(|key| unsanitize_key(key))
    }
}

/// An archived class definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedClass {
    /// The name the class was archived under
    pub name: String,
    /// The class followed by each of its superclasses, most derived first
    pub ancestry: Vec<String>,
}

impl ArchivedClass {
    /// Whether this class is `name` or inherits from it
    pub fn is_kind_of(&self, name: &str) -> bool {
        self.name == name || self.ancestry.iter().any(|class| class == name)
    }
}

/// The classified contents of one slot in the object table
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveEntry {
    /// A scalar, sequence, or plain dictionary already decoded by the substrate
    Value(ArchiveValue),
    Instance(ArchivedInstance),
    ClassDefinition(ArchivedClass),
}

/// Escape a caller-supplied key so it cannot collide with the archiver's metadata keys
///
/// A key that starts with `$` is stored with the prefix doubled, i.e. `$foo` is stored as `$$foo`.
pub fn sanitize_key(key: &str) -> Cow<'_, str> {
    if key.starts_with(RESERVED_PREFIX) {
        Cow::Owned(format!("{RESERVED_PREFIX}{key}"))
    } else {
        Cow::Borrowed(key)
    }
}

/// Inverse of [`sanitize_key`]
pub fn unsanitize_key(key: &str) -> &str {
    key.strip_prefix(RESERVED_PREFIX).unwrap_or(key)
}
