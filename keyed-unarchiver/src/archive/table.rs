/*!
 Builds an [`ArchiveTable`] from the substrate `plist` data.
*/

use std::io::{Cursor, Read, Seek};

use plist::{Dictionary, Value};
use tracing::debug;

use crate::{
    archive::models::{
        ArchiveEntry, ArchiveValue, ArchivedClass, ArchivedInstance, Attributes, ObjectId,
        CLASS_ANCESTRY_KEY, CLASS_KEY, CLASS_NAME_KEY,
    },
    error::{archive::ArchiveError, plist::PlistParseError},
    util::plist::{
        extract_array_key, extract_dictionary, extract_string_array_key, extract_string_key,
        extract_uid_key, extract_uint_key,
    },
};

/// The only `$version` this crate can read
pub const ARCHIVE_VERSION: u64 = 100_000;

const VERSION_KEY: &str = "$version";
const ARCHIVER_KEY: &str = "$archiver";
const TOP_KEY: &str = "$top";
const OBJECTS_KEY: &str = "$objects";
const ROOT_KEY: &str = "root";

/// The flattened object table of an `NSKeyedArchiver` archive
///
/// Every slot of `$objects` is classified exactly once while the table is built:
///
/// 1. A dictionary with a `$class` key is an [`ArchiveEntry::Instance`]
/// 2. A dictionary with both `$classname` and `$classes` keys is an [`ArchiveEntry::ClassDefinition`]
/// 3. Anything else is an [`ArchiveEntry::Value`] the substrate already decoded
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveTable {
    version: u64,
    archiver: Option<String>,
    top: Attributes,
    root: ObjectId,
    objects: Vec<ArchiveEntry>,
}

impl ArchiveTable {
    /// Read a binary or XML property list and build the table
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, ArchiveError> {
        let value = Value::from_reader(reader)?;
        Self::from_value(&value)
    }

    /// Build the table from property list bytes in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Build the table from an already-parsed property list
    pub fn from_value(value: &Value) -> Result<Self, ArchiveError> {
        let body = value.as_dictionary().ok_or_else(|| {
            PlistParseError::InvalidType("archive".to_string(), "dictionary".to_string())
        })?;

        let version = extract_uint_key(body, VERSION_KEY)?;
        if version != ARCHIVE_VERSION {
            return Err(ArchiveError::VersionMismatch(ARCHIVE_VERSION, version));
        }

        let archiver = extract_string_key(body, ARCHIVER_KEY).ok().map(String::from);

        let top_dict = extract_dictionary(body, TOP_KEY)?;
        let root = ObjectId::from(extract_uid_key(top_dict, ROOT_KEY)?);
        let top = convert_attributes(top_dict)?;

        let objects = extract_array_key(body, OBJECTS_KEY)?
            .iter()
            .enumerate()
            .map(|(idx, item)| classify(idx, item))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            version,
            archiver = archiver.as_deref().unwrap_or_default(),
            objects = objects.len(),
            %root,
            "loaded keyed archive"
        );

        Ok(Self {
            version,
            archiver,
            top,
            root,
            objects,
        })
    }

    /// The object the archive's `$top` dictionary designates as `root`
    pub fn root_id(&self) -> ObjectId {
        self.root
    }

    /// Get the classified entry stored at `id`
    pub fn entry(&self, id: ObjectId) -> Result<&ArchiveEntry, ArchiveError> {
        usize::try_from(id.get())
            .ok()
            .and_then(|idx| self.objects.get(idx))
            .ok_or(ArchiveError::MissingObject(id.get(), self.objects.len()))
    }

    /// The `$top` dictionary, including `root`
    pub fn top(&self) -> &Attributes {
        &self.top
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The `$archiver` name, if the archive recorded one
    pub fn archiver(&self) -> Option<&str> {
        self.archiver.as_deref()
    }

    /// Number of slots in the object table, including the `$null` sentinel
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over every slot in table order
    pub fn entries(&self) -> impl Iterator<Item = (ObjectId, &ArchiveEntry)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(idx, entry)| (ObjectId::new(idx as u64), entry))
    }
}

/// Convert every value of a dictionary, leaving references unresolved
fn convert_attributes(body: &Dictionary) -> Result<Attributes, PlistParseError> {
    body.iter()
        .map(|(key, value)| Ok((key.clone(), ArchiveValue::from_plist(value)?)))
        .collect()
}

/// Classify a single `$objects` slot
fn classify(idx: usize, item: &Value) -> Result<ArchiveEntry, ArchiveError> {
    let Some(body) = item.as_dictionary() else {
        return Ok(ArchiveEntry::Value(ArchiveValue::from_plist(item)?));
    };

    if body.contains_key(CLASS_KEY) {
        let class_ref = extract_uid_key(body, CLASS_KEY)
            .map_err(|_| ArchiveError::InvalidInstance(idx))?;
        let mut attributes = convert_attributes(body)?;
        attributes.remove(CLASS_KEY);
        return Ok(ArchiveEntry::Instance(ArchivedInstance {
            class_ref: ObjectId::from(class_ref),
            attributes,
        }));
    }

    if body.contains_key(CLASS_NAME_KEY) && body.contains_key(CLASS_ANCESTRY_KEY) {
        let name = extract_string_key(body, CLASS_NAME_KEY)
            .map_err(|_| ArchiveError::InvalidClassDefinition(idx))?;
        let ancestry = extract_string_array_key(body, CLASS_ANCESTRY_KEY)
            .map_err(|_| ArchiveError::InvalidClassDefinition(idx))?;
        return Ok(ArchiveEntry::ClassDefinition(ArchivedClass {
            name: name.to_string(),
            ancestry,
        }));
    }

    Ok(ArchiveEntry::Value(ArchiveValue::Dictionary(
        convert_attributes(body)?,
    )))
}
