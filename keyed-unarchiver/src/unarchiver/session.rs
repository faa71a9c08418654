/*!
 The decode engine: resolves archived values into [`Decoded`] values and live objects.
*/

use std::{
    any::type_name,
    collections::{BTreeMap, HashMap, VecDeque},
    io::{Read, Seek},
    mem,
};

use tracing::{debug, trace};

use crate::{
    archive::{
        models::{
            sanitize_key, ArchiveEntry, ArchiveValue, ArchivedClass, Attributes, ObjectId, Scalar,
        },
        table::ArchiveTable,
    },
    error::unarchive::UnarchiveError,
    unarchiver::{
        coding::NSCoding,
        models::{Decoded, ObjectState},
        registry::{Capability, Ignored, Registry},
    },
};

/// An attribute container that lookups can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// The archive's `$top` dictionary
    Top,
    /// The attributes of the instance stored at this slot
    Instance(ObjectId),
}

/// An entry in the session's arena
#[derive(Debug)]
enum Slot {
    Allocated(Box<dyn NSCoding>),
    /// The object has been moved out to run its initializer
    Initializing,
    Initialized(Box<dyn NSCoding>),
}

impl Slot {
    fn state(&self) -> ObjectState {
        match self {
            Slot::Allocated(_) => ObjectState::Allocated,
            Slot::Initializing => ObjectState::Initializing,
            Slot::Initialized(_) => ObjectState::Initialized,
        }
    }
}

/// A single decoding session over one archive
///
/// The session owns the archive, the class registry, and an arena of every object it has allocated. Objects are
/// addressed by the [`ObjectId`] of the slot they were archived in.
///
/// # Example
///
/// ```no_run
/// use keyed_unarchiver::unarchiver::{registry::Registry, session::Unarchiver};
///
/// let bytes = std::fs::read("archive.plist").unwrap();
/// let mut unarchiver = Unarchiver::from_bytes(&bytes, Registry::foundation()).unwrap();
/// let root = unarchiver.decode(None).unwrap();
/// ```
#[derive(Debug)]
pub struct Unarchiver {
    archive: ArchiveTable,
    registry: Registry,
    /// Every object allocated so far; entries are never removed or replaced by another object
    objects: HashMap<ObjectId, Slot>,
    /// Objects that are allocated but not yet initialized, in the order they were first referenced
    pending: VecDeque<ObjectId>,
    /// The innermost frame is the container attribute lookups read from
    containers: Vec<Frame>,
    started: bool,
    poisoned: bool,
}

impl Unarchiver {
    /// Start a session over an already-built archive table
    pub fn new(archive: ArchiveTable, registry: Registry) -> Self {
        debug!(
            objects = archive.len(),
            classes = registry.len(),
            "starting unarchiver session"
        );
        Self {
            archive,
            registry,
            objects: HashMap::new(),
            pending: VecDeque::new(),
            containers: vec![Frame::Top],
            started: false,
            poisoned: false,
        }
    }

    /// Start a session over property list bytes
    pub fn from_bytes(bytes: &[u8], registry: Registry) -> Result<Self, UnarchiveError> {
        Ok(Self::new(ArchiveTable::from_bytes(bytes)?, registry))
    }

    /// Start a session over a reader that yields a property list
    pub fn from_reader<R: Read + Seek>(
        reader: R,
        registry: Registry,
    ) -> Result<Self, UnarchiveError> {
        Ok(Self::new(ArchiveTable::from_reader(reader)?, registry))
    }

    /// The archive this session reads from
    pub fn archive(&self) -> &ArchiveTable {
        &self.archive
    }

    /// Decode instances archived as `class_name` into `T`
    ///
    /// Registration is only allowed before the first call to [`Unarchiver::decode`].
    pub fn register<T: NSCoding + Default>(
        &mut self,
        class_name: &str,
    ) -> Result<(), UnarchiveError> {
        self.register_capability(class_name, Capability::of::<T>())
    }

    /// Decode instances archived as `class_name` with `capability`
    pub fn register_capability(
        &mut self,
        class_name: &str,
        capability: Capability,
    ) -> Result<(), UnarchiveError> {
        if self.started {
            return Err(UnarchiveError::RegistryLocked(class_name.to_string()));
        }
        self.registry.register_capability(class_name, capability);
        Ok(())
    }

    /// Accept and discard instances archived as `class_name`
    pub fn ignore(&mut self, class_name: &str) -> Result<(), UnarchiveError> {
        self.register::<Ignored>(class_name)
    }

    /// Whether the innermost container is the archive's `$top` dictionary
    fn at_top_level(&self) -> bool {
        self.containers.len() == 1
    }

    /// Decode a value from the current container
    ///
    /// - `None` is only allowed at the top level, where it decodes the archive's root object.
    /// - `Some(key)` reads `key` from the attributes of the object currently being initialized, or from `$top`
    ///   when called at the top level. Keys that start with `$` are looked up with the prefix doubled so they
    ///   cannot collide with the archiver's metadata keys.
    ///
    /// Every object allocated while resolving the value, and any object those allocate in turn, is initialized
    /// before this returns. Any failure poisons the session.
    pub fn decode(&mut self, key: Option<&str>) -> Result<Decoded, UnarchiveError> {
        if self.poisoned {
            return Err(UnarchiveError::Poisoned);
        }
        self.started = true;

        let result = self
            .resolve_key(key)
            .and_then(|decoded| self.finish_decoding().map(|_| decoded));

        if result.is_err() {
            self.poisoned = true;
            self.pending.clear();
        }
        result
    }

    /// Look up `key` in the current container and resolve it, without draining the pending queue
    fn resolve_key(&mut self, key: Option<&str>) -> Result<Decoded, UnarchiveError> {
        let root;
        let value = match key {
            None if self.at_top_level() => {
                root = ArchiveValue::Reference(self.archive.root_id());
                &root
            }
            None => return Err(UnarchiveError::MissingKey),
            Some(key) => {
                let frame = self.current_frame();
                container(&self.archive, frame)?
                    .get(&*sanitize_key(key))
                    .ok_or_else(|| UnarchiveError::KeyNotFound(key.to_string()))?
            }
        };

        Resolver {
            archive: &self.archive,
            registry: &self.registry,
            objects: &mut self.objects,
            pending: &mut self.pending,
            visiting: vec![],
        }
        .resolve(value)
    }

    fn current_frame(&self) -> Frame {
        self.containers.last().copied().unwrap_or(Frame::Top)
    }

    /// Initialize every pending object, including any that get queued while doing so
    fn finish_decoding(&mut self) -> Result<(), UnarchiveError> {
        let mut initialized = 0;
        while let Some(id) = self.pending.pop_front() {
            let taken = self
                .objects
                .get_mut(&id)
                .map(|slot| mem::replace(slot, Slot::Initializing));
            let mut object = match taken {
                Some(Slot::Allocated(object)) => object,
                Some(other) => {
                    // Already handled by a nested drain
                    self.objects.insert(id, other);
                    continue;
                }
                None => {
                    return Err(UnarchiveError::InvalidReference(
                        id,
                        "pending object is missing from the arena".to_string(),
                    ))
                }
            };

            trace!(%id, "initializing object");
            self.containers.push(Frame::Instance(id));
            let mut result = object.init_from_archive(self);
            self.containers.pop();

            // An initializer may have swallowed a nested failure
            if result.is_ok() && self.poisoned {
                result = Err(UnarchiveError::Poisoned);
            }

            match result {
                Ok(()) => {
                    self.objects.insert(id, Slot::Initialized(object));
                    initialized += 1;
                }
                Err(why) => {
                    self.objects.insert(id, Slot::Allocated(object));
                    return Err(why);
                }
            }
        }

        if initialized > 0 {
            debug!(initialized, depth = self.containers.len(), "drained pending objects");
        }
        Ok(())
    }

    /// Whether the current container has an attribute named `key`
    pub fn contains_key(&self, key: &str) -> bool {
        container(&self.archive, self.current_frame())
            .map(|attributes| attributes.contains_key(&*sanitize_key(key)))
            .unwrap_or(false)
    }

    /// Shorthand for `decode(Some(key))`
    pub fn decode_key(&mut self, key: &str) -> Result<Decoded, UnarchiveError> {
        self.decode(Some(key))
    }

    /// Decode `key` as text
    pub fn decode_string(&mut self, key: &str) -> Result<String, UnarchiveError> {
        match self.decode_key(key)? {
            Decoded::Scalar(Scalar::String(text)) => Ok(text),
            _ => Err(invalid_type(key, "string")),
        }
    }

    /// Decode `key` as an integer that fits in an [`i64`]
    pub fn decode_integer(&mut self, key: &str) -> Result<i64, UnarchiveError> {
        self.decode_key(key)?
            .as_integer()
            .ok_or_else(|| invalid_type(key, "integer"))
    }

    /// Decode `key` as a real; integers are widened
    pub fn decode_real(&mut self, key: &str) -> Result<f64, UnarchiveError> {
        self.decode_key(key)?
            .as_real()
            .ok_or_else(|| invalid_type(key, "real"))
    }

    /// Decode `key` as a boolean
    pub fn decode_bool(&mut self, key: &str) -> Result<bool, UnarchiveError> {
        self.decode_key(key)?
            .as_bool()
            .ok_or_else(|| invalid_type(key, "boolean"))
    }

    /// Decode `key` as raw bytes
    pub fn decode_data(&mut self, key: &str) -> Result<Vec<u8>, UnarchiveError> {
        match self.decode_key(key)? {
            Decoded::Scalar(Scalar::Data(bytes)) => Ok(bytes),
            _ => Err(invalid_type(key, "data")),
        }
    }

    /// Decode `key` as a handle to an object, where a null reference is [`None`]
    pub fn decode_object(&mut self, key: &str) -> Result<Option<ObjectId>, UnarchiveError> {
        match self.decode_key(key)? {
            Decoded::Object(id) => Ok(Some(id)),
            Decoded::Null => Ok(None),
            _ => Err(invalid_type(key, "object")),
        }
    }

    /// Decode `key` as an ordered sequence
    pub fn decode_array(&mut self, key: &str) -> Result<Vec<Decoded>, UnarchiveError> {
        match self.decode_key(key)? {
            Decoded::Sequence(items) => Ok(items),
            _ => Err(invalid_type(key, "array")),
        }
    }

    /// The lifecycle state of the object at `id`, if it has been allocated
    pub fn state(&self, id: ObjectId) -> Option<ObjectState> {
        self.objects.get(&id).map(Slot::state)
    }

    /// Borrow an initialized object
    pub fn object_dyn(&self, id: ObjectId) -> Result<&dyn NSCoding, UnarchiveError> {
        match self.objects.get(&id) {
            Some(Slot::Initialized(object)) => Ok(&**object),
            Some(_) => Err(UnarchiveError::Uninitialized(id)),
            None => Err(UnarchiveError::InvalidReference(
                id,
                "object has not been decoded in this session".to_string(),
            )),
        }
    }

    /// Borrow an initialized object as its concrete type
    pub fn object<T: NSCoding>(&self, id: ObjectId) -> Result<&T, UnarchiveError> {
        downcast(id, self.object_dyn(id)?)
    }

    /// Decode the root object and hand over everything the session built
    pub fn into_graph(mut self) -> Result<ObjectGraph, UnarchiveError> {
        let root = self.decode(None)?;
        let objects = self
            .objects
            .into_iter()
            .filter_map(|(id, slot)| match slot {
                Slot::Initialized(object) => Some((id, object)),
                _ => None,
            })
            .collect();
        Ok(ObjectGraph { root, objects })
    }
}

/// Every object built by a finished session, keyed by the slot it was archived in
#[derive(Debug)]
pub struct ObjectGraph {
    root: Decoded,
    objects: HashMap<ObjectId, Box<dyn NSCoding>>,
}

impl ObjectGraph {
    /// The decoded root value
    pub fn root(&self) -> &Decoded {
        &self.root
    }

    /// Borrow an object as its concrete type
    pub fn object<T: NSCoding>(&self, id: ObjectId) -> Result<&T, UnarchiveError> {
        let object = self.objects.get(&id).ok_or_else(|| {
            UnarchiveError::InvalidReference(id, "object is not part of the graph".to_string())
        })?;
        downcast(id, &**object)
    }

    /// Borrow the root as its concrete type
    pub fn root_object<T: NSCoding>(&self) -> Result<&T, UnarchiveError> {
        match self.root {
            Decoded::Object(id) => self.object(id),
            _ => Err(UnarchiveError::InvalidType(
                "root".to_string(),
                "object".to_string(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

fn downcast<T: NSCoding>(id: ObjectId, object: &dyn NSCoding) -> Result<&T, UnarchiveError> {
    object
        .downcast_ref::<T>()
        .ok_or(UnarchiveError::TypeMismatch(id, type_name::<T>()))
}

fn invalid_type(key: &str, expected: &str) -> UnarchiveError {
    UnarchiveError::InvalidType(key.to_string(), expected.to_string())
}

/// Get the attributes a frame points at
fn container(archive: &ArchiveTable, frame: Frame) -> Result<&Attributes, UnarchiveError> {
    match frame {
        Frame::Top => Ok(archive.top()),
        Frame::Instance(id) => match archive.entry(id)? {
            ArchiveEntry::Instance(instance) => Ok(&instance.attributes),
            _ => Err(UnarchiveError::InvalidReference(
                id,
                "container is not an archived instance".to_string(),
            )),
        },
    }
}

/// Borrows the parts of a session needed to turn one archived value into a [`Decoded`] value
struct Resolver<'a> {
    archive: &'a ArchiveTable,
    registry: &'a Registry,
    objects: &'a mut HashMap<ObjectId, Slot>,
    pending: &'a mut VecDeque<ObjectId>,
    /// Plain-value slots currently being expanded, to reject reference loops that never pass through an instance
    visiting: Vec<ObjectId>,
}

impl Resolver<'_> {
    fn resolve(&mut self, value: &ArchiveValue) -> Result<Decoded, UnarchiveError> {
        match value {
            ArchiveValue::Scalar(scalar) => Ok(Decoded::Scalar(scalar.clone())),
            ArchiveValue::Sequence(items) => Ok(Decoded::Sequence(
                items
                    .iter()
                    .map(|item| self.resolve(item))
                    .collect::<Result<_, _>>()?,
            )),
            ArchiveValue::Dictionary(body) => Ok(Decoded::Dictionary(
                body.iter()
                    .map(|(key, item)| Ok((key.clone(), self.resolve(item)?)))
                    .collect::<Result<BTreeMap<_, _>, UnarchiveError>>()?,
            )),
            ArchiveValue::Reference(id) => self.resolve_reference(*id),
        }
    }

    fn resolve_reference(&mut self, id: ObjectId) -> Result<Decoded, UnarchiveError> {
        if id.is_null() {
            return Ok(Decoded::Null);
        }

        if self.objects.contains_key(&id) {
            trace!(%id, "reusing decoded object");
            return Ok(Decoded::Object(id));
        }

        let archive = self.archive;
        let entry = archive.entry(id).map_err(|_| {
            UnarchiveError::InvalidReference(id, "no entry in the object table".to_string())
        })?;

        match entry {
            ArchiveEntry::ClassDefinition(_) => Err(UnarchiveError::InvalidReference(
                id,
                "cannot decode a class definition as a value".to_string(),
            )),
            ArchiveEntry::Instance(instance) => {
                let class = class_of(archive, instance.class_ref)?;
                let capability = self.registry.resolve(&class.name)?;

                // Memoize before initializing so cycles back to this object resolve to the same instance
                self.objects.insert(id, Slot::Allocated(capability.allocate()));
                self.pending.push_back(id);
                trace!(%id, class = %class.name, "allocated object");

                Ok(Decoded::Object(id))
            }
            ArchiveEntry::Value(value) => {
                if self.visiting.contains(&id) {
                    return Err(UnarchiveError::InvalidReference(
                        id,
                        "plain value contains itself".to_string(),
                    ));
                }
                self.visiting.push(id);
                let decoded = self.resolve(value);
                self.visiting.pop();
                decoded
            }
        }
    }
}

/// Get the class definition an instance points at
fn class_of(archive: &ArchiveTable, class_ref: ObjectId) -> Result<&ArchivedClass, UnarchiveError> {
    match archive.entry(class_ref) {
        Ok(ArchiveEntry::ClassDefinition(class)) => Ok(class),
        _ => Err(UnarchiveError::InvalidReference(
            class_ref,
            "instance class is not a class definition".to_string(),
        )),
    }
}
