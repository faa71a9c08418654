/*!
 Maps archived class names to the types that decode them.
*/

use std::{
    any::type_name,
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
};

use crate::{
    error::unarchive::UnarchiveError,
    foundation::{
        NSArray, NSAttributedString, NSColor, NSColorSpace, NSData, NSDate, NSDictionary, NSFont,
        NSImage, NSNull, NSPoint, NSSet, NSSize, NSString, NSURL, NSUUID,
    },
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

/// Produces a new, uninitialized instance of a decodable type
pub type Allocator = fn() -> Box<dyn NSCoding>;

fn allocate_default<T: NSCoding + Default>() -> Box<dyn NSCoding> {
    Box::<T>::default()
}

/// The allocation half of a type's decoding contract; initialization is dispatched through [`NSCoding`]
#[derive(Clone, Copy)]
pub struct Capability {
    allocate: Allocator,
    type_name: &'static str,
}

impl Capability {
    /// A capability that allocates `T` with [`Default::default`]
    pub fn of<T: NSCoding + Default>() -> Self {
        Self {
            allocate: allocate_default::<T>,
            type_name: type_name::<T>(),
        }
    }

    /// A capability with a custom allocator
    pub fn new(allocate: Allocator, type_name: &'static str) -> Self {
        Self {
            allocate,
            type_name,
        }
    }

    pub fn allocate(&self) -> Box<dyn NSCoding> {
        (self.allocate)()
    }

    /// The name of the Rust type this capability builds
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Debug for Capability {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.debug_tuple("Capability").field(&self.type_name).finish()
    }
}

/// Type that swallows an archived instance without reading any of its attributes
///
/// Register it under class names the caller does not care about so they do not fail with
/// [`UnarchiveError::UnknownClass`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Ignored;

impl NSCoding for Ignored {
    fn init_from_archive(&mut self, _: &mut Unarchiver) -> Result<(), UnarchiveError> {
        Ok(())
    }
}

/// Lookup table from archived class name to [`Capability`]
///
/// Lookups use the exact archived class name; superclass names in the archived ancestry are not consulted.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: HashMap<String, Capability>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that knows every Foundation type this crate ships an adapter for
    pub fn foundation() -> Self {
        let mut registry = Self::new();
        registry.register::<NSArray>("NSArray");
        registry.register::<NSArray>("NSMutableArray");
        registry.register::<NSSet>("NSSet");
        registry.register::<NSSet>("NSMutableSet");
        registry.register::<NSDictionary>("NSDictionary");
        registry.register::<NSDictionary>("NSMutableDictionary");
        registry.register::<NSData>("NSData");
        registry.register::<NSData>("NSMutableData");
        registry.register::<NSString>("NSString");
        registry.register::<NSString>("NSMutableString");
        registry.register::<NSAttributedString>("NSAttributedString");
        registry.register::<NSAttributedString>("NSMutableAttributedString");
        registry.register::<NSDate>("NSDate");
        registry.register::<NSURL>("NSURL");
        registry.register::<NSUUID>("NSUUID");
        registry.register::<NSColor>("NSColor");
        registry.register::<NSColorSpace>("NSColorSpace");
        registry.register::<NSFont>("NSFont");
        registry.register::<NSImage>("NSImage");
        registry.register::<NSNull>("NSNull");
        registry.register::<NSPoint>("NSPoint");
        registry.register::<NSSize>("NSSize");
        registry
    }

    /// Decode instances archived as `class_name` into `T`, replacing any previous entry
    pub fn register<T: NSCoding + Default>(&mut self, class_name: &str) {
        self.register_capability(class_name, Capability::of::<T>());
    }

    /// Decode instances archived as `class_name` with `capability`, replacing any previous entry
    pub fn register_capability(&mut self, class_name: &str, capability: Capability) {
        self.classes.insert(class_name.to_string(), capability);
    }

    /// Accept and discard instances archived as `class_name`
    pub fn ignore(&mut self, class_name: &str) {
        self.register::<Ignored>(class_name);
    }

    /// Get the capability registered for `class_name`
    pub fn resolve(&self, class_name: &str) -> Result<Capability, UnarchiveError> {
        self.classes
            .get(class_name)
            .copied()
            .ok_or_else(|| UnarchiveError::UnknownClass(class_name.to_string()))
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Every registered class name, in no particular order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
