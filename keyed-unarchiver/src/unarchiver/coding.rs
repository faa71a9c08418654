/*!
 The two-phase contract every decodable type implements.
*/

use std::{any::Any, fmt::Debug};

use crate::{error::unarchive::UnarchiveError, unarchiver::session::Unarchiver};

/// Lets the arena hand out concrete types from boxed [`NSCoding`] objects
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type that can be rebuilt from an `NSKeyedArchiver` archive
///
/// The allocation phase is supplied by the [`Capability`](crate::unarchiver::registry::Capability) the type is
/// registered with, usually [`Default::default`]. It must not touch the archive.
///
/// # Example
///
/// ```
/// use keyed_unarchiver::{
///     archive::models::ObjectId,
///     error::unarchive::UnarchiveError,
///     unarchiver::{coding::NSCoding, session::Unarchiver},
/// };
///
/// #[derive(Debug, Default)]
/// struct Node {
///     label: String,
///     next: Option<ObjectId>,
/// }
///
/// impl NSCoding for Node {
///     fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
///         self.label = unarchiver.decode_string("label")?;
///         self.next = unarchiver.decode_object("next")?;
///         Ok(())
///     }
/// }
/// ```
pub trait NSCoding: AsAny + Debug {
    /// Populate this instance in place from the attributes of its archived counterpart
    ///
    /// Attributes are read with [`Unarchiver::decode`] and its typed helpers. Any references returned may point at
    /// objects that are still waiting to be initialized, so initializers should store the handles rather than
    /// reading through them.
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError>;

    /// Reserved for writing archives; reading is the only supported direction
    fn encode_archive(&self) {}
}

impl dyn NSCoding {
    /// Whether the object is a `T`
    pub fn is<T: NSCoding>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the object as a `T`, if that is what it is
    pub fn downcast_ref<T: NSCoding>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
