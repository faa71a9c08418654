/*!
 Contains the engine that resolves an [`ArchiveTable`](crate::archive::table::ArchiveTable) into live objects.

 ## Overview

 Decoding is driven by an [`Unarchiver`](session::Unarchiver) session. Each archived class name maps to a
 [`Capability`](registry::Capability) in a [`Registry`](registry::Registry), and every decodable type implements
 [`NSCoding`](coding::NSCoding).

 Objects are built in two phases so that reference cycles are safe:

 1. When a reference to an instance is first seen, the type is allocated with its defaults and stored
    in the session's arena under its [`ObjectId`](crate::archive::models::ObjectId). Callers receive the
    handle immediately.
 2. Before the `decode` call that triggered the allocation returns, every pending object is initialized
    in first-in, first-out order by calling [`NSCoding::init_from_archive`](coding::NSCoding::init_from_archive),
    which pulls its own attributes back out of the session.

 Cross-object references are always [`ObjectId`](crate::archive::models::ObjectId) handles into the arena,
 so shared references keep their identity and cycles never form ownership loops.
*/

pub mod coding;
pub mod models;
pub mod registry;
pub mod session;
