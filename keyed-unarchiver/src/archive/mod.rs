/*!
 Contains logic and data structures used to load `NSKeyedArchiver` data into an addressable table.

 ## Overview

 `NSKeyedArchiver` flattens an object graph into a property list with four top-level keys:

 - `$version`: the archive format version, always `100000`
 - `$archiver`: the name of the archiver that produced the data
 - `$top`: a dictionary of named entry points, usually just `root`
 - `$objects`: every archived value, addressed by its position in the array

 Objects refer to each other with `plist` UIDs. UID `0` always points at the `$null` sentinel.

 Each `$objects` slot is classified once into an [`ArchiveEntry`](models::ArchiveEntry) when the
 [`ArchiveTable`](table::ArchiveTable) is built; the table is never mutated afterwards.
*/

pub mod models;
pub mod table;
mod tests;
