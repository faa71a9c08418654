/*!
 This module defines common utilities used across the archive table and the unarchiver.
*/

pub mod dates;
pub mod plist;

#[cfg(test)]
pub(crate) mod fixture;
