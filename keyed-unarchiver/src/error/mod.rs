/*!
 Errors that can happen while loading or unarchiving `NSKeyedArchiver` data.
*/

pub mod archive;
pub mod plist;
pub mod unarchive;
