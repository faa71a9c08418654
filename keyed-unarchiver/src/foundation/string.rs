/*!
 Text stored as an instance rather than as a plain string: [`NSString`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

/// Text archived as an object, usually an `NSMutableString`
///
/// Immutable strings are normally archived as plain `plist` strings and never reach this adapter.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSString {
    pub value: String,
}

impl NSCoding for NSString {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.value = unarchiver.decode_string("NS.string")?;
        Ok(())
    }
}
