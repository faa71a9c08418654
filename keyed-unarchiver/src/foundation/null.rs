/*!
 The null singleton: [`NSNull`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

/// Foundation's placeholder for "no value" inside collections
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSNull;

impl NSCoding for NSNull {
    fn init_from_archive(&mut self, _: &mut Unarchiver) -> Result<(), UnarchiveError> {
        Ok(())
    }
}
