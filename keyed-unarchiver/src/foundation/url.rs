/*!
 Locations: [`NSURL`].
*/

use crate::{
    archive::models::ObjectId,
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

/// A URL, stored as a string relative to an optional base URL
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSURL {
    /// Handle to the base [`NSURL`], if the URL is relative
    pub base: Option<ObjectId>,
    pub relative: String,
}

impl NSCoding for NSURL {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.base = unarchiver.decode_object("NS.base")?;
        self.relative = unarchiver.decode_string("NS.relative")?;
        Ok(())
    }
}
