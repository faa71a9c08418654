/*!
 Typefaces: [`NSFont`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

/// A font reference
#[derive(Debug, Default, PartialEq)]
pub struct NSFont {
    pub flags: i64,
    /// PostScript name, i.e. `Helvetica-Bold`
    pub name: String,
    /// Point size
    pub size: f64,
}

impl NSCoding for NSFont {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.flags = unarchiver.decode_integer("NSfFlags")?;
        self.name = unarchiver.decode_string("NSName")?;
        self.size = unarchiver.decode_real("NSSize")?;
        Ok(())
    }
}
