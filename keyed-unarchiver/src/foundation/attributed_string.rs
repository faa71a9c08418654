/*!
 Styled text: [`NSAttributedString`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, models::Decoded, session::Unarchiver},
};

const STRING_KEY: &str = "NSString";
const ATTRIBUTES_KEY: &str = "NSAttributes";

/// Text with attribute runs, also used for `NSMutableAttributedString`
#[derive(Debug, Default, PartialEq)]
pub struct NSAttributedString {
    /// Either a plain string or a handle to an [`NSString`](crate::foundation::NSString)
    pub string: Decoded,
    /// A dictionary, or an array of dictionaries, describing the attribute runs
    pub attributes: Option<Decoded>,
}

impl NSAttributedString {
    /// The text, if it was archived as a plain string
    pub fn text(&self) -> Option<&str> {
        self.string.as_str()
    }
}

impl NSCoding for NSAttributedString {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.string = unarchiver.decode_key(STRING_KEY)?;
        self.attributes = if unarchiver.contains_key(ATTRIBUTES_KEY) {
            Some(unarchiver.decode_key(ATTRIBUTES_KEY)?)
        } else {
            None
        };
        Ok(())
    }
}
