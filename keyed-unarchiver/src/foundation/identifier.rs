/*!
 Unique identifiers: [`NSUUID`].
*/

use uuid::Uuid;

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

const BYTES_KEY: &str = "NS.uuidbytes";

/// A 128-bit universally unique identifier
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSUUID {
    pub uuid: Uuid,
}

impl NSCoding for NSUUID {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        let bytes = unarchiver.decode_data(BYTES_KEY)?;
        self.uuid = Uuid::from_slice(&bytes).map_err(|_| {
            UnarchiveError::InvalidType(BYTES_KEY.to_string(), "16 bytes".to_string())
        })?;
        Ok(())
    }
}
