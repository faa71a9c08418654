/*!
 Points in time: [`NSDate`].
*/

use chrono::{DateTime, Utc};

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
    util::dates::from_apple_seconds,
};

const TIME_KEY: &str = "NS.time";

/// A point in time, archived as seconds since `2001-01-01T00:00:00Z`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSDate {
    pub date: DateTime<Utc>,
}

impl NSCoding for NSDate {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        let seconds = unarchiver.decode_real(TIME_KEY)?;
        self.date = from_apple_seconds(seconds).ok_or_else(|| {
            UnarchiveError::InvalidType(TIME_KEY.to_string(), "representable date".to_string())
        })?;
        Ok(())
    }
}
