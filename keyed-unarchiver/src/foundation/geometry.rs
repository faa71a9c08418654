/*!
 Planar geometry: [`NSPoint`] and [`NSSize`].

 Foundation stores both as a string of the form `{x, y}`.
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

const POINT_KEY: &str = "NS.pointval";
const SIZE_KEY: &str = "NS.sizeval";

/// Parse a `{a, b}` pair
fn parse_pair(text: &str) -> Option<(f64, f64)> {
    let (first, second) = text
        .trim()
        .strip_prefix('{')?
        .strip_suffix('}')?
        .split_once(',')?;
    Some((first.trim().parse().ok()?, second.trim().parse().ok()?))
}

fn decode_pair(unarchiver: &mut Unarchiver, key: &str) -> Result<(f64, f64), UnarchiveError> {
    let text = unarchiver.decode_string(key)?;
    parse_pair(&text)
        .ok_or_else(|| UnarchiveError::InvalidType(key.to_string(), "{x, y} pair".to_string()))
}

/// A location in a two-dimensional coordinate system
#[derive(Debug, Default, PartialEq)]
pub struct NSPoint {
    pub x: f64,
    pub y: f64,
}

impl NSCoding for NSPoint {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        (self.x, self.y) = decode_pair(unarchiver, POINT_KEY)?;
        Ok(())
    }
}

/// A two-dimensional extent
#[derive(Debug, Default, PartialEq)]
pub struct NSSize {
    pub width: f64,
    pub height: f64,
}

impl NSCoding for NSSize {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        (self.width, self.height) = decode_pair(unarchiver, SIZE_KEY)?;
        Ok(())
    }
}
