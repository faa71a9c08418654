/*!
 Helpers to pull typed data out of a `plist` value tree.
*/

use plist::{Dictionary, Uid, Value};

use crate::error::plist::PlistParseError;

/// Key XML property lists spell UIDs with, i.e. `<dict><key>CF$UID</key><integer>1</integer></dict>`
pub const XML_UID_KEY: &str = "CF$UID";

/// Read a UID from either its binary form or the single-key dictionary XML property lists use instead
pub fn as_uid(value: &Value) -> Option<Uid> {
    match value {
        Value::Uid(uid) => Some(*uid),
        Value::Dictionary(body) if body.len() == 1 => body
            .get(XML_UID_KEY)
            .and_then(Value::as_unsigned_integer)
            .map(Uid::new),
        _ => None,
    }
}

/// Extract a dictionary from a dictionary key
pub fn extract_dictionary<'a>(
    body: &'a Dictionary,
    key: &str,
) -> Result<&'a Dictionary, PlistParseError> {
    body.get(key)
        .ok_or_else(|| PlistParseError::MissingKey(key.to_string()))?
        .as_dictionary()
        .ok_or_else(|| PlistParseError::InvalidType(key.to_string(), "dictionary".to_string()))
}

/// Extract an array from a dictionary key
pub fn extract_array_key<'a>(
    body: &'a Dictionary,
    key: &str,
) -> Result<&'a Vec<Value>, PlistParseError> {
    body.get(key)
        .ok_or_else(|| PlistParseError::MissingKey(key.to_string()))?
        .as_array()
        .ok_or_else(|| PlistParseError::InvalidType(key.to_string(), "array".to_string()))
}

/// Extract an unsigned integer from a dictionary key
pub fn extract_uint_key(body: &Dictionary, key: &str) -> Result<u64, PlistParseError> {
    body.get(key)
        .ok_or_else(|| PlistParseError::MissingKey(key.to_string()))?
        .as_unsigned_integer()
        .ok_or_else(|| PlistParseError::InvalidType(key.to_string(), "uint".to_string()))
}

/// Extract a string from a dictionary key
pub fn extract_string_key<'a>(body: &'a Dictionary, key: &str) -> Result<&'a str, PlistParseError> {
    body.get(key)
        .ok_or_else(|| PlistParseError::MissingKey(key.to_string()))?
        .as_string()
        .ok_or_else(|| PlistParseError::InvalidType(key.to_string(), "string".to_string()))
}

/// Extract a UID from a dictionary key
pub fn extract_uid_key(body: &Dictionary, key: &str) -> Result<Uid, PlistParseError> {
    let value = body
        .get(key)
        .ok_or_else(|| PlistParseError::MissingKey(key.to_string()))?;
    as_uid(value).ok_or_else(|| PlistParseError::InvalidType(key.to_string(), "uid".to_string()))
}

/// Extract an array of strings from a dictionary key
pub fn extract_string_array_key(
    body: &Dictionary,
    key: &str,
) -> Result<Vec<String>, PlistParseError> {
    extract_array_key(body, key)?
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_string()
                .map(String::from)
                .ok_or_else(|| PlistParseError::InvalidTypeIndex(idx, "string".to_string()))
        })
        .collect()
}
