/*!
 Key-value collections: [`NSDictionary`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, models::Decoded, session::Unarchiver},
};

const KEYS_KEY: &str = "NS.keys";
const OBJECTS_KEY: &str = "NS.objects";

/// A key-value collection, also used for `NSMutableDictionary`
///
/// The archive stores keys and values as two parallel arrays. Keys may be any decoded value, so entries are kept
/// as pairs in archive order rather than in a hash map.
#[derive(Debug, Default, PartialEq)]
pub struct NSDictionary {
    pub entries: Vec<(Decoded, Decoded)>,
}

impl NSDictionary {
    /// Get the value stored under a string key
    pub fn get(&self, key: &str) -> Option<&Decoded> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.as_str() == Some(key))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NSCoding for NSDictionary {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        let keys = unarchiver.decode_array(KEYS_KEY)?;
        let values = unarchiver.decode_array(OBJECTS_KEY)?;

        if keys.len() != values.len() {
            return Err(UnarchiveError::InvalidType(
                OBJECTS_KEY.to_string(),
                format!("{} values", keys.len()),
            ));
        }

        self.entries = keys.into_iter().zip(values).collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plist::Value;

    use crate::{
        error::unarchive::UnarchiveError,
        foundation::NSDictionary,
        unarchiver::{registry::Registry, session::Unarchiver},
        util::fixture::{decode_root, ArchiveBuilder},
    };

    #[test]
    fn can_decode_dictionary() {
        let mut builder = ArchiveBuilder::new();
        let key_a = builder.push(Value::String("a".to_string()));
        let key_b = builder.push(Value::String("b".to_string()));
        let one = builder.push(Value::Integer(1_i64.into()));
        let root = builder.instance(
            "NSMutableDictionary",
            vec![
                ("NS.keys", Value::Array(vec![Value::Uid(key_a), Value::Uid(key_b)])),
                ("NS.objects", Value::Array(vec![Value::Uid(one), Value::Boolean(true)])),
            ],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let dictionary: &NSDictionary = unarchiver.object(root_id).unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("a").and_then(|v| v.as_integer()), Some(1));
        assert_eq!(dictionary.get("b").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(dictionary.get("c"), None);
    }

    #[test]
    fn cant_decode_mismatched_lengths() {
        let mut builder = ArchiveBuilder::new();
        let key = builder.push(Value::String("a".to_string()));
        let root = builder.instance(
            "NSDictionary",
            vec![
                ("NS.keys", Value::Array(vec![Value::Uid(key)])),
                ("NS.objects", Value::Array(vec![])),
            ],
        );

        let bytes = builder.root(root).to_bytes();
        let mut unarchiver = Unarchiver::from_bytes(&bytes, Registry::foundation()).unwrap();

        assert!(matches!(
            unarchiver.decode(None),
            Err(UnarchiveError::InvalidType(key, _)) if key == "NS.objects"
        ));
    }
}
