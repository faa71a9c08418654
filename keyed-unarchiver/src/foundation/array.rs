/*!
 Ordered and unordered collections: [`NSArray`] and [`NSSet`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, models::Decoded, session::Unarchiver},
};

const OBJECTS_KEY: &str = "NS.objects";

/// An ordered collection, also used for `NSMutableArray`
#[derive(Debug, Default, PartialEq)]
pub struct NSArray {
    pub objects: Vec<Decoded>,
}

impl NSCoding for NSArray {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.objects = unarchiver.decode_array(OBJECTS_KEY)?;
        Ok(())
    }
}

/// An unordered collection, also used for `NSMutableSet`
///
/// Members are kept in archive order.
#[derive(Debug, Default, PartialEq)]
pub struct NSSet {
    pub objects: Vec<Decoded>,
}

impl NSCoding for NSSet {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.objects = unarchiver.decode_array(OBJECTS_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plist::Value;

    use crate::{
        archive::models::{ObjectId, Scalar},
        foundation::{NSArray, NSSet},
        unarchiver::models::Decoded,
        util::fixture::{decode_root, uid, ArchiveBuilder},
    };

    #[test]
    fn can_decode_mutable_array() {
        let mut builder = ArchiveBuilder::new();
        let root = builder.reserve();
        let text = builder.push(Value::String("a".to_string()));
        let number = builder.push(Value::Real(1.5));
        builder.instance_at(
            root,
            "NSMutableArray",
            vec![(
                "NS.objects",
                Value::Array(vec![
                    Value::Uid(text),
                    uid(0),
                    Value::Uid(number),
                    Value::Uid(root),
                ]),
            )],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let array: &NSArray = unarchiver.object(root_id).unwrap();

        assert_eq!(
            array.objects,
            vec![
                Decoded::Scalar(Scalar::String("a".to_string())),
                Decoded::Null,
                Decoded::Scalar(Scalar::Real(1.5)),
                Decoded::Object(ObjectId::new(1)),
            ]
        );
    }

    #[test]
    fn can_decode_set() {
        let mut builder = ArchiveBuilder::new();
        let member = builder.push(Value::String("only".to_string()));
        let root = builder.instance(
            "NSSet",
            vec![("NS.objects", Value::Array(vec![Value::Uid(member)]))],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let set: &NSSet = unarchiver.object(root_id).unwrap();

        assert_eq!(set.objects.len(), 1);
        assert_eq!(set.objects[0].as_str(), Some("only"));
    }
}
