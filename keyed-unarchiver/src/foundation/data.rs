/*!
 Byte buffers: [`NSData`].
*/

use crate::{
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

/// A byte buffer, also used for `NSMutableData`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSData {
    pub data: Vec<u8>,
}

impl NSCoding for NSData {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.data = unarchiver.decode_data("NS.data")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plist::Value;

    use crate::{
        foundation::NSData,
        util::fixture::{decode_root, ArchiveBuilder},
    };

    #[test]
    fn can_decode_data() {
        let mut builder = ArchiveBuilder::new();
        let root = builder.instance(
            "NSMutableData",
            vec![("NS.data", Value::Data(vec![0xde, 0xad]))],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let data: &NSData = unarchiver.object(root_id).unwrap();

        assert_eq!(data.data, vec![0xde, 0xad]);
    }
}
