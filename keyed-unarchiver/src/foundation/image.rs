/*!
 Images: [`NSImage`].
*/

use crate::{
    archive::models::ObjectId,
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, models::Decoded, session::Unarchiver},
};

const DESCRIPTION_KEY: &str = "NSAccessibilityDescription";
const RESIZING_MODE_KEY: &str = "NSResizingMode";

/// An image and its representations
#[derive(Debug, Default, PartialEq)]
pub struct NSImage {
    pub accessibility_description: Option<String>,
    /// Handle to the background [`NSColor`](crate::foundation::NSColor)
    pub color: Option<ObjectId>,
    pub flags: i64,
    /// The image representations, usually an array of arrays
    pub reps: Decoded,
    pub resizing_mode: i64,
}

impl NSCoding for NSImage {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        if unarchiver.contains_key(DESCRIPTION_KEY) {
            self.accessibility_description = Some(unarchiver.decode_string(DESCRIPTION_KEY)?);
        }
        self.color = unarchiver.decode_object("NSColor")?;
        self.flags = unarchiver.decode_integer("NSImageFlags")?;
        self.reps = unarchiver.decode_key("NSReps")?;
        if unarchiver.contains_key(RESIZING_MODE_KEY) {
            self.resizing_mode = unarchiver.decode_integer(RESIZING_MODE_KEY)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plist::Value;

    use crate::{
        foundation::{NSArray, NSColor, NSImage},
        util::fixture::{decode_root, ArchiveBuilder},
    };

    #[test]
    fn can_decode_image() {
        let mut builder = ArchiveBuilder::new();
        let color = builder.instance(
            "NSColor",
            vec![
                ("NSColorSpace", Value::Integer(4_i64.into())),
                ("NSWhite", Value::Data(b"1\0".to_vec())),
            ],
        );
        let reps = builder.instance("NSMutableArray", vec![("NS.objects", Value::Array(vec![]))]);
        let root = builder.instance(
            "NSImage",
            vec![
                ("NSColor", Value::Uid(color)),
                ("NSImageFlags", Value::Integer(12_583_104_i64.into())),
                ("NSReps", Value::Uid(reps)),
            ],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let image: &NSImage = unarchiver.object(root_id).unwrap();

        assert_eq!(image.accessibility_description, None);
        assert_eq!(image.flags, 12_583_104);
        assert_eq!(image.resizing_mode, 0);

        let color: &NSColor = unarchiver.object(image.color.unwrap()).unwrap();
        assert_eq!(color.components(), vec![1.0]);

        let reps: &NSArray = unarchiver.object(image.reps.as_object().unwrap()).unwrap();
        assert!(reps.objects.is_empty());
    }
}
