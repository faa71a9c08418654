/*!
 Colors and the spaces they are defined in: [`NSColor`] and [`NSColorSpace`].
*/

use crate::{
    archive::models::ObjectId,
    error::unarchive::UnarchiveError,
    unarchiver::{coding::NSCoding, session::Unarchiver},
};

const SPACE_KEY: &str = "NSColorSpace";
const CUSTOM_SPACE_KEY: &str = "NSCustomColorSpace";
const RGB_KEY: &str = "NSRGB";
const WHITE_KEY: &str = "NSWhite";
const CMYK_KEY: &str = "NSCMYK";

/// The `NSColorSpace` discriminator stored on an archived [`NSColor`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpaceCode {
    /// Components under `NSRGB`, sometimes with an `NSCustomColorSpace`
    #[default]
    CalibratedRGB,
    /// Components under `NSRGB`
    DeviceRGB,
    /// Components under `NSWhite`
    CalibratedWhite,
    /// Components under `NSWhite`
    DeviceWhite,
    /// Components under `NSCMYK`
    DeviceCMYK,
}

impl ColorSpaceCode {
    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::CalibratedRGB),
            2 => Some(Self::DeviceRGB),
            3 => Some(Self::CalibratedWhite),
            4 => Some(Self::DeviceWhite),
            5 => Some(Self::DeviceCMYK),
            _ => None,
        }
    }

    /// The attribute the color's components are stored under
    fn components_key(&self) -> &'static str {
        match self {
            Self::CalibratedRGB | Self::DeviceRGB => RGB_KEY,
            Self::CalibratedWhite | Self::DeviceWhite => WHITE_KEY,
            Self::DeviceCMYK => CMYK_KEY,
        }
    }
}

/// A color
#[derive(Debug, Default, PartialEq)]
pub struct NSColor {
    pub space: ColorSpaceCode,
    /// Raw component data: space-separated decimal text, usually `NUL` terminated
    pub data: Vec<u8>,
    /// Handle to an [`NSColorSpace`], only present on some calibrated RGB colors
    pub custom_space: Option<ObjectId>,
}

impl NSColor {
    /// Parse [`NSColor::data`] into numeric components, skipping anything that is not a number
    pub fn components(&self) -> Vec<f64> {
        String::from_utf8_lossy(&self.data)
            .trim_end_matches('\0')
            .split_whitespace()
            .filter_map(|part| part.parse().ok())
            .collect()
    }
}

impl NSCoding for NSColor {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        let code = unarchiver.decode_integer(SPACE_KEY)?;
        self.space = ColorSpaceCode::from_code(code).ok_or_else(|| {
            UnarchiveError::InvalidType(
                SPACE_KEY.to_string(),
                format!("color space code 1-5, got {code}"),
            )
        })?;

        if self.space == ColorSpaceCode::CalibratedRGB
            && unarchiver.contains_key(CUSTOM_SPACE_KEY)
        {
            self.custom_space = unarchiver.decode_object(CUSTOM_SPACE_KEY)?;
        }

        self.data = unarchiver.decode_data(self.space.components_key())?;
        Ok(())
    }
}

/// A color space, usually described by an ICC profile
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NSColorSpace {
    pub id: i64,
    pub icc: Option<Vec<u8>>,
}

impl NSCoding for NSColorSpace {
    fn init_from_archive(&mut self, unarchiver: &mut Unarchiver) -> Result<(), UnarchiveError> {
        self.id = unarchiver.decode_integer("NSID")?;
        self.icc = if unarchiver.contains_key("NSICC") {
            Some(unarchiver.decode_data("NSICC")?)
        } else {
            None
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plist::Value;

    use crate::{
        error::unarchive::UnarchiveError,
        foundation::{ColorSpaceCode, NSColor, NSColorSpace},
        unarchiver::{registry::Registry, session::Unarchiver},
        util::fixture::{decode_root, ArchiveBuilder},
    };

    #[test]
    fn can_decode_device_rgb() {
        let mut builder = ArchiveBuilder::new();
        let root = builder.instance(
            "NSColor",
            vec![
                ("NSColorSpace", Value::Integer(2_i64.into())),
                ("NSRGB", Value::Data(b"1 0.5 0\0".to_vec())),
            ],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let color: &NSColor = unarchiver.object(root_id).unwrap();

        assert_eq!(color.space, ColorSpaceCode::DeviceRGB);
        assert_eq!(color.custom_space, None);
        assert_eq!(color.components(), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn can_decode_custom_space() {
        let mut builder = ArchiveBuilder::new();
        let space = builder.instance(
            "NSColorSpace",
            vec![
                ("NSID", Value::Integer(7_i64.into())),
                ("NSICC", Value::Data(vec![0, 1, 2])),
            ],
        );
        let root = builder.instance(
            "NSColor",
            vec![
                ("NSColorSpace", Value::Integer(1_i64.into())),
                ("NSCustomColorSpace", Value::Uid(space)),
                ("NSRGB", Value::Data(b"0.1 0.2 0.3".to_vec())),
            ],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let color: &NSColor = unarchiver.object(root_id).unwrap();
        assert_eq!(color.space, ColorSpaceCode::CalibratedRGB);

        let space: &NSColorSpace = unarchiver.object(color.custom_space.unwrap()).unwrap();
        assert_eq!(
            space,
            &NSColorSpace {
                id: 7,
                icc: Some(vec![0, 1, 2])
            }
        );
    }

    #[test]
    fn can_decode_white() {
        let mut builder = ArchiveBuilder::new();
        let root = builder.instance(
            "NSColor",
            vec![
                ("NSColorSpace", Value::Integer(3_i64.into())),
                ("NSWhite", Value::Data(b"0.25\0".to_vec())),
            ],
        );

        let (unarchiver, root_id) = decode_root(&builder.root(root));
        let color: &NSColor = unarchiver.object(root_id).unwrap();

        assert_eq!(color.space, ColorSpaceCode::CalibratedWhite);
        assert_eq!(color.components(), vec![0.25]);
    }

    #[test]
    fn cant_decode_unknown_space() {
        let mut builder = ArchiveBuilder::new();
        let root = builder.instance(
            "NSColor",
            vec![("NSColorSpace", Value::Integer(9_i64.into()))],
        );

        let bytes = builder.root(root).to_bytes();
        let mut unarchiver = Unarchiver::from_bytes(&bytes, Registry::foundation()).unwrap();

        assert!(matches!(
            unarchiver.decode(None),
            Err(UnarchiveError::InvalidType(key, _)) if key == "NSColorSpace"
        ));
    }
}
