/*!
 Adapters that decode common Foundation classes.

 Each adapter reads the attribute names Foundation uses when it encodes the class with a keyed archiver.
 [`Registry::foundation`](crate::unarchiver::registry::Registry::foundation) registers all of them, including the
 mutable variants, which share an adapter with their immutable counterparts.
*/

pub mod array;
pub mod attributed_string;
pub mod color;
pub mod data;
pub mod date;
pub mod dictionary;
pub mod font;
pub mod geometry;
pub mod identifier;
pub mod image;
pub mod null;
pub mod string;
pub mod url;

pub use array::{NSArray, NSSet};
pub use attributed_string::NSAttributedString;
pub use color::{ColorSpaceCode, NSColor, NSColorSpace};
pub use data::NSData;
pub use date::NSDate;
pub use dictionary::NSDictionary;
pub use font::NSFont;
pub use geometry::{NSPoint, NSSize};
pub use identifier::NSUUID;
pub use image::NSImage;
pub use null::NSNull;
pub use string::NSString;
pub use url::NSURL;
