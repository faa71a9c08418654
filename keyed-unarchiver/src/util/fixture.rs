/*!
 Builds `NSKeyedArchiver`-shaped property lists for tests.
*/

use std::collections::HashMap;

use plist::{Dictionary, Uid, Value};

use crate::{
    archive::{models::ObjectId, table::ARCHIVE_VERSION},
    unarchiver::{registry::Registry, session::Unarchiver},
};

/// An `NSArray` holding `"hello"`, written the way `NSKeyedArchiver` writes XML property lists
pub(crate) const XML_ARCHIVE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>$archiver</key>
	<string>NSKeyedArchiver</string>
	<key>$objects</key>
	<array>
		<string>$null</string>
		<dict>
			<key>$class</key>
			<dict>
				<key>CF$UID</key>
				<integer>3</integer>
			</dict>
			<key>NS.objects</key>
			<array>
				<dict>
					<key>CF$UID</key>
					<integer>2</integer>
				</dict>
			</array>
		</dict>
		<string>hello</string>
		<dict>
			<key>$classes</key>
			<array>
				<string>NSArray</string>
				<string>NSObject</string>
			</array>
			<key>$classname</key>
			<string>NSArray</string>
		</dict>
	</array>
	<key>$top</key>
	<dict>
		<key>root</key>
		<dict>
			<key>CF$UID</key>
			<integer>1</integer>
		</dict>
	</dict>
	<key>$version</key>
	<integer>100000</integer>
</dict>
</plist>
"#;

/// Shorthand for a reference value
pub(crate) fn uid(id: u64) -> Value {
    Value::Uid(Uid::new(id))
}

/// Assembles the `$objects` table of a keyed archive
pub(crate) struct ArchiveBuilder {
    version: u64,
    top: Dictionary,
    objects: Vec<Value>,
    classes: HashMap<String, Uid>,
}

impl ArchiveBuilder {
    pub(crate) fn new() -> Self {
        Self {
            version: ARCHIVE_VERSION,
            top: Dictionary::new(),
            objects: vec![Value::String("$null".to_string())],
            classes: HashMap::new(),
        }
    }

    pub(crate) fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Append a raw entry to the object table
    pub(crate) fn push(&mut self, value: Value) -> Uid {
        self.objects.push(value);
        Uid::new(self.objects.len() as u64 - 1)
    }

    /// Reserve a slot so that an entry can reference an object defined later
    pub(crate) fn reserve(&mut self) -> Uid {
        self.push(Value::Boolean(false))
    }

    /// Overwrite a reserved slot
    pub(crate) fn set(&mut self, slot: Uid, value: Value) {
        self.objects[slot.get() as usize] = value;
    }

    /// Get or create the class definition for `name`; `ancestry` excludes `name` itself
    pub(crate) fn class(&mut self, name: &str, ancestry: &[&str]) -> Uid {
        if let Some(existing) = self.classes.get(name) {
            return *existing;
        }
        let mut classes = vec![Value::String(name.to_string())];
        classes.extend(ancestry.iter().map(|c| Value::String(c.to_string())));

        let mut definition = Dictionary::new();
        definition.insert("$classname".to_string(), Value::String(name.to_string()));
        definition.insert("$classes".to_string(), Value::Array(classes));

        let slot = self.push(Value::Dictionary(definition));
        self.classes.insert(name.to_string(), slot);
        slot
    }

    fn instance_value(&mut self, class: &str, attributes: Vec<(&str, Value)>) -> Value {
        let class_ref = self.class(class, &["NSObject"]);
        let mut body = Dictionary::new();
        body.insert("$class".to_string(), Value::Uid(class_ref));
        for (key, value) in attributes {
            body.insert(key.to_string(), value);
        }
        Value::Dictionary(body)
    }

    /// Append an instance of `class` with the given raw attributes
    pub(crate) fn instance(&mut self, class: &str, attributes: Vec<(&str, Value)>) -> Uid {
        let value = self.instance_value(class, attributes);
        self.push(value)
    }

    /// Fill a reserved slot with an instance of `class`
    pub(crate) fn instance_at(&mut self, slot: Uid, class: &str, attributes: Vec<(&str, Value)>) {
        let value = self.instance_value(class, attributes);
        self.set(slot, value);
    }

    pub(crate) fn top(mut self, key: &str, value: Value) -> Self {
        self.top.insert(key.to_string(), value);
        self
    }

    pub(crate) fn root(self, root: Uid) -> Self {
        self.top("root", Value::Uid(root))
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut archive = Dictionary::new();
        archive.insert("$version".to_string(), Value::Integer(self.version.into()));
        archive.insert(
            "$archiver".to_string(),
            Value::String("NSKeyedArchiver".to_string()),
        );
        archive.insert("$top".to_string(), Value::Dictionary(self.top.clone()));
        archive.insert("$objects".to_string(), Value::Array(self.objects.clone()));
        Value::Dictionary(archive)
    }

    /// Serialize through the binary writer, the only `plist` format that can carry UIDs
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![];
        self.to_value().to_writer_binary(&mut bytes).unwrap();
        bytes
    }
}

/// Decode the root of `builder` with the Foundation registry, returning the session and the root handle
pub(crate) fn decode_root(builder: &ArchiveBuilder) -> (Unarchiver, ObjectId) {
    let mut unarchiver =
        Unarchiver::from_bytes(&builder.to_bytes(), Registry::foundation()).unwrap();
    let root = unarchiver.decode(None).unwrap().as_object().unwrap();
    (unarchiver, root)
}
