#[cfg(test)]
mod model_tests {
    use std::collections::BTreeMap;

    use crate::archive::models::{
        sanitize_key, unsanitize_key, ArchiveValue, ArchivedClass, ArchivedInstance, ObjectId,
    };

    #[test]
    fn can_sanitize_reserved_key() {
        assert_eq!(sanitize_key("$foo"), "$$foo");
    }

    #[test]
    fn can_leave_plain_key() {
        assert_eq!(sanitize_key("NS.objects"), "NS.objects");
    }

    #[test]
    fn can_unsanitize_key() {
        assert_eq!(unsanitize_key("$$foo"), "$foo");
        assert_eq!(unsanitize_key("NS.keys"), "NS.keys");
    }

    #[test]
    fn can_list_logical_keys() {
        let mut attributes = BTreeMap::new();
        attributes.insert("$$foo".to_string(), ArchiveValue::Reference(ObjectId::NULL));
        attributes.insert("name".to_string(), ArchiveValue::Reference(ObjectId::NULL));
        let instance = ArchivedInstance {
            class_ref: ObjectId::new(2),
            attributes,
        };

        assert_eq!(instance.keys().collect::<Vec<_>>(), vec!["$foo", "name"]);
    }

    #[test]
    fn can_check_ancestry() {
        let class = ArchivedClass {
            name: "NSMutableArray".to_string(),
            ancestry: vec![
                "NSMutableArray".to_string(),
                "NSArray".to_string(),
                "NSObject".to_string(),
            ],
        };

        assert!(class.is_kind_of("NSArray"));
        assert!(!class.is_kind_of("NSDictionary"));
    }

    #[test]
    fn can_read_reference() {
        let reference = ArchiveValue::Reference(ObjectId::new(3));
        let sequence = ArchiveValue::Sequence(vec![reference.clone()]);

        assert_eq!(reference.as_reference(), Some(ObjectId::new(3)));
        assert_eq!(sequence.as_reference(), None);
    }

    #[test]
    fn null_id_is_null() {
        assert!(ObjectId::NULL.is_null());
        assert!(!ObjectId::new(1).is_null());
        assert_eq!(ObjectId::new(7).to_string(), "UID 7");
    }
}
