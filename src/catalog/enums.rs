//! Enumerations stored by the item-bank collections.

crate::coded_enum! {
    /// Lifecycle of an export task.
    pub enum ExportStatus: CamelString {
        Pending = 0,
        Running = 1,
        Rendering = 2,
        Completed = 3,
        Failed = 4,
        Cancelled = 5,
    }
}

crate::coded_enum! {
    pub enum ExportType: CamelString {
        Item = 0,
        Document = 1,
        DocumentRepository = 2,
        DocumentRepositoryPackage = 3,
        DocumentIssueItems = 4,
        DocumentFailImportItems = 5,
        CustomFiles = 6,
    }
}

crate::coded_enum! {
    pub enum ExportArchiveMode: VerbatimString {
        Always = 0,
        Auto = 1,
    }
}

crate::coded_enum! {
    /// Lifecycle of an import task. `Failed`, `PartiallyFailed`,
    /// `Succeeded` and `Cancelled` are final.
    pub enum ImportTaskStatus: VerbatimString {
        Importing = 0,
        Waiting = 1,
        Failed = 2,
        PartiallyFailed = 3,
        Succeeded = 4,
        Reconverting = 5,
        Cancelled = 6,
    }
}

crate::coded_enum! {
    pub enum ImportItemStatus: Integer {
        Waiting = 0,
        PendingSplit = 1,
        SplitFailed = 2,
        PendingReview = 3,
        Reviewing = 4,
        PrintReviewFailed = 5,
        OnlineReviewFailed = 6,
        UnknownError = 7,
        Succeeded = 8,
        Cancelled = 9,
    }
}

crate::coded_enum! {
    pub enum ConversationRole: Integer {
        User = 0,
        Assistant = 1,
        System = 2,
    }
}

crate::coded_enum! {
    pub enum DimensionType: CamelString {
        Knowledge = 0,
        Recognition = 1,
        Competency = 2,
        Custom = 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, dictionary, encode, validate_unique_wire_values, EnumWireValue, WireValue};

    #[test]
    fn test_export_status_is_camel_case() {
        let dict = dictionary::<ExportStatus>();
        assert_eq!(dict.get("Pending"), Some(&EnumWireValue::Str("pending".into())));
        assert_eq!(dict.get("Cancelled"), Some(&EnumWireValue::Str("cancelled".into())));
        assert_eq!(dict.len(), 6);
    }

    #[test]
    fn test_multiword_camel_members() {
        assert_eq!(
            encode(ExportType::DocumentRepositoryPackage),
            EnumWireValue::Str("documentRepositoryPackage".into())
        );
    }

    #[test]
    fn test_verbatim_and_integer_encodings() {
        assert_eq!(encode(ImportTaskStatus::PartiallyFailed), EnumWireValue::Str("PartiallyFailed".into()));
        assert_eq!(encode(ConversationRole::System), EnumWireValue::Int(2));
        assert_eq!(decode::<ImportItemStatus>(&WireValue::Int32(8)).unwrap(), ImportItemStatus::Succeeded);
    }

    #[test]
    fn test_catalog_enums_have_unique_wire_values() {
        assert!(validate_unique_wire_values::<ExportStatus>().is_ok());
        assert!(validate_unique_wire_values::<ExportType>().is_ok());
        assert!(validate_unique_wire_values::<ExportArchiveMode>().is_ok());
        assert!(validate_unique_wire_values::<ImportTaskStatus>().is_ok());
        assert!(validate_unique_wire_values::<ImportItemStatus>().is_ok());
        assert!(validate_unique_wire_values::<ConversationRole>().is_ok());
        assert!(validate_unique_wire_values::<DimensionType>().is_ok());
    }
}
