//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use varlens::types::{VariableKind, VariableRecord, VariableValue};

/// Build a record with a number value and no collection name
pub fn record(name: &str, kind: VariableKind, collection_id: &str) -> VariableRecord {
    VariableRecord::new(name, kind, collection_id, VariableValue::Number(0.0))
}

/// Build a record with a collection display name attached
pub fn named_record(
    name: &str,
    kind: VariableKind,
    collection_id: &str,
    collection_name: &str,
) -> VariableRecord {
    record(name, kind, collection_id).with_collection_name(collection_name)
}

/// A small representative record set spanning all kinds and two collections
pub fn sample_records() -> Vec<VariableRecord> {
    vec![
        named_record("Primary/Button", VariableKind::Color, "col:brand", "Brand"),
        record("Spacing/Small", VariableKind::Number, "col:layout"),
        named_record("Label/Submit", VariableKind::String, "col:brand", "Brand"),
        record("Flags/Compact", VariableKind::Boolean, "col:layout"),
        named_record("Primary/Text", VariableKind::Color, "col:brand", "Brand"),
    ]
}
