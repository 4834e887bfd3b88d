//! Core data types for varlens
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing discovered variables and the
//! collections they belong to.
//!
//! # Main Types
//!
//! - [`VariableKind`] - Enum of supported variable categories (boolean, string, number, color)
//! - [`VariableValue`] - The resolved value carried by a variable record
//! - [`VariableRecord`] - One discovered usage entry produced by a document scan
//! - [`CollectionEntry`] - A distinct collection derived from the record list
//!
//! # Collection Labels
//!
//! A record's collection may lack a human-readable name in the source
//! document. [`CollectionEntry::fallback_label`] synthesizes one from the
//! collection id so the filter selector always has something to display.

use serde::{Deserialize, Serialize};

/// Prefix used when synthesizing a display label for an unnamed collection
pub const COLLECTION_LABEL_PREFIX: &str = "Collection";

/// The category of a discovered variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Boolean toggle (e.g. layer visibility)
    Boolean,
    /// Text content
    String,
    /// Numeric value (spacing, radius, opacity)
    Number,
    /// Solid color
    Color,
}

impl VariableKind {
    /// All kinds, in the order the filter selector lists them
    pub fn all() -> &'static [VariableKind] {
        &[
            VariableKind::Boolean,
            VariableKind::String,
            VariableKind::Number,
            VariableKind::Color,
        ]
    }
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableKind::Boolean => write!(f, "Boolean"),
            VariableKind::String => write!(f, "String"),
            VariableKind::Number => write!(f, "Number"),
            VariableKind::Color => write!(f, "Color"),
        }
    }
}

/// The resolved value of a variable
///
/// Passthrough data for the row renderer; the browser state never inspects
/// it. Untagged so document values deserialize from their natural JSON
/// shapes (`true`, `4.0`, `"Submit"`, `{"r":..,"g":..,"b":..,"a":..}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// Boolean value
    Flag(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// RGBA color, channels in 0.0..=1.0
    Color { r: f32, g: f32, b: f32, a: f32 },
}

impl std::fmt::Display for VariableValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableValue::Flag(v) => write!(f, "{}", v),
            VariableValue::Number(v) => write!(f, "{}", v),
            VariableValue::Text(v) => write!(f, "{}", v),
            VariableValue::Color { r, g, b, a } => {
                let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                if (*a - 1.0).abs() < f32::EPSILON {
                    write!(f, "#{:02X}{:02X}{:02X}", to_byte(*r), to_byte(*g), to_byte(*b))
                } else {
                    write!(
                        f,
                        "#{:02X}{:02X}{:02X}{:02X}",
                        to_byte(*r),
                        to_byte(*g),
                        to_byte(*b),
                        to_byte(*a)
                    )
                }
            }
        }
    }
}

/// One discovered variable usage entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    /// Variable name, used for case-insensitive substring search
    pub name: String,
    /// Variable category
    pub kind: VariableKind,
    /// Identifier of the collection the variable belongs to
    pub collection_id: String,
    /// Human-readable collection label, if the document provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    /// Resolved value, rendered by the row component
    pub value: VariableValue,
    /// How many document nodes reference this variable
    #[serde(default)]
    pub usage_count: usize,
}

impl VariableRecord {
    /// Create a record with no collection label and a zero usage count
    pub fn new(
        name: impl Into<String>,
        kind: VariableKind,
        collection_id: impl Into<String>,
        value: VariableValue,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            collection_id: collection_id.into(),
            collection_name: None,
            value,
            usage_count: 0,
        }
    }

    /// Attach a collection display name
    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = Some(name.into());
        self
    }
}

/// A distinct collection derived from the current record list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    /// Collection identifier
    pub id: String,
    /// Label shown in the filter selector
    pub display_name: String,
}

impl CollectionEntry {
    /// Synthesize a display label for a collection with no name
    pub fn fallback_label(id: &str) -> String {
        format!("{} {}", COLLECTION_LABEL_PREFIX, id)
    }
}
