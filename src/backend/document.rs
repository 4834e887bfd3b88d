//! Design document parsing and variable extraction
//!
//! A design document is a JSON file carrying three tables: the variable
//! collections, the variable definitions, and the node tree. Nodes reference
//! variables they are bound to by id; the scan walks the tree and resolves
//! those references into [`VariableRecord`]s.
//!
//! # Scan Semantics
//!
//! - Records appear in **first-reference order**: the order in which the
//!   depth-first walk first encounters each variable id.
//! - A variable bound to many nodes yields one record; the number of
//!   referencing nodes is tracked in `usage_count`.
//! - A bound id with no matching variable definition is skipped with a
//!   warning rather than failing the scan.
//! - A variable whose collection has a name gets that name joined onto the
//!   record; otherwise `collection_name` stays empty and the UI synthesizes
//!   a label.

use crate::error::{Result, VarLensError};
use crate::types::{VariableKind, VariableRecord, VariableValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A variable collection as defined in the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDef {
    /// Collection identifier
    pub id: String,
    /// Optional human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A variable definition as stored in the document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDef {
    /// Variable identifier, referenced by nodes
    pub id: String,
    /// Variable name
    pub name: String,
    /// Variable category
    pub kind: VariableKind,
    /// Identifier of the owning collection
    pub collection_id: String,
    /// Resolved value
    pub value: VariableValue,
}

/// One node in the document tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Node identifier
    pub id: String,
    /// Node name (layer name)
    #[serde(default)]
    pub name: String,
    /// Ids of variables this node is bound to
    #[serde(default)]
    pub bound: Vec<String>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// A parsed design document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignDocument {
    /// Document name
    pub name: String,
    /// Variable collections
    #[serde(default)]
    pub collections: Vec<CollectionDef>,
    /// Variable definitions
    #[serde(default)]
    pub variables: Vec<VariableDef>,
    /// Root nodes of the document tree
    #[serde(default)]
    pub nodes: Vec<DocumentNode>,
}

impl DesignDocument {
    /// Load and parse a document from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VarLensError::Document(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            VarLensError::Document(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Number of variable definitions in the document
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Scan the node tree for variable usage
    ///
    /// Returns one record per distinct variable that at least one node is
    /// bound to, in first-reference order.
    pub fn scan_used_variables(&self) -> Vec<VariableRecord> {
        let defs: HashMap<&str, &VariableDef> = self
            .variables
            .iter()
            .map(|v| (v.id.as_str(), v))
            .collect();
        let collection_names: HashMap<&str, &str> = self
            .collections
            .iter()
            .filter_map(|c| c.name.as_deref().map(|n| (c.id.as_str(), n)))
            .collect();

        let mut records: Vec<VariableRecord> = Vec::new();
        let mut index_by_id: HashMap<String, usize> = HashMap::new();

        let mut stack: Vec<&DocumentNode> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            for var_id in &node.bound {
                if let Some(idx) = index_by_id.get(var_id) {
                    records[*idx].usage_count += 1;
                    continue;
                }

                let Some(def) = defs.get(var_id.as_str()) else {
                    tracing::warn!(
                        "Node {:?} is bound to unknown variable id {:?}",
                        node.id,
                        var_id
                    );
                    continue;
                };

                let mut record = VariableRecord::new(
                    def.name.clone(),
                    def.kind,
                    def.collection_id.clone(),
                    def.value.clone(),
                );
                record.usage_count = 1;
                if let Some(name) = collection_names.get(def.collection_id.as_str()) {
                    record.collection_name = Some((*name).to_string());
                }

                index_by_id.insert(var_id.clone(), records.len());
                records.push(record);
            }

            stack.extend(node.children.iter().rev());
        }

        tracing::debug!(
            "Scan of {:?} found {} used variables",
            self.name,
            records.len()
        );
        records
    }
}
