//! Whole configuration documents: declared transports plus device blocks.
//!
//! ```yaml
//! vport:
//!   - id: tion_ble
//!     type: ble
//! tion:
//!   - id: breezer
//!     presets:
//!       boost: { fan_speed: 6 }
//! ```
//!
//! A malformed `vport` section fails the whole document. Each `tion` block
//! is validated on its own, so one broken block does not hide the others.

use std::collections::HashSet;

use serde_yaml::Value;
use tion_domain::config::{TionConfig, VPortConfig};
use tion_domain::error::{ConfigPath, SchemaError, SchemaReason};

use super::node::Node;
use super::validate_at;

/// Key listing the declared transports.
pub const VPORT_KEY: &str = "vport";
/// Key listing the device blocks.
pub const TION_KEY: &str = "tion";

/// A validated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub vports: Vec<VPortConfig>,
    /// Device blocks in declaration order, each validated independently.
    pub blocks: Vec<Result<TionConfig, SchemaError>>,
}

/// Validate a whole document.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the document itself or its `vport`
/// section is malformed. Errors inside a `tion` block are reported in
/// [`Document::blocks`] instead.
#[tracing::instrument(skip_all)]
pub fn validate_document(tree: &Value) -> Result<Document, SchemaError> {
    let root = Node::new(tree, ConfigPath::root());
    let mut fields = root.mapping()?;

    let vports = match fields.optional(VPORT_KEY) {
        Some(node) => validate_vports(&node)?,
        None => Vec::new(),
    };

    let blocks = match fields.optional(TION_KEY) {
        None => Vec::new(),
        Some(node) if node.is_null() => Vec::new(),
        Some(node) => match node.sequence() {
            Ok(items) => items.iter().map(block).collect(),
            // A single block may be written without the surrounding list.
            Err(_) => vec![block(&node)],
        },
    };
    fields.finish()?;

    tracing::debug!(
        vports = vports.len(),
        blocks = blocks.len(),
        failed = blocks.iter().filter(|block| block.is_err()).count(),
        "validated document"
    );
    Ok(Document { vports, blocks })
}

fn block(node: &Node<'_>) -> Result<TionConfig, SchemaError> {
    let result = validate_at(node.value(), node.path().clone());
    if let Err(err) = &result {
        tracing::warn!(error = %err, "device block rejected");
    }
    result
}

fn validate_vports(node: &Node<'_>) -> Result<Vec<VPortConfig>, SchemaError> {
    let mut seen = HashSet::new();
    let mut vports = Vec::new();
    for item in node.sequence()? {
        let mut fields = item.mapping()?;
        let id_node = fields.required("id")?;
        let id = id_node.id()?;
        let kind = fields.required("type")?.choice()?;
        fields.finish()?;

        if !seen.insert(id.clone()) {
            return Err(id_node.error(SchemaReason::DuplicateId(id)));
        }
        vports.push(VPortConfig { id, kind });
    }
    Ok(vports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse;
    use tion_domain::id::Id;
    use tion_domain::platform::VPortKind;

    fn document(text: &str) -> Result<Document, SchemaError> {
        validate_document(&parse(text).unwrap())
    }

    #[test]
    fn should_read_vports_and_blocks() {
        let doc = document(
            "vport: [{id: tion_ble, type: ble}]\ntion: [{id: dev1}, {id: dev2}]",
        )
        .unwrap();
        assert_eq!(
            doc.vports,
            vec![VPortConfig {
                id: Id::parse("tion_ble").unwrap(),
                kind: VPortKind::Ble,
            }]
        );
        assert_eq!(doc.blocks.len(), 2);
        assert!(doc.blocks.iter().all(Result::is_ok));
    }

    #[test]
    fn should_isolate_block_failures() {
        let doc = document("tion: [{id: dev1}, {presets: {sauna: {}}}, {id: dev3}]").unwrap();
        assert!(doc.blocks[0].is_ok());
        let err = doc.blocks[1].as_ref().unwrap_err();
        assert_eq!(err.path.to_string(), "tion[1].presets.sauna");
        assert!(doc.blocks[2].is_ok());
    }

    #[test]
    fn should_accept_single_block_without_list() {
        let doc = document("tion: {id: dev1}").unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(
            doc.blocks[0].as_ref().unwrap().id.manual().map(Id::as_str),
            Some("dev1")
        );
    }

    #[test]
    fn should_fail_document_on_bad_vport_type() {
        let err = document("vport: [{id: tion_ble, type: wifi}]").unwrap_err();
        assert_eq!(err.path.to_string(), "vport[0].type");
    }

    #[test]
    fn should_require_vport_id() {
        let err = document("vport: [{type: uart}]").unwrap_err();
        assert_eq!(err.path.to_string(), "vport[0].id");
        assert_eq!(err.reason, SchemaReason::Required);
    }

    #[test]
    fn should_reject_duplicate_vport_ids() {
        let err = document("vport: [{id: a, type: ble}, {id: a, type: uart}]").unwrap_err();
        assert_eq!(err.path.to_string(), "vport[1].id");
    }

    #[test]
    fn should_reject_unknown_top_level_key() {
        let err = document("wifi: {}").unwrap_err();
        assert_eq!(err.reason, SchemaReason::ExtraKey);
    }
}
