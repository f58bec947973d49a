//! Serialisable node subtrees and the clipboard payload built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::error::ClipboardError;

/// `type` tag of clipboard payloads carrying node schemas.
pub const CLIPBOARD_PAYLOAD_TYPE: &str = "nodeSchema";

/// A node subtree in exchange form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSchema {
    /// Id of the exported node. Ignored on insertion; pasted nodes get fresh ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub component_name: SmolStr,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSchema>,
}

impl NodeSchema {
    pub fn new(component_name: impl Into<SmolStr>) -> Self {
        Self {
            id: None,
            component_name: component_name.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: NodeSchema) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeSchema::node_count).sum::<usize>()
    }
}

/// What copy puts on the clipboard and paste reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub components_map: BTreeMap<String, Value>,
    #[serde(default)]
    pub components_tree: Vec<NodeSchema>,
}

impl ClipboardPayload {
    /// A node schema payload with an empty components map.
    pub fn new(components_tree: Vec<NodeSchema>) -> Self {
        Self {
            kind: CLIPBOARD_PAYLOAD_TYPE.to_string(),
            components_map: BTreeMap::new(),
            components_tree,
        }
    }

    pub fn to_json(&self) -> Result<String, ClipboardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse clipboard text, rejecting payloads that are not node schemas.
    pub fn from_json(text: &str) -> Result<Self, ClipboardError> {
        let payload: Self = serde_json::from_str(text)?;
        if payload.kind != CLIPBOARD_PAYLOAD_TYPE {
            return Err(ClipboardError::UnexpectedType(payload.kind));
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_shape() {
        let payload = ClipboardPayload::new(vec![
            NodeSchema::new("Button")
                .with_prop("text", "Go")
                .with_child(NodeSchema::new("Icon")),
        ]);

        let value: Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "nodeSchema",
                "componentsMap": {},
                "componentsTree": [{
                    "componentName": "Button",
                    "props": { "text": "Go" },
                    "children": [{ "componentName": "Icon" }]
                }]
            })
        );
    }

    #[test]
    fn test_foreign_payload_rejected() {
        let err = ClipboardPayload::from_json(r#"{"type": "text", "componentsTree": []}"#)
            .unwrap_err();
        assert!(matches!(err, ClipboardError::UnexpectedType(kind) if kind == "text"));

        let err = ClipboardPayload::from_json("just some copied words").unwrap_err();
        assert!(matches!(err, ClipboardError::Json(_)));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let payload = ClipboardPayload::from_json(
            r#"{"type": "nodeSchema", "componentsTree": [{"componentName": "Text", "id": "node_4"}]}"#,
        )
        .unwrap();
        assert!(payload.components_map.is_empty());
        assert_eq!(payload.components_tree[0].id.as_deref(), Some("node_4"));
        assert_eq!(payload.components_tree[0].node_count(), 1);
    }
}
