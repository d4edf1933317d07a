//! Block instances and their persisted form.
//!
//! [`BlockInstance`] is a live, schema-checked block inside a document: its
//! type is a known [`BlockType`] and its ID was minted by the engine.
//! [`BlockRecord`] is what crosses the boundary: pages loaded from storage and
//! blocks proposed by a generator. Its type is a raw tag and its ID and order
//! are optional, so the engine can reject unknown types and assign what is
//! missing before anything reaches the document.

use serde::{Deserialize, Serialize};

use crate::ids::BlockId;
use crate::schema::BlockType;
use crate::value::{Record, Value};

/// One placed block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Immutable for the lifetime of the instance.
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: Record,
    #[serde(default)]
    pub styles: Record,
    /// Position key. Strictly increasing along the document sequence; gaps allowed.
    pub order: f64,
    #[serde(default)]
    pub hidden: bool,
}

impl BlockInstance {
    /// Content value by key.
    pub fn content_value(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    /// Style value by key.
    pub fn style_value(&self, key: &str) -> Option<&Value> {
        self.styles.get(key)
    }

    /// Convert to the boundary form.
    pub fn to_record(&self) -> BlockRecord {
        BlockRecord {
            id: Some(self.id),
            block_type: self.block_type.as_str().to_string(),
            content: self.content.clone(),
            styles: self.styles.clone(),
            order: Some(self.order),
            hidden: self.hidden,
        }
    }
}

/// A block as stored or proposed, before validation against the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,
    /// Raw type tag; may name a type the registry no longer knows.
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub content: Record,
    #[serde(default)]
    pub styles: Record,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(default)]
    pub hidden: bool,
}

impl BlockRecord {
    /// A bare record of the given type tag, no ID, no order.
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            id: None,
            block_type: block_type.into(),
            content: Record::new(),
            styles: Record::new(),
            order: None,
            hidden: false,
        }
    }

    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Parsed block type, if the tag names a known type.
    pub fn known_type(&self) -> Option<BlockType> {
        BlockType::from_str(&self.block_type)
    }
}

impl From<&BlockInstance> for BlockRecord {
    fn from(block: &BlockInstance) -> Self {
        block.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlockInstance {
        let mut content = Record::new();
        content.insert("title".into(), Value::text("Welcome"));
        content.insert("image".into(), Value::reference("/img/hero.png"));
        let mut styles = Record::new();
        styles.insert("padding".into(), Value::Number(48.0));
        BlockInstance {
            id: BlockId::new(),
            block_type: BlockType::Hero,
            content,
            styles,
            order: 2.5,
            hidden: true,
        }
    }

    #[test]
    fn test_instance_json_roundtrip_is_lossless() {
        let block = sample();
        let json = serde_json::to_string(&block).unwrap();
        let back: BlockInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_instance_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for key in ["id", "type", "content", "styles", "order", "hidden"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["type"], "hero");
    }

    #[test]
    fn test_hidden_defaults_to_false() {
        let id = BlockId::new();
        let json = format!(r#"{{"id":"{id}","type":"divider","order":0.0}}"#);
        let block: BlockInstance = serde_json::from_str(&json).unwrap();
        assert!(!block.hidden);
        assert!(block.content.is_empty());
    }

    #[test]
    fn test_record_keeps_unknown_type_tag() {
        let json = r#"{"type":"carousel","content":{}}"#;
        let rec: BlockRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.block_type, "carousel");
        assert_eq!(rec.known_type(), None);
        assert!(rec.id.is_none());
        assert!(rec.order.is_none());
    }

    #[test]
    fn test_record_from_instance() {
        let block = sample();
        let rec = BlockRecord::from(&block);
        assert_eq!(rec.id, Some(block.id));
        assert_eq!(rec.known_type(), Some(BlockType::Hero));
        assert_eq!(rec.order, Some(2.5));
        assert!(rec.hidden);
    }
}
