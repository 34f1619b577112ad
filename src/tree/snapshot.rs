//! Serializable view of the tree for the host
//!
//! The host renders the snapshot and keeps the node handles so it can report
//! selections back as `(leaf, offset)` pairs.

use super::document::Tree;
use super::node::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeSnapshot {
    Text {
        id: NodeId,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Container {
        id: NodeId,
        tag: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        family: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
        children: Vec<NodeSnapshot>,
    },
    Embed {
        id: NodeId,
        name: String,
    },
}

impl NodeSnapshot {
    pub fn id(&self) -> NodeId {
        match self {
            NodeSnapshot::Text { id, .. }
            | NodeSnapshot::Container { id, .. }
            | NodeSnapshot::Embed { id, .. } => *id,
        }
    }
}

impl Tree {
    /// Snapshot of the whole tree, root first
    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_of(self.root())
    }

    fn snapshot_of(&self, id: NodeId) -> NodeSnapshot {
        match self.get(id).map(|n| n.kind()) {
            Some(NodeKind::Text(text)) => NodeSnapshot::Text {
                id,
                text: text.clone(),
            },
            Some(NodeKind::Embed { name, .. }) => NodeSnapshot::Embed {
                id,
                name: name.clone(),
            },
            Some(NodeKind::Container(container)) => NodeSnapshot::Container {
                id,
                tag: container.tag.name().to_string(),
                family: container.family.clone(),
                style: container.style_attribute(),
                children: self
                    .children(id)
                    .iter()
                    .map(|&child| self.snapshot_of(child))
                    .collect(),
            },
            None => NodeSnapshot::Text {
                id,
                text: String::new(),
            },
        }
    }

    /// Snapshot as JSON text
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}
