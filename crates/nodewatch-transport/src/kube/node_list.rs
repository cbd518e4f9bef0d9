use nodewatch_core::models::Snapshot;
use serde::Deserialize;

/// The subset of a core/v1 `NodeList` needed for readiness.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeList {
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<Node>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeta {
    #[serde(rename = "continue", default)]
    pub continue_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: Option<NodeStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStatus {
    #[serde(default)]
    pub conditions: Vec<NodeCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeCondition {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

impl Node {
    /// Ready iff the `Ready` condition reports `"True"`. `Unknown`, `False`,
    /// and an absent condition all count as not ready.
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .map(|s| s.conditions.iter().any(|c| c.kind == "Ready" && c.status == "True"))
            .unwrap_or(false)
    }
}

impl NodeList {
    /// Token for the next page, if the server returned a non-empty one.
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata.continue_token.as_deref().filter(|c| !c.is_empty())
    }

    pub fn extend_snapshot(&self, snapshot: &mut Snapshot) {
        for node in &self.items {
            snapshot.insert(node.metadata.name.clone(), node.is_ready());
        }
    }
}

/// Reduce a single page to a snapshot.
pub fn readiness_from_node_list(list: &NodeList) -> Snapshot {
    let mut snapshot = Snapshot::new();
    list.extend_snapshot(&mut snapshot);
    snapshot
}
