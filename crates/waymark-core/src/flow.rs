//! Input model for process-flow diagrams.
//!
//! A [`FlowGraph`] is the caller-owned description of a diagram: a list of
//! [`FlowNode`] steps and the [`FlowEdge`] transitions between them. The
//! layout engine only reads these values; it never mutates them.
//!
//! All types round-trip through JSON using camelCase field names. Fields the
//! engine does not understand are kept in [`FlowNode::extra`] so that a
//! positioned node serializes as the original object plus its position.
//!
//! # Example
//!
//! ```
//! use waymark_core::flow::{FlowEdge, FlowGraph, FlowNode};
//!
//! let graph = FlowGraph::new(
//!     vec![FlowNode::new("start"), FlowNode::new("end")],
//!     vec![FlowEdge::new("start", "end").with_label("done")],
//! );
//!
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.edges()[0].label(), Some("done"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One step of a process-flow diagram.
///
/// Only the identifier is required. Size hints (`bulletPoints`,
/// `notifications`) feed the height estimate of the tree layout, and
/// `swimLane` selects the band in the swim-lane layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    swim_lane: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    bullet_points: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    notifications: Option<Vec<Value>>,

    /// Any other fields of the node object, carried through unchanged.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl FlowNode {
    /// Creates a node with the given identifier and no hints.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            swim_lane: None,
            bullet_points: None,
            notifications: None,
            extra: Map::new(),
        }
    }

    /// Sets the declared swim lane (builder style).
    pub fn with_swim_lane(mut self, lane: impl Into<String>) -> Self {
        self.swim_lane = Some(lane.into());
        self
    }

    /// Sets the bullet points shown inside the node (builder style).
    pub fn with_bullet_points<I, S>(mut self, bullet_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullet_points = Some(bullet_points.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the notifications attached to the node (builder style).
    pub fn with_notifications(mut self, notifications: Vec<Value>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Adds an opaque field that is carried through layout untouched.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the declared swim lane, ignoring blank names.
    pub fn swim_lane(&self) -> Option<&str> {
        self.swim_lane
            .as_deref()
            .filter(|lane| !lane.trim().is_empty())
    }

    /// Returns the number of bullet points, zero when absent.
    pub fn bullet_count(&self) -> usize {
        self.bullet_points.as_ref().map_or(0, Vec::len)
    }

    /// Returns the number of notifications, zero when absent.
    pub fn notification_count(&self) -> usize {
        self.notifications.as_ref().map_or(0, Vec::len)
    }

    /// Returns the fields the engine does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Drops a `position` carried over from an earlier layout.
    pub(crate) fn clear_stale_position(&mut self) {
        self.extra.remove("position");
    }
}

/// A directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    source: String,
    target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl FlowEdge {
    /// Creates an unlabeled edge from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    /// Sets the edge label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the source node identifier.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the target node identifier.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the label, treating empty or whitespace-only labels as absent.
    pub fn label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
    }
}

/// A complete flow diagram: nodes in caller order plus their transitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    #[serde(default)]
    nodes: Vec<FlowNode>,

    #[serde(default)]
    edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Creates a graph from nodes and edges.
    pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the nodes in caller order.
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    /// Returns the edges in caller order.
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if at least one node declares a non-blank swim lane.
    pub fn declares_swim_lanes(&self) -> bool {
        self.nodes.iter().any(|node| node.swim_lane().is_some())
    }
}
