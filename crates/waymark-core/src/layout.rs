//! Output model of the layout engine.
//!
//! A [`FlowLayout`] holds one [`PositionedNode`] per input node, in input
//! order. Serialized, each positioned node is the original node object with an
//! added `position` field; swim-lane layouts additionally carry
//! [`LaneMetrics`] at the top level.

use serde::{Deserialize, Serialize};

use crate::{
    flow::{FlowGraph, FlowNode},
    geometry::Position,
};

/// An input node paired with the position the engine assigned to it.
///
/// The position is `None` only in the unpositioned fallback returned for
/// graphs without a root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    node: FlowNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
}

impl PositionedNode {
    /// Pairs a node with its assigned position.
    ///
    /// A `position` left on the node by a previous layout is replaced.
    pub fn new(mut node: FlowNode, position: Position) -> Self {
        node.clear_stale_position();
        Self {
            node,
            position: Some(position),
        }
    }

    /// Wraps a node without assigning a position.
    pub fn unpositioned(node: FlowNode) -> Self {
        Self {
            node,
            position: None,
        }
    }

    /// Returns the wrapped input node.
    pub fn node(&self) -> &FlowNode {
        &self.node
    }

    /// Returns the node identifier.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// Returns the assigned position, if any.
    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Swim-lane band information returned by the left-to-right layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneMetrics {
    swim_lane_order: Vec<String>,
    swim_lane_width: i32,
    swim_lane_height: i32,
}

impl LaneMetrics {
    /// Creates lane metrics from the lane order and the overall band size.
    pub fn new(order: Vec<String>, width: i32, height: i32) -> Self {
        Self {
            swim_lane_order: order,
            swim_lane_width: width,
            swim_lane_height: height,
        }
    }

    /// Returns lane names in order of first appearance.
    pub fn order(&self) -> &[String] {
        &self.swim_lane_order
    }

    /// Returns the width shared by all lane bands.
    pub fn width(&self) -> i32 {
        self.swim_lane_width
    }

    /// Returns the total height of all bands and the gaps between them.
    pub fn height(&self) -> i32 {
        self.swim_lane_height
    }
}

/// The result of laying out a [`FlowGraph`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    nodes: Vec<PositionedNode>,

    #[serde(flatten)]
    lanes: Option<LaneMetrics>,
}

impl FlowLayout {
    /// Creates a layout from positioned nodes and optional lane metrics.
    pub fn new(nodes: Vec<PositionedNode>, lanes: Option<LaneMetrics>) -> Self {
        Self { nodes, lanes }
    }

    /// Copies the graph's nodes without assigning any position.
    ///
    /// Callers use this as the input for their own fallback placement when a
    /// graph cannot be laid out.
    pub fn unpositioned(graph: &FlowGraph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .cloned()
                .map(PositionedNode::unpositioned)
                .collect(),
            lanes: None,
        }
    }

    /// Returns the positioned nodes in input order.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    /// Returns the lane metrics of a swim-lane layout.
    pub fn lanes(&self) -> Option<&LaneMetrics> {
        self.lanes.as_ref()
    }

    /// Returns the position of the first node with the given identifier.
    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.nodes
            .iter()
            .find(|node| node.id() == id)
            .and_then(PositionedNode::position)
    }

    /// Returns `true` if every node received a position.
    pub fn is_positioned(&self) -> bool {
        self.nodes.iter().all(|node| node.position().is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_positioned_node_serializes_as_augmented_input() {
        let node = FlowNode::new("a").with_extra("title", json!("Start"));
        let positioned = PositionedNode::new(node, Position::new(8, 104));

        assert_eq!(
            serde_json::to_value(&positioned).unwrap(),
            json!({ "id": "a", "title": "Start", "position": { "x": 8, "y": 104 } })
        );
    }

    #[test]
    fn test_new_position_replaces_stale_one() {
        let node: FlowNode =
            serde_json::from_value(json!({ "id": "a", "position": { "x": 3, "y": 5 } })).unwrap();
        let positioned = PositionedNode::new(node, Position::new(0, 104));

        assert_eq!(
            serde_json::to_value(&positioned).unwrap(),
            json!({ "id": "a", "position": { "x": 0, "y": 104 } })
        );
    }

    #[test]
    fn test_unpositioned_node_omits_position() {
        let positioned = PositionedNode::unpositioned(FlowNode::new("a"));
        assert_eq!(serde_json::to_value(&positioned).unwrap(), json!({ "id": "a" }));
    }

    #[test]
    fn test_lane_metrics_flatten_into_layout() {
        let layout = FlowLayout::new(
            vec![],
            Some(LaneMetrics::new(vec!["Customer".to_string()], 400, 300)),
        );

        assert_eq!(
            serde_json::to_value(&layout).unwrap(),
            json!({
                "nodes": [],
                "swimLaneOrder": ["Customer"],
                "swimLaneWidth": 400,
                "swimLaneHeight": 300,
            })
        );
    }

    #[test]
    fn test_tree_layout_has_no_lane_fields() {
        let layout = FlowLayout::new(vec![], None);
        assert_eq!(serde_json::to_value(&layout).unwrap(), json!({ "nodes": [] }));
    }

    #[test]
    fn test_unpositioned_layout_copies_nodes_in_order() {
        let graph = FlowGraph::new(vec![FlowNode::new("b"), FlowNode::new("a")], vec![]);
        let layout = FlowLayout::unpositioned(&graph);

        let ids: Vec<&str> = layout.nodes().iter().map(PositionedNode::id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(!layout.is_positioned());
        assert_eq!(layout.position_of("a"), None);
    }

    #[test]
    fn test_layout_deserializes_from_output_json() {
        let layout: FlowLayout = serde_json::from_value(json!({
            "nodes": [{ "id": "a", "position": { "x": 0, "y": 104 } }],
        }))
        .unwrap();

        assert_eq!(layout.position_of("a"), Some(Position::new(0, 104)));
        assert!(layout.lanes().is_none());
    }
}
