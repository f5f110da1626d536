//! Layout engine factory module
//!
//! This module selects and runs the layout engine for a [`LayoutMode`]:
//!
//! - `tree` - top-to-bottom branching tree
//! - `swim_lane` - left-to-right columns with one band per lane
//!
//! Every engine reads the same [`GraphModel`] and returns raw positions
//! addressed by node index. The builder snaps them to the grid and pairs
//! them with copies of the caller's nodes.

mod swim_lane;
mod tree;

use log::{debug, trace};

use waymark_core::{
    flow::FlowGraph,
    geometry::{GridSize, Position},
    layout::{FlowLayout, LaneMetrics, PositionedNode},
};

use crate::{
    config::{LayoutMode, SwimLaneConfig, TreeConfig},
    error::WaymarkError,
    structure::GraphModel,
};

/// Raw engine output: one position per model node plus optional lane metrics.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EngineLayout {
    positions: Vec<Position>,
    lanes: Option<LaneMetrics>,
}

impl EngineLayout {
    /// Creates an engine layout; `positions` is addressed by node index.
    fn new(positions: Vec<Position>, lanes: Option<LaneMetrics>) -> Self {
        Self { positions, lanes }
    }
}

/// Trait defining the interface for flow layout engines
pub(crate) trait FlowEngine {
    /// Calculate positions for every node of the model
    ///
    /// Positions may be off-grid; the builder snaps them afterwards.
    ///
    /// # Errors
    /// Returns `WaymarkError::NoRoots` if the graph has no root node.
    fn calculate(&self, model: &GraphModel<'_>) -> Result<EngineLayout, WaymarkError>;
}

/// Builder for creating and configuring layout engines.
/// Builder is not reuseable after build() is called.
#[derive(Debug, Default)]
pub(crate) struct EngineBuilder {
    grid: GridSize,
    tree: TreeConfig,
    swim_lane: SwimLaneConfig,
}

impl EngineBuilder {
    /// Create a new engine builder with default settings
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the grid unit coordinates are snapped to
    pub(crate) fn with_grid(mut self, grid: GridSize) -> Self {
        self.grid = grid;
        self
    }

    /// Set the branching tree settings
    pub(crate) fn with_tree_config(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Set the swim-lane settings
    pub(crate) fn with_swim_lane_config(mut self, swim_lane: SwimLaneConfig) -> Self {
        self.swim_lane = swim_lane;
        self
    }

    /// Get the engine for a resolved layout mode
    fn engine(self, mode: LayoutMode) -> Box<dyn FlowEngine> {
        match mode {
            LayoutMode::SwimLane => Box::new(swim_lane::Engine::new(self.swim_lane)),
            // `Auto` is resolved by the caller; treat a stray one as the default mode.
            LayoutMode::Tree | LayoutMode::Auto => {
                Box::new(tree::Engine::new(self.tree, self.grid))
            }
        }
    }

    /// Lay out the graph with the engine for `mode`
    ///
    /// Builds the graph model, runs the engine, snaps every position to the
    /// grid and returns one positioned node per input node, in input order.
    /// Input nodes sharing an id share that id's position.
    ///
    /// # Errors
    /// Returns `WaymarkError::NoRoots` for a non-empty graph without roots and
    /// `WaymarkError::Layout` if an engine leaves a node without a position.
    pub(crate) fn build(
        self,
        graph: &FlowGraph,
        mode: LayoutMode,
    ) -> Result<FlowLayout, WaymarkError> {
        let grid = self.grid;
        let model = GraphModel::from_graph(graph);
        debug!(nodes = model.len(), mode:%; "Graph model built");

        let engine = self.engine(mode);
        let EngineLayout { positions, lanes } = engine.calculate(&model)?;

        let positions: Vec<Position> = positions
            .into_iter()
            .map(|position| position.snapped(grid))
            .collect();

        let nodes = graph
            .nodes()
            .iter()
            .map(|node| {
                let position = model
                    .index_of(node.id())
                    .and_then(|idx| positions.get(idx.index()).copied())
                    .ok_or_else(|| {
                        WaymarkError::Layout(format!("Position not found for node {}", node.id()))
                    })?;
                Ok(PositionedNode::new(node.clone(), position))
            })
            .collect::<Result<Vec<_>, WaymarkError>>()?;

        let layout = FlowLayout::new(nodes, lanes);
        trace!(layout:?; "Built flow layout");

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use waymark_core::flow::{FlowEdge, FlowNode};

    use super::*;

    #[test]
    fn test_build_snaps_every_position() {
        let graph = FlowGraph::new(
            vec![FlowNode::new("a"), FlowNode::new("b")],
            vec![FlowEdge::new("a", "b")],
        );
        let layout = EngineBuilder::new()
            .build(&graph, LayoutMode::Tree)
            .unwrap();

        for node in layout.nodes() {
            let position = node.position().unwrap();
            assert_eq!(position.x() % 8, 0);
            assert_eq!(position.y() % 8, 0);
        }
    }

    #[test]
    fn test_build_preserves_input_order_and_duplicates() {
        let graph = FlowGraph::new(
            vec![FlowNode::new("b"), FlowNode::new("a"), FlowNode::new("b")],
            vec![FlowEdge::new("a", "b")],
        );
        let layout = EngineBuilder::new()
            .build(&graph, LayoutMode::Tree)
            .unwrap();

        let ids: Vec<&str> = layout.nodes().iter().map(PositionedNode::id).collect();
        assert_eq!(ids, ["b", "a", "b"]);
        assert_eq!(layout.nodes()[0].position(), layout.nodes()[2].position());
    }

    #[test]
    fn test_build_empty_graph() {
        let graph = FlowGraph::default();
        let layout = EngineBuilder::new()
            .build(&graph, LayoutMode::Tree)
            .unwrap();

        assert!(layout.nodes().is_empty());
    }

    #[test]
    fn test_build_uses_configured_grid() {
        let graph = FlowGraph::new(vec![FlowNode::new("a")], vec![]);
        let layout = EngineBuilder::new()
            .with_grid(GridSize::new(50).unwrap())
            .build(&graph, LayoutMode::Tree)
            .unwrap();

        let position = layout.position_of("a").unwrap();
        assert_eq!(position.x() % 50, 0);
        assert_eq!(position.y() % 50, 0);
    }

    #[test]
    fn test_swim_lane_build_reports_lanes() {
        let graph = FlowGraph::new(
            vec![FlowNode::new("a").with_swim_lane("Customer")],
            vec![],
        );
        let layout = EngineBuilder::new()
            .build(&graph, LayoutMode::SwimLane)
            .unwrap();

        assert_eq!(
            layout.lanes().map(LaneMetrics::order),
            Some(&["Customer".to_string()][..])
        );
    }
}
