//! Waymark - Automatic layout for process-flow diagrams.
//!
//! Computes deterministic, grid-aligned canvas positions for the nodes of a
//! flow graph. Two layouts are supported: a top-to-bottom branching tree and
//! a left-to-right swim-lane view with one band per lane.

pub mod config;

mod error;
mod layout;
mod structure;

pub use waymark_core::{flow, geometry};
pub use waymark_core::layout::{FlowLayout, LaneMetrics, PositionedNode};

pub use error::WaymarkError;

use log::{debug, info, trace, warn};

use config::{AppConfig, LayoutMode};
use flow::FlowGraph;

/// Builder for laying out flow graphs.
///
/// This provides an API for processing flow graphs through parsing, layout,
/// and serialization stages. The builder holds configuration only; every
/// call works on fresh state, so one builder can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use waymark::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"{
///     "nodes": [{"id": "start"}, {"id": "done"}],
///     "edges": [{"source": "start", "target": "done"}]
/// }"#;
///
/// // With custom config
/// let builder = LayoutBuilder::new(AppConfig::default());
///
/// // Parse source to a flow graph
/// let graph = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Compute positions
/// let layout = builder.layout(&graph)
///     .expect("Failed to lay out");
/// assert!(layout.is_positioned());
///
/// // Or use default config
/// let builder = LayoutBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including mode, grid, and spacing
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder lays out with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON document into a flow graph.
    ///
    /// # Errors
    ///
    /// Returns `WaymarkError::Input` with the source attached when the
    /// document is not a valid flow graph.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waymark::LayoutBuilder;
    ///
    /// let graph = LayoutBuilder::default()
    ///     .parse(r#"{"nodes": [{"id": "a", "swimLane": "Ops"}]}"#)
    ///     .expect("Failed to parse graph");
    /// assert_eq!(graph.nodes().len(), 1);
    /// assert!(graph.edges().is_empty());
    /// ```
    pub fn parse(&self, source: &str) -> Result<FlowGraph, WaymarkError> {
        info!("Parsing flow graph");

        let graph: FlowGraph = serde_json::from_str(source)
            .map_err(|err| WaymarkError::new_input_error(err, source))?;

        debug!(nodes = graph.nodes().len(), edges = graph.edges().len(); "Flow graph parsed");
        Ok(graph)
    }

    /// Lay out a graph with the configured mode.
    ///
    /// # Errors
    ///
    /// Returns `WaymarkError::Config` for invalid settings and
    /// `WaymarkError::NoRoots` when a non-empty graph has no root node.
    pub fn layout(&self, graph: &FlowGraph) -> Result<FlowLayout, WaymarkError> {
        self.layout_with_mode(graph, self.config.layout().mode())
    }

    /// Lay out a graph with an explicit mode, overriding the configured one.
    ///
    /// `LayoutMode::Auto` picks the swim-lane layout when any node names a
    /// lane and the tree layout otherwise.
    ///
    /// # Errors
    ///
    /// Returns `WaymarkError::Config` for invalid settings and
    /// `WaymarkError::NoRoots` when a non-empty graph has no root node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waymark::{LayoutBuilder, config::LayoutMode, flow::{FlowGraph, FlowNode}};
    ///
    /// let graph = FlowGraph::new(
    ///     vec![FlowNode::new("a").with_swim_lane("Customer")],
    ///     vec![],
    /// );
    /// let layout = LayoutBuilder::default()
    ///     .layout_with_mode(&graph, LayoutMode::Auto)
    ///     .expect("Failed to lay out");
    /// assert!(layout.lanes().is_some());
    /// ```
    pub fn layout_with_mode(
        &self,
        graph: &FlowGraph,
        mode: LayoutMode,
    ) -> Result<FlowLayout, WaymarkError> {
        let layout_config = self.config.layout();
        layout_config.validate()?;

        let mode = mode.resolve(graph);
        info!(
            mode:%,
            nodes = graph.nodes().len(),
            edges = graph.edges().len();
            "Laying out flow graph"
        );

        let engine_builder = layout::EngineBuilder::new()
            .with_grid(layout_config.grid()?)
            .with_tree_config(layout_config.tree().clone())
            .with_swim_lane_config(layout_config.swim_lane().clone());

        let layout = engine_builder.build(graph, mode)?;
        info!(nodes = layout.nodes().len(); "Layout calculated");
        trace!(layout:?; "Calculated layout");

        Ok(layout)
    }

    /// Lay out a graph, falling back to the unpositioned input on failure.
    ///
    /// Never fails: a rootless graph or invalid configuration is logged as a
    /// warning and every node is returned without a position.
    pub fn layout_or_unpositioned(&self, graph: &FlowGraph) -> FlowLayout {
        self.layout(graph).unwrap_or_else(|err| {
            warn!(err:%; "Layout failed, returning nodes unpositioned");
            FlowLayout::unpositioned(graph)
        })
    }

    /// Serialize a layout to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `WaymarkError::Layout` if the layout cannot be serialized.
    pub fn render_json(&self, layout: &FlowLayout) -> Result<String, WaymarkError> {
        let json = serde_json::to_string_pretty(layout)
            .map_err(|err| WaymarkError::Layout(format!("Failed to serialize layout: {err}")))?;
        debug!(bytes = json.len(); "Layout serialized");
        Ok(json)
    }
}
