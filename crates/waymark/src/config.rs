//! Configuration types for Waymark layout.
//!
//! This module provides configuration structures that control how flow
//! graphs are laid out. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources, and every field falls back to
//! the default used by the diagram canvas when it is omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Selects the [`LayoutMode`] and the grid unit.
//! - [`TreeConfig`] - Spacing and height estimation for the top-to-bottom tree mode.
//! - [`SwimLaneConfig`] - Column and band sizes for the left-to-right swim-lane mode.
//!
//! # Example
//!
//! ```
//! # use waymark::config::{AppConfig, LayoutMode};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().mode(), LayoutMode::Tree);
//! assert_eq!(config.layout().tree().branch_spacing(), 384);
//! assert!(config.layout().validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use waymark_core::{flow::FlowGraph, geometry::GridSize};

use crate::error::WaymarkError;

/// Layout algorithm used for a flow graph.
///
/// - `Tree` - Top-to-bottom branching tree (default)
/// - `SwimLane` - Left-to-right columns with one horizontal band per lane
/// - `Auto` - `SwimLane` when any node declares a lane, `Tree` otherwise
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Branching tree layout (default)
    #[default]
    Tree,
    /// Swim-lane layout
    SwimLane,
    /// Pick based on the graph content
    Auto,
}

impl LayoutMode {
    /// Resolves `Auto` against the graph content; other modes are returned as is.
    pub fn resolve(self, graph: &FlowGraph) -> LayoutMode {
        match self {
            LayoutMode::Auto if graph.declares_swim_lanes() => LayoutMode::SwimLane,
            LayoutMode::Auto => LayoutMode::Tree,
            mode => mode,
        }
    }
}

impl FromStr for LayoutMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Self::Tree),
            "swim_lane" | "swim-lane" | "swimlane" => Ok(Self::SwimLane),
            "auto" => Ok(Self::Auto),
            _ => Err("Unsupported layout mode"),
        }
    }
}

impl From<LayoutMode> for &'static str {
    fn from(val: LayoutMode) -> Self {
        match val {
            LayoutMode::Tree => "tree",
            LayoutMode::SwimLane => "swim_lane",
            LayoutMode::Auto => "auto",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Layout mode selection and settings shared by both modes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Default [`LayoutMode`].
    mode: LayoutMode,

    /// Grid unit all coordinates are snapped to, in pixels.
    grid_size: i32,

    /// Branching tree settings.
    tree: TreeConfig,

    /// Swim-lane settings.
    swim_lane: SwimLaneConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            grid_size: GridSize::DEFAULT.unit(),
            tree: TreeConfig::default(),
            swim_lane: SwimLaneConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] with the given mode and default settings.
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Replaces the tree settings (builder style).
    pub fn with_tree(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Replaces the swim-lane settings (builder style).
    pub fn with_swim_lane(mut self, swim_lane: SwimLaneConfig) -> Self {
        self.swim_lane = swim_lane;
        self
    }

    /// Replaces the grid unit (builder style).
    pub fn with_grid_size(mut self, grid_size: i32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Returns the default [`LayoutMode`].
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Returns the validated grid unit.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Config`] if the configured grid size is not positive.
    pub fn grid(&self) -> Result<GridSize, WaymarkError> {
        GridSize::new(self.grid_size).map_err(|err| WaymarkError::Config(err.to_string()))
    }

    /// Returns the branching tree settings.
    pub fn tree(&self) -> &TreeConfig {
        &self.tree
    }

    /// Returns the swim-lane settings.
    pub fn swim_lane(&self) -> &SwimLaneConfig {
        &self.swim_lane
    }

    /// Checks that all values can produce a layout.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), WaymarkError> {
        self.grid()?;

        let tree = &self.tree;
        non_negative("tree.root_spacing", tree.root_spacing)?;
        non_negative("tree.branch_spacing", tree.branch_spacing)?;
        non_negative("tree.level_gap", tree.level_gap)?;
        non_negative("tree.base_height", tree.base_height)?;
        non_negative("tree.bullet_height", tree.bullet_height)?;
        non_negative("tree.notification_height", tree.notification_height)?;
        positive("tree.min_height", tree.min_height)?;
        if tree.max_fixup_iterations == 0 {
            return Err(WaymarkError::Config(
                "tree.max_fixup_iterations must be at least 1".to_string(),
            ));
        }

        let lane = &self.swim_lane;
        positive("swim_lane.node_width", lane.node_width)?;
        non_negative("swim_lane.node_gap", lane.node_gap)?;
        positive("swim_lane.node_height", lane.node_height)?;
        positive("swim_lane.lane_height", lane.lane_height)?;
        non_negative("swim_lane.lane_gap", lane.lane_gap)?;
        if lane.node_height > lane.lane_height {
            return Err(WaymarkError::Config(format!(
                "swim_lane.node_height ({}) must not exceed swim_lane.lane_height ({})",
                lane.node_height, lane.lane_height
            )));
        }

        Ok(())
    }
}

fn positive(name: &str, value: i32) -> Result<(), WaymarkError> {
    if value <= 0 {
        return Err(WaymarkError::Config(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, value: i32) -> Result<(), WaymarkError> {
    if value < 0 {
        return Err(WaymarkError::Config(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Settings for the top-to-bottom branching tree mode.
///
/// Heights are estimates of the rendered node card: a base height plus a
/// fixed amount per bullet point and per notification, never below
/// `min_height`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    origin_x: i32,
    origin_y: i32,
    root_spacing: i32,
    branch_spacing: i32,
    divergent_offset: i32,
    level_gap: i32,
    base_height: i32,
    bullet_height: i32,
    notification_height: i32,
    min_height: i32,
    max_fixup_iterations: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            origin_x: 400,
            origin_y: 100,
            root_spacing: 768,
            branch_spacing: 384,
            divergent_offset: 200,
            level_gap: 36,
            base_height: 80,
            bullet_height: 24,
            notification_height: 32,
            min_height: 100,
            max_fixup_iterations: 10,
        }
    }
}

impl TreeConfig {
    /// X of the first root node.
    pub fn origin_x(&self) -> i32 {
        self.origin_x
    }

    /// Y of the first row.
    pub fn origin_y(&self) -> i32 {
        self.origin_y
    }

    /// Horizontal distance between consecutive root nodes.
    pub fn root_spacing(&self) -> i32 {
        self.root_spacing
    }

    /// Horizontal distance between the children of a branch node.
    pub fn branch_spacing(&self) -> i32 {
        self.branch_spacing
    }

    /// Extra rightward shift of a divergent branch arm.
    pub fn divergent_offset(&self) -> i32 {
        self.divergent_offset
    }

    /// Vertical gap between rows, also the unit of the extra label and fan-out gaps.
    pub fn level_gap(&self) -> i32 {
        self.level_gap
    }

    /// Estimated height of a node without content.
    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    /// Estimated height added per bullet point.
    pub fn bullet_height(&self) -> i32 {
        self.bullet_height
    }

    /// Estimated height added per notification.
    pub fn notification_height(&self) -> i32 {
        self.notification_height
    }

    /// Lower bound of every estimated height and row height.
    pub fn min_height(&self) -> i32 {
        self.min_height
    }

    /// Cap on the level fixup passes.
    pub fn max_fixup_iterations(&self) -> usize {
        self.max_fixup_iterations
    }

    /// Sets the branch spacing (builder style).
    pub fn with_branch_spacing(mut self, spacing: i32) -> Self {
        self.branch_spacing = spacing;
        self
    }

    /// Sets the origin of the first root (builder style).
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Sets the fixup pass cap (builder style).
    pub fn with_max_fixup_iterations(mut self, iterations: usize) -> Self {
        self.max_fixup_iterations = iterations;
        self
    }
}

/// Settings for the left-to-right swim-lane mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwimLaneConfig {
    origin_x: i32,
    origin_y: i32,
    node_width: i32,
    node_gap: i32,
    node_height: i32,
    lane_height: i32,
    lane_gap: i32,
}

impl Default for SwimLaneConfig {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            node_width: 280,
            node_gap: 120,
            node_height: 100,
            lane_height: 300,
            lane_gap: 24,
        }
    }
}

impl SwimLaneConfig {
    /// X of the first column.
    pub fn origin_x(&self) -> i32 {
        self.origin_x
    }

    /// Y of the top of the first lane band.
    pub fn origin_y(&self) -> i32 {
        self.origin_y
    }

    /// Width of a node card.
    pub fn node_width(&self) -> i32 {
        self.node_width
    }

    /// Horizontal gap between columns.
    pub fn node_gap(&self) -> i32 {
        self.node_gap
    }

    /// Height of a node card, used to center nodes inside their band.
    pub fn node_height(&self) -> i32 {
        self.node_height
    }

    /// Height of one lane band.
    pub fn lane_height(&self) -> i32 {
        self.lane_height
    }

    /// Vertical gap between lane bands.
    pub fn lane_gap(&self) -> i32 {
        self.lane_gap
    }

    /// Distance between the left edges of two adjacent columns.
    pub fn column_width(&self) -> i32 {
        self.node_width + self.node_gap
    }

    /// Distance between the tops of two adjacent lane bands.
    pub fn band_pitch(&self) -> i32 {
        self.lane_height + self.lane_gap
    }

    /// Sets the node card size (builder style).
    pub fn with_node_size(mut self, width: i32, height: i32) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mode_from_str() {
        assert_eq!("tree".parse::<LayoutMode>(), Ok(LayoutMode::Tree));
        assert_eq!("swim-lane".parse::<LayoutMode>(), Ok(LayoutMode::SwimLane));
        assert_eq!("swim_lane".parse::<LayoutMode>(), Ok(LayoutMode::SwimLane));
        assert_eq!("auto".parse::<LayoutMode>(), Ok(LayoutMode::Auto));
        assert!("radial".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_layout_mode_display_round_trips() {
        for mode in [LayoutMode::Tree, LayoutMode::SwimLane, LayoutMode::Auto] {
            assert_eq!(mode.to_string().parse::<LayoutMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_auto_mode_resolves_from_lanes() {
        use waymark_core::flow::FlowNode;

        let plain = FlowGraph::new(vec![FlowNode::new("a")], vec![]);
        let laned = FlowGraph::new(vec![FlowNode::new("a").with_swim_lane("Customer")], vec![]);

        assert_eq!(LayoutMode::Auto.resolve(&plain), LayoutMode::Tree);
        assert_eq!(LayoutMode::Auto.resolve(&laned), LayoutMode::SwimLane);
        assert_eq!(LayoutMode::Tree.resolve(&laned), LayoutMode::Tree);
        assert_eq!(LayoutMode::SwimLane.resolve(&plain), LayoutMode::SwimLane);
    }

    #[test]
    fn test_defaults_match_canvas_constants() {
        let config = LayoutConfig::default();
        let tree = config.tree();

        assert_eq!(config.grid().map(GridSize::unit).ok(), Some(8));
        assert_eq!(tree.branch_spacing(), 384);
        assert_eq!(tree.divergent_offset(), 200);
        assert_eq!(tree.level_gap(), 36);
        assert_eq!(tree.min_height(), 100);
        assert_eq!(tree.origin_y(), 100);
        assert_eq!(tree.max_fixup_iterations(), 10);
        assert_eq!(config.swim_lane().lane_height(), 300);
        assert_eq!(config.swim_lane().lane_gap(), 24);
    }

    #[test]
    fn test_validate_rejects_bad_grid() {
        let config = LayoutConfig::default().with_grid_size(0);
        assert!(matches!(config.validate(), Err(WaymarkError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_node_taller_than_lane() {
        let config = LayoutConfig::default()
            .with_swim_lane(SwimLaneConfig::default().with_node_size(280, 400));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("swim_lane.node_height"));
    }

    #[test]
    fn test_validate_rejects_zero_fixup_cap() {
        let config =
            LayoutConfig::default().with_tree(TreeConfig::default().with_max_fixup_iterations(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_spacing() {
        let config =
            LayoutConfig::default().with_tree(TreeConfig::default().with_branch_spacing(-1));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tree.branch_spacing"));
    }
}
