//! Left-to-right swim-lane layout.
//!
//! Columns follow the breadth-first distance from the roots and every lane
//! is a horizontal band; a node is centered vertically in its lane's band.

use indexmap::IndexSet;
use log::debug;

use waymark_core::{geometry::Position, layout::LaneMetrics};

use crate::{
    config::SwimLaneConfig,
    error::WaymarkError,
    layout::engines::{EngineLayout, FlowEngine},
    structure::{GraphModel, Levels},
};

/// Swim-lane layout engine.
#[derive(Debug, Clone, Default)]
pub(super) struct Engine {
    config: SwimLaneConfig,
}

impl Engine {
    /// Create a new swim-lane engine
    pub(super) fn new(config: SwimLaneConfig) -> Self {
        Self { config }
    }
}

impl FlowEngine for Engine {
    fn calculate(&self, model: &GraphModel<'_>) -> Result<EngineLayout, WaymarkError> {
        let columns = Levels::breadth_first(model)?;

        let mut lanes: IndexSet<&str> = IndexSet::new();
        for idx in model.indices() {
            if let Some(lane) = model.node(idx).swim_lane() {
                lanes.insert(lane);
            }
        }

        let config = &self.config;
        let centering = (config.lane_height() - config.node_height()) / 2;

        let positions = model
            .indices()
            .map(|idx| {
                let node = model.node(idx);
                let band = match node.swim_lane() {
                    Some(lane) => lanes.get_index_of(lane).unwrap_or_default(),
                    None => {
                        debug!(node = node.id(); "Node without a lane placed in the first band");
                        0
                    }
                };

                let x = config
                    .origin_x()
                    .saturating_add(scaled(columns.level(idx), config.column_width()));
                let y = config
                    .origin_y()
                    .saturating_add(scaled(band, config.band_pitch()))
                    .saturating_add(centering);
                Position::new(x, y)
            })
            .collect();

        let bands = lanes.len().max(1);
        let width = scaled(model.len(), config.column_width());
        let height = scaled(bands, config.lane_height())
            .saturating_add(scaled(bands - 1, config.lane_gap()));
        debug!(lanes = lanes.len(), width, height; "Swim lanes measured");

        let metrics = LaneMetrics::new(
            lanes.into_iter().map(str::to_string).collect(),
            width,
            height,
        );

        Ok(EngineLayout::new(positions, Some(metrics)))
    }
}

fn scaled(count: usize, unit: i32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(unit)
}
