//! Top-to-bottom branching tree layout.
//!
//! Nodes sit in rows by level. A fork spreads its children symmetrically
//! around its own column and the arms rejoin under the fork they split from.

mod horizontal;
mod vertical;

use log::debug;

use waymark_core::geometry::{GridSize, Position};

use crate::{
    config::TreeConfig,
    error::WaymarkError,
    layout::engines::{EngineLayout, FlowEngine},
    structure::{GraphModel, Levels, Roles},
};

/// Branching tree layout engine.
#[derive(Debug, Clone, Default)]
pub(super) struct Engine {
    config: TreeConfig,
    grid: GridSize,
}

impl Engine {
    /// Create a new tree engine
    ///
    /// The grid is needed while placing: children inherit their parent's
    /// already snapped column.
    pub(super) fn new(config: TreeConfig, grid: GridSize) -> Self {
        Self { config, grid }
    }
}

impl FlowEngine for Engine {
    fn calculate(&self, model: &GraphModel<'_>) -> Result<EngineLayout, WaymarkError> {
        let levels = Levels::assign(model, self.config.max_fixup_iterations())?;
        let roles = Roles::classify(model);
        let rows = levels.rows(model);
        debug!(rows = rows.len(), stable = levels.is_stable(); "Levels assigned for tree layout");

        let xs = horizontal::assign_x(model, &levels, &roles, &rows, &self.config, self.grid);
        let ys = vertical::assign_y(model, &roles, &rows, &self.config);

        let positions = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| Position::new(x, y))
            .collect();

        Ok(EngineLayout::new(positions, None))
    }
}
