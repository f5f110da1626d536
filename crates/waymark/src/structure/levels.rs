//! Level assignment: the row index of every node.
//!
//! Levels come from a breadth-first walk from all roots where a node reached
//! again through a deeper parent moves down to the deeper level. A bounded
//! fixup pass then recomputes `max(parent levels) + 1` until nothing changes.
//!
//! Cycles are not rejected. The walk never proposes a level equal to the
//! node count (no simple path is that long), and the fixup stops after the
//! configured number of passes, so cyclic input always terminates with a
//! deterministic, if imperfect, result.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace, warn};

use crate::{
    error::WaymarkError,
    structure::{GraphModel, NodeIndex},
};

/// Row index per node, addressed by [`NodeIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Levels {
    levels: Vec<usize>,
    stable: bool,
}

impl Levels {
    /// Assigns levels from a breadth-first walk only.
    ///
    /// This is the column assignment of the swim-lane layout: the distance
    /// from the nearest root, pushed right by any deeper parent.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::NoRoots`] when the non-empty graph has no node
    /// without incoming edges.
    pub(crate) fn breadth_first(model: &GraphModel<'_>) -> Result<Self, WaymarkError> {
        let node_count = model.len();
        let mut levels: Vec<Option<usize>> = vec![None; node_count];
        let mut queue = VecDeque::new();

        for root in model.roots() {
            levels[root.index()] = Some(0);
            queue.push_back(root);
        }

        if queue.is_empty() && !model.is_empty() {
            return Err(WaymarkError::NoRoots { nodes: node_count });
        }
        debug!(roots = queue.len(), nodes = node_count; "Assigning levels from roots");

        while let Some(idx) = queue.pop_front() {
            let proposed = levels[idx.index()].map_or(1, |level| level + 1);
            if proposed >= node_count {
                trace!(node = model.node(idx).id(); "Level cap reached, not descending further");
                continue;
            }

            for &child in model.children(idx) {
                let slot = &mut levels[child.index()];
                if slot.is_none_or(|current| proposed > current) {
                    *slot = Some(proposed);
                    queue.push_back(child);
                }
            }
        }

        let unreached = levels.iter().filter(|level| level.is_none()).count();
        if unreached > 0 {
            debug!(unreached; "Nodes unreachable from any root start at level 0");
        }

        Ok(Self {
            levels: levels.into_iter().map(Option::unwrap_or_default).collect(),
            stable: true,
        })
    }

    /// Assigns levels with the breadth-first walk followed by the fixup pass.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::NoRoots`] when the non-empty graph has no root.
    pub(crate) fn assign(
        model: &GraphModel<'_>,
        max_fixup_iterations: usize,
    ) -> Result<Self, WaymarkError> {
        let mut levels = Self::breadth_first(model)?;
        levels.fixup(model, max_fixup_iterations);
        Ok(levels)
    }

    /// Recomputes `max(parent levels) + 1` for every node with parents,
    /// in input order, until a pass changes nothing or the cap is hit.
    fn fixup(&mut self, model: &GraphModel<'_>, max_iterations: usize) {
        self.stable = false;

        for iteration in 1..=max_iterations {
            let mut changed = false;

            for idx in model.indices() {
                let Some(parent_level) = model
                    .parents(idx)
                    .iter()
                    .map(|parent| self.levels[parent.index()])
                    .max()
                else {
                    continue;
                };

                let level = parent_level + 1;
                if self.levels[idx.index()] != level {
                    self.levels[idx.index()] = level;
                    changed = true;
                }
            }

            if !changed {
                debug!(iterations = iteration; "Levels stabilized");
                self.stable = true;
                return;
            }
        }

        warn!(
            max_iterations;
            "Levels did not stabilize, continuing with the last computed levels (the graph likely contains a cycle)"
        );
    }

    /// Returns the level of a node.
    pub(crate) fn level(&self, idx: NodeIndex<'_>) -> usize {
        self.levels[idx.index()]
    }

    /// Returns `false` if the fixup pass hit its cap.
    pub(crate) fn is_stable(&self) -> bool {
        self.stable
    }

    /// Groups nodes by level.
    ///
    /// Only occupied levels are returned, in ascending order; nodes within a
    /// level keep input order.
    pub(crate) fn rows<'g>(&self, model: &GraphModel<'g>) -> Vec<(usize, Vec<NodeIndex<'g>>)> {
        let mut rows: BTreeMap<usize, Vec<NodeIndex<'g>>> = BTreeMap::new();
        for idx in model.indices() {
            rows.entry(self.level(idx)).or_default().push(idx);
        }
        rows.into_iter().collect()
    }
}
