//! Horizontal placement for the branching tree.
//!
//! Rows are visited top to bottom and nodes within a row in input order, so
//! every parent of a well-formed graph is placed before its children.

use std::collections::VecDeque;

use indexmap::IndexSet;
use log::trace;

use waymark_core::geometry::GridSize;

use crate::{
    config::TreeConfig,
    structure::{GraphModel, Levels, NodeIndex, NodeRole, Roles},
};

/// Computes the grid-snapped X of every node, addressed by node index.
pub(super) fn assign_x<'g>(
    model: &GraphModel<'g>,
    levels: &Levels,
    roles: &Roles,
    rows: &[(usize, Vec<NodeIndex<'g>>)],
    config: &TreeConfig,
    grid: GridSize,
) -> Vec<i32> {
    let mut placer = Placer {
        model,
        levels,
        roles,
        config,
        xs: vec![None; model.len()],
        next_root: 0,
    };

    for (_, row) in rows {
        for &idx in row {
            let x = grid.snap(placer.x_for(idx));
            trace!(node = model.node(idx).id(), role:% = roles.role(idx), x; "Placed node horizontally");
            placer.xs[idx.index()] = Some(x);
        }
    }

    placer
        .xs
        .into_iter()
        .map(|x| x.unwrap_or(config.origin_x()))
        .collect()
}

struct Placer<'a, 'g> {
    model: &'a GraphModel<'g>,
    levels: &'a Levels,
    roles: &'a Roles,
    config: &'a TreeConfig,
    xs: Vec<Option<i32>>,
    next_root: i32,
}

impl<'g> Placer<'_, 'g> {
    fn x_for(&mut self, idx: NodeIndex<'g>) -> i32 {
        let parents = self.model.parents(idx);
        let Some(&first_parent) = parents.first() else {
            let x = self.config.origin_x() + self.next_root * self.config.root_spacing();
            self.next_root += 1;
            return x;
        };

        let role = self.roles.role(idx);
        if role == NodeRole::Convergent {
            return self.convergent_x(parents);
        }

        // Any child of a branch takes its slot in the spread, even one that
        // branches again itself.
        if self.roles.role(first_parent) != NodeRole::Branch {
            return self.x_of(first_parent);
        }
        let x = self.branch_child_x(first_parent, idx);
        if role == NodeRole::Divergent {
            x.saturating_add(self.config.divergent_offset())
        } else {
            x
        }
    }

    /// X of an already placed node; a node not placed yet reads as the origin.
    fn x_of(&self, idx: NodeIndex<'g>) -> i32 {
        self.xs[idx.index()].unwrap_or(self.config.origin_x())
    }

    /// Spreads the children of `branch` symmetrically around its X.
    fn branch_child_x(&self, branch: NodeIndex<'g>, child: NodeIndex<'g>) -> i32 {
        let siblings = self.model.children(branch);
        let count = siblings.len() as i64;
        let position = siblings
            .iter()
            .position(|&sibling| sibling == child)
            .unwrap_or_default() as i64;

        // (i - (n - 1) / 2) * spacing, kept in integers.
        let offset = (2 * position - (count - 1)) * i64::from(self.config.branch_spacing()) / 2;
        let x = i64::from(self.x_of(branch)) + offset;
        x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Places a convergent node under the branch its arms split from.
    fn convergent_x(&self, parents: &[NodeIndex<'g>]) -> i32 {
        let Some((&first, rest)) = parents.split_first() else {
            return self.config.origin_x();
        };

        let first_ancestry = self.branch_ancestors(first);
        let other_ancestries: Vec<IndexSet<NodeIndex<'g>>> = rest
            .iter()
            .map(|&parent| self.branch_ancestors(parent))
            .collect();

        let common = first_ancestry
            .iter()
            .copied()
            .filter(|branch| other_ancestries.iter().all(|set| set.contains(branch)))
            .fold(None::<NodeIndex<'g>>, |best, branch| match best {
                Some(best) if self.levels.level(best) >= self.levels.level(branch) => Some(best),
                _ => Some(branch),
            });

        match common.or_else(|| first_ancestry.first().copied()) {
            Some(branch) => self.x_of(branch),
            None => self.x_of(first),
        }
    }

    /// Branch nodes reachable upwards from `start` (itself included), in the
    /// order a breadth-first walk finds them.
    fn branch_ancestors(&self, start: NodeIndex<'g>) -> IndexSet<NodeIndex<'g>> {
        let mut branches = IndexSet::new();
        let mut visited = IndexSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(idx) = queue.pop_front() {
            if self.roles.role(idx) == NodeRole::Branch {
                branches.insert(idx);
            }
            for &parent in self.model.parents(idx) {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }

        branches
    }
}
