//! Topological role of each node.
//!
//! The role decides how the tree layout places a node horizontally. The
//! precedence below separates a fork whose arm rejoins right away (nudged so
//! the merge reads clearly) from a fork whose arms run independently (left
//! centered, otherwise the diagram drifts rightward).

use std::fmt;

use crate::structure::{GraphModel, NodeIndex};

/// Role of a node, derived from parent and child counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeRole {
    /// Nothing special: inherits its parent's column.
    Simple,
    /// At most one parent and two or more children.
    Branch,
    /// Two or more parents.
    Convergent,
    /// Child of a branch whose sibling is convergent.
    Divergent,
    /// Child of a branch with no convergent sibling.
    BranchChild,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeRole::Simple => "simple",
            NodeRole::Branch => "branch",
            NodeRole::Convergent => "convergent",
            NodeRole::Divergent => "divergent",
            NodeRole::BranchChild => "branch_child",
        };
        write!(f, "{name}")
    }
}

/// Role per node, addressed by [`NodeIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Roles(Vec<NodeRole>);

impl Roles {
    /// Classifies every node of the model.
    ///
    /// Rules, first match wins:
    /// 1. two or more parents: `Convergent`
    /// 2. at most one parent and two or more children: `Branch`
    /// 3. single parent that is a branch with another, convergent child: `Divergent`
    /// 4. single parent that is a branch: `BranchChild`
    /// 5. otherwise `Simple`
    pub(crate) fn classify(model: &GraphModel<'_>) -> Self {
        let roles = model
            .indices()
            .map(|idx| {
                if is_convergent(model, idx) {
                    return NodeRole::Convergent;
                }
                if is_branch(model, idx) {
                    return NodeRole::Branch;
                }

                let &[parent] = model.parents(idx) else {
                    return NodeRole::Simple;
                };
                if !is_branch(model, parent) {
                    return NodeRole::Simple;
                }

                let sibling_converges = model
                    .children(parent)
                    .iter()
                    .any(|&sibling| sibling != idx && is_convergent(model, sibling));
                if sibling_converges {
                    NodeRole::Divergent
                } else {
                    NodeRole::BranchChild
                }
            })
            .collect();

        Self(roles)
    }

    /// Returns the role of a node.
    pub(crate) fn role(&self, idx: NodeIndex<'_>) -> NodeRole {
        self.0[idx.index()]
    }
}

fn is_convergent(model: &GraphModel<'_>, idx: NodeIndex<'_>) -> bool {
    model.parents(idx).len() >= 2
}

fn is_branch(model: &GraphModel<'_>, idx: NodeIndex<'_>) -> bool {
    model.parents(idx).len() <= 1 && model.children(idx).len() >= 2
}

#[cfg(test)]
mod tests {
    use waymark_core::flow::{FlowEdge, FlowGraph, FlowNode};

    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> FlowGraph {
        FlowGraph::new(
            nodes.iter().map(|id| FlowNode::new(*id)).collect(),
            edges
                .iter()
                .map(|(source, target)| FlowEdge::new(*source, *target))
                .collect(),
        )
    }

    fn role_of(model: &GraphModel<'_>, roles: &Roles, id: &str) -> NodeRole {
        roles.role(model.index_of(id).unwrap())
    }

    #[test]
    fn test_chain_is_simple() {
        let flow = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let model = GraphModel::from_graph(&flow);
        let roles = Roles::classify(&model);

        for id in ["a", "b", "c"] {
            assert_eq!(role_of(&model, &roles, id), NodeRole::Simple);
        }
    }

    #[test]
    fn test_diamond_roles() {
        let flow = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let model = GraphModel::from_graph(&flow);
        let roles = Roles::classify(&model);

        assert_eq!(role_of(&model, &roles, "a"), NodeRole::Branch);
        assert_eq!(role_of(&model, &roles, "b"), NodeRole::BranchChild);
        assert_eq!(role_of(&model, &roles, "c"), NodeRole::BranchChild);
        assert_eq!(role_of(&model, &roles, "d"), NodeRole::Convergent);
    }

    #[test]
    fn test_sibling_that_reconverges_makes_divergent() {
        // a forks to b and c; b also feeds c, so c converges right away.
        let flow = graph(&["a", "b", "c"], &[("a", "b"), ("a", "c"), ("b", "c")]);
        let model = GraphModel::from_graph(&flow);
        let roles = Roles::classify(&model);

        assert_eq!(role_of(&model, &roles, "a"), NodeRole::Branch);
        assert_eq!(role_of(&model, &roles, "b"), NodeRole::Divergent);
        assert_eq!(role_of(&model, &roles, "c"), NodeRole::Convergent);
    }

    #[test]
    fn test_convergent_wins_over_branch() {
        let flow = graph(
            &["a", "b", "m", "x", "y"],
            &[("a", "m"), ("b", "m"), ("m", "x"), ("m", "y")],
        );
        let model = GraphModel::from_graph(&flow);
        let roles = Roles::classify(&model);

        assert_eq!(role_of(&model, &roles, "m"), NodeRole::Convergent);
        // m has two parents, so it is not a branch and its children are simple.
        assert_eq!(role_of(&model, &roles, "x"), NodeRole::Simple);
    }

    #[test]
    fn test_branch_wins_over_branch_child() {
        let flow = graph(
            &["a", "b", "c", "b1", "b2"],
            &[("a", "b"), ("a", "c"), ("b", "b1"), ("b", "b2")],
        );
        let model = GraphModel::from_graph(&flow);
        let roles = Roles::classify(&model);

        assert_eq!(role_of(&model, &roles, "b"), NodeRole::Branch);
        assert_eq!(role_of(&model, &roles, "c"), NodeRole::BranchChild);
        assert_eq!(role_of(&model, &roles, "b1"), NodeRole::BranchChild);
    }

    #[test]
    fn test_isolated_node_is_simple() {
        let flow = graph(&["solo"], &[]);
        let model = GraphModel::from_graph(&flow);
        let roles = Roles::classify(&model);

        assert_eq!(role_of(&model, &roles, "solo"), NodeRole::Simple);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(NodeRole::BranchChild.to_string(), "branch_child");
        assert_eq!(NodeRole::Convergent.to_string(), "convergent");
    }
}
