//! Derived graph structure shared by the layout engines.
//!
//! Everything here is rebuilt on each layout call from the caller's flow
//! graph and discarded once positions are produced:
//!
//! - [`GraphModel`] - child/parent adjacency keyed by node id
//! - [`Levels`] - row index per node (longest path from a root)
//! - [`Roles`] - topological role per node, driving the tree heuristics

mod graph_model;
mod levels;
mod roles;

pub(crate) use graph_model::{GraphModel, NodeIndex};
pub(crate) use levels::Levels;
pub(crate) use roles::{NodeRole, Roles};
