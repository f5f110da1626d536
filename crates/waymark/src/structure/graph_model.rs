//! Adjacency model built from a flow graph.
//!
//! This module provides the graph structure every layout stage reads from.
//! It is built once per layout call from the caller's [`FlowGraph`] and
//! dropped when the layout is produced.
//!
//! # Architecture
//!
//! The module provides:
//! - [`NodeIndex`]: Type-safe node indices with lifetime tracking
//! - [`GraphModel`]: Node storage plus child/parent adjacency and labeled-edge flags
//!
//! Capabilities:
//! - Id lookup via `HashMap`, adjacency via index-addressed `Vec`s
//! - Every node is present in every table, even with no edges
//! - Root detection (nodes with no incoming edges) in input order
//! - Parallel edges collapse into a single adjacency entry
//!
//! Node order is always the caller's order; nothing iterates a hash map, so
//! two builds from the same input are identical.

use std::{collections::HashMap, marker::PhantomData};

use log::warn;

use waymark_core::flow::{FlowGraph, FlowNode};

/// Type-safe index for nodes in the model.
///
/// Uses phantom data to track lifetime relationships, ensuring that node
/// indices cannot outlive the flow graph the model was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex<'g>(usize, PhantomData<&'g ()>);

impl<'g> NodeIndex<'g> {
    /// Creates a new node index with the given numeric index.
    fn new(index: usize) -> Self {
        NodeIndex(index, PhantomData)
    }

    /// Returns the position of the node in the model's tables.
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Child/parent adjacency of a flow graph, keyed by node id.
#[derive(Debug)]
pub(crate) struct GraphModel<'g> {
    nodes: Vec<&'g FlowNode>,
    index: HashMap<&'g str, NodeIndex<'g>>,
    children: Vec<Vec<NodeIndex<'g>>>,
    parents: Vec<Vec<NodeIndex<'g>>>,
    labeled_incoming: Vec<bool>,
}

impl<'g> GraphModel<'g> {
    /// Builds the model from the graph's nodes and edges.
    ///
    /// A repeated node id keeps its first declaration. Edges naming an unknown
    /// node are skipped. Both cases are logged and never fail the build.
    pub(crate) fn from_graph(graph: &'g FlowGraph) -> Self {
        let mut model = GraphModel {
            nodes: Vec::with_capacity(graph.nodes().len()),
            index: HashMap::with_capacity(graph.nodes().len()),
            children: Vec::with_capacity(graph.nodes().len()),
            parents: Vec::with_capacity(graph.nodes().len()),
            labeled_incoming: Vec::with_capacity(graph.nodes().len()),
        };

        for node in graph.nodes() {
            model.add_node(node);
        }

        for edge in graph.edges() {
            let (Some(source), Some(target)) =
                (model.index_of(edge.source()), model.index_of(edge.target()))
            else {
                warn!(
                    source = edge.source(),
                    target = edge.target();
                    "Skipping edge that references an unknown node"
                );
                continue;
            };
            model.add_edge(source, target, edge.label().is_some());
        }

        model
    }

    fn add_node(&mut self, node: &'g FlowNode) {
        if self.index.contains_key(node.id()) {
            warn!(id = node.id(); "Duplicate node id, keeping the first declaration");
            return;
        }

        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        self.index.insert(node.id(), idx);
        self.children.push(Vec::new());
        self.parents.push(Vec::new());
        self.labeled_incoming.push(false);
    }

    fn add_edge(&mut self, source: NodeIndex<'g>, target: NodeIndex<'g>, labeled: bool) {
        if labeled {
            self.labeled_incoming[target.index()] = true;
        }

        let children = &mut self.children[source.index()];
        if children.contains(&target) {
            return;
        }
        children.push(target);
        self.parents[target.index()].push(source);
    }

    /// Returns the number of distinct nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the model has no nodes.
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all node indices in input order.
    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex<'g>> + use<'g> {
        (0..self.nodes.len()).map(NodeIndex::new)
    }

    /// Returns the node for the given index.
    pub(crate) fn node(&self, idx: NodeIndex<'g>) -> &'g FlowNode {
        self.nodes[idx.index()]
    }

    /// Returns the index of the node with the given id, if it exists.
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex<'g>> {
        self.index.get(id).copied()
    }

    /// Returns the children of a node in edge order.
    pub(crate) fn children(&self, idx: NodeIndex<'g>) -> &[NodeIndex<'g>] {
        &self.children[idx.index()]
    }

    /// Returns the parents of a node in edge order.
    pub(crate) fn parents(&self, idx: NodeIndex<'g>) -> &[NodeIndex<'g>] {
        &self.parents[idx.index()]
    }

    /// Returns the number of distinct incoming edges of a node.
    pub(crate) fn incoming_count(&self, idx: NodeIndex<'g>) -> usize {
        self.parents[idx.index()].len()
    }

    /// Returns `true` if any edge into the node carries a label.
    pub(crate) fn has_labeled_incoming(&self, idx: NodeIndex<'g>) -> bool {
        self.labeled_incoming[idx.index()]
    }

    /// Returns root nodes (nodes with no incoming edges) in input order.
    pub(crate) fn roots(&self) -> impl Iterator<Item = NodeIndex<'g>> + '_ {
        self.indices()
            .filter(|&idx| self.incoming_count(idx) == 0)
    }
}
