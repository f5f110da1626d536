//! Layout stage: turns a flow graph into grid-aligned node positions.

mod engines;

pub(crate) use engines::EngineBuilder;
