//! CLI logic for the Waymark flow layout tool.
//!
//! This module contains the core CLI logic for the Waymark flow layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use waymark::{FlowLayout, LayoutBuilder, WaymarkError, flow::FlowGraph};

/// Run the Waymark CLI application
///
/// This function reads the input graph, lays it out and writes the
/// positioned graph as JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `WaymarkError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input
/// - Graphs without a root node, when `--strict` is set
/// - Layout errors
pub fn run(args: &Args) -> Result<(), WaymarkError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing flow graph"
    );

    let builder = LayoutBuilder::new(config::load_config(args.config.as_ref())?);

    let source = fs::read_to_string(&args.input)?;
    let graph = builder.parse(&source)?;
    let layout = place(&builder, &graph, args)?;

    fs::write(&args.output, builder.render_json(&layout)?)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}

/// Lays out `graph` in the `--mode` override or the configured mode.
///
/// A rootless graph comes back unpositioned unless `--strict` is set.
fn place(
    builder: &LayoutBuilder,
    graph: &FlowGraph,
    args: &Args,
) -> Result<FlowLayout, WaymarkError> {
    let mode = args.mode.unwrap_or(builder.config().layout().mode());

    match builder.layout_with_mode(graph, mode) {
        Ok(layout) => Ok(layout),
        Err(err @ WaymarkError::NoRoots { .. }) if !args.strict => {
            warn!(err:%; "Writing nodes without positions");
            Ok(FlowLayout::unpositioned(graph))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use waymark::{
        config::LayoutMode,
        flow::{FlowEdge, FlowNode},
    };

    use super::*;

    fn args(mode: Option<LayoutMode>, strict: bool) -> Args {
        Args {
            input: "in.json".to_string(),
            output: "out.json".to_string(),
            config: None,
            mode,
            strict,
            log_level: "off".to_string(),
        }
    }

    fn rootless() -> FlowGraph {
        FlowGraph::new(
            vec![FlowNode::new("a"), FlowNode::new("b")],
            vec![FlowEdge::new("a", "b"), FlowEdge::new("b", "a")],
        )
    }

    #[test]
    fn test_place_leaves_rootless_graph_unpositioned() {
        let layout = place(&LayoutBuilder::default(), &rootless(), &args(None, false)).unwrap();

        assert_eq!(layout.nodes().len(), 2);
        assert!(layout.nodes().iter().all(|node| node.position().is_none()));
    }

    #[test]
    fn test_place_strict_rejects_rootless_graph() {
        let result = place(&LayoutBuilder::default(), &rootless(), &args(None, true));

        assert!(matches!(result, Err(WaymarkError::NoRoots { nodes: 2 })));
    }

    #[test]
    fn test_place_honors_mode_override() {
        let graph = FlowGraph::new(vec![FlowNode::new("a")], vec![]);
        let layout = place(
            &LayoutBuilder::default(),
            &graph,
            &args(Some(LayoutMode::SwimLane), true),
        )
        .unwrap();

        assert!(layout.lanes().is_some());
    }
}
