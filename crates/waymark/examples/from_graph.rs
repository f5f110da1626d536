//! Example: Laying out a flow graph built in code
//!
//! This example demonstrates how to build a flow graph programmatically
//! using the flow model types directly, without parsing JSON.

use waymark::{
    LayoutBuilder,
    config::LayoutMode,
    flow::{FlowEdge, FlowGraph, FlowNode},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building flow graph...\n");

    // A request is reviewed, then either approved or sent back; both arms
    // end at the same notification step.
    let nodes = vec![
        FlowNode::new("request").with_swim_lane("Customer"),
        FlowNode::new("review")
            .with_swim_lane("Support")
            .with_bullet_points(["Check account", "Check history"]),
        FlowNode::new("approve").with_swim_lane("Support"),
        FlowNode::new("reject").with_swim_lane("Support"),
        FlowNode::new("notify").with_swim_lane("Customer"),
    ];

    let edges = vec![
        FlowEdge::new("request", "review"),
        FlowEdge::new("review", "approve").with_label("ok"),
        FlowEdge::new("review", "reject").with_label("not ok"),
        FlowEdge::new("approve", "notify"),
        FlowEdge::new("reject", "notify"),
    ];

    let graph = FlowGraph::new(nodes, edges);
    println!("Created graph:");
    println!("  Nodes: {}", graph.nodes().len());
    println!("  Edges: {}", graph.edges().len());
    println!();

    let builder = LayoutBuilder::default();

    for mode in [LayoutMode::Tree, LayoutMode::SwimLane] {
        println!("Layout ({mode}):");
        let layout = builder.layout_with_mode(&graph, mode)?;
        for node in layout.nodes() {
            if let Some(position) = node.position() {
                println!("  {:<8} {position}", node.id());
            }
        }
        if let Some(lanes) = layout.lanes() {
            println!(
                "  lanes {:?}, {}x{}",
                lanes.order(),
                lanes.width(),
                lanes.height()
            );
        }
        println!();
    }

    // Write the tree layout as JSON
    let layout = builder.layout_with_mode(&graph, LayoutMode::Tree)?;
    let json = builder.render_json(&layout)?;
    let output_path = "from_graph_output.json";
    std::fs::write(output_path, &json)?;
    println!("Layout written to: {}", output_path);

    Ok(())
}
