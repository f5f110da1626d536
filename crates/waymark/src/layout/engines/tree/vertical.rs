//! Height estimation and vertical placement for the branching tree.

use log::{debug, trace};

use waymark_core::flow::FlowNode;

use crate::{
    config::TreeConfig,
    structure::{GraphModel, NodeIndex, NodeRole, Roles},
};

/// Estimates the rendered height of a node card from its content.
///
/// `base + bullet × bullets + notification × notifications`, never below the
/// configured minimum.
pub(super) fn estimate_height(node: &FlowNode, config: &TreeConfig) -> i32 {
    let bullets = scaled(node.bullet_count(), config.bullet_height());
    let notifications = scaled(node.notification_count(), config.notification_height());

    config
        .base_height()
        .saturating_add(bullets)
        .saturating_add(notifications)
        .max(config.min_height())
}

fn scaled(count: usize, unit: i32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(unit)
}

/// Computes the Y of every node, addressed by node index.
///
/// Rows are stacked from `origin_y`: each row is as tall as its tallest node,
/// followed by one gap. A row is pushed further down after a wide fan-out and
/// after an incoming label, so edge labels have room.
pub(super) fn assign_y<'g>(
    model: &GraphModel<'g>,
    roles: &Roles,
    rows: &[(usize, Vec<NodeIndex<'g>>)],
    config: &TreeConfig,
) -> Vec<i32> {
    let gap = config.level_gap();
    let mut ys = vec![config.origin_y(); model.len()];
    let mut cumulative = config.origin_y();
    let mut previous_fan_out: i32 = 0;

    for (level, row) in rows {
        let row_top = cumulative.saturating_add(previous_fan_out.saturating_mul(gap));

        let mut row_height = config.min_height();
        let mut labeled = false;
        for &idx in row {
            let has_label = model.has_labeled_incoming(idx);
            labeled |= has_label;
            row_height = row_height.max(estimate_height(model.node(idx), config));

            let y = if has_label { row_top.saturating_add(gap) } else { row_top };
            ys[idx.index()] = y;
        }

        cumulative = row_top.saturating_add(row_height).saturating_add(gap);
        if labeled {
            cumulative = cumulative.saturating_add(gap);
        }
        previous_fan_out = widest_fan_out(model, roles, row);

        trace!(level = *level, row_top, row_height, labeled; "Placed row");
    }

    debug!(rows = rows.len(), bottom = cumulative; "Vertical placement done");
    ys
}

/// `children - 1` of the widest branch in the row, or zero without branches.
fn widest_fan_out(model: &GraphModel<'_>, roles: &Roles, row: &[NodeIndex<'_>]) -> i32 {
    row.iter()
        .filter(|&&idx| roles.role(idx) == NodeRole::Branch)
        .map(|&idx| model.children(idx).len().saturating_sub(1))
        .max()
        .map_or(0, |fan_out| i32::try_from(fan_out).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use waymark_core::flow::{FlowEdge, FlowGraph};

    use super::*;
    use crate::structure::Levels;

    fn ys_by_id(flow: &FlowGraph) -> impl Fn(&str) -> i32 + use<> {
        let model = GraphModel::from_graph(flow);
        let config = TreeConfig::default();
        let levels = Levels::assign(&model, 10).unwrap();
        let roles = Roles::classify(&model);
        let rows = levels.rows(&model);
        let ys = assign_y(&model, &roles, &rows, &config);

        let by_id: Vec<(String, i32)> = model
            .indices()
            .map(|idx| (model.node(idx).id().to_string(), ys[idx.index()]))
            .collect();
        move |id: &str| {
            by_id
                .iter()
                .find(|(node, _)| node == id)
                .map(|(_, y)| *y)
                .unwrap()
        }
    }

    #[test]
    fn test_estimate_height_minimum() {
        let config = TreeConfig::default();
        assert_eq!(estimate_height(&FlowNode::new("a"), &config), 100);
    }

    #[test]
    fn test_estimate_height_grows_with_content() {
        let config = TreeConfig::default();
        let node = FlowNode::new("a")
            .with_bullet_points(["one", "two"])
            .with_notifications(vec![json!({"text": "due"})]);

        assert_eq!(estimate_height(&node, &config), 80 + 2 * 24 + 32);
    }

    #[test]
    fn test_estimate_height_one_bullet_exceeds_minimum() {
        let config = TreeConfig::default();
        let node = FlowNode::new("a").with_bullet_points(["one"]);

        assert_eq!(estimate_height(&node, &config), 104);
        assert_eq!(
            estimate_height(&FlowNode::new("b").with_bullet_points(Vec::<String>::new()), &config),
            100
        );
    }

    #[test]
    fn test_linear_rows_step_by_height_and_gap() {
        let y = ys_by_id(&FlowGraph::new(
            vec![FlowNode::new("a"), FlowNode::new("b")],
            vec![FlowEdge::new("a", "b")],
        ));

        assert_eq!(y("a"), 100);
        assert_eq!(y("b"), 100 + 100 + 36);
    }

    #[test]
    fn test_labeled_edge_pushes_target_and_next_row() {
        let y = ys_by_id(&FlowGraph::new(
            vec![FlowNode::new("a"), FlowNode::new("b"), FlowNode::new("c")],
            vec![
                FlowEdge::new("a", "b").with_label("yes"),
                FlowEdge::new("b", "c"),
            ],
        ));

        assert_eq!(y("b"), 236 + 36);
        assert_eq!(y("c"), 236 + 100 + 36 + 36);
    }

    #[test]
    fn test_fan_out_adds_gap_to_next_row() {
        let y = ys_by_id(&FlowGraph::new(
            vec![
                FlowNode::new("a"),
                FlowNode::new("b"),
                FlowNode::new("c"),
                FlowNode::new("d"),
            ],
            vec![
                FlowEdge::new("a", "b"),
                FlowEdge::new("a", "c"),
                FlowEdge::new("a", "d"),
            ],
        ));

        // Three children: two extra gaps before the child row.
        assert_eq!(y("b"), 100 + 100 + 36 + 2 * 36);
        assert_eq!(y("c"), y("b"));
    }

    #[test]
    fn test_tallest_node_sets_row_height() {
        let y = ys_by_id(&FlowGraph::new(
            vec![
                FlowNode::new("a").with_bullet_points(["1", "2", "3", "4"]),
                FlowNode::new("b"),
                FlowNode::new("c"),
            ],
            vec![FlowEdge::new("a", "c"), FlowEdge::new("b", "c")],
        ));

        assert_eq!(y("c"), 100 + (80 + 4 * 24) + 36);
    }
}
