use std::f64::consts::TAU;

use rollcall_shared::analytics::LoveGraph;
use rollcall_shared::{ChartPalette, rgba_css, themed_user_color};

use super::layout;
use super::Frame;

const NODE_RADIUS: f64 = 7.0;
const LABEL_GAP: f64 = 14.0;

pub(super) fn render(frame: &Frame<'_>, graph: &LoveGraph) {
    let ctx = frame.ctx;
    let palette = ChartPalette::primary(frame.theme);
    let dark = frame.theme.is_dark();

    if graph.nodes.is_empty() {
        frame.text(
            "데이터가 없습니다.",
            frame.width / 2.0,
            frame.height / 2.0,
            palette.font,
            "center",
        );
        return;
    }

    let cx = frame.width / 2.0;
    let cy = frame.height / 2.0;
    let radius = (frame.width.min(frame.height) / 2.0 - 40.0).max(20.0);
    let points = layout::circle_layout(graph.nodes.len(), cx, cy, radius);

    let max_weight = graph.max_weight();
    let edge_color = if dark {
        "rgba(248,113,113,0.45)"
    } else {
        "rgba(220,38,38,0.35)"
    };
    ctx.set_stroke_style_str(edge_color);
    for (a, b, weight) in graph.resolved_edges() {
        ctx.set_line_width(layout::edge_width(weight, max_weight));
        ctx.begin_path();
        ctx.move_to(points[a].0, points[a].1);
        ctx.line_to(points[b].0, points[b].1);
        ctx.stroke();
    }

    for (node, &(x, y)) in graph.nodes.iter().zip(&points) {
        let label = node.display_label();
        ctx.begin_path();
        let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, TAU);
        ctx.set_fill_style_str(&rgba_css(themed_user_color(label, dark), 1.0));
        ctx.fill();

        // Labels sit outside the ring.
        let (dx, dy) = (x - cx, y - cy);
        let len = dx.hypot(dy).max(1.0);
        let (lx, ly) = (x + dx / len * LABEL_GAP, y + dy / len * LABEL_GAP);
        let align = if dx.abs() < 1.0 {
            "center"
        } else if dx > 0.0 {
            "left"
        } else {
            "right"
        };
        frame.text(label, lx, ly, palette.font, align);
    }
}
