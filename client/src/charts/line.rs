use std::f64::consts::TAU;

use wasm_bindgen::JsValue;

use rollcall_shared::{ChartPalette, Series};

use super::layout::{self, PlotArea, ValueAxis};
use super::{Frame, Tone};

const EMPTY_TEXT: &str = "데이터가 없습니다.";

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub series: Series,
    pub tone: Tone,
    pub fill: bool,
    pub y_max: Option<f64>,
    /// Enlarge the first minimum and maximum point and print their values.
    pub mark_extrema: bool,
    /// Dashed reference line and its caption.
    pub average: Option<(f64, String)>,
}

impl LineChart {
    pub fn new(series: Series) -> Self {
        Self {
            series,
            tone: Tone::Primary,
            fill: false,
            y_max: None,
            mark_extrema: false,
            average: None,
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn y_max(mut self, max: f64) -> Self {
        self.y_max = Some(max);
        self
    }

    pub fn mark_extrema(mut self) -> Self {
        self.mark_extrema = true;
        self
    }

    pub fn average(mut self, value: f64, caption: String) -> Self {
        self.average = Some((value, caption));
        self
    }
}

pub(super) fn render(frame: &Frame<'_>, chart: &LineChart) {
    let ctx = frame.ctx;
    let palette = chart.tone.palette(frame.theme);
    let area = PlotArea::inset(frame.width, frame.height, 0.0);
    let values = &chart.series.values;
    let axis = ValueAxis::for_values(values, chart.y_max);

    draw_grid(frame, &palette, &area, &axis);

    if values.is_empty() {
        frame.text(
            EMPTY_TEXT,
            area.left + area.width / 2.0,
            area.top + area.height / 2.0,
            palette.font,
            "center",
        );
        return;
    }

    let xs = layout::point_positions(values.len(), &area);
    let ys: Vec<f64> = values.iter().map(|&v| axis.to_px(v, &area)).collect();

    let stride = layout::label_stride(values.len(), area.width, 48.0);
    for (i, label) in chart.series.labels.iter().enumerate().step_by(stride) {
        if let Some(&x) = xs.get(i) {
            frame.text(label, x, area.bottom() + 14.0, palette.font, "center");
        }
    }

    if chart.fill {
        let baseline = axis.to_px(0.0, &area);
        ctx.begin_path();
        ctx.move_to(xs[0], baseline);
        for (&x, &y) in xs.iter().zip(&ys) {
            ctx.line_to(x, y);
        }
        ctx.line_to(xs[xs.len() - 1], baseline);
        ctx.close_path();
        ctx.set_fill_style_str(palette.fill);
        ctx.fill();
    }

    ctx.begin_path();
    for (i, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.set_stroke_style_str(palette.line);
    ctx.set_line_width(2.0);
    ctx.stroke();

    ctx.set_fill_style_str(palette.point);
    for (&x, &y) in xs.iter().zip(&ys) {
        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, TAU);
        ctx.fill();
    }

    if chart.mark_extrema
        && let Some((min_i, max_i)) = chart.series.extrema()
    {
        for (i, above) in [(max_i, true), (min_i, false)] {
            ctx.begin_path();
            let _ = ctx.arc(xs[i], ys[i], 5.0, 0.0, TAU);
            ctx.set_fill_style_str(palette.line);
            ctx.fill();
            let offset = if above { -12.0 } else { 12.0 };
            frame.text(
                &layout::format_value(values[i]),
                xs[i],
                ys[i] + offset,
                palette.font,
                "center",
            );
        }
    }

    if let Some((value, caption)) = &chart.average {
        let y = axis.to_px(*value, &area);
        let dash = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0));
        let _ = ctx.set_line_dash(&dash);
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.right(), y);
        ctx.set_stroke_style_str(ChartPalette::AVERAGE_LINE);
        ctx.set_line_width(1.5);
        ctx.stroke();
        let _ = ctx.set_line_dash(&js_sys::Array::new());
        frame.text(caption, area.right() - 4.0, y - 9.0, ChartPalette::AVERAGE_LINE, "right");
    }
}

/// Horizontal grid with value labels; shared with the bar renderer.
pub(super) fn draw_grid(frame: &Frame<'_>, palette: &ChartPalette, area: &PlotArea, axis: &ValueAxis) {
    let ctx = frame.ctx;
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(palette.grid);
    for tick in axis.ticks(4) {
        let y = axis.to_px(tick, area);
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.right(), y);
        ctx.stroke();
        frame.text(&layout::format_value(tick), area.left - 6.0, y, palette.font, "right");
    }
}
