use std::f64::consts::TAU;

use web_sys::HtmlImageElement;

use rollcall_shared::Series;

use super::layout::{self, PlotArea, ValueAxis};
use super::line::draw_grid;
use super::{Frame, Tone};

const AVATAR_SIZE: f64 = 24.0;
const AVATAR_GAP: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub series: Series,
    pub tone: Tone,
    /// Image per bar, drawn under the x axis once loaded.
    pub avatars: Vec<Option<String>>,
}

impl BarChart {
    pub fn new(series: Series) -> Self {
        Self {
            series,
            tone: Tone::Primary,
            avatars: Vec::new(),
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn avatars(mut self, avatars: Vec<Option<String>>) -> Self {
        self.avatars = avatars;
        self
    }

    fn has_avatars(&self) -> bool {
        self.avatars.iter().any(Option::is_some)
    }
}

pub(super) fn render(frame: &Frame<'_>, chart: &BarChart, images: &[Option<HtmlImageElement>]) {
    let ctx = frame.ctx;
    let palette = chart.tone.palette(frame.theme);
    let avatar_row = if chart.has_avatars() {
        AVATAR_SIZE + AVATAR_GAP * 2.0
    } else {
        0.0
    };
    let area = PlotArea::inset(frame.width, frame.height, avatar_row);
    let values = &chart.series.values;
    let axis = ValueAxis::for_values(values, None);

    draw_grid(frame, &palette, &area, &axis);

    let centers = layout::band_centers(values.len(), &area);
    let bar_width = if values.is_empty() {
        0.0
    } else {
        (area.width / values.len() as f64 * 0.6).max(2.0)
    };
    let zero = axis.to_px(0.0, &area);

    for (&x, &value) in centers.iter().zip(values) {
        let top = axis.to_px(value, &area);
        let (y, h) = if top < zero { (top, zero - top) } else { (zero, top - zero) };
        ctx.set_fill_style_str(palette.fill);
        ctx.fill_rect(x - bar_width / 2.0, y, bar_width, h);
        ctx.set_stroke_style_str(palette.line);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x - bar_width / 2.0, y, bar_width, h);
    }

    let stride = layout::label_stride(values.len(), area.width, 56.0);
    let label_y = area.bottom() + avatar_row + 14.0;
    for (i, label) in chart.series.labels.iter().enumerate().step_by(stride) {
        if let Some(&x) = centers.get(i) {
            frame.text(label, x, label_y, palette.font, "center");
        }
    }

    draw_avatars(frame, &area, &centers, images);
}

/// Annotation layer: one round avatar under each tick whose image has
/// finished loading. Images still in flight are skipped and picked up by
/// the redraw their `load` event schedules.
fn draw_avatars(frame: &Frame<'_>, area: &PlotArea, centers: &[f64], images: &[Option<HtmlImageElement>]) {
    let ctx = frame.ctx;
    let y = area.bottom() + AVATAR_GAP;
    for (&x, image) in centers.iter().zip(images) {
        let Some(image) = image else {
            continue;
        };
        if !image.complete() || image.natural_width() == 0 {
            continue;
        }
        ctx.save();
        ctx.begin_path();
        let _ = ctx.arc(x, y + AVATAR_SIZE / 2.0, AVATAR_SIZE / 2.0, 0.0, TAU);
        ctx.clip();
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            x - AVATAR_SIZE / 2.0,
            y,
            AVATAR_SIZE,
            AVATAR_SIZE,
        );
        ctx.restore();
    }
}
