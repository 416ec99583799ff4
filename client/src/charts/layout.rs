//! Pixel geometry shared by the chart renderers. Nothing here touches the
//! DOM, so it is tested on the host.

use std::f64::consts::PI;

const PAD_LEFT: f64 = 40.0;
const PAD_RIGHT: f64 = 14.0;
const PAD_TOP: f64 = 18.0;
const PAD_BOTTOM: f64 = 26.0;

/// Inner rectangle the series is drawn in, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Canvas of `width`×`height` minus axis gutters; `bottom_extra`
    /// reserves room under the x axis (avatar row).
    pub fn inset(width: f64, height: f64, bottom_extra: f64) -> Self {
        Self {
            left: PAD_LEFT,
            top: PAD_TOP,
            width: (width - PAD_LEFT - PAD_RIGHT).max(1.0),
            height: (height - PAD_TOP - PAD_BOTTOM - bottom_extra).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Round `value` up to 1, 2 or 5 times a power of ten.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Vertical value range, always containing zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
}

impl ValueAxis {
    pub fn for_values(values: &[f64], fixed_max: Option<f64>) -> Self {
        let lowest = values.iter().copied().fold(0.0_f64, f64::min);
        let highest = values.iter().copied().fold(0.0_f64, f64::max);
        let min = if lowest < 0.0 { -nice_ceiling(-lowest) } else { 0.0 };
        let max = match fixed_max {
            Some(max) => max,
            None if highest > 0.0 => nice_ceiling(highest),
            None => 0.0,
        };
        let max = if max <= min { min + 1.0 } else { max };
        Self { min, max }
    }

    /// `intervals + 1` evenly spaced values from `min` to `max`.
    pub fn ticks(&self, intervals: usize) -> Vec<f64> {
        let intervals = intervals.max(1);
        let step = (self.max - self.min) / intervals as f64;
        (0..=intervals).map(|i| self.min + step * i as f64).collect()
    }

    pub fn to_px(&self, value: f64, area: &PlotArea) -> f64 {
        let t = (value - self.min) / (self.max - self.min);
        area.bottom() - t.clamp(0.0, 1.0) * area.height
    }
}

/// X positions of `n` line-chart points spanning the plot edge to edge.
pub fn point_positions(n: usize, area: &PlotArea) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![area.left + area.width / 2.0],
        _ => {
            let step = area.width / (n - 1) as f64;
            (0..n).map(|i| area.left + step * i as f64).collect()
        }
    }
}

/// Centres of `n` equal bar bands.
pub fn band_centers(n: usize, area: &PlotArea) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let band = area.width / n as f64;
    (0..n).map(|i| area.left + band * (i as f64 + 0.5)).collect()
}

/// Draw every `stride`-th x label so neighbours stay `min_spacing` apart.
pub fn label_stride(n: usize, width: f64, min_spacing: f64) -> usize {
    if n == 0 || width <= 0.0 {
        return 1;
    }
    let per_label = width / n as f64;
    (min_spacing / per_label).ceil().max(1.0) as usize
}

/// Evenly spaced points on a circle, first one at twelve o'clock.
pub fn circle_layout(n: usize, cx: f64, cy: f64, radius: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = -PI / 2.0 + 2.0 * PI * i as f64 / n.max(1) as f64;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Stroke width for an edge, 1 px for the lightest up to 6 px for the
/// heaviest.
pub fn edge_width(weight: f64, max_weight: f64) -> f64 {
    if max_weight <= 0.0 {
        return 1.0;
    }
    1.0 + 5.0 * (weight / max_weight).clamp(0.0, 1.0)
}

/// Whole numbers without decimals, everything else to one decimal.
pub fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn nice_ceiling_steps() {
        assert!(close(nice_ceiling(7.0), 10.0));
        assert!(close(nice_ceiling(43.0), 50.0));
        assert!(close(nice_ceiling(120.0), 200.0));
        assert!(close(nice_ceiling(0.35), 0.5));
        assert!(close(nice_ceiling(5.0), 5.0));
        assert!(close(nice_ceiling(0.0), 1.0));
        assert!(close(nice_ceiling(f64::NAN), 1.0));
    }

    #[test]
    fn value_axis_honours_fixed_max_and_negatives() {
        let axis = ValueAxis::for_values(&[12.0, 95.0], Some(80.0));
        assert_eq!(axis, ValueAxis { min: 0.0, max: 80.0 });

        let signed = ValueAxis::for_values(&[-0.3, 0.8], None);
        assert!(close(signed.min, -0.5));
        assert!(close(signed.max, 1.0));

        let empty = ValueAxis::for_values(&[], None);
        assert_eq!(empty, ValueAxis { min: 0.0, max: 1.0 });
    }

    #[test]
    fn axis_maps_range_to_plot_height() {
        let area = PlotArea { left: 0.0, top: 10.0, width: 100.0, height: 100.0 };
        let axis = ValueAxis { min: 0.0, max: 50.0 };
        assert!(close(axis.to_px(0.0, &area), 110.0));
        assert!(close(axis.to_px(50.0, &area), 10.0));
        assert!(close(axis.to_px(25.0, &area), 60.0));
        // out of range values are pinned to the plot edge
        assert!(close(axis.to_px(80.0, &area), 10.0));
        assert_eq!(axis.ticks(5), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn points_and_bands() {
        let area = PlotArea { left: 10.0, top: 0.0, width: 90.0, height: 50.0 };
        assert_eq!(point_positions(4, &area), vec![10.0, 40.0, 70.0, 100.0]);
        assert_eq!(point_positions(1, &area), vec![55.0]);
        assert!(point_positions(0, &area).is_empty());
        assert_eq!(band_centers(3, &area), vec![25.0, 55.0, 85.0]);
    }

    #[test]
    fn crowded_labels_are_thinned() {
        assert_eq!(label_stride(10, 600.0, 40.0), 1);
        assert_eq!(label_stride(30, 600.0, 40.0), 2);
        assert_eq!(label_stride(90, 600.0, 40.0), 6);
        assert_eq!(label_stride(0, 600.0, 40.0), 1);
    }

    #[test]
    fn circle_starts_at_top() {
        let points = circle_layout(4, 100.0, 100.0, 50.0);
        assert_eq!(points.len(), 4);
        assert!(close(points[0].0, 100.0));
        assert!(close(points[0].1, 50.0));
        assert!(close(points[1].0, 150.0));
        assert!(close(points[2].1, 150.0));
    }

    #[test]
    fn edge_width_is_bounded() {
        assert!(close(edge_width(0.0, 10.0), 1.0));
        assert!(close(edge_width(10.0, 10.0), 6.0));
        assert!(close(edge_width(50.0, 10.0), 6.0));
        assert!(close(edge_width(3.0, 0.0), 1.0));
    }

    #[test]
    fn values_format_compactly() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.25), "3.2");
        assert_eq!(format_value(-0.5), "-0.5");
    }
}
