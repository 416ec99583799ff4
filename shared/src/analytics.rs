use serde::{Deserialize, Serialize};

use crate::format;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u32,
}

/// Average attendance ratio per 10-minute slot of the evening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalSummary {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub averages: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    pub weekday: String,
    #[serde(default)]
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub nickname: String,
    #[serde(default)]
    pub img: Option<String>,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

impl GraphNode {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Co-attendance ("intimacy") graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoveGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl LoveGraph {
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Edges resolved to node indices; edges naming unknown nodes are dropped.
    pub fn resolved_edges(&self) -> Vec<(usize, usize, f64)> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let a = self.node_index(&edge.source)?;
                let b = self.node_index(&edge.target)?;
                (a != b).then_some((a, b, edge.weight))
            })
            .collect()
    }

    /// Heaviest edge that is actually drawn.
    pub fn max_weight(&self) -> f64 {
        self.resolved_edges()
            .into_iter()
            .map(|(_, _, weight)| weight)
            .fold(0.0, f64::max)
    }
}

/// Labels and values ready for plotting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn average(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Indices of the first minimum and first maximum value.
    pub fn extrema(&self) -> Option<(usize, usize)> {
        let first = *self.values.first()?;
        let mut min = (0, first);
        let mut max = (0, first);
        for (i, &v) in self.values.iter().enumerate().skip(1) {
            if v < min.1 {
                min = (i, v);
            }
            if v > max.1 {
                max = (i, v);
            }
        }
        Some((min.0, max.0))
    }
}

/// Daily attendance as `MM/DD` labels.
pub fn daily_series(days: &[DailyCount]) -> Series {
    let (labels, values) = days
        .iter()
        .map(|d| {
            let label = format::month_day_label(&d.date, '/').unwrap_or_else(|| d.date.clone());
            (label, d.count as f64)
        })
        .unzip();
    Series { labels, values }
}

pub fn interval_series(summary: &IntervalSummary) -> Series {
    let n = summary.labels.len().min(summary.averages.len());
    Series {
        labels: summary.labels[..n].to_vec(),
        values: summary.averages[..n].to_vec(),
    }
}

pub fn weekday_series(days: &[WeekdayAverage]) -> Series {
    let (labels, values) = days.iter().map(|d| (d.weekday.clone(), d.average)).unzip();
    Series { labels, values }
}

pub fn correlation_series(entries: &[CorrelationEntry]) -> Series {
    let (labels, values) = entries
        .iter()
        .map(|e| (e.nickname.clone(), e.correlation))
        .unzip();
    Series { labels, values }
}

pub fn average_label(avg: f64) -> String {
    format!("평균 {avg:.1}명")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_series_formats_labels_and_average() {
        let days: Vec<DailyCount> = serde_json::from_str(
            r#"[{"date":"2024-05-01","count":10},{"date":"2024-05-02","count":14},{"date":"2024-05-03","count":6}]"#,
        )
        .unwrap();
        let series = daily_series(&days);
        assert_eq!(series.labels, vec!["05/01", "05/02", "05/03"]);
        assert_eq!(series.average(), Some(10.0));
        assert_eq!(average_label(series.average().unwrap()), "평균 10.0명");
    }

    #[test]
    fn extrema_pick_first_occurrence() {
        let series = Series::new(vec![], vec![3.0, 1.0, 5.0, 1.0, 5.0]);
        assert_eq!(series.extrema(), Some((1, 2)));
        assert_eq!(Series::default().extrema(), None);
        assert_eq!(Series::default().average(), None);
    }

    #[test]
    fn interval_series_truncates_to_shorter_side() {
        let summary = IntervalSummary {
            labels: vec!["21:00".into(), "21:10".into(), "21:20".into()],
            averages: vec![12.5, 40.0],
        };
        let series = interval_series(&summary);
        assert_eq!(series.labels.len(), 2);
        assert_eq!(series.values, vec![12.5, 40.0]);
    }

    #[test]
    fn love_graph_drops_dangling_and_self_edges() {
        let graph: LoveGraph = serde_json::from_str(
            r#"{
                "nodes":[{"id":"a"},{"id":"b","label":"비"}],
                "edges":[
                    {"source":"a","target":"b","weight":3},
                    {"source":"a","target":"zzz","weight":9},
                    {"source":"b","target":"b"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(graph.resolved_edges(), vec![(0, 1, 3.0)]);
        assert_eq!(graph.max_weight(), 3.0);
        assert_eq!(graph.nodes[1].display_label(), "비");
        assert_eq!(graph.nodes[0].display_label(), "a");
    }
}
