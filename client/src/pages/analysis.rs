use leptos::prelude::*;
use serde::de::DeserializeOwned;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::analytics::{
    CorrelationEntry, DailyCount, IntervalSummary, LoveGraph, WeekdayAverage, average_label,
    correlation_series, daily_series, interval_series, weekday_series,
};
use rollcall_shared::api::{
    ATTENDANCE_CORRELATION, ATTENDANCE_DAILY_COUNT, ATTENDANCE_INTERVAL_SUMMARY, LOVE_GRAPH,
    WEEKDAY_ATTENDANCE_SUMMARY,
};

use super::{LOADING_TEXT, Loadable, status_line};
use crate::animation::entrance;
use crate::api;
use crate::charts::{BarChart, ChartCanvas, ChartSpec, LineChart, Tone};
use crate::session::{PageSession, SectionGuard};

const CHART_FAILED: &str = "데이터를 불러오지 못했습니다.";

pub fn daily_chart(days: Vec<DailyCount>) -> ChartSpec {
    let series = daily_series(&days);
    let average = series.average();
    let chart = LineChart::new(series).mark_extrema();
    match average {
        Some(avg) => chart.average(avg, average_label(avg)).into(),
        None => chart.into(),
    }
}

pub fn interval_chart(summary: IntervalSummary) -> ChartSpec {
    LineChart::new(interval_series(&summary))
        .tone(Tone::Secondary)
        .filled()
        .into()
}

pub fn weekday_chart(days: Vec<WeekdayAverage>) -> ChartSpec {
    BarChart::new(weekday_series(&days)).into()
}

pub fn correlation_chart(entries: Vec<CorrelationEntry>) -> ChartSpec {
    let avatars = entries.iter().map(|entry| entry.img.clone()).collect();
    BarChart::new(correlation_series(&entries))
        .tone(Tone::Secondary)
        .avatars(avatars)
        .into()
}

pub fn love_graph_chart(graph: LoveGraph) -> ChartSpec {
    graph.into()
}

/// Fetch one chart's data; a failure only touches `state`.
fn load_chart<T: DeserializeOwned + 'static>(
    path: &'static str,
    guard: SectionGuard,
    state: RwSignal<Loadable<ChartSpec>>,
    build: fn(T) -> ChartSpec,
) {
    let Some(ticket) = guard.begin() else {
        return;
    };
    spawn_local(async move {
        let result = api::get::<T>(path).await;
        if !guard.accepts(ticket) {
            return;
        }
        if let Err(e) = &result {
            api::log_failure(path, e);
        }
        state.set(Loadable::from_result(result, CHART_FAILED, build));
    });
}

#[component]
fn ChartPanel(
    title: &'static str,
    id: &'static str,
    #[prop(default = 260)] height: u32,
    state: RwSignal<Loadable<ChartSpec>>,
) -> impl IntoView {
    let spec = Signal::derive(move || state.with(|s| s.ready().cloned()));
    let status = move || match state.get() {
        Loadable::Loading => status_line(LOADING_TEXT, false),
        Loadable::Failed(message) => status_line(message, true),
        Loadable::Ready(_) => ().into_any(),
    };

    view! {
        <section class="chart-panel">
            <h2>{title}</h2>
            {status}
            <div class="chart-body" class:hidden=move || spec.with(Option::is_none)>
                <ChartCanvas id height spec />
            </div>
        </section>
    }
}

#[component]
pub fn AnalysisPage(session: PageSession) -> impl IntoView {
    let entered = entrance();
    let panels = [
        ("날짜별 출석 유저 수", "daily-chart", 260),
        ("출석 시간에 따른 평균 인원비율", "interval-chart", 260),
        ("요일별 평균 출석 인원", "weekday-chart", 260),
        ("출석 상관관계", "correlation-chart", 300),
        ("친밀도 그래프", "love-graph", 480),
    ];
    let states: [RwSignal<Loadable<ChartSpec>>; 5] =
        std::array::from_fn(|_| RwSignal::new(Loadable::Loading));

    // Each chart has its own guard so a slow endpoint never blocks the others.
    let guard = || SectionGuard::new(session);
    load_chart(ATTENDANCE_DAILY_COUNT, guard(), states[0], daily_chart);
    load_chart(ATTENDANCE_INTERVAL_SUMMARY, guard(), states[1], interval_chart);
    load_chart(WEEKDAY_ATTENDANCE_SUMMARY, guard(), states[2], weekday_chart);
    load_chart(ATTENDANCE_CORRELATION, guard(), states[3], correlation_chart);
    load_chart(LOVE_GRAPH, guard(), states[4], love_graph_chart);

    view! {
        <div class="page analysis-page" class:entered=move || entered.get()>
            {panels
                .into_iter()
                .zip(states)
                .map(|((title, id, height), state)| view! { <ChartPanel title id height state /> })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;

    fn daily() -> Vec<DailyCount> {
        vec![
            DailyCount { date: "2024-05-01".into(), count: 4 },
            DailyCount { date: "2024-05-02".into(), count: 8 },
        ]
    }

    #[test]
    fn one_failed_endpoint_leaves_the_other_charts_intact() {
        let states = [
            Loadable::from_result(Ok(daily()), CHART_FAILED, daily_chart),
            Loadable::from_result(
                Err::<IntervalSummary, _>(FetchError::Status(500)),
                CHART_FAILED,
                interval_chart,
            ),
            Loadable::from_result(Ok(Vec::<WeekdayAverage>::new()), CHART_FAILED, weekday_chart),
            Loadable::from_result(Ok(Vec::<CorrelationEntry>::new()), CHART_FAILED, correlation_chart),
            Loadable::from_result(Ok(LoveGraph::default()), CHART_FAILED, love_graph_chart),
        ];
        assert_eq!(states[1], Loadable::Failed(CHART_FAILED));
        for (i, state) in states.iter().enumerate() {
            if i != 1 {
                assert!(state.ready().is_some(), "chart {i} should render");
            }
        }
    }

    #[test]
    fn daily_chart_carries_average_and_extrema() {
        let ChartSpec::Line(chart) = daily_chart(daily()) else {
            panic!("expected a line chart");
        };
        assert_eq!(chart.series.labels, vec!["05/01", "05/02"]);
        assert!(chart.mark_extrema);
        assert_eq!(chart.average, Some((6.0, "평균 6.0명".to_string())));
    }

    #[test]
    fn correlation_avatars_follow_entries() {
        let entries = vec![
            CorrelationEntry { nickname: "a".into(), img: Some("/a.png".into()), correlation: 0.5 },
            CorrelationEntry { nickname: "b".into(), img: None, correlation: -0.2 },
        ];
        let ChartSpec::Bar(chart) = correlation_chart(entries) else {
            panic!("expected a bar chart");
        };
        assert_eq!(chart.avatars, vec![Some("/a.png".to_string()), None]);
        assert_eq!(chart.series.values, vec![0.5, -0.2]);
    }
}
