//! Canvas 2D charts. Every chart lives in a registry keyed by its canvas
//! id: drawing into an id destroys whatever was drawn there before, and a
//! theme switch repaints every live entry from its last data.

mod bar;
mod graph;
pub mod layout;
mod line;

use std::cell::RefCell;
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use rollcall_shared::analytics::LoveGraph;
use rollcall_shared::{ChartPalette, Theme};

use crate::render_loop::FrameScheduler;
use crate::theme::ThemeStore;

pub use bar::BarChart;
pub use line::LineChart;

/// Which palette family a series is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Primary,
    Secondary,
}

impl Tone {
    pub fn palette(self, theme: Theme) -> ChartPalette {
        match self {
            Tone::Primary => ChartPalette::primary(theme),
            Tone::Secondary => ChartPalette::secondary(theme),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Line(LineChart),
    Bar(BarChart),
    Graph(LoveGraph),
}

impl ChartSpec {
    fn avatar_urls(&self) -> &[Option<String>] {
        match self {
            ChartSpec::Bar(bar) => &bar.avatars,
            _ => &[],
        }
    }
}

impl From<LineChart> for ChartSpec {
    fn from(chart: LineChart) -> Self {
        ChartSpec::Line(chart)
    }
}

impl From<BarChart> for ChartSpec {
    fn from(chart: BarChart) -> Self {
        ChartSpec::Bar(chart)
    }
}

impl From<LoveGraph> for ChartSpec {
    fn from(graph: LoveGraph) -> Self {
        ChartSpec::Graph(graph)
    }
}

/// Everything a renderer needs for one paint.
pub(crate) struct Frame<'a> {
    pub ctx: &'a CanvasRenderingContext2d,
    pub width: f64,
    pub height: f64,
    pub theme: Theme,
}

impl Frame<'_> {
    pub fn text(&self, text: &str, x: f64, y: f64, color: &str, align: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align(align);
        let _ = self.ctx.fill_text(text, x, y);
    }
}

struct ChartInstance {
    canvas: HtmlCanvasElement,
    height: f64,
    spec: ChartSpec,
    theme: Theme,
    avatars: Vec<Option<HtmlImageElement>>,
    _avatar_loads: Vec<Closure<dyn FnMut()>>,
}

impl ChartInstance {
    fn render(&self) {
        if !self.canvas.is_connected() {
            return;
        }
        let Some(ctx) = context_2d(&self.canvas) else {
            return;
        };
        let dpr = web_sys::window()
            .map(|window| window.device_pixel_ratio())
            .unwrap_or(1.0)
            .max(1.0);
        let css_width = match self.canvas.client_width() {
            w if w > 0 => w as f64,
            _ => self.canvas.width() as f64,
        };
        self.canvas.set_width((css_width * dpr).round() as u32);
        self.canvas.set_height((self.height * dpr).round() as u32);
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, css_width, self.height);
        ctx.set_font("12px sans-serif");
        ctx.set_text_baseline("middle");

        let frame = Frame {
            ctx: &ctx,
            width: css_width,
            height: self.height,
            theme: self.theme,
        };
        match &self.spec {
            ChartSpec::Line(chart) => line::render(&frame, chart),
            ChartSpec::Bar(chart) => bar::render(&frame, chart, &self.avatars),
            ChartSpec::Graph(graph) => graph::render(&frame, graph),
        }
    }

    fn detach_avatar_handlers(&self) {
        for image in self.avatars.iter().flatten() {
            image.set_onload(None);
        }
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

thread_local! {
    static REGISTRY: RefCell<HashMap<String, ChartInstance>> = RefCell::new(HashMap::new());
    static DIRTY: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static SCHEDULER: FrameScheduler = FrameScheduler::new(flush_dirty);
}

fn flush_dirty() {
    let ids = DIRTY.with(|dirty| std::mem::take(&mut *dirty.borrow_mut()));
    REGISTRY.with(|registry| {
        let registry = registry.borrow();
        for id in ids {
            if let Some(instance) = registry.get(&id) {
                instance.render();
            }
        }
    });
}

/// Queue a repaint of `id` for the next animation frame.
fn request_redraw(id: &str) {
    DIRTY.with(|dirty| {
        let mut dirty = dirty.borrow_mut();
        if !dirty.iter().any(|queued| queued == id) {
            dirty.push(id.to_string());
        }
    });
    SCHEDULER.with(FrameScheduler::request);
}

fn load_avatars(id: &str, urls: &[Option<String>]) -> (Vec<Option<HtmlImageElement>>, Vec<Closure<dyn FnMut()>>) {
    let mut images = Vec::with_capacity(urls.len());
    let mut handlers = Vec::new();
    for url in urls {
        let image = url
            .as_deref()
            .filter(|url| !url.is_empty())
            .and_then(|url| HtmlImageElement::new().ok().map(|image| (image, url)));
        let Some((image, url)) = image else {
            images.push(None);
            continue;
        };
        let chart_id = id.to_string();
        let on_load = Closure::<dyn FnMut()>::new(move || request_redraw(&chart_id));
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_src(url);
        handlers.push(on_load);
        images.push(Some(image));
    }
    (images, handlers)
}

/// Draw `spec` into `canvas`, replacing any chart registered under the
/// canvas id.
pub fn draw(canvas: HtmlCanvasElement, height: f64, spec: ChartSpec, theme: Theme) {
    let id = canvas.id();
    if id.is_empty() {
        web_sys::console::warn_1(&"[chart] canvas without id".into());
        return;
    }
    destroy(&id);

    let (avatars, avatar_loads) = load_avatars(&id, spec.avatar_urls());
    let instance = ChartInstance {
        canvas,
        height,
        spec,
        theme,
        avatars,
        _avatar_loads: avatar_loads,
    };
    instance.render();
    REGISTRY.with(|registry| {
        registry.borrow_mut().insert(id, instance);
    });
}

pub fn destroy(id: &str) {
    let removed = REGISTRY.with(|registry| registry.borrow_mut().remove(id));
    if let Some(instance) = removed {
        instance.detach_avatar_handlers();
    }
}

/// Repaint every live chart with `theme`.
pub fn redraw_all(theme: Theme) {
    REGISTRY.with(|registry| {
        for instance in registry.borrow_mut().values_mut() {
            instance.theme = theme;
            instance.render();
        }
    });
}

/// Canvas bound to the registry. `None` clears the slot.
#[component]
pub fn ChartCanvas(
    id: &'static str,
    #[prop(default = 240)] height: u32,
    spec: Signal<Option<ChartSpec>>,
) -> impl IntoView {
    let ThemeStore(theme) = expect_context();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        match spec.get() {
            Some(spec) => draw(canvas, height as f64, spec, theme.get_untracked()),
            None => destroy(id),
        }
    });
    on_cleanup(move || destroy(id));

    view! {
        <canvas
            id=id
            class="chart-canvas"
            node_ref=canvas_ref
            style:height=format!("{height}px")
        ></canvas>
    }
}
