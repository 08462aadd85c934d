//! Declarative figure assembly.
//!
//! Turns a [`Dataset`] into a plotly figure description: three line+marker
//! traces, a slider that reveals the curves one state at a time, and a
//! dropdown that swaps between Global and Regional data. Everything here is
//! plain data; the browser-side plotly.js runtime owns all interactivity.
//!
//! The structs serialize to exactly the JSON shape `Plotly.newPlot` expects.

use serde::Serialize;

use crate::model::{Dataset, QueryMode, Style, System, INITIAL_MODE};

/// Default output file, written to the working directory.
pub const OUTPUT_FILE: &str = "climatespark_interactive_performance.html";

pub const FIGURE_TITLE: &str = "Performance Comparison: Spark vs SciSpark vs ClimateSpark";
pub const X_AXIS_TITLE: &str = "Number of Queried States";
pub const Y_AXIS_TITLE: &str = "Execution Time (log scale)";

/// Figure dimensions (pixels).
pub const FIGURE_WIDTH: u32 = 1100;
pub const FIGURE_HEIGHT: u32 = 700;

pub const LINE_WIDTH: u32 = 3;
pub const FONT_SIZE: u32 = 16;
const GRID_COLOR: &str = "lightgray";
const LEGEND_BG: &str = "rgba(255,255,255,0.8)";

/// Title shown while the slider sits at `n` states.
pub fn slider_title(n: u32) -> String {
    format!("Performance up to {} States", n)
}

/// Title shown after picking `mode` in the dropdown.
pub fn mode_title(mode: QueryMode) -> String {
    format!("Performance Comparison — {} Query", mode.name())
}

// ============================================================================
// Figure Model
// ============================================================================

/// Complete figure: traces plus layout.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<u32>,
    pub y: Vec<f64>,
    pub marker: Marker,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub width: u32,
    pub dash: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Log,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub showgrid: bool,
    pub gridwidth: u32,
    pub gridcolor: &'static str,
    pub zerolinecolor: &'static str,
}

impl Axis {
    fn gridded(title: &str, axis_type: AxisType) -> Self {
        Self {
            title: Title::new(title),
            axis_type,
            showgrid: true,
            gridwidth: 1,
            gridcolor: GRID_COLOR,
            zerolinecolor: GRID_COLOR,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub bgcolor: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub width: u32,
    pub height: u32,
    pub font: Font,
    pub legend: Legend,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub sliders: Vec<Slider>,
    pub updatemenus: Vec<UpdateMenu>,
}

// ============================================================================
// Interactive Controls
// ============================================================================

/// plotly.js control method; `update` restyles traces and relayouts at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Update,
}

/// Per-trace data replacement. Each outer entry targets one trace.
#[derive(Debug, Clone, Serialize)]
pub struct TraceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Vec<u32>>>,
    pub y: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutUpdate {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    pub active: usize,
    pub pad: Pad,
    pub currentvalue: CurrentValue,
    pub steps: Vec<SliderStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pad {
    pub t: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentValue {
    pub prefix: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliderStep {
    pub method: Method,
    pub label: String,
    pub args: (TraceUpdate, LayoutUpdate),
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMenu {
    pub buttons: Vec<Button>,
    pub direction: &'static str,
    pub showactive: bool,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub method: Method,
    pub args: (TraceUpdate, LayoutUpdate),
}

// ============================================================================
// Assembly
// ============================================================================

/// Build the complete interactive figure.
///
/// Traces start on [`INITIAL_MODE`]. Slider steps always truncate the
/// initial mode's curves, even after the dropdown switched modes; moving the
/// slider after picking "Regional" therefore shows Global data again.
pub fn assemble(dataset: &Dataset, styles: &[Style; 3]) -> Figure {
    let states = dataset.states();
    let initial = dataset.mode(INITIAL_MODE);

    let data = System::ALL
        .iter()
        .zip(initial.iter())
        .map(|(system, curve)| {
            let style = &styles[system.index()];
            Trace {
                kind: "scatter",
                mode: "lines+markers",
                name: system.name().to_string(),
                x: states.to_vec(),
                y: curve.values().to_vec(),
                marker: Marker { size: style.marker_size },
                line: Line {
                    width: LINE_WIDTH,
                    dash: style.dash.name(),
                    color: style.color,
                },
            }
        })
        .collect();

    let steps = states
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let len = i + 1;
            SliderStep {
                method: Method::Update,
                label: n.to_string(),
                args: (
                    TraceUpdate {
                        x: Some(vec![states[..len].to_vec(); System::ALL.len()]),
                        y: initial.iter().map(|c| c.prefix(len).to_vec()).collect(),
                    },
                    LayoutUpdate { title: Title::new(slider_title(n)) },
                ),
            }
        })
        .collect();

    let buttons = QueryMode::ALL
        .iter()
        .map(|&mode| Button {
            label: mode.name(),
            method: Method::Update,
            args: (
                TraceUpdate {
                    x: None,
                    y: dataset.mode(mode).iter().map(|c| c.values().to_vec()).collect(),
                },
                LayoutUpdate { title: Title::new(mode_title(mode)) },
            ),
        })
        .collect();

    let layout = Layout {
        title: Title::new(FIGURE_TITLE),
        xaxis: Axis::gridded(X_AXIS_TITLE, AxisType::Linear),
        yaxis: Axis::gridded(Y_AXIS_TITLE, AxisType::Log),
        width: FIGURE_WIDTH,
        height: FIGURE_HEIGHT,
        font: Font { size: FONT_SIZE },
        legend: Legend { x: 0.7, y: 1.12, bgcolor: LEGEND_BG },
        plot_bgcolor: "white",
        paper_bgcolor: "white",
        sliders: vec![Slider {
            active: 0,
            pad: Pad { t: 50 },
            currentvalue: CurrentValue { prefix: "Queried states: " },
            steps,
        }],
        updatemenus: vec![UpdateMenu {
            buttons,
            direction: "down",
            showactive: true,
            x: 1.15,
            y: 1.15,
        }],
    };

    Figure { data, layout }
}
