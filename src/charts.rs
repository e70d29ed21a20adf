//! Canvas-drawn category pie and budget bar charts.
//!
//! Every redraw clears the whole surface first, so a stale chart can never
//! linger under a new one. Geometry is computed by pure helpers so the layout
//! can be tested without a canvas.

use std::f64::consts::{FRAC_PI_2, TAU};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::models::Summary;

const PALETTE: &[&str] = &[
    "#3498db", "#e74c3c", "#27ae60", "#f1c40f", "#9b59b6", "#e67e22", "#1abc9c", "#34495e",
    "#fd79a8", "#95a5a6", "#d35400", "#2c3e50",
];

const BAR_COLOR: &str = "#173e63";
const AXIS_COLOR: &str = "#94a3b8";
const LABEL_COLOR: &str = "#334155";

#[derive(Clone, PartialEq, Debug)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

/// Splits the circle into one slice per positive amount, in input order,
/// starting at twelve o'clock. A zero or negative total yields no slices.
pub fn pie_slices(data: &[(String, f64)]) -> Vec<Slice> {
    let total: f64 = data.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    data.iter()
        .filter(|(_, value)| *value > 0.0)
        .enumerate()
        .map(|(i, (label, value))| {
            let sweep = value / total * TAU;
            let slice = Slice {
                label: label.clone(),
                value: *value,
                start,
                end: start + sweep,
                color: PALETTE[i % PALETTE.len()],
            };
            start += sweep;
            slice
        })
        .collect()
}

/// The four fixed bars of the budget chart, in display order.
pub fn bar_values(summary: &Summary) -> [(&'static str, f64); 4] {
    [
        ("Income", summary.income),
        ("Needs (curr)", summary.needs_current),
        ("Wants (curr)", summary.wants_current),
        ("Suggested Savings", summary.suggested_savings),
    ]
}

#[derive(Clone, PartialEq, Debug)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Lays out bars over a baseline at `height - 24`, scaled so the tallest bar
/// fills the plot area. Negative values clamp to a zero-height bar.
pub fn bar_geometry(values: &[f64], width: f64, height: f64) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }

    let base = height - 24.0;
    let plot_h = base - 12.0;
    let max = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0);
    let slot = width / values.len() as f64;
    let bar_w = slot * 0.6;

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let h = (value.max(0.0) / max) * plot_h;
            BarRect {
                x: i as f64 * slot + (slot - bar_w) / 2.0,
                y: base - h,
                w: bar_w,
                h,
            }
        })
        .collect()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

fn format_amount(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

pub fn draw_pie(canvas: &HtmlCanvasElement, categories: &serde_json::Map<String, serde_json::Value>) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let data: Vec<(String, f64)> = categories
        .iter()
        .map(|(label, value)| (label.clone(), value.as_f64().unwrap_or(0.0)))
        .collect();
    let slices = pie_slices(&data);

    ctx.set_font("12px sans-serif");
    ctx.set_text_baseline("middle");

    if slices.is_empty() {
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No categorized spending", width / 2.0, height / 2.0);
        return;
    }

    let cx = height / 2.0;
    let cy = height / 2.0;
    let radius = height / 2.0 - 10.0;

    for slice in &slices {
        ctx.set_fill_style_str(slice.color);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, slice.start, slice.end);
        ctx.close_path();
        ctx.fill();
    }

    // Legend to the right of the pie.
    ctx.set_text_align("left");
    let legend_x = height + 16.0;
    let mut legend_y = 18.0;
    for slice in &slices {
        ctx.set_fill_style_str(slice.color);
        ctx.fill_rect(legend_x, legend_y - 5.0, 10.0, 10.0);
        ctx.set_fill_style_str(LABEL_COLOR);
        let _ = ctx.fill_text(
            &format!("{} ({})", slice.label, format_amount(slice.value)),
            legend_x + 16.0,
            legend_y,
        );
        legend_y += 18.0;
        if legend_y > height - 8.0 {
            break;
        }
    }
}

pub fn draw_bar(canvas: &HtmlCanvasElement, summary: &Summary) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let labeled = bar_values(summary);
    let values: Vec<f64> = labeled.iter().map(|(_, v)| *v).collect();
    let rects = bar_geometry(&values, width, height);
    let base = height - 24.0;

    ctx.set_stroke_style_str(AXIS_COLOR);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(0.0, base);
    ctx.line_to(width, base);
    ctx.stroke();

    ctx.set_font("11px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("alphabetic");

    for ((label, value), rect) in labeled.iter().zip(&rects) {
        ctx.set_fill_style_str(BAR_COLOR);
        ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);

        let center = rect.x + rect.w / 2.0;
        ctx.set_fill_style_str(LABEL_COLOR);
        let _ = ctx.fill_text(label, center, height - 8.0);
        let _ = ctx.fill_text(&format_amount(*value), center, (rect.y - 4.0).max(10.0));
    }
}
