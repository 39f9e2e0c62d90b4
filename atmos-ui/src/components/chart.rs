//! Chart Component
//!
//! Pollutant bar chart of the latest reading, drawn on an HTML5 Canvas.

use atmos::ChartSnapshot;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlobalState;

/// Bar chart component. Hidden until a snapshot exists.
#[component]
pub fn Chart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw chart when the snapshot changes
    create_effect(move |_| {
        let snapshot = state.chart.get();

        if let Some(canvas) = canvas_ref.get() {
            match snapshot {
                Some(snapshot) => draw_chart(&canvas, &snapshot),
                None => clear_canvas(&canvas),
            }
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />
            <Show when=move || state.chart.get().is_none()>
                <p class="absolute inset-0 flex items-center justify-center text-gray-500">
                    "No reading to chart yet"
                </p>
            </Show>
        </div>
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn clear_canvas(canvas: &HtmlCanvasElement) {
    if let Some(ctx) = context_2d(canvas) {
        ctx.set_fill_style(&"#1f2937".into()); // gray-800
        ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }
}

/// Draw the bars on canvas. The y axis starts at zero.
fn draw_chart(canvas: &HtmlCanvasElement, snapshot: &ChartSnapshot) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    clear_canvas(canvas);

    let y_max = match snapshot.max_value() {
        max if max > 0.0 => max * 1.1,
        _ => 1.0,
    };

    // Horizontal grid lines (5 lines)
    ctx.set_stroke_style(&"rgba(255,255,255,0.05)".into());
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&"#94a3b8".into()); // slate-400
    ctx.set_font("12px sans-serif");

    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * y_max;
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    if snapshot.bars.is_empty() {
        return;
    }

    let slot = chart_width / snapshot.bars.len() as f64;
    let bar_width = slot * 0.6;

    for (i, bar) in snapshot.bars.iter().enumerate() {
        let bar_height = (bar.value.max(0.0) / y_max) * chart_height;
        let x = margin_left + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = margin_top + chart_height - bar_height;

        ctx.set_fill_style(&bar.color.into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_stroke_style(&"#fff".into());
        ctx.stroke_rect(x, y, bar_width, bar_height);

        // X-axis label
        ctx.set_fill_style(&"#94a3b8".into());
        let _ = ctx.fill_text(bar.label, x + bar_width / 2.0 - 15.0, height - 10.0);
    }
}
