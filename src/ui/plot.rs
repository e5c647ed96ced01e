use std::f64::consts::TAU;

use eframe::egui::{vec2, Color32, RichText, Stroke, TextStyle, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{
    Figure, PieChart, ScatterChart, BOOSTER_LEGEND_TITLE, CLASS_AXIS_LABEL, EMPTY_MESSAGE,
    PAYLOAD_AXIS_LABEL,
};
use crate::color::Rgb;
use crate::dashboard::{PIE_CHART, SCATTER_CHART};
use crate::state::AppState;

/// Wedges wider than this are split so every drawn polygon stays convex.
const MAX_WEDGE_SPAN: f64 = TAU / 4.0;

// ---------------------------------------------------------------------------
// Central panel: pie above, scatter below
// ---------------------------------------------------------------------------

pub fn dashboard_charts(ui: &mut Ui, state: &AppState) {
    let half = (ui.available_height() / 2.0 - 24.0).max(120.0);

    match state.figure(PIE_CHART) {
        Some(Figure::Pie(pie)) => pie_chart(ui, pie, half),
        _ => placeholder(ui, half),
    }
    ui.separator();
    match state.figure(SCATTER_CHART) {
        Some(Figure::Scatter(scatter)) => scatter_chart(ui, scatter, half),
        _ => placeholder(ui, half),
    }
}

fn placeholder(ui: &mut Ui, height: f32) {
    ui.allocate_ui(vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(EMPTY_MESSAGE);
        });
    });
}

// ---------------------------------------------------------------------------
// Proportion chart
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, pie: &PieChart, height: f32) {
    ui.strong(&pie.title);
    if pie.is_empty() {
        placeholder(ui, height);
        return;
    }

    let total = pie.total() as f64;
    Plot::new("success_pie_chart")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = TAU / 4.0;
            for slice in &pie.slices {
                let span = slice.value as f64 / total * TAU;
                let name = format!("{} ({})", slice.label, slice.value);

                // Slices run clockwise from twelve o'clock.
                let end = start - span;
                for (a0, a1) in wedge_segments(start, end) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(wedge_points(a0, a1)))
                            .fill_color(egui_color(slice.color))
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(&name),
                    );
                }

                let mid = (start + end) / 2.0;
                let pct = slice.value as f64 / total * 100.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{pct:.1}%")).color(Color32::WHITE).strong(),
                ));
                start = end;
            }
        });
}

/// Split `[start, end]` (clockwise, `end < start`) into convex pieces.
fn wedge_segments(start: f64, end: f64) -> Vec<(f64, f64)> {
    let pieces = ((start - end) / MAX_WEDGE_SPAN - 1e-9).ceil().max(1.0) as usize;
    let step = (start - end) / pieces as f64;
    (0..pieces)
        .map(|i| (start - step * i as f64, start - step * (i + 1) as f64))
        .collect()
}

/// Centre plus an arc of the unit circle from `a0` to `a1`.
fn wedge_points(a0: f64, a1: f64) -> Vec<[f64; 2]> {
    let steps = (((a0 - a1).abs() / TAU) * 96.0).ceil().max(2.0) as usize;
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| {
            let a = a0 + (a1 - a0) * i as f64 / steps as f64;
            [a.cos(), a.sin()]
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, scatter: &ScatterChart, height: f32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&scatter.title);
        ui.label(format!("({} launches)", scatter.point_count()));
    });
    if scatter.is_empty() {
        placeholder(ui, height);
        return;
    }

    Plot::new("success_payload_scatter_chart")
        .height(height)
        .legend(Legend::default().text_style(TextStyle::Small))
        .x_axis_label(PAYLOAD_AXIS_LABEL)
        .y_axis_label(CLASS_AXIS_LABEL)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, f64::from(p.class)])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(egui_color(series.color))
                        .radius(4.0),
                );
            }
        });
    ui.label(RichText::new(format!("Colour: {BOOSTER_LEGEND_TITLE}")).small());
}

fn egui_color([r, g, b]: Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}
