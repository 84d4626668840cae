use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::figure::{PieFigure, ScatterFigure, ScatterPoint};

/// Arc segments per full turn of the pie.
const PIE_RESOLUTION: usize = 180;

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });
}

fn empty_chart(ui: &mut Ui, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No launches match the current selection").weak());
        });
    });
}

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Outline of one slice: centre, then the arc from `start` to `end` (in
/// fractions of a full turn, clockwise from twelve o'clock).
fn slice_outline(start: f64, end: f64) -> PlotPoints<'static> {
    let steps = (((end - start) * PIE_RESOLUTION as f64).ceil() as usize).max(1);
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| {
            let frac = start + (end - start) * i as f64 / steps as f64;
            let angle = FRAC_PI_2 - frac * TAU;
            [angle.cos(), angle.sin()]
        }))
        .collect()
}

pub fn pie_chart(ui: &mut Ui, figure: Option<&PieFigure>, height: f32) {
    let Some(fig) = figure else {
        empty_chart(ui, height);
        return;
    };
    chart_title(ui, &fig.title);

    let total = fig.total();
    if total == 0 {
        empty_chart(ui, height);
        return;
    }

    Plot::new("success-pie-chart")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in fig.slices.iter().filter(|s| s.value > 0) {
                let share = slice.value as f64 / total as f64;
                let end = start + share;

                let polygon = Polygon::new(slice_outline(start, end))
                    .name(format!("{} ({})", slice.label, slice.value))
                    .fill_color(Color32::from(slice.color))
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(polygon);

                let mid = FRAC_PI_2 - (start + share / 2.0) * TAU;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", share * 100.0)).color(Color32::WHITE),
                ));

                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload scatter chart
// ---------------------------------------------------------------------------

/// Launch nearest to the hovered plot position within a trace.
fn nearest<'a>(fig: &'a ScatterFigure, trace: &str, at: &PlotPoint) -> Option<&'a ScatterPoint> {
    fig.traces
        .iter()
        .find(|t| t.name == trace)?
        .points
        .iter()
        .min_by(|a, b| {
            let da = (a.payload_kg - at.x).abs() + (a.class as f64 - at.y).abs();
            let db = (b.payload_kg - at.x).abs() + (b.class as f64 - at.y).abs();
            da.total_cmp(&db)
        })
}

pub fn scatter_chart(ui: &mut Ui, figure: Option<&Arc<ScatterFigure>>, height: f32) {
    let Some(fig) = figure else {
        empty_chart(ui, height);
        return;
    };
    chart_title(ui, &fig.title);
    if fig.is_empty() {
        empty_chart(ui, height);
        return;
    }

    let hover = Arc::clone(fig);
    Plot::new("success-payload-scatter-chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(fig.x_label.as_str())
        .y_axis_label(fig.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            if name.is_empty() {
                return format!("{:.0} kg", value.x);
            }
            match nearest(&hover, name, value) {
                Some(p) => format!(
                    "Payload Mass (kg): {:.0}\nclass: {}\nBooster Version Category: {}\nLaunch Site: {}",
                    p.payload_kg, p.class, p.booster_category, p.site
                ),
                None => name.to_string(),
            }
        })
        .show(ui, |plot_ui| {
            for trace in &fig.traces {
                let points: PlotPoints = trace
                    .points
                    .iter()
                    .map(|p| [p.payload_kg, p.class as f64])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&trace.name)
                        .color(Color32::from(trace.color))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_outline_starts_at_centre_and_twelve_o_clock() {
        let pts = slice_outline(0.0, 0.25).points().to_vec();
        assert_eq!(pts[0].x, 0.0);
        assert_eq!(pts[0].y, 0.0);
        assert!((pts[1].x - 0.0).abs() < 1e-9);
        assert!((pts[1].y - 1.0).abs() < 1e-9);
        // A quarter turn clockwise ends at three o'clock.
        let last = pts[pts.len() - 1];
        assert!((last.x - 1.0).abs() < 1e-9);
        assert!(last.y.abs() < 1e-9);
    }
}
