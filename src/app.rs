use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use crate::callbacks::{CallbackRegistry, WidgetId};
use crate::config::DashConfig;
use crate::data::model::LaunchDataset;
use crate::figure::Figure;
use crate::state::AppState;
use crate::ui::{panels, plot};

const PIE_HEIGHT: f32 = 320.0;
const SCATTER_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    slider_step: Option<f64>,
}

impl LaunchDashApp {
    pub fn new(dataset: Arc<LaunchDataset>, registry: CallbackRegistry, config: &DashConfig) -> Self {
        Self {
            state: AppState::new(dataset, registry),
            slider_step: config.slider_step,
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: title, dropdown, pie, slider, scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::title(ui);
                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::pie_chart(
                        ui,
                        self.state
                            .figure(WidgetId::SuccessPieChart)
                            .and_then(Figure::as_pie),
                        PIE_HEIGHT,
                    );
                    ui.add_space(8.0);

                    panels::payload_slider(ui, &mut self.state, self.slider_step);
                    ui.add_space(8.0);

                    plot::scatter_chart(
                        ui,
                        self.state
                            .figure(WidgetId::SuccessPayloadScatterChart)
                            .and_then(Figure::as_scatter),
                        SCATTER_HEIGHT,
                    );
                });
        });
    }
}
