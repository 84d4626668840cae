use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::PayloadRange;
use crate::data::model::SiteSelection;
use crate::figure::export_json;
use crate::state::AppState;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Dashboard controls
// ---------------------------------------------------------------------------

/// Dashboard heading.
pub fn title(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(TITLE_COLOR),
        );
    });
}

/// Searchable launch-site dropdown.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let options = state.dataset.site_options();
    let current = state.selection.site.clone();
    let selected_text = options
        .iter()
        .find(|o| o.value == current.value())
        .map(|o| o.label.clone())
        .unwrap_or_else(|| current.value().to_string());

    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            ui.separator();

            let needle = state.site_search.to_lowercase();
            let mut chosen = None;
            for opt in options
                .iter()
                .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
            {
                if ui
                    .selectable_label(opt.value == current.value(), &opt.label)
                    .clicked()
                {
                    chosen = Some(SiteSelection::from_value(&opt.value));
                }
            }
            if let Some(site) = chosen {
                state.site_search.clear();
                state.set_site(site);
            }
        });
}

/// Two-handle payload range slider spanning the dataset payloads.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState, step: Option<f64>) {
    let (min, max) = state.slider_span(step);
    let mut low = state.selection.payload.low();
    let mut high = state.selection.payload.high();

    ui.label("Payload range (Kg):");
    let slider_width = (ui.available_width() - 140.0).max(100.0);
    ui.spacing_mut().slider_width = slider_width;

    let mut low_slider = egui::Slider::new(&mut low, min..=max).text("low").suffix(" kg");
    let mut high_slider = egui::Slider::new(&mut high, min..=max).text("high").suffix(" kg");
    if let Some(step) = step {
        low_slider = low_slider.step_by(step);
        high_slider = high_slider.step_by(step);
    }
    let low_changed = ui.add(low_slider).changed();
    let high_changed = ui.add(high_slider).changed();

    // The handles push each other instead of crossing.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches, {} in range",
            state.dataset.len(),
            state.visible_count
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart figures")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_charts.json")
        .save_file();

    if let Some(path) = file {
        match export_json(&path, &state.figures) {
            Ok(()) => {
                log::info!("Exported {} figures to {}", state.figures.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export figures: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
