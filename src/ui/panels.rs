use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::dashboard::{DASHBOARD_TITLE, SCATTER_CHART};
use crate::data::filter::ALL_SITES;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left panel: site selector and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state below.
    let sites = state.dashboard.context().dataset().sites().to_vec();
    let range = state.dashboard.context().dataset().payload_range();
    let boundary = state.dashboard.context().boundary();

    // ---- Site selector ----
    ui.strong("Launch site");
    let current = state.view.site.as_value().to_string();
    let current_label = if current == ALL_SITES {
        "All Sites".to_string()
    } else {
        current.clone()
    };
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(current_label)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current == ALL_SITES, "All Sites").clicked() {
                picked = Some(ALL_SITES.to_string());
            }
            for site in &sites {
                if ui.selectable_label(current == *site, site).clicked() {
                    picked = Some(site.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(&site);
    }
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let mut low = state.view.payload.low;
    let mut high = state.view.payload.high;
    let low_changed = ui
        .add(Slider::new(&mut low, range.min..=range.max).text("low"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, range.min..=range.max).text("high"))
        .changed();
    if low_changed || high_changed {
        state.set_payload(low, high);
    }
    if ui.small_button("Full range").clicked() {
        state.set_payload(range.min, range.max);
    }

    ui.add_space(4.0);
    ui.label(
        RichText::new(format!("Payload bounds: {}", boundary.as_str()))
            .small()
            .italics(),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with counts and any validation message.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(DASHBOARD_TITLE);
        ui.separator();

        let ds = state.dashboard.context().dataset();
        let visible = match state.figure(SCATTER_CHART) {
            Some(crate::chart::Figure::Scatter(s)) => s.point_count(),
            _ => 0,
        };
        ui.label(format!(
            "{} launches loaded, {} in payload range",
            ds.len(),
            visible
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
