use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: count, preview, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::row_count(ui, state);
                    ui.add_space(8.0);
                    panels::data_preview(ui, state);
                    ui.separator();
                    plot::age_histogram(ui, &state.summaries.histogram);
                    ui.separator();
                    plot::job_counts(ui, &state.summaries.job_counts);
                    ui.separator();
                    plot::correlation_heatmap(ui, state.summaries.correlation.as_ref());
                });
        });
    }
}
