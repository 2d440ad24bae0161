use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// Centered bold page title.
pub fn title_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(4.0);
        ui.label(RichText::new(&state.config.title).heading().strong());
        ui.add_space(4.0);
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter sidebar. Any change runs a refresh cycle through `state`.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    // ---- Age range ----
    let (span_lo, span_hi) = state.dataset.age_span;
    let (mut lo, mut hi) = state.filters.age_range();

    ui.strong("Select Age Range:");
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, span_lo..=span_hi).text("from"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, span_lo..=span_hi).text("to"))
        .changed();
    if lo_changed || hi_changed {
        // an inverted pair is rejected and the handles snap back next frame
        state.set_age_range(lo, hi);
    }
    ui.separator();

    // ---- Job categories ----
    let jobs = state.dataset.job_categories.clone();
    let n_selected = state.filters.selected_jobs().len();

    ui.strong(format!("Select Job Types:  ({n_selected}/{})", jobs.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_jobs();
        }
        if ui.small_button("None").clicked() {
            state.clear_jobs();
        }
    });

    ScrollArea::vertical()
        .id_salt("job_list")
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for job in &jobs {
                let mut checked = state.filters.is_job_selected(job);
                if ui.checkbox(&mut checked, job.as_str()).changed() {
                    state.set_job_selected(job, checked);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – row count and preview
// ---------------------------------------------------------------------------

/// "Showing N matching customers".
pub fn row_count(ui: &mut Ui, state: &AppState) {
    ui.heading(format!(
        "Showing {} matching customers",
        state.summaries.row_count
    ));
}

/// The first few filtered rows, with their position in the full dataset.
pub fn data_preview(ui: &mut Ui, state: &AppState) {
    ui.strong("Filtered Data Sample");

    let dataset = &state.dataset;
    let rows = state.view.head(dataset, state.config.preview_rows);
    if rows.is_empty() {
        ui.label("No matching rows.");
        return;
    }

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .columns(Column::auto().at_least(48.0), dataset.columns.len())
                .header(20.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("#");
                    });
                    for name in &dataset.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for (index, record) in &rows {
                        body.row(18.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(index.to_string());
                            });
                            for cell in &record.cells {
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    }
                });
        });
}
