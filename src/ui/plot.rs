use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{contrast_text, ColorScale};
use crate::data::summary::{CorrelationMatrix, Histogram};

const CHART_HEIGHT: f32 = 280.0;
const NAN_CELL: Color32 = Color32::from_gray(90);

// ---------------------------------------------------------------------------
// Age distribution
// ---------------------------------------------------------------------------

/// Age histogram over the filtered rows.
pub fn age_histogram(ui: &mut Ui, histogram: &Histogram) {
    ui.heading("Age Distribution");

    let color = ColorScale::Plasma.first();
    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(color)
                .name(format!("{:.1} to {:.1}", bin.start, bin.end))
        })
        .collect();

    Plot::new("age_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("age")
        .y_axis_label("count")
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Job counts
// ---------------------------------------------------------------------------

/// One bar per job, coloured by its count.
pub fn job_counts(ui: &mut Ui, counts: &[(String, usize)]) {
    ui.heading("Job Counts");

    let max = counts.iter().map(|c| c.1).max().unwrap_or(0) as f64;
    let min = counts.iter().map(|c| c.1).min().unwrap_or(0) as f64;

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (job, count))| {
            let n = *count as f64;
            Bar::new(i as f64, n)
                .width(0.8)
                .fill(ColorScale::Viridis.sample_range(n, min, max))
                .name(job)
        })
        .collect();

    let names: Vec<String> = counts.iter().map(|c| c.0.clone()).collect();

    Plot::new("job_counts")
        .height(CHART_HEIGHT)
        .x_axis_label("job")
        .y_axis_label("count")
        .allow_scroll(false)
        .allow_drag(false)
        .x_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            names.get(slot as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap of the correlation matrix, or a note when there is none.
pub fn correlation_heatmap(ui: &mut Ui, matrix: Option<&CorrelationMatrix>) {
    let Some(matrix) = matrix else {
        ui.label("Not enough numeric data for heatmap.");
        return;
    };

    ui.heading("Correlation Heatmap");

    let n = matrix.size();
    let label_width = 110.0;
    let header_height = 24.0;
    let cell = ((ui.available_width() - label_width) / n as f32).clamp(28.0, 72.0);
    let size = Vec2::new(label_width + cell * n as f32, header_height + cell * n as f32);

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + Vec2::new(label_width, header_height);

    let finite = matrix.values.iter().flatten().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });

    let label_font = FontId::proportional(11.0);
    let value_font = FontId::proportional((cell * 0.28).clamp(9.0, 13.0));
    let text_color = ui.visuals().text_color();

    for (i, name) in matrix.columns.iter().enumerate() {
        let offset = (i as f32 + 0.5) * cell;
        painter.text(
            Pos2::new(origin.x - 6.0, origin.y + offset),
            Align2::RIGHT_CENTER,
            name,
            label_font.clone(),
            text_color,
        );
        painter.text(
            Pos2::new(origin.x + offset, origin.y - 4.0),
            Align2::CENTER_BOTTOM,
            abbreviate(name, cell),
            label_font.clone(),
            text_color,
        );
    }

    for row in 0..n {
        for col in 0..n {
            let value = matrix.get(row, col);
            let rect = Rect::from_min_size(
                origin + Vec2::new(col as f32 * cell, row as f32 * cell),
                Vec2::splat(cell),
            );
            let fill = if value.is_finite() {
                ColorScale::Cividis.sample_range(value, lo, hi)
            } else {
                NAN_CELL
            };
            painter.rect_filled(rect.shrink(0.5), 0.0, fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format_value(value),
                value_font.clone(),
                contrast_text(fill),
            );
        }
    }

    if let Some(pos) = response.hover_pos() {
        let rel = pos - origin;
        if rel.x >= 0.0 && rel.y >= 0.0 {
            let (col, row) = ((rel.x / cell) as usize, (rel.y / cell) as usize);
            if row < n && col < n {
                let text = format!(
                    "{} × {}: {}",
                    matrix.columns[row],
                    matrix.columns[col],
                    format_value(matrix.get(row, col))
                );
                response.on_hover_text(text);
            }
        }
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Shorten a column header to roughly fit a cell of `width` points.
fn abbreviate(name: &str, width: f32) -> String {
    let max_chars = ((width / 6.5) as usize).max(3);
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_chars - 1).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_printed_literally() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(-0.456), "-0.46");
    }

    #[test]
    fn long_headers_are_abbreviated() {
        assert_eq!(abbreviate("age", 40.0), "age");
        assert_eq!(abbreviate("cons.price.idx", 40.0), "cons.…");
    }
}
