use crate::domain::market::Signal;
use crate::domain::performance::CorrelationMatrix;
use crate::interfaces::design_system::DesignSystem;
use chrono::{Datelike, NaiveDate};

// Diverging ramp endpoints: -1 blue, 0 near-white, +1 red
const NEGATIVE: [f32; 3] = [59.0, 76.0, 192.0];
const MIDPOINT: [f32; 3] = [221.0, 221.0, 221.0];
const POSITIVE: [f32; 3] = [180.0, 4.0, 38.0];

/// Plot x coordinate of a calendar day.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Axis label for a plot x coordinate; empty outside the calendar.
pub fn x_to_label(x: f64) -> String {
    if !x.is_finite() || x < i32::MIN as f64 || x > i32::MAX as f64 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Line points for one column, skipping undefined values.
pub fn line_points(index: &[NaiveDate], values: &[Option<f64>]) -> Vec<[f64; 2]> {
    index
        .iter()
        .zip(values)
        .filter_map(|(date, value)| value.map(|v| [date_to_x(*date), v]))
        .collect()
}

/// Heat-map colour of a correlation coefficient. Undefined cells are grey.
pub fn correlation_color(value: Option<f64>) -> egui::Color32 {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return DesignSystem::TEXT_MUTED;
    };
    let t = v.clamp(-1.0, 1.0) as f32;

    let (from, to, weight) = if t < 0.0 {
        (MIDPOINT, NEGATIVE, -t)
    } else {
        (MIDPOINT, POSITIVE, t)
    };
    let channel = |i: usize| (from[i] + (to[i] - from[i]) * weight).round() as u8;
    egui::Color32::from_rgb(channel(0), channel(1), channel(2))
}

pub fn signal_color(signal: Signal) -> egui::Color32 {
    match signal {
        Signal::Buy => DesignSystem::SUCCESS,
        Signal::Sell => DesignSystem::DANGER,
        Signal::Hold => DesignSystem::NEUTRAL,
    }
}

pub fn render_signal_pill(ui: &mut egui::Ui, signal: Signal) {
    let color = signal_color(signal);
    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(12)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(signal.label()).size(12.0).strong().color(color));
        });
}

/// Annotated correlation grid, one painted cell per pair combination.
pub fn render_correlation_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
    if matrix.is_empty() {
        ui.label(
            egui::RichText::new("No correlations available.")
                .italics()
                .color(DesignSystem::TEXT_MUTED),
        );
        return;
    }

    let cell_size = 72.0;
    let label_width = 90.0;

    egui::ScrollArea::both().show(ui, |ui| {
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.add_space(label_width);
                for pair in matrix.pairs() {
                    ui.allocate_ui(egui::vec2(cell_size, 20.0), |ui| {
                        ui.centered_and_justified(|ui| {
                            ui.label(egui::RichText::new(pair).size(10.0).strong());
                        });
                    });
                }
            });

            for (i, pair) in matrix.pairs().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.allocate_ui(egui::vec2(label_width, cell_size), |ui| {
                        ui.label(egui::RichText::new(pair).size(10.0).strong());
                    });

                    for value in matrix.row(i) {
                        let (rect, _response) =
                            ui.allocate_exact_size(egui::vec2(cell_size, cell_size), egui::Sense::hover());
                        ui.painter().rect_filled(rect.shrink(1.0), 2.0, correlation_color(*value));

                        let text_color = match value {
                            Some(v) if v.abs() > 0.5 => egui::Color32::WHITE,
                            _ => egui::Color32::BLACK,
                        };
                        let text = value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "NaN".to_string());
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            text,
                            egui::FontId::proportional(12.0),
                            text_color,
                        );
                    }
                });
            }
        });
    });
}
