use crate::application::analysis::ma_column;
use crate::application::pipeline::AnalysisReport;
use crate::config::analysis::VOLATILITY_WINDOW;
use crate::domain::market::{PriceTable, Signal};
use crate::domain::performance::CorrelationMatrix;
use crate::interfaces::components::charts::{
    line_points, render_correlation_heatmap, render_signal_pill, x_to_label,
};
use crate::interfaces::design_system::DesignSystem;
use anyhow::Result;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Pair(usize),
    Volatility,
    Correlation,
}

struct PairChart {
    pair: String,
    price: Vec<[f64; 2]>,
    short_ma: Vec<[f64; 2]>,
    long_ma: Vec<[f64; 2]>,
    signal: Signal,
}

/// Read-only window over one finished analysis run.
pub struct ChartViewer {
    period: String,
    short_label: String,
    long_label: String,
    pair_charts: Vec<PairChart>,
    volatility: Vec<(String, Vec<[f64; 2]>)>,
    correlation: CorrelationMatrix,
    selected: Tab,
}

impl ChartViewer {
    /// Copies everything the charts draw out of the report.
    pub fn from_report(report: &AnalysisReport) -> Self {
        let index = report.prices.index();
        let latest = report.latest_signals();

        let pair_charts = report
            .pairs
            .iter()
            .map(|pair| {
                let column = |table: &PriceTable, name: &str| {
                    table
                        .column(name)
                        .map(|values| line_points(table.index(), values))
                        .unwrap_or_default()
                };
                PairChart {
                    pair: pair.clone(),
                    price: column(&report.prices, pair),
                    short_ma: column(&report.moving_averages, &ma_column(pair, report.short_window)),
                    long_ma: column(&report.moving_averages, &ma_column(pair, report.long_window)),
                    signal: latest
                        .iter()
                        .find(|(p, _)| p == pair)
                        .map(|(_, s)| *s)
                        .unwrap_or_default(),
                }
            })
            .collect();

        let volatility = report
            .pairs
            .iter()
            .filter_map(|pair| {
                report
                    .volatility
                    .column(pair)
                    .map(|values| (pair.clone(), line_points(report.volatility.index(), values)))
            })
            .collect();

        let period = match (index.first(), index.last()) {
            (Some(first), Some(last)) => format!("{} to {}", first, last),
            _ => format!("{} to {}", report.start_date, report.end_date),
        };

        Self {
            period,
            short_label: format!("MA {}", report.short_window),
            long_label: format!("MA {}", report.long_window),
            pair_charts,
            volatility,
            correlation: report.correlation.clone(),
            selected: Tab::Pair(0),
        }
    }

    fn tab_label(&self, tab: Tab) -> String {
        match tab {
            Tab::Pair(i) => self
                .pair_charts
                .get(i)
                .map(|c| c.pair.clone())
                .unwrap_or_default(),
            Tab::Volatility => "Volatility".to_string(),
            Tab::Correlation => "Correlation".to_string(),
        }
    }

    fn tabs(&self) -> Vec<Tab> {
        let mut tabs: Vec<Tab> = (0..self.pair_charts.len()).map(Tab::Pair).collect();
        tabs.push(Tab::Volatility);
        tabs.push(Tab::Correlation);
        tabs
    }

    fn render_pair(&self, ui: &mut egui::Ui, chart: &PairChart) {
        ui.horizontal(|ui| {
            ui.heading(format!("{} Price with Moving Averages", chart.pair));
            ui.add_space(DesignSystem::SPACING_SMALL);
            render_signal_pill(ui, chart.signal);
        });
        ui.add_space(DesignSystem::SPACING_SMALL);

        Plot::new(format!("price_{}", chart.pair))
            .height(ui.available_height().max(300.0))
            .show_grid([true, true])
            .legend(Legend::default())
            .x_axis_formatter(|mark, _range| x_to_label(mark.value))
            .y_axis_label("Price")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(chart.pair.clone(), PlotPoints::from(chart.price.clone()))
                        .color(DesignSystem::SERIES_PRICE)
                        .width(1.5),
                );
                if !chart.short_ma.is_empty() {
                    plot_ui.line(
                        Line::new(self.short_label.clone(), PlotPoints::from(chart.short_ma.clone()))
                            .color(DesignSystem::SERIES_SHORT_MA),
                    );
                }
                if !chart.long_ma.is_empty() {
                    plot_ui.line(
                        Line::new(self.long_label.clone(), PlotPoints::from(chart.long_ma.clone()))
                            .color(DesignSystem::SERIES_LONG_MA),
                    );
                }
            });
    }

    fn render_volatility(&self, ui: &mut egui::Ui) {
        ui.heading(format!("Rolling {}-Day Volatility (Annualized)", VOLATILITY_WINDOW));
        ui.add_space(DesignSystem::SPACING_SMALL);

        Plot::new("rolling_volatility")
            .height(ui.available_height().max(300.0))
            .show_grid([true, true])
            .legend(Legend::default())
            .x_axis_formatter(|mark, _range| x_to_label(mark.value))
            .y_axis_label("Volatility (%)")
            .show(ui, |plot_ui| {
                for (i, (pair, points)) in self.volatility.iter().enumerate() {
                    plot_ui.line(
                        Line::new(pair.clone(), PlotPoints::from(points.clone()))
                            .color(DesignSystem::series_color(i)),
                    );
                }
            });
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let tabs: Vec<(Tab, String)> = self
            .tabs()
            .into_iter()
            .map(|tab| (tab, self.tab_label(tab)))
            .collect();

        egui::TopBottomPanel::top("tabs_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Currency Analysis");
                ui.label(
                    egui::RichText::new(&self.period)
                        .size(11.0)
                        .color(DesignSystem::TEXT_SECONDARY),
                );
                ui.separator();
                for (tab, label) in tabs {
                    ui.selectable_value(&mut self.selected, tab, label);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            DesignSystem::card_frame().show(ui, |ui| match self.selected {
                Tab::Pair(i) => match self.pair_charts.get(i) {
                    Some(chart) => self.render_pair(ui, chart),
                    None => {
                        ui.label(
                            egui::RichText::new("No price data.")
                                .italics()
                                .color(DesignSystem::TEXT_MUTED),
                        );
                    }
                },
                Tab::Volatility => self.render_volatility(ui),
                Tab::Correlation => {
                    ui.heading("Correlation Matrix of Daily Returns");
                    ui.add_space(DesignSystem::SPACING_MEDIUM);
                    render_correlation_heatmap(ui, &self.correlation);
                }
            });
        });
    }
}

/// Opens the chart window and blocks until it is closed.
pub fn show_charts(report: &AnalysisReport) -> Result<()> {
    let viewer = ChartViewer::from_report(report);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("fxlens: Currency Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "fxlens",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(DesignSystem::theme());
            Ok(Box::new(viewer))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::SignalTable;
    use chrono::NaiveDate;

    fn report() -> AnalysisReport {
        let index: Vec<NaiveDate> = (1..=3)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        let mut prices = PriceTable::new(index.clone());
        prices
            .insert_column("EURUSD=X", vec![Some(1.0), Some(1.1), Some(1.2)])
            .unwrap();
        let mut moving_averages = PriceTable::new(index.clone());
        moving_averages
            .insert_column("EURUSD=X_MA_2", vec![None, Some(1.05), Some(1.15)])
            .unwrap();
        moving_averages
            .insert_column("EURUSD=X_MA_3", vec![None, None, Some(1.1)])
            .unwrap();
        let mut signals = SignalTable::new(index.clone());
        signals
            .insert_column("EURUSD=X", vec![Signal::Hold, Signal::Hold, Signal::Buy])
            .unwrap();

        AnalysisReport {
            start_date: index[0],
            end_date: index[2],
            pairs: vec!["EURUSD=X".to_string()],
            failures: Vec::new(),
            prices,
            moving_averages,
            short_window: 2,
            long_window: 3,
            returns: PriceTable::new(index[1..].to_vec()),
            statistics: Vec::new(),
            signals,
            volatility: PriceTable::new(index[1..].to_vec()),
            correlation: CorrelationMatrix::from_upper_triangle(
                vec!["EURUSD=X".to_string()],
                &[true],
                |_, _| None,
            ),
        }
    }

    #[test]
    fn test_viewer_collects_series_per_pair() {
        let viewer = ChartViewer::from_report(&report());

        assert_eq!(viewer.pair_charts.len(), 1);
        let chart = &viewer.pair_charts[0];
        assert_eq!(chart.price.len(), 3);
        assert_eq!(chart.short_ma.len(), 2);
        assert_eq!(chart.long_ma.len(), 1);
        assert_eq!(chart.signal, Signal::Buy);
        assert_eq!(viewer.period, "2024-01-01 to 2024-01-03");
    }

    #[test]
    fn test_tabs_end_with_volatility_and_correlation() {
        let viewer = ChartViewer::from_report(&report());
        let tabs = viewer.tabs();

        assert_eq!(tabs, vec![Tab::Pair(0), Tab::Volatility, Tab::Correlation]);
        assert_eq!(viewer.tab_label(Tab::Pair(0)), "EURUSD=X");
    }
}
