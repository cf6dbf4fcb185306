// src/app/ui/timeline.rs
use eframe::egui as eg;

use super::charts::{chart_title, line_chart, vbar_chart, LineSeries, SERIES};
use super::section_heading;
use crate::app::data::TitleKind;
use crate::app::stats::year_series_for;
use crate::app::types::Dashboard;

const CHART_H: f32 = 300.0;

fn year_combo(ui: &mut eg::Ui, id: &str, years: &[i32], value: &mut Option<i32>) -> bool {
    let mut changed = false;
    let text = value.map(|y| y.to_string()).unwrap_or_else(|| "—".into());
    eg::ComboBox::from_id_source(id)
        .selected_text(text)
        .height(320.0)
        .show_ui(ui, |ui| {
            for &y in years {
                changed |= ui.selectable_value(value, Some(y), y.to_string()).clicked();
            }
        });
    changed
}

impl crate::app::ExplorerApp {
    pub(crate) fn ui_render_timeline(&mut self, ui: &mut eg::Ui, d: &Dashboard) {
        section_heading(ui, "Temporal analysis");

        // releases per year, one line per type
        chart_title(ui, "Releases per year and type");
        let by_kind: Vec<LineSeries> = TitleKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                LineSeries::from_counts(
                    k.as_str(),
                    SERIES[i % SERIES.len()],
                    &year_series_for(&d.per_year_kind, k),
                )
            })
            .collect();
        line_chart(ui, &by_kind, "Titles released", CHART_H);

        ui.add_space(12.0);
        ui.separator();

        // popular categories over a period
        section_heading(ui, "Popular categories over a period");
        ui.horizontal(|ui| {
            ui.label("Start year:");
            let mut changed = year_combo(ui, "period_start_combo", &d.years, &mut self.period_start);
            ui.separator();
            ui.label("End year:");
            changed |= year_combo(ui, "period_end_combo", &d.years, &mut self.period_end);
            if changed {
                self.mark_period_dirty();
            }
        });

        let top_n = self.cfg.top_n;
        match &self.period_genres {
            Some(Ok(table)) => {
                let (start, end) = (
                    self.period_start.unwrap_or_default(),
                    self.period_end.unwrap_or_default(),
                );
                chart_title(ui, &format!("Top {top_n} categories ({start}-{end})"));
                vbar_chart(ui, table.top(top_n), CHART_H);
            }
            Some(Err(e)) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
            None => {
                ui.label(eg::RichText::new("No release years in the catalog.").weak());
            }
        }

        ui.add_space(12.0);
        ui.separator();

        // mean film duration
        section_heading(ui, "Film duration over time");
        chart_title(ui, "Mean film duration per year");
        let durations = [LineSeries::from_values("Films", SERIES[0], &d.movie_duration)];
        line_chart(ui, &durations, "Mean duration (minutes)", CHART_H);
    }
}
