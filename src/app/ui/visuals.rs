// src/app/ui/visuals.rs
use eframe::egui as eg;

use super::charts::{chart_title, donut_chart, hbar_chart, line_chart, vbar_chart, LineSeries, PASTEL, SERIES};
use crate::app::types::Dashboard;

const CHART_H: f32 = 300.0;

impl crate::app::ExplorerApp {
    pub(crate) fn ui_render_visuals(&mut self, ui: &mut eg::Ui, d: &Dashboard) {
        let top_n = self.cfg.top_n;

        ui.columns(2, |cols| {
            chart_title(&mut cols[0], &format!("Top {top_n} producing countries"));
            hbar_chart(&mut cols[0], d.countries.top(top_n));

            chart_title(&mut cols[1], "Releases per year");
            let per_year = [LineSeries::from_counts("Titles", SERIES[0], &d.per_year)];
            line_chart(&mut cols[1], &per_year, "Titles released", CHART_H);
        });

        ui.add_space(12.0);
        ui.separator();

        ui.columns(2, |cols| {
            chart_title(&mut cols[0], "Rating distribution");
            vbar_chart(&mut cols[0], d.ratings.entries(), CHART_H);

            chart_title(&mut cols[1], &format!("Top {top_n} categories"));
            donut_chart(&mut cols[1], d.genres.top(top_n), &PASTEL, CHART_H);
        });
    }
}
