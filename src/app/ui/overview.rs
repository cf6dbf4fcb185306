// src/app/ui/overview.rs
use eframe::egui as eg;

use super::charts::{chart_title, donut_chart, SET3};
use super::table::sample_table;
use super::{section_heading, stat_line};
use crate::app::data::{Catalog, TitleKind};
use crate::app::types::Dashboard;
use crate::app::utils::format_year_span;

impl crate::app::ExplorerApp {
    pub(crate) fn ui_render_overview(&mut self, ui: &mut eg::Ui, catalog: &Catalog, d: &Dashboard) {
        let o = &d.overview;
        let split: Vec<(String, usize)> = TitleKind::ALL
            .iter()
            .map(|&k| (k.display_name().to_string(), o.count_of(k)))
            .collect();

        ui.columns(2, |cols| {
            chart_title(&mut cols[0], "Films / TV series split");
            donut_chart(&mut cols[0], &split, &SET3, 280.0);

            let ui = &mut cols[1];
            section_heading(ui, "General statistics");
            stat_line(ui, "Total titles:", o.total);
            stat_line(ui, "Films:", o.movies);
            stat_line(ui, "TV series:", o.tv_shows);
            stat_line(ui, "Countries of origin:", o.distinct_countries);
            stat_line(ui, "Period covered:", format_year_span(o.year_span));
        });

        ui.add_space(8.0);
        let n = self.cfg.sample_rows.min(catalog.len());
        eg::CollapsingHeader::new(format!("Show a sample of the data ({n} rows)"))
            .default_open(false)
            .show(ui, |ui| sample_table(ui, &catalog.titles()[..n]));
    }
}
