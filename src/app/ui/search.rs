// src/app/ui/search.rs
use eframe::egui as eg;
use tracing::debug;

use super::section_heading;
use super::table::results_table;
use crate::app::data::{Catalog, TitleKind};
use crate::app::types::{Dashboard, KindChoice};

fn bound_combo(ui: &mut eg::Ui, id: &str, years: &[i32], value: &mut Option<i32>) -> bool {
    let mut changed = false;
    let text = value.map(|y| y.to_string()).unwrap_or_else(|| "Any".into());
    eg::ComboBox::from_id_source(id)
        .selected_text(text)
        .height(320.0)
        .show_ui(ui, |ui| {
            changed |= ui.selectable_value(value, None, "Any").clicked();
            for &y in years {
                changed |= ui.selectable_value(value, Some(y), y.to_string()).clicked();
            }
        });
    changed
}

impl crate::app::ExplorerApp {
    // ---------- FACET BAR ----------
    fn ui_render_facets(&mut self, ui: &mut eg::Ui, d: &Dashboard) {
        ui.horizontal_wrapped(|ui| {
            // Type
            ui.label("Type:");
            let mut changed = false;
            eg::ComboBox::from_id_source("search_kind_combo")
                .selected_text(self.kind_pick.as_str())
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.kind_pick, KindChoice::All, "All")
                        .clicked();
                    for k in TitleKind::ALL {
                        changed |= ui
                            .selectable_value(&mut self.kind_pick, KindChoice::Only(k), k.as_str())
                            .clicked();
                    }
                });

            ui.separator();

            // Release year, newest first
            ui.label("Release year:");
            let year_text = self
                .year_pick
                .map(|y| y.to_string())
                .unwrap_or_else(|| "All".into());
            eg::ComboBox::from_id_source("search_year_combo")
                .selected_text(year_text)
                .height(320.0)
                .show_ui(ui, |ui| {
                    changed |= ui.selectable_value(&mut self.year_pick, None, "All").clicked();
                    for &y in d.years.iter().rev() {
                        changed |= ui
                            .selectable_value(&mut self.year_pick, Some(y), y.to_string())
                            .clicked();
                    }
                });

            ui.separator();

            // Category
            ui.label("Category:");
            let cat_text = self.category_pick.clone().unwrap_or_else(|| "All".into());
            eg::ComboBox::from_id_source("search_category_combo")
                .selected_text(cat_text)
                .width(220.0)
                .height(320.0)
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.category_pick, None, "All")
                        .clicked();
                    for c in &d.categories {
                        changed |= ui
                            .selectable_value(&mut self.category_pick, Some(c.clone()), c.as_str())
                            .clicked();
                    }
                });

            ui.separator();

            // Inclusive release-year span; an unset bound is open
            ui.label("Released between:");
            changed |= bound_combo(ui, "search_range_from_combo", &d.years, &mut self.range_from);
            ui.label("and");
            changed |= bound_combo(ui, "search_range_to_combo", &d.years, &mut self.range_to);

            if changed {
                self.mark_search_dirty();
            }

            if !self.current_filter().is_empty() {
                ui.separator();
                if ui
                    .small_button("Reset")
                    .on_hover_text("Clear every facet and the search text")
                    .clicked()
                {
                    self.kind_pick = KindChoice::All;
                    self.year_pick = None;
                    self.category_pick = None;
                    self.range_from = None;
                    self.range_to = None;
                    self.search_query.clear();
                    self.mark_search_dirty();
                }
            }
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Search by title, director, cast or description:");
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.search_query)
                    .hint_text("e.g. heist")
                    .desired_width(320.0),
            );
            if resp.changed() {
                self.mark_search_dirty();
            }
        });
    }

    pub(crate) fn ui_render_search(&mut self, ui: &mut eg::Ui, catalog: &Catalog, d: &Dashboard) {
        section_heading(ui, "Advanced search");
        self.ui_render_facets(ui, d);

        ui.add_space(8.0);
        section_heading(ui, "Results");
        let n = self.search_hits.len();
        ui.label(format!("{n} title(s) found"));

        if n == 0 {
            return;
        }
        ui.add_space(4.0);
        if results_table(ui, catalog.titles(), &self.search_hits, &mut self.selected_idx) {
            debug!("selected row {:?}", self.selected_idx);
        }
        ui.label(
            eg::RichText::new("Click an id to show its details in the side panel.")
                .italics()
                .weak(),
        );
    }
}
