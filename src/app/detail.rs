// src/app/detail.rs
use eframe::egui as eg;

use crate::app::data::Catalog;

const PANEL_MIN_W: f32 = 260.0;
const PANEL_DEFAULT_W: f32 = 340.0;

fn field(ui: &mut eg::Ui, label: &str, value: Option<&str>) {
    let Some(v) = value else {
        return;
    };
    ui.label(eg::RichText::new(label).strong());
    ui.add(eg::Label::new(v).wrap());
    ui.add_space(6.0);
}

impl crate::app::ExplorerApp {
    pub(crate) fn ui_render_detail_panel(&mut self, ctx: &eg::Context, catalog: &Catalog) {
        let screen_w: f32 = ctx.input(|i| i.screen_rect().width());
        let max_w: f32 = (screen_w * 0.4).clamp(PANEL_MIN_W, 560.0);

        eg::SidePanel::right("detail_panel")
            .resizable(true)
            .default_width(PANEL_DEFAULT_W)
            .min_width(PANEL_MIN_W)
            .max_width(max_w)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.heading("Details");
                    ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                        if ui.button("Clear").clicked() {
                            self.selected_idx = None;
                        }
                    });
                });
                ui.separator();

                let Some(sel) = self.selected_idx else {
                    ui.label("Select a title in the results to see its details.");
                    return;
                };
                let Some(t) = catalog.get(sel) else {
                    ui.label("Selection is out of range.");
                    return;
                };

                eg::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                    ui.heading(t.title.as_str());
                    ui.label(
                        eg::RichText::new(format!("{}  •  {}  •  {}", t.show_id, t.kind, t.release_year))
                            .weak(),
                    );
                    ui.add_space(8.0);

                    let year = t.release_year.to_string();
                    let added = t
                        .date_added
                        .map(|d| d.format("%-d %B %Y").to_string())
                        .or_else(|| t.date_added_raw.clone());
                    field(ui, "Type", Some(t.kind.as_str()));
                    field(ui, "Director", t.director.as_deref());
                    let cast_label = format!("Cast ({})", t.cast_members().count());
                    field(ui, &cast_label, t.cast.as_deref());
                    field(ui, "Country", t.country.as_deref());
                    field(ui, "Added", added.as_deref());
                    field(ui, "Release year", Some(&year));
                    field(ui, "Rating", t.rating.as_deref());
                    field(ui, "Duration", t.duration.as_deref());
                    field(ui, "Categories", t.listed_in.as_deref());
                    field(ui, "Description", t.description.as_deref());
                });
            });
    }
}
