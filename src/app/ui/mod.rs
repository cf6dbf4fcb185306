// src/app/ui/mod.rs
pub mod charts;
pub mod overview;
pub mod search;
pub mod table;
pub mod timeline;
pub mod visuals;

use eframe::egui as eg;

use super::types::Tab;

pub const APP_TITLE: &str = "Catalog Explorer";

impl crate::app::ExplorerApp {
    // Keep splash here; it's tiny and used early.
    pub(crate) fn ui_render_splash(&self, ui: &mut eg::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading(APP_TITLE);
            ui.add_space(8.0);
            ui.add(eg::Spinner::new().size(18.0));
            ui.separator();
            ui.label("Loading the catalog…");
            ui.monospace(format!("Data: {}", self.cfg.data_path.display()));
        });
    }

    pub(crate) fn ui_render_load_error(&self, ui: &mut eg::Ui, msg: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading(APP_TITLE);
            ui.add_space(12.0);
            ui.label(
                eg::RichText::new(
                    "Unable to load the data. Check that the CSV file exists and is correctly formatted.",
                )
                .color(ui.visuals().error_fg_color)
                .strong(),
            );
            ui.add_space(6.0);
            ui.monospace(msg);
            ui.monospace(format!("Data: {}", self.cfg.data_path.display()));
            ui.add_space(6.0);
            ui.label(
                eg::RichText::new("Set `data_path` in config.json and restart.")
                    .italics()
                    .weak(),
            );
        });
    }

    pub(crate) fn ui_render_header(&mut self, ui: &mut eg::Ui) {
        ui.add_space(4.0);
        ui.heading(APP_TITLE);
        ui.label(
            eg::RichText::new("Exploration and analysis of a film and TV series catalog").weak(),
        );
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                ui.selectable_value(&mut self.current_tab, tab, tab.label());
            }
        });
        ui.add_space(2.0);
    }

    pub(crate) fn ui_render_footer(&self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            let source = self
                .catalog
                .as_ref()
                .and_then(|c| c.source())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "—".into());
            ui.label(eg::RichText::new(format!("{APP_TITLE} • {source}")).small().weak());
        });
    }
}

/// Bold caption followed by a value on one line.
pub(crate) fn stat_line(ui: &mut eg::Ui, label: &str, value: impl ToString) {
    ui.horizontal(|ui| {
        ui.label(eg::RichText::new(label).strong());
        ui.label(value.to_string());
    });
}

pub(crate) fn section_heading(ui: &mut eg::Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(eg::RichText::new(text).strong().size(16.0));
    ui.add_space(2.0);
}
