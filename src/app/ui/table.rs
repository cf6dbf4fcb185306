// src/app/ui/table.rs
use eframe::egui as eg;
use egui_extras::{Column, TableBuilder};

use crate::app::data::Title;
use crate::app::utils::or_dash;

const ROW_H: f32 = 20.0;
const HEADER_H: f32 = 22.0;

const SAMPLE_HEADERS: [&str; 12] = [
    "show_id",
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
    "description",
];

const RESULT_HEADERS: [&str; 8] = [
    "show_id",
    "type",
    "title",
    "director",
    "country",
    "release_year",
    "rating",
    "duration",
];

fn cell(ui: &mut eg::Ui, text: &str) {
    ui.add(eg::Label::new(text).truncate());
}

/// Every column of the first rows, read-only.
pub fn sample_table(ui: &mut eg::Ui, titles: &[Title]) {
    ui.push_id("sample_table", |ui| {
        eg::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(eg::Layout::left_to_right(eg::Align::Center))
                .column(Column::auto().at_least(50.0))
                .column(Column::auto().at_least(60.0))
                .column(Column::initial(180.0).clip(true))
                .columns(Column::initial(130.0).clip(true), 4)
                .columns(Column::auto().at_least(60.0), 3)
                .column(Column::initial(180.0).clip(true))
                .column(Column::initial(320.0).clip(true))
                .header(HEADER_H, |mut header| {
                    for h in SAMPLE_HEADERS {
                        header.col(|ui| {
                            ui.strong(h);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_H, titles.len(), |mut row| {
                        let t = &titles[row.index()];
                        let year = t.release_year.to_string();
                        let cells = [
                            t.show_id.as_str(),
                            t.kind.as_str(),
                            t.title.as_str(),
                            or_dash(t.director.as_deref()),
                            or_dash(t.cast.as_deref()),
                            or_dash(t.country.as_deref()),
                            or_dash(t.date_added_raw.as_deref()),
                            year.as_str(),
                            or_dash(t.rating.as_deref()),
                            or_dash(t.duration.as_deref()),
                            or_dash(t.listed_in.as_deref()),
                            or_dash(t.description.as_deref()),
                        ];
                        for text in cells {
                            row.col(|ui| cell(ui, text));
                        }
                    });
                });
        });
    });
}

/// Search results; clicking an id selects that title. Returns true when the selection changed.
pub fn results_table(
    ui: &mut eg::Ui,
    titles: &[Title],
    hits: &[usize],
    selected: &mut Option<usize>,
) -> bool {
    let mut changed = false;
    ui.push_id("results_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(420.0)
            .cell_layout(eg::Layout::left_to_right(eg::Align::Center))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::initial(220.0).clip(true))
            .column(Column::initial(160.0).clip(true))
            .column(Column::initial(160.0).clip(true))
            .columns(Column::auto().at_least(50.0), 2)
            .column(Column::remainder())
            .header(HEADER_H, |mut header| {
                for h in RESULT_HEADERS {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_H, hits.len(), |mut row| {
                    let idx = hits[row.index()];
                    let Some(t) = titles.get(idx) else {
                        return;
                    };
                    let is_sel = *selected == Some(idx);
                    row.col(|ui| {
                        if ui.selectable_label(is_sel, t.show_id.as_str()).clicked() && !is_sel {
                            *selected = Some(idx);
                            changed = true;
                        }
                    });
                    let year = t.release_year.to_string();
                    let rest = [
                        t.kind.as_str(),
                        t.title.as_str(),
                        or_dash(t.director.as_deref()),
                        or_dash(t.country.as_deref()),
                        year.as_str(),
                        or_dash(t.rating.as_deref()),
                        or_dash(t.duration.as_deref()),
                    ];
                    for text in rest {
                        row.col(|ui| cell(ui, text));
                    }
                });
            });
    });
    changed
}
