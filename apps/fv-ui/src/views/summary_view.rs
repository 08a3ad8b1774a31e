use egui_extras::{Column, TableBuilder};
use fv_app::MinMaxTable;

/// Two-row Max/Min table.
pub fn show_summary(ui: &mut egui::Ui, table: Option<&MinMaxTable>) {
    let rows: Vec<(&str, String)> = match table {
        Some(t) => t.formatted(),
        None => vec![("Max", String::new()), ("Min", String::new())],
    };

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(50.0))
        .column(Column::initial(120.0).at_least(80.0))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("");
            });
            header.col(|ui| {
                ui.strong("Model");
            });
        })
        .body(|mut body| {
            for (label, value) in rows {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.strong(label);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}
