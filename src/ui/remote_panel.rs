use eframe::egui;

use crate::engine::render_target::{ContainerTarget, CHARACTER_TABLE_ID};
use crate::engine::table::{RosterRow, COLUMNS};

/// Returns true when the user asked for an immediate refresh.
pub fn draw_remote_roster(ui: &mut egui::Ui, rows: &[RosterRow], view: &ContainerTarget) -> bool {
    let mut refresh = false;

    ui.horizontal(|ui| {
        ui.heading("Remote Roster");
        if ui.button("⟳ Refresh").clicked() {
            refresh = true;
        }
    });
    ui.separator();

    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new(CHARACTER_TABLE_ID)
            .striped(true)
            .min_col_width(60.0)
            .show(ui, |ui| {
                for col in COLUMNS {
                    ui.label(egui::RichText::new(col).strong());
                }
                ui.end_row();

                for row in rows {
                    for cell in row.cells() {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });

        if let Some(html) = view.content(CHARACTER_TABLE_ID) {
            ui.add_space(12.0);
            ui.collapsing("Rendered HTML", |ui| {
                ui.code(html);
            });
        }
    });

    refresh
}
