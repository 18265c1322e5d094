use eframe::egui;

use crate::model::combatant::LabelList;
use crate::model::roster::Side;
use crate::ui::app::{health_bar, health_controls, label_list, Action, Theme, TrackerState};

pub fn draw_enemies(ui: &mut egui::Ui, state: &mut TrackerState, theme: &Theme, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        ui.heading("Enemies");
        if ui.button("➕ Add Enemy").clicked() {
            actions.push(Action::AddEnemy);
        }
    });
    ui.separator();

    let TrackerState {
        roster,
        drafts,
        damage_amount,
        heal_amount,
        ..
    } = state;

    if roster.enemies().is_empty() {
        ui.weak("No enemies yet.");
    }

    for e in roster.enemies() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&e.name).strong());
                if e.is_down() {
                    ui.label(egui::RichText::new("☠").color(theme.status));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("❌").on_hover_text("Remove enemy").clicked() {
                        actions.push(Action::RemoveEnemy(e.id));
                    }
                    ui.weak(format!("[{}]", e.position));
                });
            });

            health_bar(ui, theme.enemy_health, e.health, e.max_health, e.health_fraction());
            health_controls(ui, Side::Enemies, e.id, damage_amount, heal_amount, actions);

            let drafts = drafts.entry(e.id).or_default();
            ui.collapsing("Conditions & effects", |ui| {
                for (list, heading, hint) in [
                    (LabelList::Status, "Status Conditions:", "Add status condition"),
                    (LabelList::Effects, "Effects:", "Add buff/effect"),
                ] {
                    label_list(
                        ui,
                        heading,
                        hint,
                        theme.chip_color(list),
                        Side::Enemies,
                        e.id,
                        list,
                        e.labels(list),
                        drafts.for_list(list),
                        actions,
                    );
                }
            });
        });

        ui.add_space(6.0);
    }
}
