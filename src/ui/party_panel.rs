use eframe::egui;

use crate::model::combatant::{Combatant, LabelList};
use crate::model::edit::EditBuffer;
use crate::model::roster::Side;
use crate::ui::app::{health_bar, health_controls, label_list, Action, Drafts, Theme, TrackerState};

pub fn draw_party(ui: &mut egui::Ui, state: &mut TrackerState, theme: &Theme, actions: &mut Vec<Action>) {
    ui.heading("Party");
    ui.separator();

    let TrackerState {
        roster,
        session,
        drafts,
        damage_amount,
        heal_amount,
    } = state;

    for c in roster.characters() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());

            if session.is_editing(c.id) {
                if let Some(buf) = session.buffer_mut() {
                    draw_edit_form(ui, buf, actions);
                }
            } else {
                let drafts = drafts.entry(c.id).or_default();
                draw_character_view(ui, c, theme, &mut *drafts, actions);
                health_controls(ui, Side::Party, c.id, damage_amount, heal_amount, actions);
            }
        });

        ui.add_space(6.0);
    }
}

fn draw_edit_form(ui: &mut egui::Ui, buf: &mut EditBuffer, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut buf.name).hint_text("Name"));
        ui.add(egui::TextEdit::singleline(&mut buf.class).hint_text("Class"));
    });

    ui.horizontal(|ui| {
        ui.add_sized(
            [80.0, 20.0],
            egui::TextEdit::singleline(&mut buf.max_health_input).hint_text("Max Health"),
        );

        if ui.button("Save").clicked() {
            actions.push(Action::SaveEdit);
        }
        if ui.button("Cancel").clicked() {
            actions.push(Action::DiscardEdit);
        }
    });
}

fn draw_character_view(
    ui: &mut egui::Ui,
    c: &Combatant,
    theme: &Theme,
    drafts: &mut Drafts,
    actions: &mut Vec<Action>,
) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&c.name).strong().size(16.0));
        if c.is_down() {
            ui.label(egui::RichText::new("☠ down").color(theme.status));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✏").on_hover_text("Edit").clicked() {
                actions.push(Action::BeginEdit(c.id));
            }
            if let Some(class) = &c.class {
                ui.weak(class);
            }
            ui.weak(format!("[{}]", c.position));
        });
    });

    health_bar(ui, theme.health, c.health, c.max_health, c.health_fraction());

    ui.add_space(4.0);
    for (list, heading, hint) in [
        (LabelList::Status, "Status Conditions:", "Add status condition"),
        (LabelList::Effects, "Effects:", "Add buff/effect"),
        (LabelList::Inventory, "Inventory:", "New item"),
    ] {
        label_list(
            ui,
            heading,
            hint,
            theme.chip_color(list),
            Side::Party,
            c.id,
            list,
            c.labels(list),
            drafts.for_list(list),
            actions,
        );
    }
}
