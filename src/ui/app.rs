use eframe::egui;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::engine::poller::{HttpRosterSource, Poller, PollerHandle};
use crate::engine::protocol::{PollerCommand, PollerResponse};
use crate::engine::render_target::{ContainerTarget, HtmlFileTarget, RenderTargets};
use crate::engine::table::RosterRow;
use crate::model::combatant::{CombatantId, LabelList};
use crate::model::edit::EditSession;
use crate::model::roster::{RosterStore, Side};
use crate::ui::enemy_panel::draw_enemies;
use crate::ui::party_panel::draw_party;
use crate::ui::remote_panel::draw_remote_roster;
use crate::ui::settings::TrackerSettings;
use crate::ui::settings_io::save_settings;

/* =========================
   Tabs
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Battle,
    RemoteRoster,
}

/* =========================
   Actions
   ========================= */

/// Everything a click or an Enter key can ask of the tracker.
/// Panels collect these while drawing; they are applied after the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AdjustHealth { side: Side, id: CombatantId, delta: i32 },
    AddLabel { side: Side, id: CombatantId, list: LabelList, text: String },
    RemoveLabel { side: Side, id: CombatantId, list: LabelList, index: usize },
    AddEnemy,
    RemoveEnemy(CombatantId),
    BeginEdit(CombatantId),
    SaveEdit,
    DiscardEdit,
}

/// Text typed into a card's "add" boxes, kept per combatant.
#[derive(Debug, Default, Clone)]
pub struct Drafts {
    pub status: String,
    pub effect: String,
    pub item: String,
}

impl Drafts {
    pub fn for_list(&mut self, list: LabelList) -> &mut String {
        match list {
            LabelList::Status => &mut self.status,
            LabelList::Effects => &mut self.effect,
            LabelList::Inventory => &mut self.item,
        }
    }
}

/* =========================
   Tracker state
   ========================= */

pub struct TrackerState {
    pub roster: RosterStore,
    pub session: EditSession,
    pub drafts: HashMap<CombatantId, Drafts>,
    pub damage_amount: i32,
    pub heal_amount: i32,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            roster: RosterStore::seeded(),
            session: EditSession::default(),
            drafts: HashMap::new(),
            damage_amount: 10,
            heal_amount: 10,
        }
    }
}

impl TrackerState {
    pub fn apply(&mut self, action: Action) {
        debug!(?action, "applying action");
        match action {
            Action::AdjustHealth { side, id, delta } => {
                self.roster.adjust_health(side, id, delta);
            }
            Action::AddLabel { side, id, list, text } => {
                if self.roster.add_label(side, id, list, &text) {
                    self.drafts.entry(id).or_default().for_list(list).clear();
                }
            }
            Action::RemoveLabel { side, id, list, index } => {
                self.roster.remove_label(side, id, list, index);
            }
            Action::AddEnemy => {
                self.roster.add_enemy();
            }
            Action::RemoveEnemy(id) => {
                if self.roster.remove_enemy(id) {
                    self.drafts.remove(&id);
                }
            }
            Action::BeginEdit(id) => {
                if let Some(record) = self.roster.character(id) {
                    self.session.begin(record);
                }
            }
            Action::SaveEdit => {
                self.session.save(&mut self.roster);
            }
            Action::DiscardEdit => self.session.discard(),
        }
    }
}

/* =========================
   Theme
   ========================= */

#[derive(Clone)]
pub struct Theme {
    pub status: egui::Color32,
    pub effect: egui::Color32,
    pub item: egui::Color32,
    pub health: egui::Color32,
    pub enemy_health: egui::Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status: egui::Color32::from_rgb(150, 40, 40),
            effect: egui::Color32::from_rgb(40, 70, 140),
            item: egui::Color32::from_rgb(80, 80, 80),
            health: egui::Color32::from_rgb(200, 50, 50),
            enemy_health: egui::Color32::from_rgb(110, 40, 110),
        }
    }
}

impl Theme {
    pub fn chip_color(&self, list: LabelList) -> egui::Color32 {
        match list {
            LabelList::Status => self.status,
            LabelList::Effects => self.effect,
            LabelList::Inventory => self.item,
        }
    }
}

/* =========================
   App
   ========================= */

pub struct TrackerApp {
    tracker: TrackerState,
    theme: Theme,
    tab: Tab,

    settings: TrackerSettings,
    show_settings: bool,
    settings_note: Option<String>,

    remote_rows: Vec<RosterRow>,
    remote_view: ContainerTarget,
    poller: Option<PollerHandle>,
}

impl TrackerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: TrackerSettings) -> Self {
        let remote_view = ContainerTarget::new();
        let poller = start_poller(&cc.egui_ctx, &settings, &remote_view);

        Self {
            tracker: TrackerState::default(),
            theme: Theme::default(),
            tab: Tab::default(),
            settings,
            show_settings: false,
            settings_note: None,
            remote_rows: Vec::new(),
            remote_view,
            poller,
        }
    }

    fn drain_poller(&mut self) {
        let Some(poller) = &self.poller else {
            return;
        };

        while let Ok(resp) = poller.resp_rx.try_recv() {
            let cycle = resp.cycle();
            match resp {
                PollerResponse::TableRendered { rows, .. } => {
                    debug!(cycle, rows = rows.len(), "remote roster updated");
                    self.remote_rows = rows;
                }
                // Already logged by the poller; the last table stays up.
                PollerResponse::FetchFailed { error, .. } => {
                    debug!(cycle, %error, "keeping previous remote roster");
                }
            }
        }
    }

    fn refresh_remote(&self) {
        if let Some(poller) = &self.poller {
            let _ = poller.cmd_tx.send(PollerCommand::RefreshNow);
        }
    }

    fn draw_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;

        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("UI Scale");
                ui.add(egui::Slider::new(&mut self.settings.ui_scale, 0.75..=2.0));

                ui.separator();
                ui.label("Roster sheet URL");
                ui.text_edit_singleline(&mut self.settings.sheet_url);

                ui.label("Refresh every (seconds)");
                ui.add(egui::DragValue::new(&mut self.settings.poll_interval_secs).range(1..=3600));

                ui.small("URL and interval changes apply on next launch.");

                ui.separator();
                if ui.button("Save settings").clicked() {
                    self.settings_note = Some(match save_settings(&self.settings) {
                        Ok(path) => format!("Saved to {}", path.display()),
                        Err(e) => {
                            error!(error = %e, "failed to save settings");
                            format!("Could not save: {e}")
                        }
                    });
                }

                if let Some(note) = &self.settings_note {
                    ui.label(note);
                }
            });

        self.show_settings = open;
    }
}

fn start_poller(
    ctx: &egui::Context,
    settings: &TrackerSettings,
    remote_view: &ContainerTarget,
) -> Option<PollerHandle> {
    let source = match HttpRosterSource::new(settings.sheet_url.clone()) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, "could not build HTTP client; remote roster disabled");
            return None;
        }
    };

    let mut targets = RenderTargets::new(remote_view.clone());
    if let Some(dir) = &settings.html_output_dir {
        info!(dir = %dir.display(), "also writing character table to disk");
        targets = targets.with_mirror(HtmlFileTarget::new(dir.clone()));
    }

    let repaint_ctx = ctx.clone();
    Some(Poller::spawn(
        settings.poller_config(),
        Arc::new(source),
        targets,
        Arc::new(move || repaint_ctx.request_repaint()),
    ))
}

/* =========================
   egui App
   ========================= */

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        self.drain_poller();

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Battle, "Battle");
                ui.selectable_value(&mut self.tab, Tab::RemoteRoster, "Remote Roster");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                });
            });
        });

        let mut actions: Vec<Action> = Vec::new();

        match self.tab {
            Tab::Battle => {
                egui::SidePanel::right("enemies")
                    .resizable(true)
                    .default_width(320.0)
                    .min_width(240.0)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            draw_enemies(ui, &mut self.tracker, &self.theme, &mut actions);
                        });
                    });

                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        draw_party(ui, &mut self.tracker, &self.theme, &mut actions);
                    });
                });
            }
            Tab::RemoteRoster => {
                let mut refresh = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    refresh = draw_remote_roster(ui, &self.remote_rows, &self.remote_view);
                });
                if refresh {
                    self.refresh_remote();
                }
            }
        }

        for action in actions {
            self.tracker.apply(action);
        }

        if self.show_settings {
            self.draw_settings_window(ctx);
        }
    }
}

impl Drop for TrackerApp {
    fn drop(&mut self) {
        if let Some(poller) = &self.poller {
            let _ = poller.cmd_tx.send(PollerCommand::Shutdown);
        }
    }
}

/* =========================
   UI Helpers
   ========================= */

/// Draws a label list as removable chips plus an "add" row.
pub fn label_list(
    ui: &mut egui::Ui,
    heading: &str,
    hint: &str,
    color: egui::Color32,
    side: Side,
    id: CombatantId,
    list: LabelList,
    labels: &[String],
    draft: &mut String,
    actions: &mut Vec<Action>,
) {
    ui.label(egui::RichText::new(heading).strong());

    ui.horizontal_wrapped(|ui| {
        if labels.is_empty() {
            ui.weak("None");
        }
        for (index, text) in labels.iter().enumerate() {
            chip(ui, color, |ui| {
                ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                if ui.small_button("❌").clicked() {
                    actions.push(Action::RemoveLabel { side, id, list, index });
                }
            });
        }
    });

    ui.horizontal(|ui| {
        let response = ui.add_sized(
            [180.0, 20.0],
            egui::TextEdit::singleline(draft).hint_text(hint),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Add").clicked() || submitted {
            actions.push(Action::AddLabel {
                side,
                id,
                list,
                text: draft.clone(),
            });
        }
    });
}

pub fn chip(ui: &mut egui::Ui, color: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}

pub fn health_bar(ui: &mut egui::Ui, color: egui::Color32, health: i32, max_health: i32, fraction: f32) {
    ui.horizontal(|ui| {
        ui.label("❤");
        ui.add(
            egui::ProgressBar::new(fraction)
                .fill(color)
                .desired_width(ui.available_width() - 70.0)
                .text(format!("{health}/{max_health}")),
        );
    });
}

/// Damage / heal controls shared by party and enemy cards.
pub fn health_controls(
    ui: &mut egui::Ui,
    side: Side,
    id: CombatantId,
    damage_amount: &mut i32,
    heal_amount: &mut i32,
    actions: &mut Vec<Action>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.add(egui::DragValue::new(&mut *heal_amount).range(0..=999));
        if ui.button("Heal").clicked() {
            actions.push(Action::AdjustHealth { side, id, delta: *heal_amount });
        }

        ui.add_space(8.0);

        ui.add(egui::DragValue::new(&mut *damage_amount).range(0..=999));
        if ui.button("Damage").clicked() {
            actions.push(Action::AdjustHealth { side, id, delta: -*damage_amount });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_label_clears_draft_only_on_success() {
        let mut state = TrackerState::default();
        let jory = CombatantId(1);
        state.drafts.entry(jory).or_default().status = "Blessed".into();

        state.apply(Action::AddLabel {
            side: Side::Party,
            id: jory,
            list: LabelList::Status,
            text: "Blessed".into(),
        });
        assert_eq!(state.roster.character(jory).unwrap().status, vec!["Blessed".to_string()]);
        assert!(state.drafts[&jory].status.is_empty());

        state.drafts.entry(jory).or_default().effect = "  ".into();
        state.apply(Action::AddLabel {
            side: Side::Party,
            id: jory,
            list: LabelList::Effects,
            text: "  ".into(),
        });
        assert!(state.roster.character(jory).unwrap().effects.is_empty());
        assert_eq!(state.drafts[&jory].effect, "  ");
    }

    #[test]
    fn test_edit_round_trip_through_actions() {
        let mut state = TrackerState::default();
        state.apply(Action::BeginEdit(CombatantId(2)));
        assert!(state.session.is_editing(CombatantId(2)));

        if let Some(buf) = state.session.buffer_mut() {
            buf.name = "Valiant Skyfeather".into();
        }
        state.apply(Action::SaveEdit);

        assert!(!state.session.is_editing(CombatantId(2)));
        assert_eq!(state.roster.character(CombatantId(2)).unwrap().name, "Valiant Skyfeather");
    }

    #[test]
    fn test_begin_edit_unknown_id_stays_viewing() {
        let mut state = TrackerState::default();
        state.apply(Action::BeginEdit(CombatantId(77)));
        assert!(matches!(state.session, EditSession::Viewing));
    }

    #[test]
    fn test_enemy_lifecycle_through_actions() {
        let mut state = TrackerState::default();
        state.apply(Action::AddEnemy);
        state.apply(Action::AddEnemy);
        assert_eq!(state.roster.enemies().len(), 2);

        let first = state.roster.enemies()[0].id;
        state.apply(Action::AdjustHealth { side: Side::Enemies, id: first, delta: -20 });
        assert_eq!(state.roster.enemy(first).unwrap().health, 30);

        state.apply(Action::RemoveEnemy(first));
        assert_eq!(state.roster.enemies().len(), 1);
        assert_eq!(state.roster.enemies()[0].name, "Undead 2");
    }
}
