use rand::Rng;
use tracing::debug;

use crate::model::combatant::{Combatant, CombatantId, LabelList, Position};

/// Which roster a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Party,
    Enemies,
}

/// Single owner of the party and enemy collections.
///
/// Every mutation goes through a method here. Unknown ids, empty text and
/// stale indices are silently ignored; the returned `bool` only tells the
/// caller whether anything changed.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    characters: Vec<Combatant>,
    enemies: Vec<Combatant>,
}

impl RosterStore {
    pub fn new(characters: Vec<Combatant>) -> Self {
        Self {
            characters,
            enemies: Vec::new(),
        }
    }

    /// The fixed sample party every session starts with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Combatant::character(
                CombatantId(1),
                "Jory",
                "Dragonborn Cleric",
                100,
                &["Mace", "Shield", "Holy Symbol"],
                Position::Front,
            ),
            Combatant::character(
                CombatantId(2),
                "Valiant",
                "Aarakocra Wizard",
                80,
                &["Staff", "Spellbook"],
                Position::Back,
            ),
            Combatant::character(
                CombatantId(3),
                "Dahlia",
                "Changeling Rogue",
                90,
                &["Bow", "Arrows (100)", "Rapier"],
                Position::Mid,
            ),
        ])
    }

    pub fn characters(&self) -> &[Combatant] {
        &self.characters
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn character(&self, id: CombatantId) -> Option<&Combatant> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn enemy(&self, id: CombatantId) -> Option<&Combatant> {
        self.enemies.iter().find(|e| e.id == id)
    }

    fn find_mut(&mut self, side: Side, id: CombatantId) -> Option<&mut Combatant> {
        let list = match side {
            Side::Party => &mut self.characters,
            Side::Enemies => &mut self.enemies,
        };
        list.iter_mut().find(|c| c.id == id)
    }

    fn contains_id(&self, id: CombatantId) -> bool {
        self.character(id).is_some() || self.enemy(id).is_some()
    }

    /* =========================
       Health
       ========================= */

    pub fn adjust_health(&mut self, side: Side, id: CombatantId, delta: i32) -> bool {
        let Some(c) = self.find_mut(side, id) else {
            return false;
        };
        let changed = c.adjust_health(delta);
        debug!(?side, %id, delta, health = c.health, max = c.max_health, "adjusted health");
        changed
    }

    /* =========================
       Status / effects / inventory
       ========================= */

    pub fn add_label(&mut self, side: Side, id: CombatantId, list: LabelList, text: &str) -> bool {
        if side == Side::Enemies && list == LabelList::Inventory {
            return false;
        }
        let Some(c) = self.find_mut(side, id) else {
            return false;
        };
        let added = c.push_label(list, text);
        if added {
            debug!(?side, %id, list = list.short_name(), text = text.trim(), "added label");
        }
        added
    }

    pub fn remove_label(
        &mut self,
        side: Side,
        id: CombatantId,
        list: LabelList,
        index: usize,
    ) -> bool {
        let Some(c) = self.find_mut(side, id) else {
            return false;
        };
        let removed = c.remove_label(list, index);
        if removed {
            debug!(?side, %id, list = list.short_name(), index, "removed label");
        }
        removed
    }

    /* =========================
       Enemies
       ========================= */

    /// Adds a default enemy named after its place in the list.
    pub fn add_enemy(&mut self) -> CombatantId {
        let id = self.generate_id();
        let name = format!("Undead {}", self.enemies.len() + 1);
        debug!(%id, %name, "added enemy");
        self.enemies.push(Combatant::enemy(id, name));
        id
    }

    pub fn remove_enemy(&mut self, id: CombatantId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id != id);
        let removed = self.enemies.len() != before;
        if removed {
            debug!(%id, "removed enemy");
        }
        removed
    }

    fn generate_id(&self) -> CombatantId {
        let mut rng = rand::thread_rng();
        loop {
            let id = CombatantId(rng.gen_range(1_000..u64::MAX));
            if !self.contains_id(id) {
                return id;
            }
        }
    }

    /* =========================
       Edit commit
       ========================= */

    /// Overwrites the character with the same id. Unknown ids are ignored.
    pub fn replace_character(&mut self, record: Combatant) -> bool {
        let Some(slot) = self.characters.iter_mut().find(|c| c.id == record.id) else {
            return false;
        };
        debug!(id = %record.id, name = %record.name, "saved character");
        *slot = record;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_party() {
        let roster = RosterStore::seeded();
        let names: Vec<&str> = roster.characters().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Jory", "Valiant", "Dahlia"]);
        assert!(roster.enemies().is_empty());

        let dahlia = roster.character(CombatantId(3)).unwrap();
        assert_eq!(dahlia.position, Position::Mid);
        assert_eq!(dahlia.health, 90);
        assert_eq!(dahlia.inventory.len(), 3);
    }

    #[test]
    fn test_damage_and_heal_scenario() {
        let mut roster = RosterStore::seeded();
        let valiant = CombatantId(2);
        roster.adjust_health(Side::Party, valiant, -30);
        roster.adjust_health(Side::Party, valiant, 10);

        let c = roster.character(valiant).unwrap();
        assert_eq!((c.health, c.max_health), (60, 80));
    }

    #[test]
    fn test_adjust_health_only_touches_target() {
        let mut roster = RosterStore::seeded();
        roster.adjust_health(Side::Party, CombatantId(1), -1000);
        assert_eq!(roster.character(CombatantId(1)).unwrap().health, 0);
        assert_eq!(roster.character(CombatantId(2)).unwrap().health, 80);
        assert_eq!(roster.character(CombatantId(3)).unwrap().health, 90);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut roster = RosterStore::seeded();
        assert!(!roster.adjust_health(Side::Party, CombatantId(99), -5));
        assert!(!roster.add_label(Side::Party, CombatantId(99), LabelList::Status, "Prone"));
        assert!(!roster.remove_enemy(CombatantId(1)));
    }

    #[test]
    fn test_add_two_enemies() {
        let mut roster = RosterStore::seeded();
        roster.add_enemy();
        roster.add_enemy();

        let enemies = roster.enemies();
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[0].name, "Undead 1");
        assert_eq!(enemies[1].name, "Undead 2");
        for e in enemies {
            assert_eq!((e.health, e.max_health), (50, 50));
            assert_eq!(e.position, Position::Front);
        }
        assert_ne!(enemies[0].id, enemies[1].id);
    }

    #[test]
    fn test_enemy_ids_unique_across_rosters() {
        let mut roster = RosterStore::seeded();
        let ids: Vec<CombatantId> = (0..200).map(|_| roster.add_enemy()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert!(ids.iter().all(|id| roster.character(*id).is_none()));
    }

    #[test]
    fn test_remove_enemy_by_id() {
        let mut roster = RosterStore::default();
        let first = roster.add_enemy();
        let second = roster.add_enemy();
        assert!(roster.remove_enemy(first));
        assert_eq!(roster.enemies().len(), 1);
        assert_eq!(roster.enemies()[0].id, second);

        // Names follow the current count, so a later enemy can repeat one.
        roster.add_enemy();
        assert_eq!(roster.enemies()[1].name, "Undead 2");
    }

    #[test]
    fn test_enemy_health_and_status() {
        let mut roster = RosterStore::default();
        let id = roster.add_enemy();
        roster.adjust_health(Side::Enemies, id, -70);
        assert_eq!(roster.enemy(id).unwrap().health, 0);
        assert!(roster.enemy(id).unwrap().is_down());

        assert!(roster.add_label(Side::Enemies, id, LabelList::Status, "Frightened"));
        assert!(!roster.add_label(Side::Enemies, id, LabelList::Inventory, "Bone"));
        assert!(roster.enemy(id).unwrap().inventory.is_empty());
    }

    #[test]
    fn test_inventory_add_and_remove() {
        let mut roster = RosterStore::seeded();
        let jory = CombatantId(1);
        assert!(roster.add_label(Side::Party, jory, LabelList::Inventory, "Potion"));
        assert!(!roster.add_label(Side::Party, jory, LabelList::Inventory, ""));
        assert!(roster.remove_label(Side::Party, jory, LabelList::Inventory, 1));

        let inv = &roster.character(jory).unwrap().inventory;
        assert_eq!(inv, &vec!["Mace".to_string(), "Holy Symbol".to_string(), "Potion".to_string()]);
        assert!(!roster.remove_label(Side::Party, jory, LabelList::Inventory, 3));
    }

    #[test]
    fn test_replace_character_only_matching_id() {
        let mut roster = RosterStore::seeded();
        let before = roster.clone();

        let mut edited = roster.character(CombatantId(2)).unwrap().clone();
        edited.name = "Valiant the Bold".into();
        assert!(roster.replace_character(edited));

        assert_eq!(roster.character(CombatantId(2)).unwrap().name, "Valiant the Bold");
        assert_eq!(roster.character(CombatantId(1)), before.character(CombatantId(1)));
        assert_eq!(roster.character(CombatantId(3)), before.character(CombatantId(3)));

        let stranger = Combatant::enemy(CombatantId(42), "Ghoul".into());
        assert!(!roster.replace_character(stranger));
        assert_eq!(roster.characters().len(), 3);
    }
}
