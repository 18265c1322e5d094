use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombatantId(pub u64);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/* =========================
   Position
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Front,
    Mid,
    Back,
}

impl Default for Position {
    fn default() -> Self {
        Position::Front
    }
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Front => "front",
            Position::Mid => "mid",
            Position::Back => "back",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* =========================
   Label lists
   ========================= */

/// Which free-text list on a combatant an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelList {
    Status,
    Effects,
    Inventory,
}

impl LabelList {
    pub fn short_name(&self) -> &'static str {
        match self {
            LabelList::Status => "status",
            LabelList::Effects => "effects",
            LabelList::Inventory => "inventory",
        }
    }
}

/* =========================
   Combatant
   ========================= */

pub const ENEMY_DEFAULT_HEALTH: i32 = 50;

/// A party character or an enemy. Enemies keep an empty inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub class: Option<String>,
    pub health: i32,
    pub max_health: i32,
    pub status: Vec<String>,
    pub effects: Vec<String>,
    pub inventory: Vec<String>,
    pub position: Position,
}

impl Combatant {
    pub fn character(
        id: CombatantId,
        name: &str,
        class: &str,
        max_health: i32,
        inventory: &[&str],
        position: Position,
    ) -> Self {
        let max_health = max_health.max(0);
        Self {
            id,
            name: name.to_string(),
            class: Some(class.to_string()),
            health: max_health,
            max_health,
            status: Vec::new(),
            effects: Vec::new(),
            inventory: inventory.iter().map(|i| i.to_string()).collect(),
            position,
        }
    }

    pub fn enemy(id: CombatantId, name: String) -> Self {
        Self {
            id,
            name,
            class: None,
            health: ENEMY_DEFAULT_HEALTH,
            max_health: ENEMY_DEFAULT_HEALTH,
            status: Vec::new(),
            effects: Vec::new(),
            inventory: Vec::new(),
            position: Position::Front,
        }
    }

    /// Applies a signed delta, clamped to `[0, max_health]`.
    /// Returns true if health actually changed.
    pub fn adjust_health(&mut self, delta: i32) -> bool {
        let updated = self.health.saturating_add(delta).min(self.max_health).max(0);
        let changed = updated != self.health;
        self.health = updated;
        changed
    }

    pub fn set_max_health(&mut self, value: i32) {
        self.max_health = value.max(0);
        self.health = self.health.min(self.max_health).max(0);
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn is_down(&self) -> bool {
        self.health == 0
    }

    pub fn labels(&self, list: LabelList) -> &[String] {
        match list {
            LabelList::Status => &self.status,
            LabelList::Effects => &self.effects,
            LabelList::Inventory => &self.inventory,
        }
    }

    fn labels_mut(&mut self, list: LabelList) -> &mut Vec<String> {
        match list {
            LabelList::Status => &mut self.status,
            LabelList::Effects => &mut self.effects,
            LabelList::Inventory => &mut self.inventory,
        }
    }

    /// Appends trimmed text; empty input is ignored.
    pub fn push_label(&mut self, list: LabelList, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.labels_mut(list).push(text.to_string());
        true
    }

    /// Removes the entry at `index`, keeping the order of the rest.
    /// Out-of-range indices are ignored.
    pub fn remove_label(&mut self, list: LabelList, index: usize) -> bool {
        let labels = self.labels_mut(list);
        if index >= labels.len() {
            return false;
        }
        labels.remove(index);
        true
    }
}
