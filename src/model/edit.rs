use crate::model::combatant::{Combatant, CombatantId};
use crate::model::roster::RosterStore;

/// Working copy of one character while it is being edited.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    record: Combatant,
    pub name: String,
    pub class: String,
    pub max_health_input: String,
}

impl EditBuffer {
    pub fn new(record: &Combatant) -> Self {
        Self {
            record: record.clone(),
            name: record.name.clone(),
            class: record.class.clone().unwrap_or_default(),
            max_health_input: record.max_health.to_string(),
        }
    }

    pub fn id(&self) -> CombatantId {
        self.record.id
    }

    /// The record as it would be committed right now.
    pub fn to_record(&self) -> Combatant {
        let mut record = self.record.clone();
        record.name = self.name.clone();
        let class = self.class.trim();
        record.class = if class.is_empty() {
            None
        } else {
            Some(class.to_string())
        };
        record.set_max_health(parse_leading_int(&self.max_health_input));
        record
    }
}

/// Reads an optional sign and the leading digits, ignoring whatever follows.
/// Anything without a leading number reads as 0.
pub fn parse_leading_int(input: &str) -> i32 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    let digits = &digits[..end];
    let value = if digits.is_empty() {
        0
    } else {
        // Only digits remain, so a failed parse means the number is too long.
        digits.parse::<i64>().unwrap_or(i64::MAX)
    };
    let value = if negative { -value } else { value };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Viewing or editing, with at most one character in the edit buffer.
#[derive(Debug, Clone, Default)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing(EditBuffer),
}

impl EditSession {
    /// Starts editing `record`, dropping any buffer already open.
    pub fn begin(&mut self, record: &Combatant) {
        *self = EditSession::Editing(EditBuffer::new(record));
    }

    pub fn is_editing(&self, id: CombatantId) -> bool {
        matches!(self, EditSession::Editing(buf) if buf.id() == id)
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        match self {
            EditSession::Editing(buf) => Some(buf),
            EditSession::Viewing => None,
        }
    }

    /// Commits the buffer over the matching character and returns to viewing.
    pub fn save(&mut self, roster: &mut RosterStore) -> bool {
        match std::mem::take(self) {
            EditSession::Editing(buf) => roster.replace_character(buf.to_record()),
            EditSession::Viewing => false,
        }
    }

    pub fn discard(&mut self) {
        *self = EditSession::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::roster::Side;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("120"), 120);
        assert_eq!(parse_leading_int(" 42hp"), 42);
        assert_eq!(parse_leading_int("-7"), -7);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int("99999999999"), i32::MAX);
        assert_eq!(parse_leading_int("99999999999999999999"), i32::MAX);
        assert_eq!(parse_leading_int("-99999999999999999999 hp"), i32::MIN);
        assert_eq!(parse_leading_int("-"), 0);
    }

    #[test]
    fn test_save_commits_only_matching_character() {
        let mut roster = RosterStore::seeded();
        let before = roster.clone();
        let mut session = EditSession::default();

        session.begin(roster.character(CombatantId(1)).unwrap());
        assert!(session.is_editing(CombatantId(1)));
        assert!(!session.is_editing(CombatantId(2)));

        let buf = session.buffer_mut().unwrap();
        buf.name = "Jory Stormscale".into();
        buf.class = "Dragonborn Paladin".into();

        assert!(session.save(&mut roster));
        assert!(matches!(session, EditSession::Viewing));

        let jory = roster.character(CombatantId(1)).unwrap();
        assert_eq!(jory.name, "Jory Stormscale");
        assert_eq!(jory.class.as_deref(), Some("Dragonborn Paladin"));
        assert_eq!(roster.character(CombatantId(2)), before.character(CombatantId(2)));
        assert_eq!(roster.character(CombatantId(3)), before.character(CombatantId(3)));
    }

    #[test]
    fn test_edits_stay_in_buffer_until_save() {
        let mut roster = RosterStore::seeded();
        let mut session = EditSession::default();
        session.begin(roster.character(CombatantId(2)).unwrap());
        session.buffer_mut().unwrap().name = "Changed".into();

        assert_eq!(roster.character(CombatantId(2)).unwrap().name, "Valiant");

        session.discard();
        assert!(!session.save(&mut roster));
        assert_eq!(roster.character(CombatantId(2)).unwrap().name, "Valiant");
    }

    #[test]
    fn test_begin_replaces_previous_buffer() {
        let roster = RosterStore::seeded();
        let mut session = EditSession::default();
        session.begin(roster.character(CombatantId(1)).unwrap());
        session.begin(roster.character(CombatantId(3)).unwrap());
        assert!(!session.is_editing(CombatantId(1)));
        assert!(session.is_editing(CombatantId(3)));
    }

    #[test]
    fn test_lowering_max_health_clamps_health() {
        let mut roster = RosterStore::seeded();
        let mut session = EditSession::default();
        session.begin(roster.character(CombatantId(1)).unwrap());
        session.buffer_mut().unwrap().max_health_input = "60".into();
        session.save(&mut roster);

        let jory = roster.character(CombatantId(1)).unwrap();
        assert_eq!((jory.health, jory.max_health), (60, 60));

        session.begin(jory);
        session.buffer_mut().unwrap().max_health_input = "not a number".into();
        session.save(&mut roster);
        let jory = roster.character(CombatantId(1)).unwrap();
        assert_eq!((jory.health, jory.max_health), (0, 0));
    }

    #[test]
    fn test_save_overwrites_changes_made_while_editing() {
        let mut roster = RosterStore::seeded();
        let mut session = EditSession::default();
        session.begin(roster.character(CombatantId(3)).unwrap());
        roster.adjust_health(Side::Party, CombatantId(3), -40);
        session.save(&mut roster);

        // The buffer was taken before the damage, so saving restores it.
        assert_eq!(roster.character(CombatantId(3)).unwrap().health, 90);
    }
}
