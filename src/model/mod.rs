pub mod combatant;
pub mod edit;
pub mod roster;
