pub mod app;
pub mod enemy_panel;
pub mod party_panel;
pub mod remote_panel;
pub mod settings;
pub mod settings_io;
