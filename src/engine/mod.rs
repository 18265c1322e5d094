pub mod error;
pub mod poller;
pub mod protocol;
pub mod render_target;
pub mod table;
