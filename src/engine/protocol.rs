use crate::engine::table::RosterRow;

pub enum PollerCommand {
    /// Run one extra cycle now without moving the regular schedule.
    RefreshNow,
    Shutdown,
}

pub enum PollerResponse {
    TableRendered {
        cycle: u64,
        rows: Vec<RosterRow>,
    },

    FetchFailed {
        cycle: u64,
        error: String,
    },
}

impl PollerResponse {
    pub fn cycle(&self) -> u64 {
        match self {
            PollerResponse::TableRendered { cycle, .. } => *cycle,
            PollerResponse::FetchFailed { cycle, .. } => *cycle,
        }
    }
}
