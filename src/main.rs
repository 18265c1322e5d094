mod engine;
mod model;
mod ui;

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "battle_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ui::settings_io::load_settings();
    tracing::info!(
        sheet_url = %settings.sheet_url,
        interval_secs = settings.poll_interval_secs,
        "Starting battle tracker"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Battle Tracker")
            .with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Battle Tracker",
        options,
        Box::new(move |cc| Ok(Box::new(ui::app::TrackerApp::new(cc, settings)))),
    )
}
