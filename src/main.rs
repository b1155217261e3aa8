//! Murmur - Voice assistant interface
//!
//! Main entry point for the Murmur application.

use anyhow::Result;
use eframe::egui;
use murmur::adapter::{EventAdapter, WaveSurface};
use murmur::config::AppConfig;
use murmur::session::ScriptedSession;
use murmur::state::StateStore;
use murmur::ui::MurmurApp;
use murmur::utils::UserPrefs;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murmur=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Murmur voice assistant");

    let config = AppConfig::from_env();
    if let Err(reason) = config.validate() {
        anyhow::bail!("Invalid configuration: {reason}");
    }

    let prefs = UserPrefs::load(&UserPrefs::default_path());
    let store = StateStore::new(prefs.theme);

    let (driver, session) = ScriptedSession::new();
    let worker = driver.start();

    let surface = WaveSurface::new();
    let adapter = EventAdapter::new(
        session.clone(),
        store.clone(),
        Some(Box::new(surface.clone())),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Murmur"),
        ..Default::default()
    };

    eframe::run_native(
        "Murmur",
        options,
        Box::new(move |cc| {
            Ok(Box::new(MurmurApp::new(
                cc,
                config,
                store,
                session,
                adapter,
                surface,
                Some(worker),
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with error: {err}"))
}
