// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod config;
mod error;
mod file_utils;
mod image_loader;
mod resource;
mod services;
mod startup;
mod state;
mod theme;
mod ui;
mod widgets;

use slint::ComponentHandle;
use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let config = config::AppConfig::from_env()?;
    log::info!("Background removal endpoint: {}", config.endpoint);

    let app = AppWindow::new()?;
    let app_state = state::AppState::new(config);
    let notifier: Rc<dyn services::Notifier> = Rc::new(ui::ToastNotifier::new(
        app.as_weak(),
        app_state.config.toast_duration,
    ));

    let _theme_binding = ui::bind_theme(&app, &app_state.theme);

    // Setup all UI event handlers
    ui::setup_handlers(&app, &app_state, notifier.clone());
    startup::configure_startup_opening(&app, &app_state, notifier);

    app.run()?;

    app_state.teardown();

    Ok(())
}
