//! Upload flow: file in, screen transitions and slider mount out.

use crate::file_utils::{self, ImageFile};
use crate::services::processing_service::lock;
use crate::services::{Notifier, ProcessOutcome};
use crate::state::{AppState, ScreenState};
use crate::ui::image_display::{ImageSlot, display_resource};
use crate::widgets::ComparisonSlider;
use async_compat::Compat;
use log::{debug, error, warn};
use std::path::PathBuf;
use std::rc::Rc;

/// Starts processing `file` if the upload screen is active; ignores it otherwise.
pub fn submit_file(
    ui: &slint::Weak<crate::AppWindow>,
    state: &AppState,
    notifier: &Rc<dyn Notifier>,
    file: ImageFile,
) {
    if !file.is_image() {
        debug!("{} is not recognised as an image, uploading anyway", file.name());
    }

    let pending = match state.processing.start(file) {
        Ok(pending) => pending,
        Err(e) => {
            debug!("Ignoring selected file: {}", e);
            return;
        }
    };

    if let Some(ui) = ui.upgrade() {
        crate::ui::set_original_image(&ui, None);
        crate::ui::set_processed_image(&ui, None);
        crate::ui::set_stage(&ui, ScreenState::Processing);
    }
    display_resource(
        ui.clone(),
        state.session.clone(),
        pending.original().clone(),
        ImageSlot::Original,
    );

    let service = state.processing.clone();
    let task_state = state.clone();
    let task_notifier = notifier.clone();
    let ui_handle = ui.clone();

    // reqwest needs a tokio context; Compat provides one on the Slint executor.
    let task = slint::spawn_local(Compat::new(async move {
        let outcome = service.finish(pending, &*task_notifier).await;
        apply_outcome(&ui_handle, &task_state, outcome);
    }));

    match task {
        Ok(handle) => {
            *state.in_flight.borrow_mut() = Some(handle);
        }
        Err(e) => {
            error!("Failed to start background removal: {}", e);
            lock(&state.session).teardown();
            if let Some(ui) = ui.upgrade() {
                crate::ui::show_idle(&ui);
            }
        }
    }
}

/// Reads a dropped or command-line path and submits it.
pub fn submit_path(
    ui: slint::Weak<crate::AppWindow>,
    state: AppState,
    notifier: Rc<dyn Notifier>,
    path: PathBuf,
) {
    let result = slint::spawn_local(async move {
        if let Some(file) = file_utils::read_image_file(&path).await {
            submit_file(&ui, &state, &notifier, file);
        }
    });
    if let Err(e) = result {
        error!("Failed to read dropped file: {}", e);
    }
}

/// Applies a finished request to the app state and returns the screen to show.
///
/// On completion the comparison slider is mounted and reports its positions to
/// `on_slider_change`. A discarded request changes nothing.
fn settle_outcome<F>(state: &AppState, outcome: &ProcessOutcome, on_slider_change: F) -> Option<ScreenState>
where
    F: Fn(f32) + 'static,
{
    match outcome {
        ProcessOutcome::Completed { .. } => {
            state.in_flight.borrow_mut().take();
            let slider = ComparisonSlider::mount(&state.pointer_hub, on_slider_change);
            *state.slider.borrow_mut() = Some(slider);
            Some(ScreenState::Complete)
        }
        ProcessOutcome::Failed(e) => {
            state.in_flight.borrow_mut().take();
            warn!("Returning to upload screen: {}", e);
            Some(ScreenState::Idle)
        }
        ProcessOutcome::Discarded => None,
    }
}

fn apply_outcome(ui: &slint::Weak<crate::AppWindow>, state: &AppState, outcome: ProcessOutcome) {
    let slider_ui = ui.clone();
    let screen = settle_outcome(state, &outcome, move |position| {
        if let Some(ui) = slider_ui.upgrade() {
            crate::ui::set_slider_position(&ui, position);
        }
    });
    let Some(window) = ui.upgrade() else {
        return;
    };

    match (screen, outcome) {
        (Some(ScreenState::Complete), ProcessOutcome::Completed { processed, .. }) => {
            crate::ui::set_stage(&window, ScreenState::Complete);
            display_resource(
                ui.clone(),
                state.session.clone(),
                processed,
                ImageSlot::Processed,
            );
        }
        (Some(ScreenState::Idle), _) => crate::ui::show_idle(&window),
        _ => {}
    }
}
