//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (select_file, reset, download, share, ...)
//! using the appropriate threading model for each operation type.

use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use crate::file_utils::ImageFile;
use crate::services::processing_service::lock;
use crate::services::{ClipboardShareTarget, DialogFileSaver, Notifier};
use crate::state::AppState;
use crate::ui::upload::submit_file;
use crate::widgets::{ComparisonSlider, Region};
use log::{debug, error};
use rfd::AsyncFileDialog;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, state: &AppState, notifier: Rc<dyn Notifier>) {
    // File selection handler
    // Uses slint::spawn_local because AsyncFileDialog must run on the main thread
    ui.global::<crate::Logic>().on_select_file({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        let notifier = notifier.clone();
        move || {
            if !lock(&state.session).accepts_upload() {
                debug!("Upload ignored while an image is being processed");
                return;
            }

            let ui_handle = ui_handle.clone();
            let state = state.clone();
            let notifier = notifier.clone();
            let result = slint::spawn_local(async move {
                // AsyncFileDialogはメインスレッドで実行する必要があるのでrayon禁止。
                let Some(file_handle) = AsyncFileDialog::new()
                    .add_filter("Images", &SUPPORTED_IMAGE_EXTENSIONS)
                    .pick_file()
                    .await
                else {
                    debug!("No file selected");
                    return;
                };

                let bytes = file_handle.read().await;
                let Some(file) = ImageFile::from_bytes(file_handle.file_name(), bytes) else {
                    debug!("Selected file is empty");
                    return;
                };

                submit_file(&ui_handle, &state, &notifier, file);
            });
            if let Err(e) = result {
                error!("Failed to open file dialog: {}", e);
            }
        }
    });

    // Reset handler, only meaningful on the complete screen
    ui.global::<crate::Logic>().on_reset({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            if let Err(e) = lock(&state.session).reset() {
                debug!("Reset ignored: {}", e);
                return;
            }
            state.unmount_slider();
            if let Some(ui) = ui_handle.upgrade() {
                crate::ui::show_idle(&ui);
            }
        }
    });

    // Download handler, the save dialog also needs the main thread
    ui.global::<crate::Logic>().on_download({
        let state = state.clone();
        let notifier = notifier.clone();
        move || {
            let exports = state.exports.clone();
            let notifier = notifier.clone();
            let result = slint::spawn_local(async move {
                if let Err(e) = exports.download(&DialogFileSaver, &*notifier).await {
                    debug!("Download did not complete: {}", e);
                }
            });
            if let Err(e) = result {
                error!("Failed to start download: {}", e);
            }
        }
    });

    ui.global::<crate::Logic>().on_share({
        let state = state.clone();
        let notifier = notifier.clone();
        move || {
            let target = ClipboardShareTarget::new(state.config.share_mode);
            if let Err(e) = state.exports.share(&target, &*notifier) {
                debug!("Share did not complete: {}", e);
            }
        }
    });

    ui.global::<crate::Logic>().on_toggle_theme({
        let theme = state.theme.clone();
        move || {
            theme.toggle();
        }
    });

    // Press inside a comparison slider; moves and releases come from the pointer hub
    ui.global::<crate::Logic>().on_slider_pressed({
        let state = state.clone();
        move |kind, left, width| {
            if let Some(slider) = slider_slot(&state, kind).borrow().as_ref() {
                slider.set_region(Region { left, width });
                slider.begin_drag();
            }
        }
    });

    // Layout changes, possibly in the middle of a drag
    ui.global::<crate::Logic>().on_slider_resized({
        let state = state.clone();
        move |kind, left, width| {
            if let Some(slider) = slider_slot(&state, kind).borrow().as_ref() {
                slider.set_region(Region { left, width });
            }
        }
    });

    mount_demo_slider(ui, state);
}

fn slider_slot(state: &AppState, kind: crate::SliderKind) -> &Rc<RefCell<Option<ComparisonSlider>>> {
    match kind {
        crate::SliderKind::Processed => &state.slider,
        crate::SliderKind::Demo => &state.demo_slider,
    }
}

/// Mounts the sample comparison shown above the upload zone.
fn mount_demo_slider(ui: &crate::AppWindow, state: &AppState) {
    let ui_handle = ui.as_weak();
    let slider = ComparisonSlider::mount(&state.pointer_hub, move |position| {
        if let Some(ui) = ui_handle.upgrade() {
            crate::ui::set_demo_position(&ui, position);
        }
    });
    *state.demo_slider.borrow_mut() = Some(slider);
}
