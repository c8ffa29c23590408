//! Helper functions to set ViewState properties in a grouped manner.

use crate::state::ScreenState;
use crate::theme::ThemeMode;
use slint::ComponentHandle;

fn stage_for(state: ScreenState) -> crate::ScreenStage {
    match state {
        ScreenState::Idle => crate::ScreenStage::Idle,
        ScreenState::Processing => crate::ScreenStage::Processing,
        ScreenState::Complete => crate::ScreenStage::Complete,
    }
}

/// Switches the visible screen. The upload zone is disabled outside `Idle`.
pub fn set_stage(ui: &crate::AppWindow, state: ScreenState) {
    let view_state = ui.global::<crate::ViewState>();
    view_state.set_stage(stage_for(state));
    view_state.set_upload_enabled(state == ScreenState::Idle);
}

/// Sets the before image, or clears it with `None`.
pub fn set_original_image(ui: &crate::AppWindow, image: Option<slint::Image>) {
    let view_state = ui.global::<crate::ViewState>();
    view_state.set_has_original(image.is_some());
    view_state.set_original_image(image.unwrap_or_default());
}

/// Sets the after image, or clears it with `None`.
pub fn set_processed_image(ui: &crate::AppWindow, image: Option<slint::Image>) {
    let view_state = ui.global::<crate::ViewState>();
    view_state.set_has_processed(image.is_some());
    view_state.set_processed_image(image.unwrap_or_default());
}

/// Returns to the upload screen with no images.
pub fn show_idle(ui: &crate::AppWindow) {
    set_stage(ui, ScreenState::Idle);
    set_original_image(ui, None);
    set_processed_image(ui, None);
}

pub fn set_slider_position(ui: &crate::AppWindow, position: f32) {
    ui.global::<crate::ViewState>().set_slider_position(position);
}

pub fn set_demo_position(ui: &crate::AppWindow, position: f32) {
    ui.global::<crate::ViewState>().set_demo_position(position);
}

pub fn set_drop_hover(ui: &crate::AppWindow, hovering: bool) {
    ui.global::<crate::ViewState>().set_drop_hover(hovering);
}

/// Sets all toast properties at once.
///
/// Groups: toast-message, toast-error, toast-visible
pub fn set_toast(ui: &crate::AppWindow, message: &str, is_error: bool, visible: bool) {
    let view_state = ui.global::<crate::ViewState>();
    view_state.set_toast_message(message.into());
    view_state.set_toast_error(is_error);
    view_state.set_toast_visible(visible);
}

pub fn apply_theme(ui: &crate::AppWindow, mode: ThemeMode) {
    ui.global::<crate::Palette>().set_dark_mode(mode.is_dark());
}
