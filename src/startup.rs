use i_slint_backend_winit::WinitWindowAccessor;
use i_slint_backend_winit::winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use i_slint_backend_winit::EventResult;
use slint::ComponentHandle;
use std::path::PathBuf;
use std::rc::Rc;

use crate::services::Notifier;
use crate::services::processing_service::lock;
use crate::state::AppState;
use crate::ui::upload::submit_path;
use crate::widgets::{PointerEvent, PointerSource};

fn startup_image_from_args() -> Option<PathBuf> {
    let candidates = std::env::args_os().skip(1).filter_map(|arg| {
        if arg.to_string_lossy().starts_with('-') {
            None
        } else {
            Some(PathBuf::from(arg))
        }
    });
    crate::file_utils::first_supported(candidates)
}

/// Routes window-level winit events.
///
/// Cursor moves and button/touch releases go to the pointer hub no matter which
/// element is under the pointer, so a drag keeps tracking outside the slider
/// and outside the window. Dropped files start processing.
fn setup_window_hooks(app: &crate::AppWindow, app_state: &AppState, notifier: &Rc<dyn Notifier>) {
    let ui_handle = app.as_weak();
    let state = app_state.clone();
    let hub = app_state.pointer_hub.clone();
    let notifier = notifier.clone();

    app.window().on_winit_window_event(move |window, event| {
        if !matches!(event, WindowEvent::DroppedFile(_)) {
            state.drops.borrow_mut().end_drop();
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                hub.dispatch(PointerEvent::Move {
                    x: position.x as f32 / window.scale_factor(),
                    source: PointerSource::Mouse,
                });
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                hub.dispatch(PointerEvent::Release {
                    source: PointerSource::Mouse,
                });
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Moved => hub.dispatch(PointerEvent::Move {
                    x: touch.location.x as f32 / window.scale_factor(),
                    source: PointerSource::Touch,
                }),
                TouchPhase::Ended | TouchPhase::Cancelled => hub.dispatch(PointerEvent::Release {
                    source: PointerSource::Touch,
                }),
                TouchPhase::Started => {}
            },
            WindowEvent::HoveredFile(_) => {
                if let Some(ui) = ui_handle.upgrade() {
                    crate::ui::set_drop_hover(&ui, true);
                }
            }
            WindowEvent::HoveredFileCancelled => {
                if let Some(ui) = ui_handle.upgrade() {
                    crate::ui::set_drop_hover(&ui, false);
                }
            }
            WindowEvent::DroppedFile(path) => {
                if let Some(ui) = ui_handle.upgrade() {
                    crate::ui::set_drop_hover(&ui, false);
                }
                let accepts_upload = lock(&state.session).accepts_upload();
                let accepted = state.drops.borrow_mut().accept(path, accepts_upload);
                if let Some(path) = accepted {
                    submit_path(ui_handle.clone(), state.clone(), notifier.clone(), path);
                }
            }
            _ => {}
        }

        EventResult::Propagate
    });
}

pub fn configure_startup_opening(
    app: &crate::AppWindow,
    app_state: &AppState,
    notifier: Rc<dyn Notifier>,
) {
    setup_window_hooks(app, app_state, &notifier);

    if let Some(path) = startup_image_from_args() {
        submit_path(app.as_weak(), app_state.clone(), notifier, path);
    }
}
