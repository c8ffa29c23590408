//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - `slint::spawn_local`: UI非同期処理（ファイルダイアログ、`async_compat::Compat`で包んだ背景除去リクエスト）
//! - `rayon::spawn`: CPU集約的処理（プレビュー画像のデコード）
//! - `slint::invoke_from_event_loop`: rayonからUIスレッドへの結果返却時に使用

pub mod handlers;
pub mod image_display;
mod state_helpers;
mod toast;
pub mod upload;

use crate::theme::{ThemeBinding, ThemeContext};

pub use handlers::setup_handlers;
pub use state_helpers::*;
pub use toast::ToastNotifier;

/// Keeps the Palette global in sync with `theme` while the binding lives.
pub fn bind_theme(ui: &crate::AppWindow, theme: &ThemeContext) -> ThemeBinding {
    let ui_handle = slint::ComponentHandle::as_weak(ui);
    theme.attach(move |mode| {
        if let Some(ui) = ui_handle.upgrade() {
            apply_theme(&ui, mode);
        }
    })
}
