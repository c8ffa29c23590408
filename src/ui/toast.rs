//! Toast notifications.

use crate::services::{LogNotifier, Notice, Notifier};
use slint::{Timer, TimerMode};
use std::time::Duration;

/// Shows each notice in a toast that hides itself after `duration`.
pub struct ToastNotifier {
    ui: slint::Weak<crate::AppWindow>,
    timer: Timer,
    duration: Duration,
}

impl ToastNotifier {
    pub fn new(ui: slint::Weak<crate::AppWindow>, duration: Duration) -> Self {
        Self {
            ui,
            timer: Timer::default(),
            duration,
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        LogNotifier.notify(notice);

        let Some(ui) = self.ui.upgrade() else {
            return;
        };
        crate::ui::set_toast(&ui, notice.message(), notice.is_error(), true);

        let ui_handle = self.ui.clone();
        self.timer.start(TimerMode::SingleShot, self.duration, move || {
            if let Some(ui) = ui_handle.upgrade() {
                crate::ui::set_toast(&ui, "", false, false);
            }
        });
    }
}
