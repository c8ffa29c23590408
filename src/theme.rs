//! Light/dark theme as an explicit, shared context.
//!
//! The context is the single source of truth. The UI attaches a sink with
//! [`ThemeContext::attach`]; the sink sees the current mode immediately and
//! every change after that, until the returned binding is dropped.

use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

type Sink = Rc<dyn Fn(ThemeMode)>;

#[derive(Clone, Default)]
pub struct ThemeContext {
    mode: Rc<Cell<ThemeMode>>,
    sink: Rc<RefCell<Option<Sink>>>,
}

impl ThemeContext {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode: Rc::new(Cell::new(mode)),
            sink: Rc::new(RefCell::new(None)),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    /// Applies the current mode to `sink` and keeps it updated.
    ///
    /// Replaces any previously attached sink.
    #[must_use = "the sink is detached when the binding is dropped"]
    pub fn attach<F>(&self, sink: F) -> ThemeBinding
    where
        F: Fn(ThemeMode) + 'static,
    {
        let sink: Sink = Rc::new(sink);
        sink(self.mode());
        *self.sink.borrow_mut() = Some(sink);
        ThemeBinding {
            context: self.clone(),
        }
    }

    pub fn set(&self, mode: ThemeMode) {
        if self.mode.replace(mode) == mode {
            return;
        }
        debug!("Theme changed to {:?}", mode);
        let sink = self.sink.borrow().clone();
        if let Some(sink) = sink {
            sink(mode);
        }
    }

    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().toggled();
        self.set(next);
        next
    }
}

/// Attachment of a sink to a [`ThemeContext`].
pub struct ThemeBinding {
    context: ThemeContext,
}

impl Drop for ThemeBinding {
    fn drop(&mut self) {
        self.context.sink.borrow_mut().take();
    }
}
