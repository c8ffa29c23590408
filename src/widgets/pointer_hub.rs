//! Window-scoped pointer listeners.
//!
//! The winit event hook feeds every cursor move and button/touch release into
//! the hub, regardless of which element is under the pointer. Widgets subscribe
//! while they need those events and hold the returned [`ListenerGuard`];
//! dropping the guard unsubscribes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Pointer event in logical window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, source: PointerSource },
    Release { source: PointerSource },
}

type Listener = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned guard is dropped.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> ListenerGuard
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Rc::new(RefCell::new(listener)));

        ListenerGuard {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Delivers `event` to every current listener.
    ///
    /// Listeners may subscribe or unsubscribe while handling the event; the
    /// change takes effect from the next dispatch.
    pub fn dispatch(&self, event: PointerEvent) {
        let listeners: Vec<Listener> = self.inner.borrow().listeners.values().cloned().collect();
        for listener in listeners {
            (&mut *listener.borrow_mut())(&event);
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Keeps a hub subscription alive.
pub struct ListenerGuard {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().listeners.remove(&self.id);
        }
    }
}
