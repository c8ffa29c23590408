//! Before/after comparison slider.
//!
//! Holds the split position and the drag session. Rendering lives in
//! `ui/comparison-slider.slint`; the markup reports presses with the region
//! geometry and everything after the press arrives through the [`PointerHub`].

use super::pointer_hub::{ListenerGuard, PointerEvent, PointerHub};
use log::trace;
use std::cell::RefCell;
use std::ops::Deref;
use std::rc::{Rc, Weak};

/// Split position after mounting, in percent.
pub const DEFAULT_POSITION: f32 = 50.0;

/// Horizontal extent of the slider in logical window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging,
}

pub fn clamp_percent(value: f32) -> f32 {
    value.clamp(0.0, 100.0)
}

/// Maps a pointer x coordinate to a split percentage.
///
/// `None` when the region is not laid out (zero, negative or non-finite width).
pub fn position_for(x: f32, region: Region) -> Option<f32> {
    if !region.width.is_finite() || region.width <= 0.0 || !region.left.is_finite() || !x.is_finite() {
        return None;
    }
    Some(clamp_percent((x - region.left) / region.width * 100.0))
}

struct SliderModel {
    position: f32,
    drag: DragSession,
    region: Option<Region>,
    listener: Option<ListenerGuard>,
    on_change: Rc<dyn Fn(f32)>,
}

/// Position and drag state of one slider.
///
/// The hub listener only keeps a weak reference, so it never keeps an
/// unmounted slider alive.
pub struct SliderState {
    model: Rc<RefCell<SliderModel>>,
}

impl SliderState {
    fn downgrade(&self) -> Weak<RefCell<SliderModel>> {
        Rc::downgrade(&self.model)
    }

    fn upgrade(weak: &Weak<RefCell<SliderModel>>) -> Option<Self> {
        weak.upgrade().map(|model| Self { model })
    }

    pub fn position(&self) -> f32 {
        self.model.borrow().position
    }

    pub fn drag_session(&self) -> DragSession {
        self.model.borrow().drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_session() == DragSession::Dragging
    }

    /// Records the latest layout of the slider region. Takes effect on the next move.
    pub fn set_region(&self, region: Region) {
        self.model.borrow_mut().region = Some(region);
    }

    /// Moves the split while dragging; ignored otherwise.
    pub fn update_position(&self, x: f32) {
        let (moved, on_change) = {
            let mut model = self.model.borrow_mut();
            (model.move_to(x), model.on_change.clone())
        };
        if let Some(position) = moved {
            on_change(position);
        }
    }

    /// Ends the drag session and releases the window listeners.
    pub fn end_drag(&self) {
        let listener = {
            let mut model = self.model.borrow_mut();
            if model.drag == DragSession::Idle {
                return;
            }
            model.drag = DragSession::Idle;
            model.listener.take()
        };
        drop(listener);
        trace!("Slider drag ended at {:.1}%", self.position());
    }
}

impl SliderModel {
    fn move_to(&mut self, x: f32) -> Option<f32> {
        if self.drag != DragSession::Dragging {
            return None;
        }
        let position = position_for(x, self.region?)?;
        if position == self.position {
            return None;
        }
        self.position = position;
        Some(position)
    }
}

/// A mounted comparison slider. Dropping it unmounts the widget.
///
/// Several sliders may share one hub; each subscribes only while it is dragged.
pub struct ComparisonSlider {
    state: SliderState,
    hub: PointerHub,
}

impl ComparisonSlider {
    /// Mounts a slider at [`DEFAULT_POSITION`]. `on_change` receives every new position.
    pub fn mount<F>(hub: &PointerHub, on_change: F) -> Self
    where
        F: Fn(f32) + 'static,
    {
        let on_change: Rc<dyn Fn(f32)> = Rc::new(on_change);
        on_change(DEFAULT_POSITION);

        Self {
            state: SliderState {
                model: Rc::new(RefCell::new(SliderModel {
                    position: DEFAULT_POSITION,
                    drag: DragSession::Idle,
                    region: None,
                    listener: None,
                    on_change,
                })),
            },
            hub: hub.clone(),
        }
    }

    /// Pointer or touch down inside the region. Leaves the position unchanged.
    pub fn begin_drag(&self) {
        if self.is_dragging() {
            return;
        }

        let weak = self.state.downgrade();
        let guard = self.hub.subscribe(move |event| {
            let Some(state) = SliderState::upgrade(&weak) else {
                return;
            };
            match *event {
                PointerEvent::Move { x, .. } => state.update_position(x),
                PointerEvent::Release { source } => {
                    trace!("Slider released by {:?}", source);
                    state.end_drag();
                }
            }
        });

        let mut model = self.state.model.borrow_mut();
        model.drag = DragSession::Dragging;
        model.listener = Some(guard);
        trace!("Slider drag started");
    }
}

impl Deref for ComparisonSlider {
    type Target = SliderState;

    fn deref(&self) -> &SliderState {
        &self.state
    }
}

impl Drop for ComparisonSlider {
    fn drop(&mut self) {
        self.state.end_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::pointer_hub::PointerSource;
    use proptest::prelude::*;

    const MOUSE: PointerSource = PointerSource::Mouse;

    fn mounted(hub: &PointerHub) -> (ComparisonSlider, Rc<RefCell<Vec<f32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let slider = ComparisonSlider::mount(hub, {
            let seen = seen.clone();
            move |p| seen.borrow_mut().push(p)
        });
        (slider, seen)
    }

    fn move_to(hub: &PointerHub, x: f32) {
        hub.dispatch(PointerEvent::Move { x, source: MOUSE });
    }

    #[test]
    fn mounts_at_the_middle() {
        let hub = PointerHub::new();
        let (slider, seen) = mounted(&hub);
        assert_eq!(slider.position(), 50.0);
        assert_eq!(slider.drag_session(), DragSession::Idle);
        assert_eq!(*seen.borrow(), vec![50.0]);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn moves_are_ignored_until_drag_begins() {
        let hub = PointerHub::new();
        let (slider, _) = mounted(&hub);
        slider.set_region(Region { left: 0.0, width: 200.0 });

        move_to(&hub, 20.0);
        assert_eq!(slider.position(), 50.0);

        slider.begin_drag();
        assert_eq!(slider.position(), 50.0);
        move_to(&hub, 20.0);
        assert_eq!(slider.position(), 10.0);
    }

    #[test]
    fn position_is_relative_to_region_left_edge() {
        let hub = PointerHub::new();
        let (slider, _) = mounted(&hub);
        slider.set_region(Region { left: 100.0, width: 400.0 });
        slider.begin_drag();

        move_to(&hub, 200.0);
        assert_eq!(slider.position(), 25.0);
    }

    #[test]
    fn release_outside_the_widget_ends_the_drag() {
        let hub = PointerHub::new();
        let (slider, _) = mounted(&hub);
        slider.set_region(Region { left: 0.0, width: 200.0 });
        slider.begin_drag();
        assert_eq!(hub.listener_count(), 1);

        move_to(&hub, 900.0);
        hub.dispatch(PointerEvent::Release { source: MOUSE });

        assert!(!slider.is_dragging());
        assert_eq!(slider.position(), 100.0);
        assert_eq!(hub.listener_count(), 0);

        move_to(&hub, 10.0);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn touch_release_ends_the_drag() {
        let hub = PointerHub::new();
        let (slider, _) = mounted(&hub);
        slider.set_region(Region { left: 0.0, width: 100.0 });
        slider.begin_drag();

        hub.dispatch(PointerEvent::Move { x: 30.0, source: PointerSource::Touch });
        hub.dispatch(PointerEvent::Release { source: PointerSource::Touch });
        assert_eq!(slider.position(), 30.0);
        assert!(!slider.is_dragging());
    }

    #[test]
    fn unlaid_out_region_is_a_no_op() {
        let hub = PointerHub::new();
        let (slider, seen) = mounted(&hub);
        slider.begin_drag();

        move_to(&hub, 40.0);
        assert_eq!(slider.position(), 50.0);

        slider.set_region(Region { left: 0.0, width: 0.0 });
        move_to(&hub, 40.0);
        assert_eq!(slider.position(), 50.0);
        assert_eq!(*seen.borrow(), vec![50.0]);
    }

    #[test]
    fn begin_drag_twice_keeps_one_listener() {
        let hub = PointerHub::new();
        let (slider, _) = mounted(&hub);
        slider.begin_drag();
        slider.begin_drag();
        assert_eq!(hub.listener_count(), 1);

        slider.end_drag();
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn unmount_while_dragging_releases_listener() {
        let hub = PointerHub::new();
        let (slider, seen) = mounted(&hub);
        slider.set_region(Region { left: 0.0, width: 200.0 });
        slider.begin_drag();

        drop(slider);
        assert_eq!(hub.listener_count(), 0);
        move_to(&hub, 10.0);
        assert_eq!(*seen.borrow(), vec![50.0]);
    }

    #[test]
    fn region_refresh_mid_drag_applies_to_next_move() {
        let hub = PointerHub::new();
        let (slider, _) = mounted(&hub);
        slider.set_region(Region { left: 0.0, width: 200.0 });
        slider.begin_drag();
        move_to(&hub, 100.0);
        assert_eq!(slider.position(), 50.0);

        // window widened while the button is still held
        slider.set_region(Region { left: 0.0, width: 400.0 });
        move_to(&hub, 100.0);
        assert_eq!(slider.position(), 25.0);
    }

    #[test]
    fn sliders_sharing_a_hub_track_independently() {
        let hub = PointerHub::new();
        let (demo, demo_seen) = mounted(&hub);
        let (result, result_seen) = mounted(&hub);
        demo.set_region(Region { left: 0.0, width: 100.0 });
        result.set_region(Region { left: 200.0, width: 400.0 });

        demo.begin_drag();
        assert_eq!(hub.listener_count(), 1);
        move_to(&hub, 80.0);
        hub.dispatch(PointerEvent::Release { source: MOUSE });
        assert_eq!(demo.position(), 80.0);
        assert_eq!(result.position(), 50.0);

        result.begin_drag();
        move_to(&hub, 300.0);
        assert_eq!(result.position(), 25.0);
        assert_eq!(demo.position(), 80.0);

        drop(demo);
        move_to(&hub, 500.0);
        hub.dispatch(PointerEvent::Release { source: MOUSE });
        assert_eq!(result.position(), 75.0);
        assert_eq!(hub.listener_count(), 0);

        assert_eq!(*demo_seen.borrow(), vec![50.0, 80.0]);
        assert_eq!(*result_seen.borrow(), vec![50.0, 25.0, 75.0]);
    }

    #[test]
    fn dragging_across_the_region_is_monotonic() {
        let hub = PointerHub::new();
        let (slider, seen) = mounted(&hub);
        slider.set_region(Region { left: 0.0, width: 200.0 });
        slider.begin_drag();

        for x in (0..=200).step_by(5) {
            move_to(&hub, x as f32);
        }
        hub.dispatch(PointerEvent::Release { source: MOUSE });

        let positions = seen.borrow();
        let dragged = &positions[1..];
        assert_eq!(dragged.first(), Some(&0.0));
        assert_eq!(dragged.last(), Some(&100.0));
        assert!(dragged.windows(2).all(|w| w[0] <= w[1]));
    }

    proptest! {
        #[test]
        fn inside_region_matches_ratio(width in 1.0f32..4000.0, frac in 0.0f32..=1.0) {
            let x = width * frac;
            let position = position_for(x, Region { left: 0.0, width }).unwrap();
            let expected = clamp_percent(100.0 * x / width);
            prop_assert!((position - expected).abs() < 1e-3);
            prop_assert!((0.0..=100.0).contains(&position));
        }

        #[test]
        fn outside_region_pins_to_edges(left in -500.0f32..500.0, width in 1.0f32..2000.0, overshoot in 0.01f32..5000.0) {
            let region = Region { left, width };
            prop_assert_eq!(position_for(left - overshoot, region), Some(0.0));
            prop_assert_eq!(position_for(left + width + overshoot, region), Some(100.0));
        }

        #[test]
        fn clamp_is_idempotent(value in -1.0e6f32..1.0e6) {
            let once = clamp_percent(value);
            prop_assert_eq!(clamp_percent(once), once);
        }
    }

    #[test]
    fn degenerate_regions_yield_none() {
        assert_eq!(position_for(10.0, Region { left: 0.0, width: 0.0 }), None);
        assert_eq!(position_for(10.0, Region { left: 0.0, width: -5.0 }), None);
        assert_eq!(position_for(10.0, Region { left: 0.0, width: f32::NAN }), None);
        assert_eq!(position_for(f32::INFINITY, Region { left: 0.0, width: 10.0 }), None);
    }
}
