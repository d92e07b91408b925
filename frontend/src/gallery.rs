//! Auto-advancing horizontal scroll for the certificate gallery.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions};

use crate::dom;

const TICK_MS: u32 = 1000;
// Card width plus the approximate flex gap between cards.
const CARD_GAP: f64 = 16.0;

/// What one tick should do with the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScrollStep {
    Advance(f64),
    Reset,
}

/// Advance by `step`, or wrap back to the start when the step would reach
/// the scrollable extent.
fn next_step(scroll_left: f64, step: f64, max_scroll: f64) -> ScrollStep {
    if scroll_left + step >= max_scroll - 1.0 {
        ScrollStep::Reset
    } else {
        ScrollStep::Advance(step)
    }
}

struct GalleryState {
    gallery: Element,
    first_card: Element,
    hovered: Cell<bool>,
    interval: RefCell<Option<Interval>>,
}

impl GalleryState {
    fn tick(&self) {
        if self.hovered.get() {
            return;
        }
        let step = self.first_card.get_bounding_client_rect().width() + CARD_GAP;
        let max_scroll = f64::from(self.gallery.scroll_width() - self.gallery.client_width());

        let options = ScrollToOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        match next_step(f64::from(self.gallery.scroll_left()), step, max_scroll) {
            ScrollStep::Reset => {
                options.set_left(0.0);
                self.gallery.scroll_to_with_scroll_to_options(&options);
            }
            ScrollStep::Advance(step) => {
                options.set_left(step);
                self.gallery.scroll_by_with_scroll_to_options(&options);
            }
        }
    }
}

/// Steps the gallery once a second, pausing under the pointer and wrapping
/// smoothly back to the start at the end.
pub struct CertGallery {
    _state: Rc<GalleryState>,
    _listeners: Vec<EventListener>,
}

impl CertGallery {
    pub fn mount(document: &Document) -> Option<Self> {
        let gallery = document.query_selector(".cert-gallery").ok().flatten()?;
        let cards = dom::elements(gallery.query_selector_all(".cert-card").ok()?);
        if cards.len() <= 1 {
            return None;
        }

        let state = Rc::new(GalleryState {
            gallery: gallery.clone(),
            first_card: cards.into_iter().next()?,
            hovered: Cell::new(false),
            interval: RefCell::new(None),
        });

        *state.interval.borrow_mut() = Some(Interval::new(TICK_MS, {
            let state = Rc::clone(&state);
            move || state.tick()
        }));

        let mut listeners = Vec::new();
        listeners.push(EventListener::new(&gallery, "mouseenter", {
            let state = Rc::clone(&state);
            move |_| state.hovered.set(true)
        }));
        listeners.push(EventListener::new(&gallery, "mouseleave", {
            let state = Rc::clone(&state);
            move |_| state.hovered.set(false)
        }));
        let window = web_sys::window()?;
        listeners.push(EventListener::new(&window, "beforeunload", {
            let state = Rc::clone(&state);
            move |_| {
                state.interval.borrow_mut().take();
            }
        }));

        Some(Self {
            _state: state,
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_while_room_remains() {
        assert_eq!(next_step(0.0, 216.0, 1000.0), ScrollStep::Advance(216.0));
        assert_eq!(next_step(500.0, 216.0, 1000.0), ScrollStep::Advance(216.0));
    }

    #[test]
    fn wraps_instead_of_overshooting() {
        assert_eq!(next_step(800.0, 216.0, 1000.0), ScrollStep::Reset);
        assert_eq!(next_step(1000.0, 216.0, 1000.0), ScrollStep::Reset);
    }

    #[test]
    fn repeated_stepping_never_exceeds_the_extent() {
        let max_scroll = 1000.0;
        let step = 216.0;
        let mut scroll_left: f64 = 0.0;
        let mut wrapped = false;
        for _ in 0..32 {
            match next_step(scroll_left, step, max_scroll) {
                ScrollStep::Advance(step) => scroll_left += step,
                ScrollStep::Reset => {
                    scroll_left = 0.0;
                    wrapped = true;
                }
            }
            assert!(scroll_left <= max_scroll);
        }
        assert!(wrapped);
    }
}
