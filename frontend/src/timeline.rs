//! Scroll-driven 3D tilt for timeline entries.
//!
//! Each item's transform is derived purely from how far its center sits
//! from the viewport center; nothing is stored between updates beyond the
//! visibility class.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom;

const MAX_TILT_DEG: f64 = 14.0;
const MAX_DEPTH_PX: f64 = 180.0;
const MAX_RISE_PX: f64 = 60.0;
const DISTANCE_CLAMP: f64 = 1.2;
const FLAT_BAND: f64 = 0.25;
const VISIBLE_CLASS: &str = "is-visible";
const FLAT_TRANSFORM: &str = "translateY(0) translateZ(0) rotateX(0deg)";

struct ItemTransform {
    visible: bool,
    transform: String,
}

/// Map a normalized signed distance from the viewport center to the item's
/// transform. Items inside the flat band sit upright and visible; the rest
/// recede and tilt with the sign of the distance.
fn item_transform(distance: f64) -> ItemTransform {
    let clamped = distance.clamp(-DISTANCE_CLAMP, DISTANCE_CLAMP);
    if distance.abs() < FLAT_BAND {
        ItemTransform {
            visible: true,
            transform: FLAT_TRANSFORM.to_string(),
        }
    } else {
        let rise = clamped * MAX_RISE_PX;
        let depth = -MAX_DEPTH_PX * clamped.abs();
        let tilt = MAX_TILT_DEG * clamped;
        ItemTransform {
            visible: false,
            transform: format!("translateY({rise}px) translateZ({depth}px) rotateX({tilt}deg)"),
        }
    }
}

struct TimelineState {
    items: Vec<HtmlElement>,
    pending: Cell<bool>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl TimelineState {
    fn update(&self) {
        let viewport_height = dom::viewport_size().1;
        let center = viewport_height / 2.0;
        for item in &self.items {
            let rect = item.get_bounding_client_rect();
            let item_center = rect.top() + rect.height() / 2.0;
            let distance = (item_center - center) / viewport_height;
            let mapped = item_transform(distance);
            if mapped.visible {
                dom::add_class(item, VISIBLE_CLASS);
            } else {
                dom::remove_class(item, VISIBLE_CLASS);
            }
            let _ = item.style().set_property("transform", &mapped.transform);
        }
    }
}

/// Coalesce rapid scroll/resize bursts into one update per display frame.
fn request_update(state: &Rc<TimelineState>) {
    if state.pending.replace(true) {
        return;
    }
    let next = Rc::clone(state);
    *state.frame.borrow_mut() = Some(request_animation_frame(move |_| {
        next.frame.borrow_mut().take();
        next.update();
        next.pending.set(false);
    }));
}

/// Parallax/tilt illusion over `.timeline-item` entries as the page scrolls.
pub struct TimelineScroll {
    _state: Rc<TimelineState>,
    _listeners: Vec<EventListener>,
}

impl TimelineScroll {
    pub fn mount(document: &Document) -> Option<Self> {
        let items: Vec<HtmlElement> = dom::elements(
            document.query_selector_all(".timeline-item").ok()?,
        )
        .into_iter()
        .filter_map(|element| element.dyn_into().ok())
        .collect();
        if items.is_empty() {
            return None;
        }

        let state = Rc::new(TimelineState {
            items,
            pending: Cell::new(false),
            frame: RefCell::new(None),
        });

        let window = web_sys::window()?;
        let mut listeners = Vec::new();
        for event in ["scroll", "resize"] {
            listeners.push(EventListener::new(&window, event, {
                let state = Rc::clone(&state);
                move |_| request_update(&state)
            }));
        }

        state.update();

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
    fn centered_item_is_flat_and_visible() {
        let mapped = item_transform(0.0);
        assert!(mapped.visible);
        assert_eq!(mapped.transform, "translateY(0) translateZ(0) rotateX(0deg)");
    }

    #[test]
    fn band_edge_starts_tilting() {
        assert!(item_transform(0.249).visible);
        let mapped = item_transform(0.25);
        assert!(!mapped.visible);
        assert_eq!(
            mapped.transform,
            "translateY(15px) translateZ(-45px) rotateX(3.5deg)"
        );
    }

    #[test]
    fn tilt_sign_follows_the_distance() {
        let below = item_transform(0.5);
        assert_eq!(
            below.transform,
            "translateY(30px) translateZ(-90px) rotateX(7deg)"
        );
        let above = item_transform(-0.5);
        assert_eq!(
            above.transform,
            "translateY(-30px) translateZ(-90px) rotateX(-7deg)"
        );
    }

    #[test]
    fn distance_clamps_at_the_extremes() {
        let far = item_transform(3.0);
        let edge = item_transform(DISTANCE_CLAMP);
        assert!(!far.visible);
        assert_eq!(far.transform, edge.transform);
        assert!(far.transform.starts_with("translateY(72px) translateZ(-216px)"));
    }
}
