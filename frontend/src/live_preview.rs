//! Miniature live-site preview shown while hovering a project's demo link.
//!
//! Pointer-driven only: the whole widget is skipped on touch-first devices
//! where `(hover: hover)` does not match.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, HtmlIFrameElement};

use crate::dom;

const SHOW_DELAY_MS: u32 = 100;
const HIDE_DELAY_MS: u32 = 120;
const PREVIEW_WIDTH: f64 = 320.0;
const PREVIEW_HEIGHT: f64 = 200.0;
const LINK_GAP: f64 = 16.0;
const EDGE_MARGIN: f64 = 8.0;
const LINK_GROUP_SELECTOR: &str = ".project-card__links";

/// The slice of a link's bounding rect the placement math needs.
struct LinkRect {
    top: f64,
    left: f64,
    right: f64,
    height: f64,
}

/// Page-coordinate `(top, left)` for the preview: beside the link to the
/// right, flipped left when the right edge gets crowded, top clamped.
fn preview_position(rect: &LinkRect, viewport: (f64, f64), scroll: (f64, f64)) -> (f64, f64) {
    let mut top = rect.top + scroll.1 + rect.height / 2.0 - PREVIEW_HEIGHT / 2.0;
    let mut left = rect.right + LINK_GAP + scroll.0;
    if left + PREVIEW_WIDTH > viewport.0 - EDGE_MARGIN {
        left = rect.left - PREVIEW_WIDTH - LINK_GAP + scroll.0;
    }
    if top + PREVIEW_HEIGHT > viewport.1 - EDGE_MARGIN {
        top = viewport.1 - PREVIEW_HEIGHT - EDGE_MARGIN;
    }
    if top < EDGE_MARGIN {
        top = EDGE_MARGIN;
    }
    (top, left)
}

fn is_live_demo_link(link: &Element) -> bool {
    let text_matches = link
        .text_content()
        .map(|text| text.to_lowercase().contains("live demo"))
        .unwrap_or(false);
    let label_matches = link
        .get_attribute("aria-label")
        .map(|label| label.to_lowercase().contains("live demo"))
        .unwrap_or(false);
    text_matches || label_matches
}

struct PreviewState {
    container: HtmlElement,
    iframe: HtmlIFrameElement,
    show_timer: RefCell<Option<Timeout>>,
    hide_timer: RefCell<Option<Timeout>>,
}

impl PreviewState {
    fn show_now(&self, link: &HtmlAnchorElement) {
        let rect = link.get_bounding_client_rect();
        let rect = LinkRect {
            top: rect.top(),
            left: rect.left(),
            right: rect.right(),
            height: rect.height(),
        };
        let (top, left) = preview_position(&rect, dom::viewport_size(), dom::scroll_offset());
        let style = self.container.style();
        let _ = style.set_property("top", &format!("{top}px"));
        let _ = style.set_property("left", &format!("{left}px"));
        dom::add_class(&self.container, "show");
        let _ = self.container.set_attribute("aria-hidden", "false");
        self.iframe.set_src(&link.href());
    }

    fn hide_now(&self) {
        dom::remove_class(&self.container, "show");
        let _ = self.container.set_attribute("aria-hidden", "true");
        self.iframe.set_src("about:blank");
    }
}

fn schedule_show(state: &Rc<PreviewState>, link: &HtmlAnchorElement) {
    state.hide_timer.borrow_mut().take();
    let fire = Rc::clone(state);
    let link = link.clone();
    *state.show_timer.borrow_mut() = Some(Timeout::new(SHOW_DELAY_MS, move || {
        fire.show_now(&link);
    }));
}

fn schedule_hide(state: &Rc<PreviewState>) {
    state.show_timer.borrow_mut().take();
    let fire = Rc::clone(state);
    *state.hide_timer.borrow_mut() = Some(Timeout::new(HIDE_DELAY_MS, move || {
        fire.hide_now();
    }));
}

/// Hover/focus preview iframe anchored to "live demo" project links.
pub struct LivePreview {
    _state: Rc<PreviewState>,
    _listeners: Vec<EventListener>,
}

impl LivePreview {
    pub fn mount(document: &Document) -> Option<Self> {
        let window = web_sys::window()?;
        let hover_capable = window
            .match_media("(hover: hover)")
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false);
        if !hover_capable {
            return None;
        }

        let container: HtmlElement = document
            .get_element_by_id("live-preview")?
            .dyn_into()
            .ok()?;
        container.set_inner_html("");
        let inner = document.create_element("div").ok()?;
        inner.set_class_name("preview-inner");
        container.append_child(&inner).ok()?;

        let iframe: HtmlIFrameElement = document.create_element("iframe").ok()?.dyn_into().ok()?;
        let _ = iframe.set_attribute("frameborder", "0");
        let _ = iframe.set_attribute("tabindex", "-1");
        let _ = iframe.set_attribute("aria-hidden", "true");
        let style = iframe.style();
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("height", "100%");
        let _ = style.set_property("border", "none");
        let _ = style.set_property("background", "transparent");
        let _ = style.set_property("pointer-events", "none");
        inner.append_child(&iframe).ok()?;

        let state = Rc::new(PreviewState {
            container,
            iframe,
            show_timer: RefCell::new(None),
            hide_timer: RefCell::new(None),
        });

        let mut listeners = Vec::new();
        let links = dom::elements(
            document
                .query_selector_all(&format!("{LINK_GROUP_SELECTOR} a"))
                .ok()?,
        );
        for link in links {
            if !is_live_demo_link(&link) {
                continue;
            }
            let Ok(link) = link.dyn_into::<HtmlAnchorElement>() else {
                continue;
            };
            for event in ["mouseenter", "focus"] {
                listeners.push(EventListener::new(&link, event, {
                    let state = Rc::clone(&state);
                    let link = link.clone();
                    move |_| schedule_show(&state, &link)
                }));
            }
            for event in ["mouseleave", "blur"] {
                listeners.push(EventListener::new(&link, event, {
                    let state = Rc::clone(&state);
                    move |_| schedule_hide(&state)
                }));
            }
        }

        listeners.push(EventListener::new(&window, "scroll", {
            let state = Rc::clone(&state);
            move |_| schedule_hide(&state)
        }));
        listeners.push(EventListener::new(document, "click", {
            let state = Rc::clone(&state);
            move |event| {
                let inside_link_group = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|element| element.closest(LINK_GROUP_SELECTOR).ok().flatten())
                    .is_some();
                if !inside_link_group {
                    schedule_hide(&state);
                }
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

    const VIEWPORT: (f64, f64) = (1280.0, 720.0);

    fn rect(top: f64, left: f64, width: f64, height: f64) -> LinkRect {
        LinkRect {
            top,
            left,
            right: left + width,
            height,
        }
    }

    #[test]
    fn prefers_the_right_side_of_the_link() {
        let link = rect(300.0, 100.0, 120.0, 40.0);
        let (top, left) = preview_position(&link, VIEWPORT, (0.0, 0.0));
        assert_eq!(left, 220.0 + LINK_GAP);
        assert_eq!(top, 300.0 + 20.0 - PREVIEW_HEIGHT / 2.0);
    }

    #[test]
    fn flips_left_when_crowding_the_right_edge() {
        let link = rect(300.0, 1100.0, 120.0, 40.0);
        let (_, left) = preview_position(&link, VIEWPORT, (0.0, 0.0));
        assert_eq!(left, 1100.0 - PREVIEW_WIDTH - LINK_GAP);
    }

    #[test]
    fn clamps_top_into_the_viewport() {
        let high = rect(-40.0, 100.0, 120.0, 40.0);
        let (top, _) = preview_position(&high, VIEWPORT, (0.0, 0.0));
        assert_eq!(top, EDGE_MARGIN);

        let low = rect(700.0, 100.0, 120.0, 40.0);
        let (top, _) = preview_position(&low, VIEWPORT, (0.0, 0.0));
        assert_eq!(top, VIEWPORT.1 - PREVIEW_HEIGHT - EDGE_MARGIN);
    }

    #[test]
    fn page_scroll_shifts_the_anchor() {
        let link = rect(300.0, 100.0, 120.0, 40.0);
        let (_, left_scrolled) = preview_position(&link, VIEWPORT, (50.0, 400.0));
        assert_eq!(left_scrolled, 220.0 + LINK_GAP + 50.0);
    }
}
