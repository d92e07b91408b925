//! Site navigation: mobile menu toggle and smooth same-page scrolling.

use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;

const TOGGLE_OPEN_CLASS: &str = "nav__toggle--open";
const LINKS_OPEN_CLASS: &str = "nav__links--open";

/// Open/close control for the mobile navigation panel. Clicking any link
/// inside the panel closes it again.
pub struct NavToggle {
    _listeners: Vec<EventListener>,
}

impl NavToggle {
    pub fn mount(document: &Document) -> Option<Self> {
        let toggle = document.query_selector(".nav__toggle").ok().flatten()?;
        let links = document.query_selector(".nav__links").ok().flatten()?;

        let mut listeners = Vec::new();
        listeners.push(EventListener::new(&toggle, "click", {
            let toggle = toggle.clone();
            let links = links.clone();
            move |_| {
                let _ = toggle.class_list().toggle(TOGGLE_OPEN_CLASS);
                let _ = links.class_list().toggle(LINKS_OPEN_CLASS);
            }
        }));

        for link in dom::elements(links.query_selector_all("a").ok()?) {
            listeners.push(EventListener::new(&link, "click", {
                let toggle = toggle.clone();
                let links = links.clone();
                move |_| {
                    dom::remove_class(&toggle, TOGGLE_OPEN_CLASS);
                    dom::remove_class(&links, LINKS_OPEN_CLASS);
                }
            }));
        }

        Some(Self {
            _listeners: listeners,
        })
    }
}

/// Intercepts same-page fragment links and animates the jump instead of
/// letting the browser teleport.
pub struct SmoothScroll {
    _listeners: Vec<EventListener>,
}

impl SmoothScroll {
    pub fn mount(document: &Document) -> Option<Self> {
        let anchors = dom::elements(document.query_selector_all(r##"a[href^="#"]"##).ok()?);
        if anchors.is_empty() {
            return None;
        }

        let mut listeners = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                {
                    let anchor = anchor.clone();
                    let document = document.clone();
                    move |event| {
                        let Some(href) = anchor.get_attribute("href") else {
                            return;
                        };
                        if href == "#" {
                            return;
                        }
                        // An unresolvable fragment keeps default navigation.
                        let Some(target) = document.query_selector(&href).ok().flatten() else {
                            return;
                        };
                        event.prevent_default();
                        let options = ScrollIntoViewOptions::new();
                        options.set_behavior(ScrollBehavior::Smooth);
                        options.set_block(ScrollLogicalPosition::Start);
                        target.scroll_into_view_with_scroll_into_view_options(&options);
                    }
                },
            ));
        }

        Some(Self {
            _listeners: listeners,
        })
    }
}
