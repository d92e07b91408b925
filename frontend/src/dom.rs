//! Small DOM and viewport helpers shared by the feature widgets.

use wasm_bindgen::JsCast;
use web_sys::{Element, NodeList};

/// Viewport size in CSS pixels, with a desktop-ish fallback when no window
/// is reachable.
pub fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1280.0, 720.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);
    (width, height)
}

pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|window| window.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// Current page scroll offset as `(x, y)`.
pub fn scroll_offset() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    (
        window.scroll_x().unwrap_or(0.0),
        window.scroll_y().unwrap_or(0.0),
    )
}

/// Collect the `Element` nodes out of a query result.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into().ok())
        .collect()
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_whitespace_collapses_runs() {
        assert_eq!(
            normalize_whitespace("  Hi!\n  I'm   the portfolio\tmascot. "),
            "Hi! I'm the portfolio mascot."
        );
    }

    #[test]
    fn normalize_whitespace_keeps_single_spaced_text() {
        assert_eq!(normalize_whitespace("already clean"), "already clean");
        assert_eq!(normalize_whitespace(""), "");
    }
}
