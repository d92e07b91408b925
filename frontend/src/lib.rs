//! Behavior layer for the portfolio page.
//!
//! Every feature is an independent widget wired onto the static page once
//! the DOM is ready; a feature whose markup is missing simply stays
//! unmounted.

use std::cell::RefCell;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

mod app;
mod contact;
mod dom;
mod email;
mod gallery;
mod lightbox;
mod live_preview;
mod nav;
mod speech;
mod timeline;
mod web_canvas;

use app::App;

// Guard against double-initialization (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

thread_local! {
    /// Keeps the mounted app, and with it every listener and timer handle,
    /// alive for the page session.
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&info.to_string()));
        }));
    });
}

fn mount_app() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let app = App::mount(&document);
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

#[wasm_bindgen(start)]
pub fn start() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    init_panic_hook();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount_app()).forget();
    } else {
        mount_app();
    }
}
