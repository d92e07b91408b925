//! Certificate gallery lightbox with a generated placeholder for missing
//! images.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use js_sys::encode_uri_component;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, KeyboardEvent};

use crate::dom;

const FALLBACK_TITLE: &str = "Certificate";
const CARD_SELECTOR: &str = ".cert-card";
const CARD_TITLE_SELECTOR: &str = ".cert-card__meta h3";

/// Inline SVG shown in place of a certificate image that failed to load,
/// with the card title embedded.
fn placeholder_svg(title: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="900">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="#0ea5e9" stop-opacity="0.28"/>
      <stop offset="1" stop-color="#fb7185" stop-opacity="0.22"/>
    </linearGradient>
  </defs>
  <rect width="100%" height="100%" fill="#0b1220"/>
  <rect x="0" y="0" width="100%" height="100%" fill="url(#g)"/>
  <rect x="70" y="70" width="1060" height="760" rx="28" fill="rgba(2,6,23,0.55)" stroke="rgba(148,163,184,0.35)" stroke-width="4"/>
  <text x="120" y="190" fill="#f9fafb" font-size="62" font-family="Poppins, Arial, sans-serif">{title}</text>
  <text x="120" y="270" fill="#9ca3af" font-size="34" font-family="Poppins, Arial, sans-serif">Add your image in assets/certificates/</text>
</svg>"##
    )
}

fn placeholder_data_url(title: &str) -> String {
    let encoded = String::from(encode_uri_component(&placeholder_svg(title)));
    format!("data:image/svg+xml;charset=utf-8,{encoded}")
}

/// Card title text, trimmed; `None` when the heading is absent or empty.
fn card_title(card_scope: &Element) -> Option<String> {
    card_scope
        .query_selector(CARD_TITLE_SELECTOR)
        .ok()
        .flatten()
        .and_then(|heading| heading.text_content())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

struct LightboxState {
    overlay: Element,
    image: HtmlImageElement,
    caption: Option<Element>,
    document: Document,
}

impl LightboxState {
    fn open(&self, src: &str, caption_text: &str) {
        self.image.set_src(src);
        let alt = if caption_text.is_empty() {
            "Certificate preview".to_string()
        } else {
            format!("Certificate preview: {caption_text}")
        };
        self.image.set_alt(&alt);
        if let Some(caption) = &self.caption {
            caption.set_text_content(Some(caption_text));
        }
        dom::add_class(&self.overlay, "show");
        let _ = self.overlay.set_attribute("aria-hidden", "false");
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", "hidden");
        }
    }

    fn close(&self) {
        dom::remove_class(&self.overlay, "show");
        let _ = self.overlay.set_attribute("aria-hidden", "true");
        self.image.set_src("");
        if let Some(caption) = &self.caption {
            caption.set_text_content(Some(""));
        }
        if let Some(body) = self.document.body() {
            let _ = body.style().remove_property("overflow");
        }
    }

    fn is_open(&self) -> bool {
        self.overlay.class_list().contains("show")
    }
}

/// Full-size certificate overlay. Open disables page scroll; close restores
/// it and clears the displayed image.
pub struct CertLightbox {
    _state: Rc<LightboxState>,
    _listeners: Vec<EventListener>,
}

impl CertLightbox {
    pub fn mount(document: &Document) -> Option<Self> {
        let overlay = document.get_element_by_id("cert-lightbox")?;
        let image: HtmlImageElement = document
            .get_element_by_id("cert-lightbox-img")?
            .dyn_into()
            .ok()?;
        let caption = document.get_element_by_id("cert-lightbox-caption");

        let state = Rc::new(LightboxState {
            overlay: overlay.clone(),
            image,
            caption,
            document: document.clone(),
        });

        let mut listeners = Vec::new();
        for link in dom::elements(document.query_selector_all("[data-cert]").ok()?) {
            listeners.push(EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                {
                    let state = Rc::clone(&state);
                    let link = link.clone();
                    move |event| {
                        event.prevent_default();
                        let card_image = link.query_selector("img").ok().flatten();
                        let src = link
                            .get_attribute("href")
                            .filter(|href| !href.is_empty())
                            .or_else(|| {
                                card_image
                                    .as_ref()
                                    .and_then(|image| image.get_attribute("src"))
                            });
                        let Some(src) = src else {
                            return;
                        };
                        let caption_text = card_title(&link)
                            .or_else(|| {
                                card_image
                                    .as_ref()
                                    .and_then(|image| image.get_attribute("alt"))
                            })
                            .unwrap_or_default();
                        state.open(&src, &caption_text);
                    }
                },
            ));
        }

        for close_control in dom::elements(overlay.query_selector_all("[data-cert-close]").ok()?) {
            listeners.push(EventListener::new(&close_control, "click", {
                let state = Rc::clone(&state);
                move |_| state.close()
            }));
        }

        listeners.push(EventListener::new(document, "keydown", {
            let state = Rc::clone(&state);
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if event.key() == "Escape" && state.is_open() {
                    state.close();
                }
            }
        }));

        // Each card image gets a once-only fallback so a missing file shows
        // a titled placeholder instead of a broken image.
        for image in dom::elements(
            document
                .query_selector_all(&format!("{CARD_SELECTOR} img"))
                .ok()?,
        ) {
            let Ok(image) = image.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            let target = image.clone();
            listeners.push(EventListener::once(&target, "error", move |_| {
                let title = image
                    .closest(CARD_SELECTOR)
                    .ok()
                    .flatten()
                    .and_then(|card| card_title(&card))
                    .unwrap_or_else(|| FALLBACK_TITLE.to_string());
                image.set_src(&placeholder_data_url(&title));
            }));
        }

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
    fn placeholder_embeds_the_resolved_title() {
        let svg = placeholder_svg("Rust Certification");
        assert!(svg.contains(">Rust Certification</text>"));
        assert!(svg.starts_with("<svg xmlns="));
    }

    #[test]
    fn placeholder_keeps_the_fallback_title_verbatim() {
        let svg = placeholder_svg(FALLBACK_TITLE);
        assert!(svg.contains(">Certificate</text>"));
    }
}
