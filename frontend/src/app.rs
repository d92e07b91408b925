//! Application root: wires every page feature and owns their handles.

use web_sys::Document;

use crate::contact::ContactForm;
use crate::gallery::CertGallery;
use crate::lightbox::CertLightbox;
use crate::live_preview::LivePreview;
use crate::nav::{NavToggle, SmoothScroll};
use crate::speech::SpeakOnHover;
use crate::timeline::TimelineScroll;
use crate::web_canvas::WebCanvas;

/// The page's behavior layer. Each feature is independent: one stays `None`
/// when its DOM is missing and the rest of the page is unaffected.
pub struct App {
    pub nav_toggle: Option<NavToggle>,
    pub smooth_scroll: Option<SmoothScroll>,
    pub contact_form: Option<ContactForm>,
    pub web_canvas: Option<WebCanvas>,
    pub live_preview: Option<LivePreview>,
    pub speak_on_hover: Option<SpeakOnHover>,
    pub lightbox: Option<CertLightbox>,
    pub gallery: Option<CertGallery>,
    pub timeline: Option<TimelineScroll>,
}

impl App {
    pub fn mount(document: &Document) -> Self {
        stamp_footer_year(document);

        Self {
            nav_toggle: NavToggle::mount(document),
            smooth_scroll: SmoothScroll::mount(document),
            contact_form: ContactForm::mount(document),
            web_canvas: WebCanvas::mount(document),
            live_preview: LivePreview::mount(document),
            speak_on_hover: SpeakOnHover::mount(document),
            lightbox: CertLightbox::mount(document),
            gallery: CertGallery::mount(document),
            timeline: TimelineScroll::mount(document),
        }
    }
}

/// Keep the footer copyright year current.
fn stamp_footer_year(document: &Document) {
    if let Some(span) = document.get_element_by_id("year") {
        let year = js_sys::Date::new_0().get_full_year();
        span.set_text_content(Some(&year.to_string()));
    }
}
