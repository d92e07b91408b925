//! Speaks the hero speech-bubble text while the portrait is hovered.

use gloo_events::EventListener;
use web_sys::{Document, Element, SpeechSynthesis, SpeechSynthesisUtterance};

use crate::dom;

const SPEECH_RATE: f32 = 1.05;
const SPEECH_PITCH: f32 = 1.1;

fn synthesizer() -> Option<SpeechSynthesis> {
    web_sys::window()?.speech_synthesis().ok()
}

fn speak_bubble(bubble: &Element) {
    let Some(synth) = synthesizer() else {
        return;
    };
    synth.cancel();
    let text = dom::normalize_whitespace(&bubble.text_content().unwrap_or_default());
    if let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(&text) {
        utterance.set_rate(SPEECH_RATE);
        utterance.set_pitch(SPEECH_PITCH);
        synth.speak(&utterance);
    }
}

fn stop_bubble() {
    if let Some(synth) = synthesizer() {
        synth.cancel();
    }
}

/// Hover/focus narration of the hero bubble. At most one utterance is in
/// flight; the opposing event cancels it.
pub struct SpeakOnHover {
    _listeners: Vec<EventListener>,
}

impl SpeakOnHover {
    pub fn mount(document: &Document) -> Option<Self> {
        let portrait = document.query_selector(".hero__image").ok().flatten()?;
        let bubble = document.get_element_by_id("hero-bubble")?;

        let mut listeners = Vec::new();
        for event in ["mouseenter", "focus"] {
            listeners.push(EventListener::new(&portrait, event, {
                let bubble = bubble.clone();
                move |_| speak_bubble(&bubble)
            }));
        }
        for event in ["mouseleave", "blur"] {
            listeners.push(EventListener::new(&portrait, event, |_| stop_bubble()));
        }

        Some(Self {
            _listeners: listeners,
        })
    }
}
