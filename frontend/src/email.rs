//! Thin client for the hosted EmailJS relay.
//!
//! The relay script is loaded (or not) by the page itself, so the client is
//! looked up on the global object at each use instead of being bound at
//! startup.

use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const SERVICE_ID: &str = "service_d32lhjx";
const TEMPLATE_ID: &str = "template_xzr2639";

/// Template variables for one contact message.
#[derive(Serialize)]
pub struct MessagePayload {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

/// Handle to the `emailjs` global object.
pub struct EmailClient {
    client: JsValue,
    send: Function,
}

impl EmailClient {
    /// Returns `None` when the EmailJS script has not been loaded onto the
    /// page (or exposes no `send` function).
    pub fn from_global() -> Option<Self> {
        let window: JsValue = web_sys::window()?.into();
        let client = Reflect::get(&window, &JsValue::from_str("emailjs")).ok()?;
        if client.is_undefined() || client.is_null() {
            return None;
        }
        let send = Reflect::get(&client, &JsValue::from_str("send"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self { client, send })
    }

    /// Deliver one message through the relay, resolving to the service
    /// response or the rejection value.
    pub async fn send(&self, payload: &MessagePayload) -> Result<JsValue, JsValue> {
        let params = serde_wasm_bindgen::to_value(payload).map_err(JsValue::from)?;
        let promise: Promise = self
            .send
            .call3(
                &self.client,
                &JsValue::from_str(SERVICE_ID),
                &JsValue::from_str(TEMPLATE_ID),
                &params,
            )?
            .dyn_into()?;
        JsFuture::from(promise).await
    }
}
