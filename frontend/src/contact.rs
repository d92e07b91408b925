//! Contact form: validation, status line, and submission through EmailJS.

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, console};

use crate::email::{EmailClient, MessagePayload};

const STATUS_BASE_CLASS: &str = "contact__status";

const MSG_MISSING_FIELDS: &str = "Please fill in your name, email, and message.";
const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
const MSG_SERVICE_UNAVAILABLE: &str =
    "Email service is currently unavailable. Please try again later or reach out directly via email.";
const MSG_SENDING: &str = "Sending...";
const MSG_SENT: &str = "Message sent successfully! I'll get back to you soon.";
const MSG_SEND_FAILED: &str =
    "Sorry, there was a problem sending your message. Please try again later.";

/// Styling applied to the status line alongside its text.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StatusKind {
    Neutral,
    Error,
    Success,
}

impl StatusKind {
    fn css_class(self) -> Option<&'static str> {
        match self {
            StatusKind::Neutral => None,
            StatusKind::Error => Some("error"),
            StatusKind::Success => Some("success"),
        }
    }
}

/// Why a submission stopped before reaching the relay.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SubmitError {
    MissingFields,
    InvalidEmail,
    ServiceUnavailable,
}

impl SubmitError {
    fn user_message(self) -> &'static str {
        match self {
            SubmitError::MissingFields => MSG_MISSING_FIELDS,
            SubmitError::InvalidEmail => MSG_INVALID_EMAIL,
            SubmitError::ServiceUnavailable => MSG_SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Clone)]
struct StatusLine {
    element: Element,
}

impl StatusLine {
    fn set(&self, text: &str, kind: StatusKind) {
        self.element.set_text_content(Some(text));
        self.element.set_class_name(STATUS_BASE_CLASS);
        if let Some(class) = kind.css_class() {
            let _ = self.element.class_list().add_1(class);
        }
    }

    fn clear(&self) {
        self.set("", StatusKind::Neutral);
    }
}

fn show_status(status: Option<&StatusLine>, text: &str, kind: StatusKind) {
    if let Some(status) = status {
        status.set(text, kind);
    }
}

/// Mirrors the lenient `non-ws @ non-ws . non-ws` shape: something before the
/// first `@`, and a `.` with text on both sides somewhere after it.
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = email.find('@') else {
        return false;
    };
    if at == 0 {
        return false;
    }
    let domain = &email[at + 1..];
    let Some(dot) = domain.rfind('.') else {
        return false;
    };
    dot > 0 && dot + 1 < domain.len()
}

fn validate(name: &str, email: &str, message: &str) -> Result<(), SubmitError> {
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(SubmitError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(SubmitError::InvalidEmail);
    }
    Ok(())
}

fn field_value(form: &HtmlFormElement, selector: &str) -> String {
    let Some(element) = form.query_selector(selector).ok().flatten() else {
        return String::new();
    };
    let value = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    };
    value.trim().to_string()
}

fn handle_submit(form: &HtmlFormElement, status: Option<&StatusLine>) {
    if let Some(status) = status {
        status.clear();
    }

    let name = field_value(form, "#name");
    let email = field_value(form, "#email");
    let message = field_value(form, "#message");

    if let Err(error) = validate(&name, &email, &message) {
        show_status(status, error.user_message(), StatusKind::Error);
        return;
    }
    let Some(client) = EmailClient::from_global() else {
        show_status(
            status,
            SubmitError::ServiceUnavailable.user_message(),
            StatusKind::Error,
        );
        return;
    };

    show_status(status, MSG_SENDING, StatusKind::Neutral);
    let form = form.clone();
    let status = status.cloned();
    spawn_local(async move {
        let payload = MessagePayload {
            from_name: name,
            from_email: email,
            message,
        };
        match client.send(&payload).await {
            Ok(response) => {
                console::log_2(&JsValue::from_str("EmailJS success:"), &response);
                show_status(status.as_ref(), MSG_SENT, StatusKind::Success);
                form.reset();
            }
            Err(error) => {
                console::error_2(&JsValue::from_str("EmailJS error:"), &error);
                show_status(status.as_ref(), MSG_SEND_FAILED, StatusKind::Error);
            }
        }
    });
}

/// AJAX contact form. The status line is optional; missing fields simply
/// read back as empty and trip validation.
pub struct ContactForm {
    _submit: EventListener,
}

impl ContactForm {
    pub fn mount(document: &Document) -> Option<Self> {
        let form: HtmlFormElement = document
            .get_element_by_id("contact-form")?
            .dyn_into()
            .ok()?;
        let status = document
            .get_element_by_id("contact-status")
            .map(|element| StatusLine { element });

        let submit = EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            {
                let form = form.clone();
                move |event| {
                    event.prevent_default();
                    handle_submit(&form, status.as_ref());
                }
            },
        );

        Some(Self { _submit: submit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("jane.doe@mail.example.com"));
        assert!(is_valid_email("user+tag@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn empty_fields_win_over_email_format() {
        assert_eq!(
            validate("", "not-an-email", "hello"),
            Err(SubmitError::MissingFields)
        );
        assert_eq!(validate("Jane", "", ""), Err(SubmitError::MissingFields));
    }

    #[test]
    fn status_messages_match_their_errors() {
        assert_eq!(
            SubmitError::MissingFields.user_message(),
            "Please fill in your name, email, and message."
        );
        assert_eq!(
            SubmitError::InvalidEmail.user_message(),
            "Please enter a valid email address."
        );
        assert!(
            SubmitError::ServiceUnavailable
                .user_message()
                .starts_with("Email service is currently unavailable.")
        );
    }

    #[test]
    fn only_error_and_success_add_a_styling_class() {
        assert_eq!(StatusKind::Neutral.css_class(), None);
        assert_eq!(StatusKind::Error.css_class(), Some("error"));
        assert_eq!(StatusKind::Success.css_class(), Some("success"));
    }

    #[test]
    fn email_format_checked_after_presence() {
        assert_eq!(
            validate("Jane", "not-an-email", "hello"),
            Err(SubmitError::InvalidEmail)
        );
        assert_eq!(validate("Jane", "jane@mail.com", "hello"), Ok(()));
    }
}
